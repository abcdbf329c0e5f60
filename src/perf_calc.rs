//! Derives per-scenario improvement percentages from the measurement rows.
//!
//! Pure functions: results depend only on the rows and the selected metric,
//! so re-deriving on every metric change is cheap and always consistent.

use serde::Serialize;

use crate::perf::{
    scenario_order, AnalysisError, Improvement, Measurement, Metric, Scenario, Version,
};

/// Everything the dashboard shows for one selected metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementReport {
    pub metric: Metric,
    pub improvements: Vec<Improvement>,
    pub average_improvement: f64,
}

/// Percentage change of `metric` between the Original and Optimized row of
/// every scenario, in the order scenarios first appear in `rows`.
///
/// Positive means the Optimized version used less of the metric.
pub fn compute_improvements(
    rows: &[Measurement],
    metric: Metric,
) -> Result<Vec<Improvement>, AnalysisError> {
    let scenarios = scenario_order(rows);

    let mut improvements = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let orig = metric_value(rows, scenario, Version::Original, metric)?;
        let opt = metric_value(rows, scenario, Version::Optimized, metric)?;
        if orig == 0.0 {
            return Err(AnalysisError::DivisionByZero { scenario });
        }
        improvements.push(Improvement {
            scenario,
            improvement_percent: (orig - opt) / orig * 100.0,
        });
    }
    Ok(improvements)
}

/// Unweighted mean of the per-scenario improvements.
pub fn average_improvement(improvements: &[Improvement]) -> f64 {
    if improvements.is_empty() {
        return 0.0;
    }
    let sum: f64 = improvements.iter().map(|i| i.improvement_percent).sum();
    sum / improvements.len() as f64
}

pub fn compute_report(
    rows: &[Measurement],
    metric: Metric,
) -> Result<ImprovementReport, AnalysisError> {
    let improvements = compute_improvements(rows, metric)?;
    let average_improvement = average_improvement(&improvements);
    Ok(ImprovementReport {
        metric,
        improvements,
        average_improvement,
    })
}

fn metric_value(
    rows: &[Measurement],
    scenario: Scenario,
    version: Version,
    metric: Metric,
) -> Result<f64, AnalysisError> {
    rows.iter()
        .find(|m| m.scenario == scenario && m.version == version)
        .map(|m| m.value(metric))
        .ok_or(AnalysisError::MissingPair { scenario, version })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf_data::dataset;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn percent_for(improvements: &[Improvement], scenario: Scenario) -> f64 {
        improvements
            .iter()
            .find(|i| i.scenario == scenario)
            .expect("scenario missing from results")
            .improvement_percent
    }

    #[test]
    fn processing_time_improvements_match_the_fixed_dataset() {
        let improvements = compute_improvements(dataset(), Metric::ProcessingTime).unwrap();
        assert_eq!(improvements.len(), 3);
        assert_close(percent_for(&improvements, Scenario::Small), 21.73913043);
        assert_close(percent_for(&improvements, Scenario::Medium), 53.6);
        assert_close(percent_for(&improvements, Scenario::Large), 65.05681818);
    }

    #[test]
    fn memory_improvements_match_the_fixed_dataset() {
        let improvements = compute_improvements(dataset(), Metric::MemoryUsage).unwrap();
        assert_close(percent_for(&improvements, Scenario::Small), 36.66666667);
        assert_close(percent_for(&improvements, Scenario::Medium), 60.0);
        assert_close(percent_for(&improvements, Scenario::Large), 73.33333333);
    }

    #[test]
    fn connection_improvements_match_the_fixed_dataset() {
        let improvements = compute_improvements(dataset(), Metric::DbConnections).unwrap();
        assert_close(percent_for(&improvements, Scenario::Small), 80.0);
        assert_close(percent_for(&improvements, Scenario::Medium), 96.0);
        assert_close(percent_for(&improvements, Scenario::Large), 98.0);
    }

    #[test]
    fn average_is_the_unweighted_mean() {
        let report = compute_report(dataset(), Metric::ProcessingTime).unwrap();
        assert_close(report.average_improvement, 46.79864954);
    }

    #[test]
    fn scenarios_come_back_in_first_seen_order() {
        let improvements = compute_improvements(dataset(), Metric::ProcessingTime).unwrap();
        let order: Vec<Scenario> = improvements.iter().map(|i| i.scenario).collect();
        assert_eq!(order, vec![Scenario::Small, Scenario::Medium, Scenario::Large]);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let first = compute_improvements(dataset(), Metric::MemoryUsage).unwrap();
        let second = compute_improvements(dataset(), Metric::MemoryUsage).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn row_order_does_not_change_per_scenario_results() {
        let mut shuffled: Vec<Measurement> = dataset().to_vec();
        shuffled.reverse();
        shuffled.swap(1, 4);

        let baseline = compute_improvements(dataset(), Metric::DbConnections).unwrap();
        let permuted = compute_improvements(&shuffled, Metric::DbConnections).unwrap();

        for scenario in [Scenario::Small, Scenario::Medium, Scenario::Large] {
            assert_eq!(
                percent_for(&baseline, scenario),
                percent_for(&permuted, scenario),
                "{scenario}"
            );
        }
    }

    #[test]
    fn zero_original_value_is_a_division_by_zero_error() {
        let mut rows: Vec<Measurement> = dataset().to_vec();
        rows[0].db_connections = 0;

        let err = compute_improvements(&rows, Metric::DbConnections).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DivisionByZero {
                scenario: Scenario::Small
            }
        );
    }

    #[test]
    fn missing_optimized_row_is_a_missing_pair_error() {
        let rows: Vec<Measurement> = dataset()
            .iter()
            .filter(|m| !(m.scenario == Scenario::Medium && m.version == Version::Optimized))
            .copied()
            .collect();

        let err = compute_improvements(&rows, Metric::ProcessingTime).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MissingPair {
                scenario: Scenario::Medium,
                version: Version::Optimized
            }
        );
    }

    #[test]
    fn report_serializes_with_display_labels() {
        let report = compute_report(dataset(), Metric::DbConnections).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["metric"], "DB Connections");
        assert_eq!(json["improvements"][0]["scenario"], "Small (1 file)");
        assert_eq!(json["improvements"][0]["improvement_percent"], 80.0);
    }
}
