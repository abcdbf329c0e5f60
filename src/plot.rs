//! SVG chart rendering for the dashboard.
//!
//! Both charts render into an owned string so the same code path serves the
//! static report bundle and the live chart endpoints.

use plotters::prelude::*;

use crate::perf::{scenario_order, Improvement, Measurement, Metric, Version};

const FONT: &str = "Fira Code";
const PLOT_WIDTH: u32 = 800;
const PLOT_HEIGHT: u32 = 400;

const ORIGINAL_COLOR: RGBColor = RGBColor(255, 155, 155);
const OPTIMIZED_COLOR: RGBColor = RGBColor(155, 255, 155);
const IMPROVEMENT_COLOR: RGBColor = RGBColor(76, 175, 80);

pub type PlotResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn version_color(version: Version) -> RGBColor {
    match version {
        Version::Original => ORIGINAL_COLOR,
        Version::Optimized => OPTIMIZED_COLOR,
    }
}

/// Grouped bar chart: one pair of Original/Optimized bars per scenario.
pub fn comparison_chart_svg(rows: &[Measurement], metric: Metric) -> PlotResult<String> {
    let scenarios = scenario_order(rows);
    let y_max = rows
        .iter()
        .map(|m| m.value(metric))
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.15;
    let x_max = scenarios.len() as f64 - 0.5;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(format!("{} Comparison by Scenario", metric), (FONT, 20))
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(-0.5f64..x_max, 0f64..y_max)?;

        let labels = scenarios.clone();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| {
                let i = x.round();
                if (x - i).abs() < 0.01 && i >= 0.0 && (i as usize) < labels.len() {
                    labels[i as usize].label().to_string()
                } else {
                    String::new()
                }
            })
            .y_desc(metric.label())
            .x_desc("Scenario")
            .draw()?;

        for version in [Version::Original, Version::Optimized] {
            let color = version_color(version);
            let offset = match version {
                Version::Original => -0.32,
                Version::Optimized => 0.02,
            };

            chart
                .draw_series(scenarios.iter().enumerate().filter_map(|(i, scenario)| {
                    rows.iter()
                        .find(|m| m.scenario == *scenario && m.version == version)
                        .map(|m| {
                            let x0 = i as f64 + offset;
                            Rectangle::new([(x0, 0.0), (x0 + 0.3, m.value(metric))], color.filled())
                        })
                }))?
                .label(version.label())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 16, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, 13))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }

    Ok(svg)
}

/// Line chart of per-scenario improvement percentages, with point markers.
pub fn improvement_chart_svg(improvements: &[Improvement]) -> PlotResult<String> {
    let y_min = improvements
        .iter()
        .map(|i| i.improvement_percent)
        .fold(0.0_f64, f64::min);
    let y_max = improvements
        .iter()
        .map(|i| i.improvement_percent)
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.15;
    let x_max = improvements.len() as f64 - 0.5;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("Percentage Improvement by Scenario", (FONT, 20))
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)?;

        let labels: Vec<_> = improvements.iter().map(|i| i.scenario).collect();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| {
                let i = x.round();
                if (x - i).abs() < 0.01 && i >= 0.0 && (i as usize) < labels.len() {
                    labels[i as usize].label().to_string()
                } else {
                    String::new()
                }
            })
            .y_label_formatter(&|v| format!("{:.0}%", v))
            .y_desc("Improvement (%)")
            .x_desc("Scenario")
            .draw()?;

        chart.draw_series(LineSeries::new(
            improvements
                .iter()
                .enumerate()
                .map(|(i, imp)| (i as f64, imp.improvement_percent)),
            IMPROVEMENT_COLOR.stroke_width(2),
        ))?;

        chart.draw_series(improvements.iter().enumerate().map(|(i, imp)| {
            Circle::new((i as f64, imp.improvement_percent), 4, IMPROVEMENT_COLOR.filled())
        }))?;

        root.present()?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf_calc::compute_improvements;
    use crate::perf_data::dataset;

    #[test]
    fn comparison_chart_renders_svg_with_both_versions() {
        let svg = comparison_chart_svg(dataset(), Metric::MemoryUsage).unwrap();
        assert!(svg.starts_with("<?xml") || svg.starts_with("<svg"));
        assert!(svg.contains("Memory Usage (MB) Comparison by Scenario"));
        assert!(svg.contains("Original"));
        assert!(svg.contains("Optimized"));
    }

    #[test]
    fn improvement_chart_renders_svg_with_scenario_labels() {
        let improvements = compute_improvements(dataset(), Metric::ProcessingTime).unwrap();
        let svg = improvement_chart_svg(&improvements).unwrap();
        assert!(svg.contains("Percentage Improvement by Scenario"));
        assert!(svg.contains("Small (1 file)"));
        assert!(svg.contains("Large (10 files)"));
    }
}
