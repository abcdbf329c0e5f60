use std::sync::LazyLock;

use crate::perf::{Measurement, Scenario, Version};

/// Fixed benchmark dataset: one Original and one Optimized row per scenario.
/// Constructed once and shared for the lifetime of the process.
pub static PERF_DATA: LazyLock<Vec<Measurement>> = LazyLock::new(|| {
    vec![
        Measurement { scenario: Scenario::Small, version: Version::Original, processing_time_s: 2.3, memory_usage_mb: 150.0, db_connections: 5, files: 1, file_size_mb: 1 },
        Measurement { scenario: Scenario::Medium, version: Version::Original, processing_time_s: 12.5, memory_usage_mb: 450.0, db_connections: 25, files: 5, file_size_mb: 10 },
        Measurement { scenario: Scenario::Large, version: Version::Original, processing_time_s: 35.2, memory_usage_mb: 1200.0, db_connections: 50, files: 10, file_size_mb: 50 },
        Measurement { scenario: Scenario::Small, version: Version::Optimized, processing_time_s: 1.8, memory_usage_mb: 95.0, db_connections: 1, files: 1, file_size_mb: 1 },
        Measurement { scenario: Scenario::Medium, version: Version::Optimized, processing_time_s: 5.8, memory_usage_mb: 180.0, db_connections: 1, files: 5, file_size_mb: 10 },
        Measurement { scenario: Scenario::Large, version: Version::Optimized, processing_time_s: 12.3, memory_usage_mb: 320.0, db_connections: 1, files: 10, file_size_mb: 50 },
    ]
});

pub fn dataset() -> &'static [Measurement] {
    &PERF_DATA
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf::Scenario;

    #[test]
    fn every_scenario_has_exactly_one_row_per_version() {
        for scenario in [Scenario::Small, Scenario::Medium, Scenario::Large] {
            for version in [Version::Original, Version::Optimized] {
                let count = dataset()
                    .iter()
                    .filter(|m| m.scenario == scenario && m.version == version)
                    .count();
                assert_eq!(count, 1, "{scenario} / {version}");
            }
        }
    }

    #[test]
    fn repeated_calls_return_the_same_snapshot() {
        assert_eq!(dataset(), dataset());
        assert_eq!(dataset().len(), 6);
    }
}
