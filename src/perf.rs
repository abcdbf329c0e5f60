use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Workload size used as the grouping key for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scenario {
    #[serde(rename = "Small (1 file)")]
    Small,
    #[serde(rename = "Medium (5 files)")]
    Medium,
    #[serde(rename = "Large (10 files)")]
    Large,
}

impl Scenario {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Small (1 file)",
            Self::Medium => "Medium (5 files)",
            Self::Large => "Large (10 files)",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side of the before/after comparison a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Version {
    Original,
    Optimized,
}

impl Version {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Optimized => "Optimized",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three measured quantities carried by every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    #[serde(rename = "Processing Time (s)")]
    ProcessingTime,
    #[serde(rename = "Memory Usage (MB)")]
    MemoryUsage,
    #[serde(rename = "DB Connections")]
    DbConnections,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Self::ProcessingTime, Self::MemoryUsage, Self::DbConnections];

    /// Parse from the stable slug or the display label, case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "processing_time" | "processing time (s)" => Some(Self::ProcessingTime),
            "memory_usage" | "memory usage (mb)" => Some(Self::MemoryUsage),
            "db_connections" | "db connections" => Some(Self::DbConnections),
            _ => None,
        }
    }

    /// Identifier used on the CLI and in query strings.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::ProcessingTime => "processing_time",
            Self::MemoryUsage => "memory_usage",
            Self::DbConnections => "db_connections",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProcessingTime => "Processing Time (s)",
            Self::MemoryUsage => "Memory Usage (MB)",
            Self::DbConnections => "DB Connections",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fact in the dataset: a scenario measured under one version.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub scenario: Scenario,
    pub version: Version,
    pub processing_time_s: f64,
    pub memory_usage_mb: f64,
    pub db_connections: u32,
    pub files: u32,
    pub file_size_mb: u32,
}

impl Measurement {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::ProcessingTime => self.processing_time_s,
            Metric::MemoryUsage => self.memory_usage_mb,
            Metric::DbConnections => f64::from(self.db_connections),
        }
    }
}

/// Scenarios in the order they first appear in `rows`. Grouping is by
/// scenario identity, so permuting the rows never changes per-scenario
/// results, only the order they are reported in.
pub fn scenario_order(rows: &[Measurement]) -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = Vec::new();
    for row in rows {
        if !scenarios.contains(&row.scenario) {
            scenarios.push(row.scenario);
        }
    }
    scenarios
}

/// Derived record: how much less of a metric the Optimized version used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Improvement {
    pub scenario: Scenario,
    pub improvement_percent: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("unknown metric \"{0}\" (expected processing_time, memory_usage or db_connections)")]
    InvalidMetric(String),

    #[error("scenario {scenario} has no {version} row")]
    MissingPair { scenario: Scenario, version: Version },

    #[error("original value for {scenario} is zero, improvement is undefined")]
    DivisionByZero { scenario: Scenario },
}
