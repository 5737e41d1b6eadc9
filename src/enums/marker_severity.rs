use serde::{Deserialize, Serialize};

/// Problem severity stored on a marker, independent of the analysis engine's own severity names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarkerSeverity {
    Info,
    Warning,
    Error,
}

impl MarkerSeverity {
    /// Maps an analysis severity ("mandatory", "optional", "potential", ...) onto a marker severity.
    pub fn from_issue_severity(severity: &str) -> Self {
        match severity.trim().to_ascii_lowercase().as_str() {
            "mandatory" | "cloud-mandatory" | "critical" => MarkerSeverity::Error,
            "optional" | "potential" => MarkerSeverity::Warning,
            _ => MarkerSeverity::Info,
        }
    }

    pub fn as_int(&self) -> i64 {
        match self {
            MarkerSeverity::Info => 0,
            MarkerSeverity::Warning => 1,
            MarkerSeverity::Error => 2,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(MarkerSeverity::Info),
            1 => Some(MarkerSeverity::Warning),
            2 => Some(MarkerSeverity::Error),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarkerSeverity::Info => "Info",
            MarkerSeverity::Warning => "Warning",
            MarkerSeverity::Error => "Error",
        }
    }
}
