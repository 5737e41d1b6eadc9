use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::structs::marker::MarkerId;

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
pub enum ExplorerError {
    // Projection errors
    #[error("No workspace resource for issue '{issue_id}' (file: {file_path})")]
    UnresolvableResource {
        issue_id: String,
        file_path: String,
    },
    #[error("Issue '{issue_id}' already has {marker}")]
    DuplicateIssue {
        issue_id: String,
        marker: MarkerId,
    },
    #[error("Marker store {operation} failed{}: {reason}", .marker.as_ref().map(|m| format!(" for {}", m)).unwrap_or_default())]
    StoreWriteFailure {
        operation: String,
        marker: Option<MarkerId>,
        reason: String,
    },
    #[error("Marker {marker} is no longer present in the issue tree")]
    StaleIdentity {
        marker: MarkerId,
    },
    #[error("Marker generation was cancelled after {written} of {total} issues")]
    InterruptedBatch {
        written: usize,
        total: usize,
    },

    // Configuration errors
    #[error("Configuration error: {message}{}", .field.as_ref().map(|f| format!(" (field: {})", f)).unwrap_or_default())]
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    #[error("Configuration file error at '{path}': {reason}")]
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // File operation errors
    #[error("File operation '{operation}' failed for '{file_path}': {reason}")]
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    #[error("Parse error in {content_type}: {reason}{}", .line_number.as_ref().map(|l| format!(" (line {})", l)).unwrap_or_default())]
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // System errors
    #[error("System error during {operation}: {reason}")]
    SystemError {
        operation: String,
        reason: String,
    },
}

impl ExplorerError {
    pub fn unresolvable(issue_id: &str, file_path: &str) -> Self {
        Self::UnresolvableResource {
            issue_id: issue_id.to_string(),
            file_path: file_path.to_string(),
        }
    }

    pub fn duplicate_issue(issue_id: &str, marker: MarkerId) -> Self {
        Self::DuplicateIssue {
            issue_id: issue_id.to_string(),
            marker,
        }
    }

    pub fn store_error(operation: &str, marker: Option<MarkerId>, reason: &str) -> Self {
        Self::StoreWriteFailure {
            operation: operation.to_string(),
            marker,
            reason: reason.to_string(),
        }
    }

    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, line_number: Option<usize>, reason: &str) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            line_number,
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Recoverable errors only ever cost a single issue or a single event.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnresolvableResource { .. } => true,
            Self::DuplicateIssue { .. } => true,
            Self::StoreWriteFailure { .. } => true,
            Self::StaleIdentity { .. } => true,
            Self::InterruptedBatch { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::ParseError { .. } => false,
            Self::ConfigurationFileError { .. } => false,
            Self::FileOperationError { .. } => false,
            Self::SystemError { .. } => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::FileOperationError { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::StoreWriteFailure { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::InterruptedBatch { .. } => ErrorSeverity::Medium,
            Self::UnresolvableResource { .. } => ErrorSeverity::Low,
            Self::DuplicateIssue { .. } => ErrorSeverity::Low,
            Self::StaleIdentity { .. } => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ConfigurationError { suggestion, .. } => suggestion.clone(),
            Self::ConfigurationFileError { .. } => Some("Check file permissions and TOML syntax".to_string()),
            Self::UnresolvableResource { .. } => Some("Import the project containing this file into the workspace".to_string()),
            Self::DuplicateIssue { .. } => Some("Issue ids must be unique within a workspace".to_string()),
            Self::InterruptedBatch { .. } => Some("Run the import again to regenerate the remaining markers".to_string()),
            Self::ParseError { .. } => Some("Check the format and syntax of the input".to_string()),
            _ => None,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for explorer operations
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Log an error with its severity and, when there is one, a suggestion.
    pub fn handle_error(error: &ExplorerError) {
        let severity = error.severity();

        match severity {
            ErrorSeverity::Low => log::warn!("[{}] {}", severity.name(), error),
            _ => log::error!("[{}] {}", severity.name(), error),
        }

        if let Some(suggestion) = error.suggestion() {
            log::info!("💡 {}", suggestion);
        }
    }

    /// Summarise the per-item errors of a batch operation, highest severity first.
    pub fn handle_multiple_errors(errors: &[ExplorerError], context: &str) {
        if errors.is_empty() {
            return;
        }

        log::warn!("⚠️ {} problems occurred during {}:", errors.len(), context);

        let mut by_severity: std::collections::BTreeMap<ErrorSeverity, Vec<&ExplorerError>> = std::collections::BTreeMap::new();

        for error in errors {
            by_severity.entry(error.severity()).or_default().push(error);
        }

        for (severity, severity_errors) in by_severity.iter().rev() {
            log::warn!("{} ({} errors):", severity.name(), severity_errors.len());
            for (i, error) in severity_errors.iter().enumerate() {
                log::warn!("  {}. {}", i + 1, error);
            }
        }
    }
}

impl From<std::io::Error> for ExplorerError {
    fn from(error: std::io::Error) -> Self {
        ExplorerError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(error: serde_json::Error) -> Self {
        ExplorerError::parse_error("JSON", Some(error.line()), &error.to_string())
    }
}

impl From<toml::de::Error> for ExplorerError {
    fn from(error: toml::de::Error) -> Self {
        ExplorerError::parse_error("TOML", None, error.message())
    }
}
