use std::sync::atomic::{AtomicBool, Ordering};
use serde::{Deserialize, Serialize};
use crate::config::constants::ISSUE_URI_SCHEME;
use crate::enums::issue_details::IssueDetails;
use crate::enums::marker_kind::MarkerKind;
use crate::helpers::config_helper::ConfigHelper;

/// One finding emitted by the analysis engine.
///
/// Issues are shared as `Arc<Issue>` between the analysis batch, the registry and the tree.
/// The only mutable state is the `fixed` flag.
#[derive(Debug, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default = "ConfigHelper::new_issue_id")]
    pub id: String,
    pub severity: String,
    #[serde(default)]
    pub rule_id: String,
    #[serde(default)]
    pub effort: i64,
    pub title: String,
    pub file_absolute_path: String,
    #[serde(default)]
    pub generated_report_location: Option<String>,
    #[serde(flatten)]
    pub details: IssueDetails,
    #[serde(default)]
    fixed: AtomicBool,
}

impl Issue {
    pub fn new(id: &str, severity: &str, rule_id: &str, title: &str, file_absolute_path: &str, details: IssueDetails) -> Self {
        Self {
            id: id.to_string(),
            severity: severity.to_string(),
            rule_id: rule_id.to_string(),
            effort: 0,
            title: title.to_string(),
            file_absolute_path: file_absolute_path.to_string(),
            generated_report_location: None,
            details,
            fixed: AtomicBool::new(false),
        }
    }

    /// Stable URI written to the marker so it can be traced back to this issue.
    pub fn uri(&self) -> String {
        format!("{}{}", ISSUE_URI_SCHEME, self.id)
    }

    pub fn kind(&self) -> MarkerKind {
        self.details.kind()
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.load(Ordering::Acquire)
    }

    pub fn set_fixed(&self, fixed: bool) {
        self.fixed.store(fixed, Ordering::Release);
    }

    /// Same finding, compared by identity rather than by field values.
    pub fn same_as(&self, other: &Issue) -> bool {
        self.id == other.id
    }
}
