use uuid::Uuid;
use crate::config::constants::{DEFAULT_LOG_LEVEL, DEFAULT_STATE_FILE};
use crate::enums::group_by::GroupBy;

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_workspace_root() -> String {
        ".".to_string()
    }

    pub fn default_state_file() -> String {
        DEFAULT_STATE_FILE.to_string()
    }

    pub fn default_require_existing_files() -> bool {
        true
    }

    pub fn default_grouping() -> Vec<GroupBy> {
        vec![GroupBy::Severity, GroupBy::Rule, GroupBy::File]
    }

    pub fn default_collapse_after_rebuild() -> bool {
        true
    }

    pub fn default_show_reports() -> bool {
        true
    }

    pub fn default_log_level() -> String {
        DEFAULT_LOG_LEVEL.to_string()
    }

    pub fn default_configuration_name() -> String {
        "default".to_string()
    }

    pub fn new_issue_id() -> String {
        Uuid::new_v4().to_string()
    }
}
