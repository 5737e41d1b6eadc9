// Marker types
pub const HINT_MARKER_TYPE: &str = "issue-explorer.hint";
pub const CLASSIFICATION_MARKER_TYPE: &str = "issue-explorer.classification";

pub const ISSUE_URI_SCHEME: &str = "issue://";

// Marker attribute keys
pub const ATTR_CONFIGURATION_NAME: &str = "configuration-name";
pub const ATTR_ELEMENT_HANDLE: &str = "element-handle";
pub const ATTR_SOURCE_URI: &str = "source-uri";
pub const ATTR_SEVERITY: &str = "severity";
pub const ATTR_ISSUE_SEVERITY: &str = "issue-severity";
pub const ATTR_RULE_ID: &str = "rule-id";
pub const ATTR_EFFORT: &str = "effort";
pub const ATTR_MESSAGE: &str = "message";
pub const ATTR_LINE_NUMBER: &str = "line-number";
pub const ATTR_CHAR_START: &str = "char-start";
pub const ATTR_CHAR_END: &str = "char-end";
pub const ATTR_USER_EDITABLE: &str = "user-editable";
pub const ATTR_TITLE: &str = "title";
pub const ATTR_HINT: &str = "hint";
pub const ATTR_LINE: &str = "line";
pub const ATTR_COLUMN: &str = "column";
pub const ATTR_LENGTH: &str = "length";
pub const ATTR_SOURCE_SNIPPET: &str = "source-snippet";
pub const ATTR_CLASSIFICATION: &str = "classification";
pub const ATTR_DESCRIPTION: &str = "description";

pub const GENERATE_ISSUES_TASK: &str = "Generating migration issues";

// Configuration
pub const CONFIG_DIR_NAME: &str = ".issue-explorer";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_STATE_FILE: &str = ".issue-explorer/markers.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const PROGRESS_LOG_STEP_PERCENT: usize = 10;

pub const UNKNOWN_GROUP_LABEL: &str = "(none)";
