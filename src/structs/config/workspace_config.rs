use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkspaceConfig {
    #[serde(default = "ConfigHelper::default_workspace_root")]
    pub root: String,

    /// Marker state file, relative to `root` unless absolute.
    #[serde(default = "ConfigHelper::default_state_file")]
    pub state_file: String,

    /// Skip issues whose file no longer exists on disk.
    #[serde(default = "ConfigHelper::default_require_existing_files")]
    pub require_existing_files: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: ConfigHelper::default_workspace_root(),
            state_file: ConfigHelper::default_state_file(),
            require_existing_files: ConfigHelper::default_require_existing_files(),
        }
    }
}
