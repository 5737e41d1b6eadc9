use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::structs::config::explorer_config::ExplorerConfig;
use crate::structs::config::logging_config::LoggingConfig;
use crate::structs::config::workspace_config::WorkspaceConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub explorer: ExplorerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn workspace_root(&self) -> PathBuf {
        PathBuf::from(&self.workspace.root)
    }

    pub fn state_file_path(&self) -> PathBuf {
        let state_file = Path::new(&self.workspace.state_file);
        if state_file.is_absolute() {
            state_file.to_path_buf()
        } else {
            self.workspace_root().join(state_file)
        }
    }
}
