use serde::{Deserialize, Serialize};
use crate::enums::group_by::GroupBy;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExplorerConfig {
    #[serde(default = "ConfigHelper::default_grouping")]
    pub grouping: Vec<GroupBy>,

    #[serde(default = "ConfigHelper::default_collapse_after_rebuild")]
    pub collapse_after_rebuild: bool,

    #[serde(default = "ConfigHelper::default_show_reports")]
    pub show_reports: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            grouping: ConfigHelper::default_grouping(),
            collapse_after_rebuild: ConfigHelper::default_collapse_after_rebuild(),
            show_reports: ConfigHelper::default_show_reports(),
        }
    }
}
