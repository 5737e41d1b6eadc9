pub mod config;
pub mod explorer_config;
pub mod logging_config;
pub mod workspace_config;
