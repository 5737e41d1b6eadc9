use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::{ExplorerError, ExplorerResult};
use crate::structs::config::config::Config;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

pub struct ConfigManager;

impl ConfigManager {
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or the default location. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> ExplorerResult<Config> {
        let config_path = path.map_or_else(Self::default_config_path, Path::to_path_buf);

        if !config_path.exists() {
            if path.is_some() {
                return Err(ExplorerError::ConfigurationFileError {
                    path: config_path.display().to_string(),
                    reason: "file does not exist".to_string(),
                });
            }
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }

        log::debug!("📋 Loading config from: {}", config_path.display());
        let content = fs::read_to_string(&config_path).map_err(|e| ExplorerError::ConfigurationFileError {
            path: config_path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn create_sample_config(path: Option<&Path>) -> ExplorerResult<PathBuf> {
        let sample_config = r#"# Issue Explorer Configuration

[workspace]
# Directory holding the analysed projects, one sub directory per project
root = "."

# Where markers are kept between runs, relative to root unless absolute
state_file = ".issue-explorer/markers.json"

# Skip issues whose file is no longer on disk
require_existing_files = true

[explorer]
# Group levels, outermost first: severity, rule, kind, classification, project, folder, file
grouping = ["severity", "rule", "file"]

# Collapse the tree after every full reload
collapse_after_rebuild = true

# Open generated reports instead of sources when an issue has one
show_reports = true

[logging]
# off, error, warn, info, debug or trace (RUST_LOG takes precedence)
level = "info"
"#;
        let config_file_path = path.map_or_else(Self::default_config_path, Path::to_path_buf);

        if config_file_path.exists() {
            return Err(ExplorerError::ConfigurationFileError {
                path: config_file_path.display().to_string(),
                reason: "file already exists".to_string(),
            });
        }

        if let Some(config_file_dir_path) = config_file_path.parent() {
            fs::create_dir_all(config_file_dir_path)?;
        }
        fs::write(&config_file_path, sample_config)
            .map_err(|e| ExplorerError::file_error(&config_file_path.display().to_string(), "write", &e.to_string()))?;
        log::info!("✅ Created sample config at: {}", config_file_path.display());
        Ok(config_file_path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let root = config.workspace_root();
        if !root.is_dir() {
            errors.push(format!("Workspace root does not exist: {}", root.display()));
        }

        if config.workspace.state_file.trim().is_empty() {
            errors.push("Workspace state_file must not be empty".to_string());
        }

        let mut levels = HashSet::new();
        for level in &config.explorer.grouping {
            if !levels.insert(level) {
                errors.push(format!("Duplicate grouping level: {}", level));
            }
        }

        if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Unknown log level '{}', expected one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
