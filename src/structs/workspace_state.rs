use std::path::Path;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::{ExplorerError, ExplorerResult};
use crate::structs::issue::Issue;
use crate::structs::marker::Marker;

/// On-disk snapshot of the marker store and the issues the markers point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub saved_at: DateTime<Utc>,
    pub next_marker_id: u64,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub issues: Vec<Arc<Issue>>,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self {
            saved_at: Utc::now(),
            next_marker_id: 1,
            markers: Vec::new(),
            issues: Vec::new(),
        }
    }
}

impl WorkspaceState {
    pub fn load_from_file(state_path: &Path) -> ExplorerResult<Option<Self>> {
        if !state_path.exists() {
            log::info!("📋 No marker state found at {}, starting empty", state_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(state_path)
            .map_err(|e| ExplorerError::file_error(&state_path.display().to_string(), "read", &e.to_string()))?;
        let state: Self = serde_json::from_str(&content)?;
        log::debug!("Loaded {} markers and {} issues from {}", state.markers.len(), state.issues.len(), state_path.display());
        Ok(Some(state))
    }

    pub fn save_to_file(&self, state_path: &Path) -> ExplorerResult<()> {
        if let Some(parent) = state_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(state_path, content)
            .map_err(|e| ExplorerError::file_error(&state_path.display().to_string(), "write", &e.to_string()))?;

        log::info!("💾 Saved {} markers to {}", self.markers.len(), state_path.display());
        Ok(())
    }
}
