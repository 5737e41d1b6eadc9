use serde::{Deserialize, Serialize};
use crate::errors::ExplorerError;
use crate::structs::marker::MarkerId;

/// Outcome of projecting one analysis batch onto markers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub configuration: String,
    pub total: usize,
    pub processed: usize,
    pub created: Vec<MarkerId>,
    /// Issues without a workspace resource, or whose id already has a marker.
    pub skipped: Vec<ExplorerError>,
    /// Issues whose marker could not be written.
    pub failures: Vec<ExplorerError>,
}

impl ProjectionSummary {
    pub fn new(configuration: &str, total: usize) -> Self {
        Self {
            configuration: configuration.to_string(),
            total,
            ..Default::default()
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty() || !self.failures.is_empty()
    }

    pub fn problems(&self) -> Vec<ExplorerError> {
        self.skipped.iter().chain(self.failures.iter()).cloned().collect()
    }
}
