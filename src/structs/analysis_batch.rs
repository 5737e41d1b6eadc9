use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::structs::issue::Issue;

/// Results of one analysis run, as produced by the analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBatch {
    pub configuration: String,
    #[serde(default)]
    pub inputs: Vec<AnalysisInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub name: String,
    #[serde(default)]
    pub result: Option<AnalysisResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub issues: Vec<Arc<Issue>>,
}

impl AnalysisBatch {
    pub fn new(configuration: &str) -> Self {
        Self {
            configuration: configuration.to_string(),
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, name: &str, issues: Vec<Arc<Issue>>) -> Self {
        self.inputs.push(AnalysisInput {
            name: name.to_string(),
            result: Some(AnalysisResult { issues }),
        });
        self
    }

    /// Issues of every input that produced a result, in input order.
    pub fn issues(&self) -> impl Iterator<Item = &Arc<Issue>> {
        self.inputs
            .iter()
            .filter_map(|input| input.result.as_ref())
            .flat_map(|result| result.issues.iter())
    }

    pub fn total_issue_count(&self) -> usize {
        self.inputs
            .iter()
            .filter_map(|input| input.result.as_ref())
            .map(|result| result.issues.len())
            .sum()
    }
}
