use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationDetails {
    pub classification: String,
    #[serde(default)]
    pub description: String,
}
