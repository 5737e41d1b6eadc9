use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintDetails {
    #[serde(default)]
    pub line_number: i64,
    #[serde(default)]
    pub column: i64,
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub source_snippet: String,
    #[serde(default)]
    pub hint: String,
}
