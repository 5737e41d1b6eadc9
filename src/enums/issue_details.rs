use serde::{Deserialize, Serialize};
use crate::enums::marker_kind::MarkerKind;
use crate::structs::classification_details::ClassificationDetails;
use crate::structs::hint_details::HintDetails;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IssueDetails {
    Hint(HintDetails),
    Classification(ClassificationDetails),
}

impl IssueDetails {
    pub fn kind(&self) -> MarkerKind {
        match self {
            IssueDetails::Hint(_) => MarkerKind::Hint,
            IssueDetails::Classification(_) => MarkerKind::Classification,
        }
    }
}
