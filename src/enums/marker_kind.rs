use std::fmt;
use serde::{Deserialize, Serialize};
use crate::config::constants::{CLASSIFICATION_MARKER_TYPE, HINT_MARKER_TYPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Hint,
    Classification,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 2] = [MarkerKind::Hint, MarkerKind::Classification];

    pub fn marker_type(&self) -> &'static str {
        match self {
            MarkerKind::Hint => HINT_MARKER_TYPE,
            MarkerKind::Classification => CLASSIFICATION_MARKER_TYPE,
        }
    }

    pub fn group_label(&self) -> &'static str {
        match self {
            MarkerKind::Hint => "Hints",
            MarkerKind::Classification => "Classifications",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker_type())
    }
}
