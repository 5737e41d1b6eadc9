use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::constants::{
    ATTR_LINE_NUMBER, ATTR_MESSAGE, ATTR_RULE_ID, ATTR_SEVERITY, ATTR_SOURCE_URI,
    ATTR_USER_EDITABLE,
};
use crate::enums::attribute_value::AttributeValue;
use crate::enums::marker_kind::MarkerKind;
use crate::enums::marker_severity::MarkerSeverity;
use crate::structs::resource_path::ResourcePath;

pub type Attributes = BTreeMap<String, AttributeValue>;

/// Store-assigned marker identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// Accepts both `marker-7` and `7`.
impl FromStr for MarkerId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.trim().trim_start_matches("marker-");
        digits
            .parse::<u64>()
            .map(MarkerId)
            .map_err(|_| format!("invalid marker id '{}'", value))
    }
}

/// Persistent annotation attached to a workspace resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub resource: ResourcePath,
    pub kind: MarkerKind,
    #[serde(default)]
    pub attributes: Attributes,
    pub created_at: DateTime<Utc>,
}

impl Marker {
    pub fn new(id: MarkerId, resource: ResourcePath, kind: MarkerKind) -> Self {
        Self {
            id,
            resource,
            kind,
            attributes: Attributes::new(),
            created_at: Utc::now(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(AttributeValue::as_str)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.attribute(key).and_then(AttributeValue::as_int)
    }

    pub fn source_uri(&self) -> Option<&str> {
        self.text(ATTR_SOURCE_URI)
    }

    pub fn severity(&self) -> MarkerSeverity {
        self.int(ATTR_SEVERITY)
            .and_then(MarkerSeverity::from_int)
            .unwrap_or(MarkerSeverity::Info)
    }

    pub fn rule_id(&self) -> Option<&str> {
        self.text(ATTR_RULE_ID)
    }

    pub fn message(&self) -> Option<&str> {
        self.text(ATTR_MESSAGE)
    }

    pub fn line(&self) -> Option<i64> {
        self.int(ATTR_LINE_NUMBER)
    }

    pub fn is_user_editable(&self) -> bool {
        self.attribute(ATTR_USER_EDITABLE)
            .and_then(AttributeValue::as_bool)
            .unwrap_or(true)
    }
}
