use std::fmt;
use crate::structs::marker::MarkerId;

/// Key of a node inside its parent group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Group(String),
    Marker(MarkerId),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Group(label) => write!(f, "{}", label),
            Segment::Marker(id) => write!(f, "{}", id),
        }
    }
}
