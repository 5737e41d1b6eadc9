use serde::{Deserialize, Serialize};
use crate::enums::topic::Topic;
use crate::structs::marker::MarkerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerEvent {
    /// Signal only: everything downstream must reload.
    BatchChanged,
    MarkerCreated(MarkerId),
    MarkerUpdated { old: MarkerId, new: MarkerId },
    MarkerDeleted(MarkerId),
    /// Signal only: grouping changed, the tree must be rebuilt.
    GroupsChanged,
}

impl MarkerEvent {
    pub fn topic(&self) -> Topic {
        match self {
            MarkerEvent::BatchChanged => Topic::BatchChanged,
            MarkerEvent::MarkerCreated(_) => Topic::MarkerCreated,
            MarkerEvent::MarkerUpdated { .. } => Topic::MarkerUpdated,
            MarkerEvent::MarkerDeleted(_) => Topic::MarkerDeleted,
            MarkerEvent::GroupsChanged => Topic::GroupsChanged,
        }
    }
}
