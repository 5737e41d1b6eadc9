use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    BatchChanged,
    MarkerCreated,
    MarkerUpdated,
    MarkerDeleted,
    GroupsChanged,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::BatchChanged,
        Topic::MarkerCreated,
        Topic::MarkerUpdated,
        Topic::MarkerDeleted,
        Topic::GroupsChanged,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Topic::BatchChanged => "markers/changed",
            Topic::MarkerCreated => "marker/created",
            Topic::MarkerUpdated => "marker/updated",
            Topic::MarkerDeleted => "marker/deleted",
            Topic::GroupsChanged => "groups/changed",
        }
    }
}
