use crate::structs::issue::Issue;
use crate::structs::resource_path::ResourcePath;

/// Maps an issue onto the workspace resource it concerns.
pub trait ResourceResolver: Send + Sync {
    fn resolve(&self, issue: &Issue) -> Option<ResourcePath>;
}
