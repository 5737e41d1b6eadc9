use crate::enums::marker_kind::MarkerKind;
use crate::errors::ExplorerResult;
use crate::structs::marker::{Attributes, Marker, MarkerId};
use crate::structs::project::Project;
use crate::structs::resource_path::ResourcePath;

/// Resource-addressable marker storage.
pub trait AnnotationStore: Send + Sync {
    /// Creates an empty marker of `kind` on `resource` and returns its new identity.
    fn create(&self, resource: &ResourcePath, kind: MarkerKind) -> ExplorerResult<MarkerId>;

    /// Merges `attributes` into the marker's attribute map.
    fn set_attributes(&self, id: MarkerId, attributes: Attributes) -> ExplorerResult<()>;

    fn delete(&self, id: MarkerId) -> ExplorerResult<()>;

    /// Identities of the markers of `kind` on `resource` (and below it when `recursive`),
    /// ordered by identity.
    fn find_all(&self, resource: &ResourcePath, kind: MarkerKind, recursive: bool) -> ExplorerResult<Vec<MarkerId>>;

    fn get(&self, id: MarkerId) -> Option<Marker>;

    fn projects(&self) -> Vec<Project>;
}
