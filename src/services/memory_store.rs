use std::sync::atomic::{AtomicU64, Ordering};
use dashmap::DashMap;
use crate::enums::marker_kind::MarkerKind;
use crate::errors::{ExplorerError, ExplorerResult};
use crate::structs::marker::{Attributes, Marker, MarkerId};
use crate::structs::project::Project;
use crate::structs::resource_path::ResourcePath;
use crate::structs::workspace_state::WorkspaceState;
use crate::traits::annotation_store::AnnotationStore;

/// Marker store held in memory and persisted through [`WorkspaceState`] snapshots.
pub struct InMemoryAnnotationStore {
    markers: DashMap<MarkerId, Marker>,
    projects: DashMap<String, Project>,
    next_id: AtomicU64,
}

impl InMemoryAnnotationStore {
    pub fn new() -> Self {
        Self {
            markers: DashMap::new(),
            projects: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn from_state(state: &WorkspaceState) -> Self {
        let store = Self::new();
        let mut next_id = state.next_marker_id.max(1);

        for marker in &state.markers {
            if let Some(project) = marker.resource.project() {
                store.register_project(project);
            }
            next_id = next_id.max(marker.id.0 + 1);
            store.markers.insert(marker.id, marker.clone());
        }

        store.next_id.store(next_id, Ordering::SeqCst);
        store
    }

    /// All markers ordered by identity.
    pub fn snapshot(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = self.markers.iter().map(|entry| entry.value().clone()).collect();
        markers.sort_by_key(|marker| marker.id);
        markers
    }

    pub fn next_marker_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn add_project(&self, name: &str, accessible: bool) {
        self.projects.insert(
            name.to_string(),
            Project {
                name: name.to_string(),
                accessible,
            },
        );
    }

    /// Closed projects keep their markers but refuse new ones.
    pub fn close_project(&self, name: &str) {
        self.add_project(name, false);
    }

    fn register_project(&self, name: &str) {
        self.projects.entry(name.to_string()).or_insert_with(|| Project {
            name: name.to_string(),
            accessible: true,
        });
    }

    fn ensure_writable(&self, resource: &ResourcePath) -> ExplorerResult<()> {
        let project = resource.project().ok_or_else(|| {
            ExplorerError::store_error("create", None, "markers cannot be attached to the workspace root")
        })?;

        if let Some(existing) = self.projects.get(project) {
            if !existing.accessible {
                return Err(ExplorerError::store_error(
                    "create",
                    None,
                    &format!("project '{}' is not accessible", project),
                ));
            }
            return Ok(());
        }

        self.register_project(project);
        Ok(())
    }
}

impl Default for InMemoryAnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore for InMemoryAnnotationStore {
    fn create(&self, resource: &ResourcePath, kind: MarkerKind) -> ExplorerResult<MarkerId> {
        self.ensure_writable(resource)?;

        let id = MarkerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.markers.insert(id, Marker::new(id, resource.clone(), kind));
        Ok(id)
    }

    fn set_attributes(&self, id: MarkerId, attributes: Attributes) -> ExplorerResult<()> {
        match self.markers.get_mut(&id) {
            Some(mut marker) => {
                marker.attributes.extend(attributes);
                Ok(())
            }
            None => Err(ExplorerError::store_error("set attributes", Some(id), "marker does not exist")),
        }
    }

    fn delete(&self, id: MarkerId) -> ExplorerResult<()> {
        match self.markers.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ExplorerError::store_error("delete", Some(id), "marker does not exist")),
        }
    }

    fn find_all(&self, resource: &ResourcePath, kind: MarkerKind, recursive: bool) -> ExplorerResult<Vec<MarkerId>> {
        let mut ids: Vec<MarkerId> = self
            .markers
            .iter()
            .filter(|entry| entry.kind == kind)
            .filter(|entry| {
                if recursive {
                    entry.resource.is_within(resource)
                } else {
                    entry.resource == *resource
                }
            })
            .map(|entry| *entry.key())
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn get(&self, id: MarkerId) -> Option<Marker> {
        self.markers.get(&id).map(|entry| entry.value().clone())
    }

    fn projects(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.projects.iter().map(|entry| entry.value().clone()).collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        projects
    }
}
