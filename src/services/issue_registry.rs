use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use crate::enums::marker_kind::MarkerKind;
use crate::structs::issue::Issue;
use crate::structs::marker::MarkerId;
use crate::structs::resource_path::ResourcePath;
use crate::traits::annotation_store::AnnotationStore;

#[derive(Default)]
struct Bindings {
    issues: HashMap<MarkerId, Arc<Issue>>,
    markers: HashMap<String, MarkerId>,
}

impl Bindings {
    fn insert(&mut self, id: MarkerId, issue: Arc<Issue>) {
        if let Some(previous) = self.issues.insert(id, Arc::clone(&issue)) {
            if self.markers.get(&previous.id) == Some(&id) {
                self.markers.remove(&previous.id);
            }
        }
        if let Some(stale) = self.markers.insert(issue.id.clone(), id) {
            if stale != id {
                self.issues.remove(&stale);
            }
        }
    }

    fn remove(&mut self, id: MarkerId) -> Option<Arc<Issue>> {
        let issue = self.issues.remove(&id)?;
        if self.markers.get(&issue.id) == Some(&id) {
            self.markers.remove(&issue.id);
        }
        Some(issue)
    }
}

/// Two-way mapping between marker identities and the issues they were projected from.
///
/// Readers never observe a half-applied rebind: both directions are swapped under one write lock.
#[derive(Default)]
pub struct IssueRegistry {
    bindings: RwLock<Bindings>,
}

impl IssueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, id: MarkerId, issue: Arc<Issue>) {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, issue);
    }

    pub fn rebind(&self, old: MarkerId, new: MarkerId, issue: Arc<Issue>) {
        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        bindings.remove(old);
        bindings.insert(new, issue);
    }

    pub fn resolve(&self, id: MarkerId) -> Option<Arc<Issue>> {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .issues
            .get(&id)
            .cloned()
    }

    pub fn unbind(&self, id: MarkerId) -> Option<Arc<Issue>> {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    pub fn find_marker(&self, issue: &Issue) -> Option<MarkerId> {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .markers
            .get(&issue.id)
            .copied()
    }

    /// Every bound issue, ordered by issue id.
    pub fn issues(&self) -> Vec<Arc<Issue>> {
        let mut issues: Vec<Arc<Issue>> = self
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .issues
            .values()
            .cloned()
            .collect();
        issues.sort_by(|a, b| a.id.cmp(&b.id));
        issues
    }

    pub fn clear(&self) {
        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        bindings.issues.clear();
        bindings.markers.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.read().unwrap_or_else(PoisonError::into_inner).issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rebuild bindings for persisted markers by matching their `source-uri` against the issues.
    /// Returns how many markers were bound.
    pub fn restore(&self, store: &dyn AnnotationStore, issues: &[Arc<Issue>]) -> usize {
        let by_uri: HashMap<String, &Arc<Issue>> = issues.iter().map(|issue| (issue.uri(), issue)).collect();
        let root = ResourcePath::workspace_root();
        let mut restored = 0;

        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        bindings.issues.clear();
        bindings.markers.clear();

        for kind in MarkerKind::ALL {
            let ids = match store.find_all(&root, kind, true) {
                Ok(ids) => ids,
                Err(e) => {
                    log::error!("Failed to list {} markers: {}", kind, e);
                    continue;
                }
            };

            for id in ids {
                let issue = store
                    .get(id)
                    .and_then(|marker| marker.source_uri().and_then(|uri| by_uri.get(uri).copied()));

                match issue {
                    Some(issue) => {
                        bindings.insert(id, Arc::clone(issue));
                        restored += 1;
                    }
                    None => log::warn!("⚠️ {} has no matching issue in the saved state", id),
                }
            }
        }

        restored
    }
}
