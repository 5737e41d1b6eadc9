use std::sync::Arc;
use crate::config::constants::{ATTR_SEVERITY, GENERATE_ISSUES_TASK};
use crate::enums::attribute_value::AttributeValue;
use crate::enums::marker_event::MarkerEvent;
use crate::enums::marker_kind::MarkerKind;
use crate::enums::marker_severity::MarkerSeverity;
use crate::errors::{ErrorHandler, ExplorerError, ExplorerResult};
use crate::helpers::marker_helper::MarkerHelper;
use crate::services::change_bus::ChangeBus;
use crate::services::issue_registry::IssueRegistry;
use crate::structs::analysis_batch::AnalysisBatch;
use crate::structs::issue::Issue;
use crate::structs::marker::{Marker, MarkerId};
use crate::structs::projection_summary::ProjectionSummary;
use crate::structs::resource_path::ResourcePath;
use crate::traits::annotation_store::AnnotationStore;
use crate::traits::progress_sink::ProgressSink;
use crate::traits::resource_resolver::ResourceResolver;

/// Writes analysis issues to the marker store and announces the changes on the bus.
#[derive(Clone)]
pub struct MarkerProjector {
    store: Arc<dyn AnnotationStore>,
    resolver: Arc<dyn ResourceResolver>,
    registry: Arc<IssueRegistry>,
    bus: Arc<ChangeBus>,
}

impl MarkerProjector {
    pub fn new(
        store: Arc<dyn AnnotationStore>,
        resolver: Arc<dyn ResourceResolver>,
        registry: Arc<IssueRegistry>,
        bus: Arc<ChangeBus>,
    ) -> Self {
        Self {
            store,
            resolver,
            registry,
            bus,
        }
    }

    pub fn store(&self) -> &Arc<dyn AnnotationStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<IssueRegistry> {
        &self.registry
    }

    pub fn total_issue_count(&self, batch: &AnalysisBatch) -> usize {
        batch.total_issue_count()
    }

    /// Create one marker per issue of the batch that maps onto a workspace resource.
    ///
    /// Issues that cannot be placed or written are reported in the summary and do not stop
    /// the batch. Cancellation is checked before every issue; a cancelled batch keeps the
    /// markers written so far and publishes nothing.
    pub fn project_batch(&self, batch: &AnalysisBatch, progress: &mut dyn ProgressSink) -> ExplorerResult<ProjectionSummary> {
        let total = self.total_issue_count(batch);
        let mut summary = ProjectionSummary::new(&batch.configuration, total);

        log::info!("🧩 Generating markers for {} issues from '{}'", total, batch.configuration);
        progress.begin_task(GENERATE_ISSUES_TASK, total);

        for issue in batch.issues() {
            if progress.is_cancelled() {
                progress.done();
                log::warn!("⏹️ Marker generation cancelled after {} of {} issues", summary.processed, total);
                return Err(ExplorerError::InterruptedBatch {
                    written: summary.created_count(),
                    total,
                });
            }

            if let Some(existing) = self.live_marker_of(issue) {
                log::warn!("⚠️ Issue '{}' already has {}, skipping the duplicate", issue.id, existing);
                summary.skipped.push(ExplorerError::duplicate_issue(&issue.id, existing));
                summary.processed += 1;
                progress.worked(1);
                continue;
            }

            match self.resolver.resolve(issue) {
                Some(resource) => match self.create_marker(issue, &resource, &batch.configuration) {
                    Ok(id) => {
                        self.registry.bind(id, Arc::clone(issue));
                        summary.created.push(id);
                    }
                    Err(e) => {
                        log::error!("❌ Skipping issue '{}': {}", issue.id, e);
                        summary.failures.push(e);
                    }
                },
                None => {
                    log::warn!("⚠️ No workspace resource for issue '{}' ({})", issue.id, issue.file_absolute_path);
                    summary.skipped.push(ExplorerError::unresolvable(&issue.id, &issue.file_absolute_path));
                }
            }

            summary.processed += 1;
            progress.worked(1);
        }

        progress.done();
        ErrorHandler::handle_multiple_errors(&summary.problems(), "marker generation");
        log::info!("✅ Created {} markers ({} skipped, {} failed)", summary.created_count(), summary.skipped.len(), summary.failures.len());

        self.bus.publish(MarkerEvent::BatchChanged);
        Ok(summary)
    }

    /// Replace the marker of a resolved issue with an informational copy.
    ///
    /// Failing to delete the original is logged only, the replacement is returned anyway.
    pub fn mark_fixed(&self, marker: &Marker, issue: &Arc<Issue>) -> ExplorerResult<Marker> {
        issue.set_fixed(true);

        let id = self.store.create(&marker.resource, marker.kind)?;
        let mut attributes = marker.attributes.clone();
        attributes.insert(ATTR_SEVERITY.to_string(), AttributeValue::from(MarkerSeverity::Info.as_int()));

        if let Err(e) = self.store.set_attributes(id, attributes) {
            self.discard(id);
            return Err(e);
        }

        if let Err(e) = self.store.delete(marker.id) {
            log::error!("❌ Could not delete fixed {}: {}", marker.id, e);
        }

        self.registry.rebind(marker.id, id, Arc::clone(issue));
        let replacement = self
            .store
            .get(id)
            .ok_or_else(|| ExplorerError::store_error("read", Some(id), "replacement marker vanished"))?;

        log::info!("🔧 Issue '{}' marked as fixed ({} -> {})", issue.id, marker.id, id);
        self.bus.publish(MarkerEvent::MarkerUpdated { old: marker.id, new: id });
        Ok(replacement)
    }

    /// Delete the markers of every accessible project and drop their bindings.
    /// Returns how many were removed.
    pub fn delete_all(&self) -> usize {
        let mut deleted = 0;

        for project in self.store.projects().into_iter().filter(|project| project.accessible) {
            let scope = project.resource();
            for kind in MarkerKind::ALL {
                let ids = match self.store.find_all(&scope, kind, true) {
                    Ok(ids) => ids,
                    Err(e) => {
                        log::error!("❌ Could not list {} markers of '{}': {}", kind, project.name, e);
                        continue;
                    }
                };

                for id in ids {
                    match self.store.delete(id) {
                        Ok(()) => {
                            self.registry.unbind(id);
                            deleted += 1;
                        }
                        Err(e) => log::error!("❌ {}", e),
                    }
                }
            }
        }

        log::info!("🗑️ Deleted {} markers", deleted);
        self.bus.publish(MarkerEvent::BatchChanged);
        deleted
    }

    /// Delete a single marker, as an edit outside the explorer would.
    pub fn delete_marker(&self, id: MarkerId) -> ExplorerResult<()> {
        self.store.delete(id)?;
        self.registry.unbind(id);
        self.bus.publish(MarkerEvent::MarkerDeleted(id));
        Ok(())
    }

    pub fn find_by_resource_and_issue(&self, resource: &ResourcePath, issue: &Issue) -> Option<Marker> {
        let uri = issue.uri();

        for kind in MarkerKind::ALL {
            let ids = match self.store.find_all(resource, kind, true) {
                Ok(ids) => ids,
                Err(e) => {
                    log::error!("❌ Could not list markers of {}: {}", resource, e);
                    continue;
                }
            };

            let found = ids
                .into_iter()
                .filter_map(|id| self.store.get(id))
                .find(|marker| marker.source_uri() == Some(uri.as_str()));
            if found.is_some() {
                return found;
            }
        }

        None
    }

    /// Bound issues of the hint markers on `resource` and below it, paired with their markers.
    pub fn build_issue_marker_map(&self, resource: &ResourcePath) -> Vec<(Arc<Issue>, Marker)> {
        let ids = match self.store.find_all(resource, MarkerKind::Hint, true) {
            Ok(ids) => ids,
            Err(e) => {
                log::error!("❌ Could not list markers of {}: {}", resource, e);
                return Vec::new();
            }
        };

        ids.into_iter()
            .filter_map(|id| {
                let issue = self.registry.resolve(id)?;
                let marker = self.store.get(id)?;
                Some((issue, marker))
            })
            .collect()
    }

    fn live_marker_of(&self, issue: &Issue) -> Option<MarkerId> {
        self.registry
            .find_marker(issue)
            .filter(|id| self.store.get(*id).is_some())
    }

    fn create_marker(&self, issue: &Issue, resource: &ResourcePath, configuration: &str) -> ExplorerResult<MarkerId> {
        let id = self.store.create(resource, issue.kind())?;
        let attributes = MarkerHelper::issue_attributes(issue, configuration, resource);

        if let Err(e) = self.store.set_attributes(id, attributes) {
            self.discard(id);
            return Err(e);
        }
        Ok(id)
    }

    // Best effort removal of a half written marker
    fn discard(&self, id: MarkerId) {
        if let Err(e) = self.store.delete(id) {
            log::error!("❌ Could not remove incomplete {}: {}", id, e);
        }
    }
}
