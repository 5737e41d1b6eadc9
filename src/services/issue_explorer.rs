use std::sync::Arc;
use tokio::sync::oneshot;
use crate::enums::group_by::GroupBy;
use crate::enums::marker_event::MarkerEvent;
use crate::enums::open_target::OpenTarget;
use crate::enums::topic::Topic;
use crate::enums::tree_node::TreeNode;
use crate::errors::{ErrorHandler, ExplorerError, ExplorerResult};
use crate::services::change_bus::{ChangeBus, Subscription};
use crate::services::issue_registry::IssueRegistry;
use crate::services::tree_index::TreeIndex;
use crate::structs::config::explorer_config::ExplorerConfig;
use crate::structs::marker::MarkerId;
use crate::structs::node_id::NodeId;
use crate::traits::annotation_store::AnnotationStore;
use crate::traits::explorer_view::ExplorerView;

/// Sole owner of the issue tree. Applies bus events to it and keeps the view in step.
pub struct IssueExplorer {
    tree: TreeIndex,
    store: Arc<dyn AnnotationStore>,
    registry: Arc<IssueRegistry>,
    bus: Arc<ChangeBus>,
    subscription: Subscription,
    view: Box<dyn ExplorerView>,
    collapse_after_rebuild: bool,
    selection: Option<MarkerId>,
}

impl IssueExplorer {
    pub fn new(
        config: &ExplorerConfig,
        store: Arc<dyn AnnotationStore>,
        registry: Arc<IssueRegistry>,
        bus: Arc<ChangeBus>,
        view: Box<dyn ExplorerView>,
    ) -> Self {
        let subscription = bus.subscribe(&Topic::ALL);

        Self {
            tree: TreeIndex::from_config(config),
            store,
            registry,
            bus,
            subscription,
            view,
            collapse_after_rebuild: config.collapse_after_rebuild,
            selection: None,
        }
    }

    pub fn tree(&self) -> &TreeIndex {
        &self.tree
    }

    pub fn selection(&self) -> Option<MarkerId> {
        self.selection
    }

    /// Rebuild the whole tree from the store and redraw.
    pub fn reload(&mut self) -> ExplorerResult<usize> {
        let count = self.tree.rebuild_all(self.store.as_ref(), &self.registry)?;

        if self.selection.is_some_and(|selected| !self.tree.contains(selected)) {
            self.selection = None;
        }

        self.view.refresh(&self.tree);
        if self.collapse_after_rebuild {
            self.view.collapse_all();
        }
        log::info!("🌳 Issue tree loaded with {} issues", count);
        Ok(count)
    }

    pub fn handle_event(&mut self, event: MarkerEvent) {
        log::debug!("Explorer received {}", event.topic().name());

        match event {
            MarkerEvent::BatchChanged | MarkerEvent::GroupsChanged => {
                if let Err(e) = self.reload() {
                    ErrorHandler::handle_error(&e);
                }
            }
            MarkerEvent::MarkerCreated(id) => match self.store.get(id) {
                Some(marker) => {
                    self.tree.apply_create(marker, &self.registry);
                    self.view.refresh(&self.tree);
                }
                None => log::warn!("⚠️ Created {} is not in the store", id),
            },
            MarkerEvent::MarkerUpdated { old, new } => {
                let changed = match self.store.get(new) {
                    Some(marker) => self.tree.apply_update(old, marker, &self.registry),
                    None => {
                        log::warn!("⚠️ Updated {} is not in the store, dropping {}", new, old);
                        self.tree.apply_delete(old)
                    }
                };
                if self.selection == Some(old) {
                    self.selection = self.tree.contains(new).then_some(new);
                }
                if changed {
                    self.view.refresh(&self.tree);
                }
            }
            MarkerEvent::MarkerDeleted(id) => {
                if self.tree.apply_delete(id) {
                    self.view.refresh(&self.tree);
                }
                if self.selection == Some(id) {
                    self.selection = None;
                }
            }
        }
    }

    /// Apply every event queued so far. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let events = self.subscription.drain();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    /// Apply events as they arrive until `shutdown` fires or its sender is dropped.
    pub async fn run(&mut self, mut shutdown: oneshot::Receiver<()>) {
        log::debug!("Issue explorer listening for marker events");
        loop {
            tokio::select! {
                event = self.subscription.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                _ = &mut shutdown => break,
            }
        }
        log::debug!("Issue explorer stopped");
    }

    /// Reveal the leaf of `marker` and select it.
    pub fn show_issue(&mut self, marker: MarkerId) -> ExplorerResult<Vec<NodeId>> {
        let path = self
            .tree
            .path_ids(marker)
            .ok_or(ExplorerError::StaleIdentity { marker })?;

        self.view.reveal(&self.tree, &path);
        self.selection = Some(marker);
        Ok(path)
    }

    /// Regroup the tree. The rebuild happens when the resulting event comes back.
    pub fn set_grouping(&mut self, levels: Vec<GroupBy>) {
        self.tree.set_grouping(levels);
        self.bus.publish(MarkerEvent::GroupsChanged);
    }

    pub fn expand_all(&mut self) {
        self.view.expand_all();
    }

    pub fn collapse_all(&mut self) {
        self.view.collapse_all();
    }

    /// Where opening the leaf of `marker` leads. Reports that are missing on disk fall back to the source.
    pub fn open(&self, marker: MarkerId) -> Option<OpenTarget> {
        let node = self.tree.find_node(marker)?;

        match self.tree.node(node)? {
            TreeNode::Report(report) => {
                if report.report_path.is_file() {
                    Some(OpenTarget::Report(report.report_path.clone()))
                } else {
                    log::warn!("⚠️ Report {} does not exist, opening the source instead", report.report_path.display());
                    Some(report.leaf.source_target())
                }
            }
            TreeNode::Marker(leaf) => Some(leaf.source_target()),
            TreeNode::Group(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use crate::config::constants::{ATTR_RULE_ID, ATTR_TITLE};
    use crate::enums::attribute_value::AttributeValue;
    use crate::enums::marker_kind::MarkerKind;
    use crate::services::memory_store::InMemoryAnnotationStore;
    use crate::structs::marker::Attributes;
    use crate::structs::resource_path::ResourcePath;

    #[derive(Default)]
    struct Calls {
        refreshes: usize,
        collapses: usize,
        revealed: Vec<NodeId>,
    }

    struct RecordingView(Arc<Mutex<Calls>>);

    impl ExplorerView for RecordingView {
        fn refresh(&mut self, _tree: &TreeIndex) {
            self.0.lock().unwrap().refreshes += 1;
        }

        fn collapse_all(&mut self) {
            self.0.lock().unwrap().collapses += 1;
        }

        fn expand_all(&mut self) {}

        fn reveal(&mut self, _tree: &TreeIndex, path: &[NodeId]) {
            self.0.lock().unwrap().revealed = path.to_vec();
        }
    }

    fn add_marker(store: &InMemoryAnnotationStore, path: &str, rule: &str) -> MarkerId {
        let id = store.create(&ResourcePath::new(path), MarkerKind::Hint).unwrap();
        let mut attributes = Attributes::new();
        attributes.insert(ATTR_RULE_ID.to_string(), AttributeValue::from(rule));
        attributes.insert(ATTR_TITLE.to_string(), AttributeValue::from(path));
        store.set_attributes(id, attributes).unwrap();
        id
    }

    fn explorer() -> (IssueExplorer, Arc<InMemoryAnnotationStore>, Arc<Mutex<Calls>>) {
        let store = Arc::new(InMemoryAnnotationStore::new());
        let calls = Arc::new(Mutex::new(Calls::default()));
        let config = ExplorerConfig {
            grouping: vec![GroupBy::Rule],
            ..ExplorerConfig::default()
        };
        let explorer = IssueExplorer::new(
            &config,
            store.clone(),
            Arc::new(IssueRegistry::new()),
            ChangeBus::new(),
            Box::new(RecordingView(Arc::clone(&calls))),
        );
        (explorer, store, calls)
    }

    #[test]
    fn batch_changed_rebuilds_refreshes_and_collapses() {
        let (mut explorer, store, calls) = explorer();
        add_marker(&store, "shop/A.java", "ejb");
        add_marker(&store, "shop/B.java", "jms");

        explorer.bus.publish(MarkerEvent::BatchChanged);
        assert_eq!(explorer.pump(), 1);

        assert_eq!(explorer.tree().leaf_count(), 2);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.refreshes, 1);
        assert_eq!(calls.collapses, 1);
    }

    #[test]
    fn delete_event_patches_the_tree_and_clears_selection() {
        let (mut explorer, store, _) = explorer();
        let id = add_marker(&store, "shop/A.java", "ejb");
        explorer.reload().unwrap();
        explorer.show_issue(id).unwrap();

        store.delete(id).unwrap();
        explorer.handle_event(MarkerEvent::MarkerDeleted(id));

        assert!(explorer.tree().is_empty());
        assert_eq!(explorer.selection(), None);
        assert!(matches!(explorer.show_issue(id), Err(ExplorerError::StaleIdentity { .. })));
    }

    #[test]
    fn show_issue_reveals_the_full_path() {
        let (mut explorer, store, calls) = explorer();
        let id = add_marker(&store, "shop/A.java", "ejb");
        explorer.reload().unwrap();

        let path = explorer.show_issue(id).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(calls.lock().unwrap().revealed, path);
        assert_eq!(explorer.selection(), Some(id));
    }

    #[test]
    fn grouping_change_round_trips_through_the_bus() {
        let (mut explorer, store, _) = explorer();
        add_marker(&store, "shop/A.java", "ejb");
        explorer.reload().unwrap();

        explorer.set_grouping(Vec::new());
        assert_eq!(explorer.pump(), 1);
        assert_eq!(explorer.tree().group_count(), 0);
        assert_eq!(explorer.tree().leaf_count(), 1);
    }

    #[test]
    fn open_falls_back_to_source_for_plain_leaves() {
        let (mut explorer, store, _) = explorer();
        let id = add_marker(&store, "shop/A.java", "ejb");
        explorer.reload().unwrap();

        assert_eq!(
            explorer.open(id),
            Some(OpenTarget::Source { resource: ResourcePath::new("shop/A.java"), line: None })
        );
        assert_eq!(explorer.open(MarkerId(999)), None);
    }
}
