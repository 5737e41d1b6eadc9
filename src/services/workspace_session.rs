use std::path::PathBuf;
use std::sync::Arc;
use chrono::Utc;
use crate::errors::ExplorerResult;
use crate::services::change_bus::ChangeBus;
use crate::services::issue_explorer::IssueExplorer;
use crate::services::issue_registry::IssueRegistry;
use crate::services::marker_projector::MarkerProjector;
use crate::services::memory_store::InMemoryAnnotationStore;
use crate::services::workspace_resolver::WorkspaceResolver;
use crate::structs::config::config::Config;
use crate::structs::workspace_state::WorkspaceState;
use crate::traits::explorer_view::ExplorerView;

/// Everything one CLI invocation works on: the persisted markers, their issue bindings and the bus.
pub struct WorkspaceSession {
    config: Config,
    state_path: PathBuf,
    store: Arc<InMemoryAnnotationStore>,
    registry: Arc<IssueRegistry>,
    bus: Arc<ChangeBus>,
    projector: MarkerProjector,
}

impl WorkspaceSession {
    pub fn open(config: &Config) -> ExplorerResult<Self> {
        let root = config.workspace_root();
        let root = root.canonicalize().unwrap_or(root);
        let state_path = config.state_file_path();

        let state = WorkspaceState::load_from_file(&state_path)?.unwrap_or_default();
        let store = Arc::new(InMemoryAnnotationStore::from_state(&state));
        let registry = Arc::new(IssueRegistry::new());
        let restored = registry.restore(store.as_ref(), &state.issues);
        log::info!("📂 Workspace {} opened with {} markers ({} bound to issues)", root.display(), store.len(), restored);

        let bus = ChangeBus::new();
        let resolver = Arc::new(WorkspaceResolver::new(&root, config.workspace.require_existing_files));
        let projector = MarkerProjector::new(store.clone(), resolver, Arc::clone(&registry), Arc::clone(&bus));

        Ok(Self {
            config: config.clone(),
            state_path,
            store,
            registry,
            bus,
            projector,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<InMemoryAnnotationStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<IssueRegistry> {
        &self.registry
    }

    pub fn bus(&self) -> &Arc<ChangeBus> {
        &self.bus
    }

    pub fn projector(&self) -> &MarkerProjector {
        &self.projector
    }

    /// An explorer wired to this session's store, registry and bus.
    pub fn explorer(&self, view: Box<dyn ExplorerView>) -> IssueExplorer {
        IssueExplorer::new(
            &self.config.explorer,
            self.store.clone(),
            Arc::clone(&self.registry),
            Arc::clone(&self.bus),
            view,
        )
    }

    pub fn save(&self) -> ExplorerResult<()> {
        let state = WorkspaceState {
            saved_at: Utc::now(),
            next_marker_id: self.store.next_marker_id(),
            markers: self.store.snapshot(),
            issues: self.registry.issues(),
        };
        state.save_to_file(&self.state_path)
    }
}
