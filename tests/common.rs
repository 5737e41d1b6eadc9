use std::path::Path;
use std::sync::Arc;
use issue_explorer::enums::issue_details::IssueDetails;
use issue_explorer::services::change_bus::ChangeBus;
use issue_explorer::services::issue_registry::IssueRegistry;
use issue_explorer::services::marker_projector::MarkerProjector;
use issue_explorer::services::memory_store::InMemoryAnnotationStore;
use issue_explorer::services::workspace_resolver::WorkspaceResolver;
use issue_explorer::structs::classification_details::ClassificationDetails;
use issue_explorer::structs::hint_details::HintDetails;
use issue_explorer::structs::issue::Issue;
use issue_explorer::traits::progress_sink::ProgressSink;

pub struct Fixture {
    pub store: Arc<InMemoryAnnotationStore>,
    pub registry: Arc<IssueRegistry>,
    pub bus: Arc<ChangeBus>,
    pub projector: MarkerProjector,
}

impl Fixture {
    /// Workspace rooted at `/ws` that accepts any path below it.
    pub fn new() -> Self {
        let store = Arc::new(InMemoryAnnotationStore::new());
        let registry = Arc::new(IssueRegistry::new());
        let bus = ChangeBus::new();
        let projector = MarkerProjector::new(
            store.clone(),
            Arc::new(WorkspaceResolver::new(Path::new("/ws"), false)),
            Arc::clone(&registry),
            Arc::clone(&bus),
        );
        Self { store, registry, bus, projector }
    }
}

pub fn hint(id: &str, severity: &str, rule: &str, path: &str, line: i64) -> Arc<Issue> {
    Arc::new(Issue::new(
        id,
        severity,
        rule,
        &format!("Hint {}", id),
        path,
        IssueDetails::Hint(HintDetails {
            line_number: line,
            ..HintDetails::default()
        }),
    ))
}

pub fn classification(id: &str, rule: &str, path: &str, label: &str) -> Arc<Issue> {
    Arc::new(Issue::new(
        id,
        "optional",
        rule,
        label,
        path,
        IssueDetails::Classification(ClassificationDetails {
            classification: label.to_string(),
            description: String::new(),
        }),
    ))
}

#[derive(Default)]
pub struct RecordingProgress {
    pub task: String,
    pub total: usize,
    pub ticks: usize,
    pub finished: bool,
    pub cancel_after: Option<usize>,
}

impl ProgressSink for RecordingProgress {
    fn begin_task(&mut self, name: &str, total: usize) {
        self.task = name.to_string();
        self.total = total;
    }

    fn worked(&mut self, units: usize) {
        self.ticks += units;
    }

    fn done(&mut self) {
        self.finished = true;
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_after.is_some_and(|limit| self.ticks >= limit)
    }
}
