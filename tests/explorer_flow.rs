use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use issue_explorer::enums::group_by::GroupBy;
use issue_explorer::enums::open_target::OpenTarget;
use issue_explorer::enums::segment::Segment;
use issue_explorer::errors::ExplorerError;
use issue_explorer::services::issue_explorer::IssueExplorer;
use issue_explorer::services::tree_index::TreeIndex;
use issue_explorer::structs::analysis_batch::AnalysisBatch;
use issue_explorer::structs::config::explorer_config::ExplorerConfig;
use issue_explorer::structs::node_id::NodeId;
use issue_explorer::traits::annotation_store::AnnotationStore;
use issue_explorer::traits::explorer_view::ExplorerView;
use crate::common::{hint, Fixture, RecordingProgress};

#[derive(Default)]
struct ViewLog {
    refreshes: usize,
    collapses: usize,
    outline: Vec<String>,
}

struct SharedView(Arc<Mutex<ViewLog>>);

impl ExplorerView for SharedView {
    fn refresh(&mut self, tree: &TreeIndex) {
        let mut log = self.0.lock().unwrap();
        log.refreshes += 1;
        log.outline = tree.outline();
    }

    fn collapse_all(&mut self) {
        self.0.lock().unwrap().collapses += 1;
    }

    fn expand_all(&mut self) {}

    fn reveal(&mut self, _tree: &TreeIndex, _path: &[NodeId]) {}
}

fn explorer(fixture: &Fixture, grouping: Vec<GroupBy>) -> (IssueExplorer, Arc<Mutex<ViewLog>>) {
    let log = Arc::new(Mutex::new(ViewLog::default()));
    let config = ExplorerConfig {
        grouping,
        ..ExplorerConfig::default()
    };
    let explorer = IssueExplorer::new(
        &config,
        fixture.store.clone(),
        Arc::clone(&fixture.registry),
        Arc::clone(&fixture.bus),
        Box::new(SharedView(Arc::clone(&log))),
    );
    (explorer, log)
}

#[test]
fn batch_projection_reaches_the_tree_through_one_rebuild() {
    let fixture = Fixture::new();
    let (mut explorer, log) = explorer(&fixture, vec![GroupBy::Severity, GroupBy::File]);
    let batch = AnalysisBatch::new("nightly").with_input(
        "shop",
        vec![
            hint("h1", "mandatory", "ejb-01", "/ws/shop/A.java", 1),
            hint("h2", "optional", "ejb-01", "/ws/shop/A.java", 2),
        ],
    );

    fixture.projector.project_batch(&batch, &mut RecordingProgress::default()).unwrap();
    assert_eq!(explorer.pump(), 1);

    let log = log.lock().unwrap();
    assert_eq!(log.refreshes, 1);
    assert_eq!(log.collapses, 1);
    assert_eq!(
        log.outline,
        vec![
            "Error (1)",
            "  A.java (1)",
            "    - Hint h1 [marker-1]",
            "Warning (1)",
            "  A.java (1)",
            "    - Hint h2 [marker-2]",
        ]
    );
}

#[test]
fn fixing_an_issue_moves_it_to_the_info_group() {
    let fixture = Fixture::new();
    let (mut explorer, _) = explorer(&fixture, vec![GroupBy::Severity]);
    let issue = hint("h1", "mandatory", "ejb-01", "/ws/shop/A.java", 1);
    let batch = AnalysisBatch::new("nightly").with_input("shop", vec![Arc::clone(&issue)]);
    let summary = fixture.projector.project_batch(&batch, &mut RecordingProgress::default()).unwrap();
    explorer.pump();
    let original = fixture.store.get(summary.created[0]).unwrap();
    explorer.show_issue(original.id).unwrap();

    let fixed = fixture.projector.mark_fixed(&original, &issue).unwrap();
    assert_eq!(explorer.pump(), 1);

    assert!(explorer.tree().find_node(original.id).is_none());
    assert_eq!(
        explorer.tree().path_to(fixed.id),
        Some(vec![Segment::Group("Info".to_string()), Segment::Marker(fixed.id)])
    );
    assert_eq!(explorer.tree().group_count(), 1);
    assert_eq!(explorer.selection(), Some(fixed.id));
    assert!(explorer.tree().leaf(fixed.id).unwrap().issue.as_ref().unwrap().same_as(&issue));
}

#[test]
fn external_delete_prunes_without_a_rebuild() {
    let fixture = Fixture::new();
    let (mut explorer, log) = explorer(&fixture, vec![GroupBy::Rule, GroupBy::File]);
    let batch = AnalysisBatch::new("nightly").with_input(
        "shop",
        vec![
            hint("h1", "mandatory", "ejb-01", "/ws/shop/A.java", 1),
            hint("h2", "mandatory", "jms-02", "/ws/shop/B.java", 1),
        ],
    );
    let summary = fixture.projector.project_batch(&batch, &mut RecordingProgress::default()).unwrap();
    explorer.pump();
    let collapses_after_load = log.lock().unwrap().collapses;

    fixture.projector.delete_marker(summary.created[0]).unwrap();
    assert_eq!(explorer.pump(), 1);

    assert_eq!(explorer.tree().outline(), vec!["jms-02 (1)", "  B.java (1)", "    - Hint h2 [marker-2]"]);
    assert_eq!(log.lock().unwrap().collapses, collapses_after_load);
    assert!(matches!(
        explorer.show_issue(summary.created[0]),
        Err(ExplorerError::StaleIdentity { .. })
    ));
}

#[test]
fn open_points_at_the_source_line() {
    let fixture = Fixture::new();
    let (mut explorer, _) = explorer(&fixture, vec![GroupBy::File]);
    let batch = AnalysisBatch::new("nightly")
        .with_input("shop", vec![hint("h1", "mandatory", "ejb-01", "/ws/shop/A.java", 42)]);
    let summary = fixture.projector.project_batch(&batch, &mut RecordingProgress::default()).unwrap();
    explorer.pump();

    match explorer.open(summary.created[0]) {
        Some(OpenTarget::Source { resource, line }) => {
            assert_eq!(resource.as_str(), "shop/A.java");
            assert_eq!(line, Some(42));
        }
        other => panic!("unexpected target {:?}", other),
    }
}

#[tokio::test]
async fn run_applies_events_until_shutdown() {
    let fixture = Fixture::new();
    let (mut explorer, _) = explorer(&fixture, vec![GroupBy::Rule]);
    let (stop, shutdown) = oneshot::channel();
    let projector = fixture.projector.clone();

    let batch = AnalysisBatch::new("nightly")
        .with_input("shop", vec![hint("h1", "mandatory", "ejb-01", "/ws/shop/A.java", 1)]);
    let producer = tokio::spawn(async move {
        projector.project_batch(&batch, &mut RecordingProgress::default()).unwrap();
        tokio::task::yield_now().await;
        let _ = stop.send(());
    });

    explorer.run(shutdown).await;
    producer.await.unwrap();

    // events still queued when shutdown won the race are picked up here
    explorer.pump();
    assert_eq!(explorer.tree().leaf_count(), 1);
}
