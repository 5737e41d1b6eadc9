use std::collections::HashSet;
use proptest::prelude::*;
use issue_explorer::config::constants::{ATTR_RULE_ID, ATTR_SEVERITY, ATTR_TITLE};
use issue_explorer::enums::attribute_value::AttributeValue;
use issue_explorer::enums::group_by::GroupBy;
use issue_explorer::enums::marker_kind::MarkerKind;
use issue_explorer::enums::segment::Segment;
use issue_explorer::enums::tree_node::TreeNode;
use issue_explorer::services::issue_registry::IssueRegistry;
use issue_explorer::services::tree_index::TreeIndex;
use issue_explorer::structs::marker::{Attributes, Marker, MarkerId};
use issue_explorer::structs::node_id::NodeId;
use issue_explorer::structs::resource_path::ResourcePath;
use issue_explorer::traits::annotation_store::AnnotationStore;
use issue_explorer::services::memory_store::InMemoryAnnotationStore;

const PATHS: [&str; 4] = ["shop/src/A.java", "shop/src/B.java", "shop/web.xml", "billing/Q.java"];
const RULES: [&str; 3] = ["ejb-01", "jms-02", "xml-03"];

fn marker(id: u64, path: &str, rule: &str, severity: i64) -> Marker {
    let mut marker = Marker::new(MarkerId(id), ResourcePath::new(path), MarkerKind::Hint);
    marker.attributes.insert(ATTR_RULE_ID.to_string(), AttributeValue::from(rule));
    marker.attributes.insert(ATTR_SEVERITY.to_string(), AttributeValue::from(severity));
    marker.attributes.insert(ATTR_TITLE.to_string(), AttributeValue::from(format!("issue {}", id)));
    marker
}

fn grouped_tree() -> TreeIndex {
    TreeIndex::new(vec![GroupBy::Severity, GroupBy::Rule, GroupBy::Project, GroupBy::Folder, GroupBy::File], true)
}

// No group below the root may be empty and every child must point back at its parent
fn assert_well_formed(tree: &TreeIndex, id: NodeId) {
    for child in tree.children(id) {
        let node = tree.node(*child).unwrap();
        assert_eq!(node.parent(), Some(id));
        if let TreeNode::Group(group) = node {
            assert!(!group.is_empty(), "empty group {} left behind", node.label());
        }
        assert_well_formed(tree, *child);
    }
}

#[derive(Debug, Clone)]
enum Op {
    Insert { id: u64, path: usize, rule: usize, severity: i64 },
    Delete { id: u64 },
    Update { old: u64, new: u64, severity: i64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..16, 0..PATHS.len(), 0..RULES.len(), 0i64..3)
            .prop_map(|(id, path, rule, severity)| Op::Insert { id, path, rule, severity }),
        (0u64..16).prop_map(|id| Op::Delete { id }),
        (0u64..16, 0u64..16, 0i64..3).prop_map(|(old, new, severity)| Op::Update { old, new, severity }),
    ]
}

proptest! {
    #[test]
    fn find_node_is_some_exactly_for_live_markers(ops in prop::collection::vec(op(), 1..60)) {
        let mut tree = grouped_tree();
        let registry = IssueRegistry::new();
        let mut live: HashSet<u64> = HashSet::new();
        let mut paths: std::collections::HashMap<u64, (usize, usize)> = std::collections::HashMap::new();

        for op in ops {
            match op {
                Op::Insert { id, path, rule, severity } => {
                    tree.insert(marker(id, PATHS[path], RULES[rule], severity), None);
                    live.insert(id);
                    paths.insert(id, (path, rule));
                }
                Op::Delete { id } => {
                    prop_assert_eq!(tree.apply_delete(MarkerId(id)), live.remove(&id));
                }
                Op::Update { old, new, severity } => {
                    let Some((path, rule)) = paths.get(&old).copied().filter(|_| live.contains(&old)) else {
                        prop_assert!(!tree.apply_update(MarkerId(old), marker(new, PATHS[0], RULES[0], severity), &registry));
                        continue;
                    };
                    prop_assert!(tree.apply_update(MarkerId(old), marker(new, PATHS[path], RULES[rule], severity), &registry));
                    live.remove(&old);
                    live.insert(new);
                    paths.insert(new, (path, rule));
                }
            }

            for id in 0..16 {
                prop_assert_eq!(tree.find_node(MarkerId(id)).is_some(), live.contains(&id));
            }
            prop_assert_eq!(tree.leaf_count(), live.len());
            prop_assert_eq!(tree.leaves_below(tree.root()), live.len());
            assert_well_formed(&tree, tree.root());
        }
    }

    #[test]
    fn path_always_ends_at_the_leaf(id in 0u64..100, path in 0..PATHS.len(), rule in 0..RULES.len()) {
        let mut tree = grouped_tree();
        tree.insert(marker(id, PATHS[path], RULES[rule], 2), None);

        let segments = tree.path_to(MarkerId(id)).unwrap();
        prop_assert_eq!(segments.last(), Some(&Segment::Marker(MarkerId(id))));
        prop_assert!(segments[..segments.len() - 1].iter().all(|s| matches!(s, Segment::Group(_))));
    }
}

#[test]
fn path_under_two_groups_has_three_entries() {
    let mut tree = TreeIndex::new(vec![GroupBy::Rule, GroupBy::File], true);
    tree.insert(marker(1, "shop/src/A.java", "ejb-01", 2), None);

    assert_eq!(
        tree.path_to(MarkerId(1)).unwrap(),
        vec![
            Segment::Group("ejb-01".to_string()),
            Segment::Group("A.java".to_string()),
            Segment::Marker(MarkerId(1)),
        ]
    );
    assert_eq!(tree.path_ids(MarkerId(1)).unwrap().len(), 3);
}

#[test]
fn leaf_directly_under_root_has_a_single_entry_path() {
    let mut tree = TreeIndex::new(Vec::new(), true);
    tree.insert(marker(4, "shop/src/A.java", "ejb-01", 2), None);
    assert_eq!(tree.path_to(MarkerId(4)).unwrap(), vec![Segment::Marker(MarkerId(4))]);
}

#[test]
fn deleting_the_only_leaf_of_a_deep_chain_prunes_it_entirely() {
    let mut tree = grouped_tree();
    tree.insert(marker(1, "shop/src/A.java", "ejb-01", 2), None);
    assert_eq!(tree.group_count(), 5);

    tree.apply_delete(MarkerId(1));
    assert_eq!(tree.group_count(), 0);
    assert!(tree.outline().is_empty());
    assert!(matches!(tree.node(tree.root()), Some(TreeNode::Group(_))));
}

#[test]
fn rebuilding_twice_gives_the_same_structure() {
    let store = InMemoryAnnotationStore::new();
    let registry = IssueRegistry::new();
    for (n, path) in PATHS.iter().enumerate() {
        let id = store.create(&ResourcePath::new(path), MarkerKind::Hint).unwrap();
        let source = marker(id.0, path, RULES[n % RULES.len()], (n % 3) as i64);
        let attributes: Attributes = source.attributes;
        store.set_attributes(id, attributes).unwrap();
    }

    let mut tree = grouped_tree();
    tree.rebuild_all(&store, &registry).unwrap();
    let first = tree.outline();
    let first_paths: Vec<_> = (1..=4).map(|id| tree.path_ids(MarkerId(id))).collect();

    tree.rebuild_all(&store, &registry).unwrap();
    assert_eq!(tree.outline(), first);
    assert_eq!((1..=4).map(|id| tree.path_ids(MarkerId(id))).collect::<Vec<_>>(), first_paths);
    assert_eq!(tree.leaf_count(), 4);
}
