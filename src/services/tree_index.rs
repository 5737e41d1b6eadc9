use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use crate::enums::group_by::GroupBy;
use crate::enums::marker_kind::MarkerKind;
use crate::enums::segment::Segment;
use crate::enums::tree_node::TreeNode;
use crate::errors::ExplorerResult;
use crate::helpers::grouping_helper::GroupingHelper;
use crate::services::issue_registry::IssueRegistry;
use crate::structs::config::explorer_config::ExplorerConfig;
use crate::structs::group_node::GroupNode;
use crate::structs::issue::Issue;
use crate::structs::leaf_node::{LeafNode, ReportNode};
use crate::structs::marker::{Marker, MarkerId};
use crate::structs::node_id::NodeId;
use crate::structs::resource_path::ResourcePath;
use crate::traits::annotation_store::AnnotationStore;

const ROOT: NodeId = NodeId(0);

/// Grouped issue tree kept in step with marker events.
///
/// Nodes live in an arena and refer to their parent by [`NodeId`]. Every live leaf is
/// registered in the identity map, so locating the node of a marker never walks the tree.
pub struct TreeIndex {
    nodes: Vec<Option<TreeNode>>,
    free: Vec<usize>,
    identities: HashMap<MarkerId, NodeId>,
    grouping: Vec<GroupBy>,
    show_reports: bool,
}

impl TreeIndex {
    pub fn new(grouping: Vec<GroupBy>, show_reports: bool) -> Self {
        Self {
            nodes: vec![Some(TreeNode::Group(GroupNode::root()))],
            free: Vec::new(),
            identities: HashMap::new(),
            grouping,
            show_reports,
        }
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self::new(config.grouping.clone(), config.show_reports)
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn grouping(&self) -> &[GroupBy] {
        &self.grouping
    }

    /// Takes effect on the next rebuild.
    pub fn set_grouping(&mut self, levels: Vec<GroupBy>) {
        log::debug!("Grouping changed to {:?}", levels);
        self.grouping = levels;
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    pub fn find_node(&self, marker: MarkerId) -> Option<NodeId> {
        self.identities.get(&marker).copied()
    }

    pub fn leaf(&self, marker: MarkerId) -> Option<&LeafNode> {
        self.find_node(marker)
            .and_then(|id| self.node(id))
            .and_then(TreeNode::as_leaf)
    }

    pub fn contains(&self, marker: MarkerId) -> bool {
        self.identities.contains_key(&marker)
    }

    pub fn leaf_count(&self) -> usize {
        self.identities.len()
    }

    pub fn group_count(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .filter(|node| matches!(node, TreeNode::Group(_)))
            .count()
            - 1
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Number of leaves at or below `id`.
    pub fn leaves_below(&self, id: NodeId) -> usize {
        match self.node(id) {
            Some(TreeNode::Group(group)) => group.children().iter().map(|child| self.leaves_below(*child)).sum(),
            Some(_) => 1,
            None => 0,
        }
    }

    /// Drop every node below the root.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0] = Some(TreeNode::Group(GroupNode::root()));
        self.free.clear();
        self.identities.clear();
    }

    /// Regroup every live marker of the store from scratch. Returns the leaf count.
    pub fn rebuild_all(&mut self, store: &dyn AnnotationStore, registry: &IssueRegistry) -> ExplorerResult<usize> {
        self.clear();

        let root = ResourcePath::workspace_root();
        let mut markers = Vec::new();
        for kind in MarkerKind::ALL {
            for id in store.find_all(&root, kind, true)? {
                match store.get(id) {
                    Some(marker) => markers.push(marker),
                    None => log::warn!("⚠️ {} disappeared while rebuilding the issue tree", id),
                }
            }
        }
        markers.sort_by_key(|marker| marker.id);

        for marker in markers {
            let issue = registry.resolve(marker.id);
            self.insert(marker, issue);
        }

        log::debug!("Issue tree rebuilt with {} issues in {} groups", self.leaf_count(), self.group_count());
        Ok(self.leaf_count())
    }

    /// Place a marker under its group path, creating missing groups on the way.
    /// A marker that is already in the tree is moved.
    pub fn insert(&mut self, marker: Marker, issue: Option<Arc<Issue>>) -> NodeId {
        if self.contains(marker.id) {
            self.apply_delete(marker.id);
        }

        let mut parent = ROOT;
        for label in GroupingHelper::segments(&self.grouping, &marker) {
            parent = self.ensure_group(parent, Segment::Group(label));
        }

        let marker_id = marker.id;
        let leaf = LeafNode { parent, marker, issue };
        let segment = leaf.segment();
        let node = match self.report_path(leaf.issue.as_deref()) {
            Some(report_path) => TreeNode::Report(ReportNode { leaf, report_path }),
            None => TreeNode::Marker(leaf),
        };

        let id = self.alloc(node);
        if let Some(group) = self.group_mut(parent) {
            group.add_child(segment, id);
        }
        self.identities.insert(marker_id, id);
        id
    }

    pub fn apply_create(&mut self, marker: Marker, registry: &IssueRegistry) -> NodeId {
        let issue = registry.resolve(marker.id);
        log::debug!("Adding {} to the issue tree", marker.id);
        self.insert(marker, issue)
    }

    /// Remove a leaf and every ancestor group it leaves empty. Unknown identities are ignored.
    pub fn apply_delete(&mut self, marker: MarkerId) -> bool {
        let Some(node) = self.identities.remove(&marker) else {
            log::warn!("⚠️ Ignoring delete of {}: not in the issue tree", marker);
            return false;
        };

        self.detach(node);
        log::debug!("Removed {} from the issue tree", marker);
        true
    }

    /// Re-point the leaf of `old` at `marker`. The leaf moves when its group path or
    /// its variant changes, otherwise it keeps its place among its siblings.
    pub fn apply_update(&mut self, old: MarkerId, marker: Marker, registry: &IssueRegistry) -> bool {
        let Some(node) = self.find_node(old) else {
            log::warn!("⚠️ Ignoring update of {}: not in the issue tree", old);
            return false;
        };

        let new = marker.id;
        let issue = registry.resolve(new);
        let same_path = self.group_labels(node) == GroupingHelper::segments(&self.grouping, &marker);
        let is_report = self.node(node).is_some_and(TreeNode::is_report);
        let same_variant = is_report == self.report_path(issue.as_deref()).is_some();

        if !same_path || !same_variant {
            self.apply_delete(old);
            self.insert(marker, issue);
            log::debug!("Moved {} to a new group as {}", old, new);
            return true;
        }

        if new != old && self.contains(new) {
            self.apply_delete(new);
        }

        let parent = match self.nodes.get_mut(node.0).and_then(Option::as_mut).and_then(TreeNode::as_leaf_mut) {
            Some(leaf) => {
                leaf.marker = marker;
                leaf.issue = issue;
                leaf.parent
            }
            None => return false,
        };

        if let Some(group) = self.group_mut(parent) {
            group.rekey_child(&Segment::Marker(old), Segment::Marker(new));
        }
        self.identities.remove(&old);
        self.identities.insert(new, node);
        log::debug!("Updated {} in place as {}", old, new);
        true
    }

    /// Node ids from just below the root down to the leaf of `marker`.
    pub fn path_ids(&self, marker: MarkerId) -> Option<Vec<NodeId>> {
        let mut path = Vec::new();
        let mut current = Some(self.find_node(marker)?);

        while let Some(id) = current {
            if id == ROOT {
                break;
            }
            path.push(id);
            current = self.node(id).and_then(TreeNode::parent);
        }

        path.reverse();
        Some(path)
    }

    /// Segments of every node from just below the root down to the leaf of `marker`.
    pub fn path_to(&self, marker: MarkerId) -> Option<Vec<Segment>> {
        let ids = self.path_ids(marker)?;
        Some(
            ids.into_iter()
                .filter_map(|id| self.node(id).and_then(TreeNode::segment))
                .collect(),
        )
    }

    /// Indented text rendering, one line per node, children in insertion order.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for child in self.children(ROOT) {
            self.outline_node(*child, 0, &mut lines);
        }
        lines
    }

    fn outline_node(&self, id: NodeId, depth: usize, lines: &mut Vec<String>) {
        let Some(node) = self.node(id) else {
            return;
        };
        let indent = "  ".repeat(depth);

        match node {
            TreeNode::Group(group) => {
                lines.push(format!("{}{} ({})", indent, node.label(), self.leaves_below(id)));
                for child in group.children() {
                    self.outline_node(*child, depth + 1, lines);
                }
            }
            TreeNode::Marker(leaf) => lines.push(format!("{}- {} [{}]", indent, node.label(), leaf.marker_id())),
            TreeNode::Report(report) => {
                lines.push(format!("{}- {} [{}]", indent, node.label(), report.leaf.marker_id()));
            }
        }
    }

    fn report_path(&self, issue: Option<&Issue>) -> Option<PathBuf> {
        if !self.show_reports {
            return None;
        }
        issue
            .and_then(|issue| issue.generated_report_location.as_deref())
            .filter(|location| !location.is_empty())
            .map(PathBuf::from)
    }

    fn group_labels(&self, node: NodeId) -> Vec<String> {
        let mut labels = Vec::new();
        let mut current = self.node(node).and_then(TreeNode::parent);

        while let Some(id) = current {
            if id == ROOT {
                break;
            }
            if let Some(Segment::Group(label)) = self.node(id).and_then(TreeNode::segment) {
                labels.push(label);
            }
            current = self.node(id).and_then(TreeNode::parent);
        }

        labels.reverse();
        labels
    }

    fn ensure_group(&mut self, parent: NodeId, segment: Segment) -> NodeId {
        if let Some(existing) = self.group(parent).and_then(|group| group.child(&segment)) {
            return existing;
        }

        let id = self.alloc(TreeNode::Group(GroupNode::new(segment.clone(), parent)));
        if let Some(group) = self.group_mut(parent) {
            group.add_child(segment, id);
        }
        id
    }

    // Unlink a node and prune ancestors that end up empty, never the root
    fn detach(&mut self, node: NodeId) {
        let mut current = node;

        loop {
            let Some(removed) = self.release(current) else {
                return;
            };
            let (Some(parent), Some(segment)) = (removed.parent(), removed.segment()) else {
                return;
            };

            let emptied = match self.group_mut(parent) {
                Some(group) => {
                    group.remove_child(&segment);
                    group.is_empty()
                }
                None => false,
            };

            if !emptied || parent == ROOT {
                return;
            }
            current = parent;
        }
    }

    fn alloc(&mut self, node: TreeNode) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<TreeNode> {
        if id == ROOT {
            return None;
        }
        let node = self.nodes.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(node)
    }

    fn group(&self, id: NodeId) -> Option<&GroupNode> {
        self.node(id).and_then(TreeNode::as_group)
    }

    fn group_mut(&mut self, id: NodeId) -> Option<&mut GroupNode> {
        match self.nodes.get_mut(id.0) {
            Some(Some(TreeNode::Group(group))) => Some(group),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::{ATTR_RULE_ID, ATTR_SEVERITY, ATTR_TITLE};
    use crate::enums::attribute_value::AttributeValue;
    use crate::enums::issue_details::IssueDetails;
    use crate::enums::marker_severity::MarkerSeverity;
    use crate::structs::hint_details::HintDetails;

    fn marker(id: u64, path: &str, rule: &str, severity: MarkerSeverity) -> Marker {
        let mut marker = Marker::new(MarkerId(id), ResourcePath::new(path), MarkerKind::Hint);
        marker.attributes.insert(ATTR_RULE_ID.to_string(), AttributeValue::from(rule));
        marker.attributes.insert(ATTR_SEVERITY.to_string(), AttributeValue::from(severity.as_int()));
        marker.attributes.insert(ATTR_TITLE.to_string(), AttributeValue::from(format!("issue {}", id)));
        marker
    }

    fn rule_tree() -> TreeIndex {
        TreeIndex::new(vec![GroupBy::Rule, GroupBy::File], true)
    }

    fn group(label: &str) -> Segment {
        Segment::Group(label.to_string())
    }

    #[test]
    fn path_runs_from_below_root_to_leaf() {
        let mut tree = rule_tree();
        tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), None);

        assert_eq!(
            tree.path_to(MarkerId(1)),
            Some(vec![group("ejb"), group("A.java"), Segment::Marker(MarkerId(1))])
        );

        let mut flat = TreeIndex::new(Vec::new(), true);
        flat.insert(marker(2, "shop/A.java", "ejb", MarkerSeverity::Error), None);
        assert_eq!(flat.path_to(MarkerId(2)), Some(vec![Segment::Marker(MarkerId(2))]));
        assert_eq!(flat.path_to(MarkerId(9)), None);
    }

    #[test]
    fn deleting_the_last_leaf_prunes_the_whole_chain() {
        let mut tree = rule_tree();
        tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), None);
        assert_eq!(tree.group_count(), 2);

        assert!(tree.apply_delete(MarkerId(1)));
        assert_eq!(tree.group_count(), 0);
        assert!(tree.children(tree.root()).is_empty());
        assert!(tree.node(tree.root()).is_some());
    }

    #[test]
    fn pruning_stops_at_the_first_non_empty_group() {
        let mut tree = rule_tree();
        tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), None);
        tree.insert(marker(2, "shop/B.java", "ejb", MarkerSeverity::Error), None);

        tree.apply_delete(MarkerId(1));
        assert_eq!(tree.outline(), vec!["ejb (1)", "  B.java (1)", "    - issue 2 [marker-2]"]);
    }

    #[test]
    fn stale_delete_is_a_no_op() {
        let mut tree = rule_tree();
        tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), None);
        let before = tree.outline();

        assert!(!tree.apply_delete(MarkerId(42)));
        assert_eq!(tree.outline(), before);
    }

    #[test]
    fn update_in_place_keeps_sibling_order() {
        let mut tree = rule_tree();
        let registry = IssueRegistry::new();
        tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), None);
        tree.insert(marker(2, "shop/A.java", "ejb", MarkerSeverity::Error), None);

        assert!(tree.apply_update(MarkerId(1), marker(3, "shop/A.java", "ejb", MarkerSeverity::Info), &registry));
        assert_eq!(
            tree.outline(),
            vec!["ejb (2)", "  A.java (2)", "    - issue 3 [marker-3]", "    - issue 2 [marker-2]"]
        );
        assert!(tree.find_node(MarkerId(1)).is_none());
        assert!(tree.find_node(MarkerId(3)).is_some());
    }

    #[test]
    fn update_that_changes_the_group_path_moves_the_leaf() {
        let mut tree = TreeIndex::new(vec![GroupBy::Severity], true);
        let registry = IssueRegistry::new();
        tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), None);

        assert!(tree.apply_update(MarkerId(1), marker(2, "shop/A.java", "ejb", MarkerSeverity::Info), &registry));
        assert_eq!(tree.path_to(MarkerId(2)), Some(vec![group("Info"), Segment::Marker(MarkerId(2))]));
        assert_eq!(tree.group_count(), 1);
    }

    #[test]
    fn update_of_unknown_identity_is_ignored() {
        let mut tree = rule_tree();
        let registry = IssueRegistry::new();
        assert!(!tree.apply_update(MarkerId(5), marker(6, "shop/A.java", "ejb", MarkerSeverity::Info), &registry));
        assert!(tree.is_empty());
    }

    #[test]
    fn issues_with_reports_become_report_nodes() {
        let mut tree = rule_tree();
        let mut issue = Issue::new("i-1", "mandatory", "ejb", "Remote", "/ws/shop/A.java", IssueDetails::Hint(HintDetails::default()));
        issue.generated_report_location = Some("/reports/i-1.html".to_string());
        let node = tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), Some(Arc::new(issue)));

        match tree.node(node) {
            Some(TreeNode::Report(report)) => assert_eq!(report.report_path, PathBuf::from("/reports/i-1.html")),
            other => panic!("expected a report node, got {:?}", other),
        }

        let mut hidden = TreeIndex::new(vec![GroupBy::Rule], false);
        let mut issue = Issue::new("i-2", "mandatory", "ejb", "Remote", "/ws/shop/A.java", IssueDetails::Hint(HintDetails::default()));
        issue.generated_report_location = Some("/reports/i-2.html".to_string());
        let node = hidden.insert(marker(2, "shop/A.java", "ejb", MarkerSeverity::Error), Some(Arc::new(issue)));
        assert!(!hidden.node(node).is_some_and(TreeNode::is_report));
    }

    #[test]
    fn reinserting_a_marker_moves_it() {
        let mut tree = rule_tree();
        tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), None);
        tree.insert(marker(1, "shop/B.java", "jms", MarkerSeverity::Error), None);

        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.outline(), vec!["jms (1)", "  B.java (1)", "    - issue 1 [marker-1]"]);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = rule_tree();
        tree.insert(marker(1, "shop/A.java", "ejb", MarkerSeverity::Error), None);
        let slots = tree.nodes.len();

        tree.apply_delete(MarkerId(1));
        tree.insert(marker(2, "shop/B.java", "jms", MarkerSeverity::Error), None);
        assert_eq!(tree.nodes.len(), slots);
    }
}
