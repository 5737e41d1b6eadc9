use crate::enums::segment::Segment;
use crate::structs::group_node::GroupNode;
use crate::structs::leaf_node::{LeafNode, ReportNode};
use crate::structs::node_id::NodeId;

#[derive(Debug, Clone)]
pub enum TreeNode {
    Group(GroupNode),
    Marker(LeafNode),
    Report(ReportNode),
}

impl TreeNode {
    /// `None` only for the synthetic root.
    pub fn segment(&self) -> Option<Segment> {
        match self {
            TreeNode::Group(group) => group.segment.clone(),
            TreeNode::Marker(leaf) => Some(leaf.segment()),
            TreeNode::Report(report) => Some(report.leaf.segment()),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            TreeNode::Group(group) => group.parent,
            TreeNode::Marker(leaf) => Some(leaf.parent),
            TreeNode::Report(report) => Some(report.leaf.parent),
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            TreeNode::Group(group) => group.children(),
            _ => &[],
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            TreeNode::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            TreeNode::Group(_) => None,
            TreeNode::Marker(leaf) => Some(leaf),
            TreeNode::Report(report) => Some(&report.leaf),
        }
    }

    pub(crate) fn as_leaf_mut(&mut self) -> Option<&mut LeafNode> {
        match self {
            TreeNode::Group(_) => None,
            TreeNode::Marker(leaf) => Some(leaf),
            TreeNode::Report(report) => Some(&mut report.leaf),
        }
    }

    pub fn is_report(&self) -> bool {
        matches!(self, TreeNode::Report(_))
    }

    pub fn label(&self) -> String {
        match self {
            TreeNode::Group(group) => group
                .segment
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            TreeNode::Marker(leaf) => leaf.label(),
            TreeNode::Report(report) => format!("{} (report)", report.leaf.label()),
        }
    }
}
