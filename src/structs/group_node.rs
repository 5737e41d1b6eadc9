use std::collections::HashMap;
use crate::enums::segment::Segment;
use crate::structs::node_id::NodeId;

/// Interior node of the issue tree. Children are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct GroupNode {
    pub segment: Option<Segment>,
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
    index: HashMap<Segment, NodeId>,
}

impl GroupNode {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(segment: Segment, parent: NodeId) -> Self {
        Self {
            segment: Some(segment),
            parent: Some(parent),
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, segment: &Segment) -> Option<NodeId> {
        self.index.get(segment).copied()
    }

    pub(crate) fn add_child(&mut self, segment: Segment, child: NodeId) {
        self.children.push(child);
        self.index.insert(segment, child);
    }

    pub(crate) fn remove_child(&mut self, segment: &Segment) -> Option<NodeId> {
        let child = self.index.remove(segment)?;
        self.children.retain(|id| *id != child);
        Some(child)
    }

    /// Re-keys a child in place, keeping its position.
    pub(crate) fn rekey_child(&mut self, old: &Segment, new: Segment) -> bool {
        match self.index.remove(old) {
            Some(child) => {
                self.index.insert(new, child);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.children.clear();
        self.index.clear();
    }
}
