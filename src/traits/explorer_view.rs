use crate::services::tree_index::TreeIndex;
use crate::structs::node_id::NodeId;

/// Presentation side of the issue explorer.
pub trait ExplorerView: Send {
    fn refresh(&mut self, tree: &TreeIndex);

    fn collapse_all(&mut self);

    fn expand_all(&mut self);

    /// Reveal and select the node at the end of `path`.
    fn reveal(&mut self, tree: &TreeIndex, path: &[NodeId]);
}
