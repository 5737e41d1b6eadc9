use crate::enums::tree_node::TreeNode;
use crate::services::tree_index::TreeIndex;
use crate::structs::node_id::NodeId;
use crate::traits::explorer_view::ExplorerView;

/// Terminal rendering of the issue tree.
pub struct TreePrinter {
    expanded: bool,
    print_on_refresh: bool,
    last_render: Vec<String>,
}

impl TreePrinter {
    pub fn new(print_on_refresh: bool) -> Self {
        Self {
            expanded: false,
            print_on_refresh,
            last_render: Vec::new(),
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn last_render(&self) -> &[String] {
        &self.last_render
    }

    /// Lines for the current expansion state; collapsed trees only show top level groups.
    pub fn render(&self, tree: &TreeIndex) -> Vec<String> {
        let mut lines = Vec::new();
        let depth_limit = if self.expanded { usize::MAX } else { 1 };

        for child in tree.children(tree.root()) {
            Self::render_node(tree, *child, 0, depth_limit, &[], &mut lines);
        }
        lines
    }

    pub fn print(&mut self, tree: &TreeIndex) {
        self.last_render = self.render(tree);

        println!("\n🌳 Migration issues ({} in {} groups)", tree.leaf_count(), tree.group_count());
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if self.last_render.is_empty() {
            println!("  (no issues)");
        }
        for line in &self.last_render {
            println!("{}", line);
        }
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    fn render_node(tree: &TreeIndex, id: NodeId, depth: usize, depth_limit: usize, highlight: &[NodeId], lines: &mut Vec<String>) {
        let Some(node) = tree.node(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let line = match node {
            TreeNode::Group(_) => format!("{}📁 {} ({})", indent, node.label(), tree.leaves_below(id)),
            TreeNode::Marker(leaf) => format!("{}📄 {} [{}]", indent, node.label(), leaf.marker_id()),
            TreeNode::Report(report) => format!("{}📑 {} [{}]", indent, node.label(), report.leaf.marker_id()),
        };

        if highlight.last() == Some(&id) {
            lines.push(format!("\x1b[1;33m{}\x1b[0m", line));
        } else {
            lines.push(line);
        }

        let on_path = highlight.contains(&id);
        if depth + 1 >= depth_limit && !on_path {
            return;
        }
        for child in node.children() {
            Self::render_node(tree, *child, depth + 1, depth_limit, highlight, lines);
        }
    }
}

impl ExplorerView for TreePrinter {
    fn refresh(&mut self, tree: &TreeIndex) {
        if self.print_on_refresh {
            self.print(tree);
        } else {
            self.last_render = self.render(tree);
        }
    }

    fn collapse_all(&mut self) {
        self.expanded = false;
    }

    fn expand_all(&mut self) {
        self.expanded = true;
    }

    fn reveal(&mut self, tree: &TreeIndex, path: &[NodeId]) {
        let depth_limit = if self.expanded { usize::MAX } else { 1 };
        let mut lines = Vec::new();
        for child in tree.children(tree.root()) {
            Self::render_node(tree, *child, 0, depth_limit, path, &mut lines);
        }
        self.last_render = lines;

        println!("\n🔎 Revealing issue");
        for line in &self.last_render {
            println!("{}", line);
        }
    }
}
