use std::path::PathBuf;
use std::sync::Arc;
use crate::config::constants::{ATTR_CLASSIFICATION, ATTR_TITLE};
use crate::enums::open_target::OpenTarget;
use crate::enums::segment::Segment;
use crate::structs::issue::Issue;
use crate::structs::marker::{Marker, MarkerId};
use crate::structs::node_id::NodeId;

/// Terminal node wrapping exactly one marker.
#[derive(Debug, Clone)]
pub struct LeafNode {
    pub parent: NodeId,
    pub marker: Marker,
    pub issue: Option<Arc<Issue>>,
}

impl LeafNode {
    pub fn marker_id(&self) -> MarkerId {
        self.marker.id
    }

    pub fn segment(&self) -> Segment {
        Segment::Marker(self.marker.id)
    }

    pub fn label(&self) -> String {
        if let Some(issue) = &self.issue {
            return issue.title.clone();
        }
        self.marker
            .text(ATTR_TITLE)
            .or_else(|| self.marker.text(ATTR_CLASSIFICATION))
            .or_else(|| self.marker.message())
            .unwrap_or("(untitled issue)")
            .to_string()
    }

    pub fn source_target(&self) -> OpenTarget {
        OpenTarget::Source {
            resource: self.marker.resource.clone(),
            line: self.marker.line(),
        }
    }
}

/// Leaf that opens the generated report of its issue instead of the source file.
#[derive(Debug, Clone)]
pub struct ReportNode {
    pub leaf: LeafNode,
    pub report_path: PathBuf,
}
