pub mod attribute_value;
pub mod commands;
pub mod group_by;
pub mod issue_details;
pub mod marker_event;
pub mod marker_kind;
pub mod marker_severity;
pub mod open_target;
pub mod progress_update;
pub mod segment;
pub mod topic;
pub mod tree_node;
