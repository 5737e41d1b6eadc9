pub mod analysis_batch;
pub mod classification_details;
pub mod cli;
pub mod config;
pub mod group_node;
pub mod hint_details;
pub mod issue;
pub mod leaf_node;
pub mod marker;
pub mod node_id;
pub mod project;
pub mod projection_summary;
pub mod resource_path;
pub mod workspace_state;
