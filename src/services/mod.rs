pub mod change_bus;
pub mod issue_explorer;
pub mod issue_registry;
pub mod marker_projector;
pub mod memory_store;
pub mod tree_index;
pub mod workspace_resolver;
pub mod workspace_session;
