pub mod annotation_store;
pub mod explorer_view;
pub mod progress_sink;
pub mod resource_resolver;
