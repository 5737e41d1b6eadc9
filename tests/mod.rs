mod common;
mod explorer_flow;
mod tree_properties;
