pub mod config_helper;
pub mod grouping_helper;
pub mod marker_helper;
