pub mod log_setup;
pub mod progress_logger;
pub mod tree_printer;
