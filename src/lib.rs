//! Projects migration-analysis issues onto workspace markers and keeps a grouped
//! issue tree in step with marker changes.

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod services;
pub mod structs;
pub mod traits;
pub mod workers;
