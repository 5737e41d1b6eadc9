use std::path::PathBuf;
use crate::structs::resource_path::ResourcePath;

/// What double-clicking a leaf opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenTarget {
    Source { resource: ResourcePath, line: Option<i64> },
    Report(PathBuf),
}
