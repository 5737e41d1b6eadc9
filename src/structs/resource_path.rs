use std::fmt;
use std::path::{Component, Path};
use serde::{Deserialize, Serialize};

/// Workspace-relative, `/` separated resource path. The empty path is the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new(path: &str) -> Self {
        let normalized = path
            .split(['/', '\\'])
            .filter(|part| !part.is_empty() && *part != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self(normalized)
    }

    pub fn workspace_root() -> Self {
        Self(String::new())
    }

    pub fn from_relative(path: &Path) -> Self {
        let parts: Vec<String> = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();
        Self(parts.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_workspace_root(&self) -> bool {
        self.0.is_empty()
    }

    /// First segment of the path; markers are owned by the project they live in.
    pub fn project(&self) -> Option<&str> {
        self.0.split('/').next().filter(|s| !s.is_empty())
    }

    pub fn parent(&self) -> Option<ResourcePath> {
        if self.is_workspace_root() {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some((parent, _)) => Some(Self(parent.to_string())),
            None => Some(Self::workspace_root()),
        }
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    pub fn extension(&self) -> Option<&str> {
        self.file_name().rsplit_once('.').map(|(_, ext)| ext).filter(|ext| !ext.is_empty())
    }

    /// True when `self` equals `scope` or lies beneath it.
    pub fn is_within(&self, scope: &ResourcePath) -> bool {
        if scope.is_workspace_root() {
            return true;
        }
        self.0 == scope.0
            || (self.0.starts_with(&scope.0) && self.0.as_bytes().get(scope.0.len()) == Some(&b'/'))
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_workspace_root() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
