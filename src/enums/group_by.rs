use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// One level of the issue tree's grouping function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Severity,
    Rule,
    Kind,
    Classification,
    Project,
    Folder,
    File,
}

impl GroupBy {
    pub fn name(&self) -> &'static str {
        match self {
            GroupBy::Severity => "severity",
            GroupBy::Rule => "rule",
            GroupBy::Kind => "kind",
            GroupBy::Classification => "classification",
            GroupBy::Project => "project",
            GroupBy::Folder => "folder",
            GroupBy::File => "file",
        }
    }

    /// Parses a comma separated list such as `severity,rule,file`.
    pub fn parse_list(value: &str) -> Result<Vec<GroupBy>, String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(GroupBy::from_str)
            .collect()
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "severity" => Ok(GroupBy::Severity),
            "rule" => Ok(GroupBy::Rule),
            "kind" => Ok(GroupBy::Kind),
            "classification" => Ok(GroupBy::Classification),
            "project" => Ok(GroupBy::Project),
            "folder" => Ok(GroupBy::Folder),
            "file" => Ok(GroupBy::File),
            other => Err(format!(
                "unknown grouping level '{}' (expected one of: severity, rule, kind, classification, project, folder, file)",
                other
            )),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
