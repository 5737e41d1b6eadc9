use crate::config::constants::{ATTR_CLASSIFICATION, ATTR_TITLE, UNKNOWN_GROUP_LABEL};
use crate::enums::group_by::GroupBy;
use crate::enums::marker_kind::MarkerKind;
use crate::structs::marker::Marker;

pub struct GroupingHelper;

impl GroupingHelper {
    /// Group labels from the root down to the leaf's parent.
    ///
    /// Only marker attributes are consulted so a marker groups the same way
    /// whether or not its issue is still bound.
    pub fn segments(levels: &[GroupBy], marker: &Marker) -> Vec<String> {
        levels
            .iter()
            .filter_map(|level| Self::label(*level, marker))
            .collect()
    }

    fn label(level: GroupBy, marker: &Marker) -> Option<String> {
        let label = match level {
            GroupBy::Severity => marker.severity().label().to_string(),
            GroupBy::Rule => Self::non_empty(marker.rule_id()),
            GroupBy::Kind => marker.kind.group_label().to_string(),
            GroupBy::Classification => match marker.kind {
                MarkerKind::Classification => Self::non_empty(marker.text(ATTR_CLASSIFICATION)),
                MarkerKind::Hint => Self::non_empty(marker.text(ATTR_TITLE)),
            },
            GroupBy::Project => Self::non_empty(marker.resource.project()),
            GroupBy::Folder => return Self::folder(marker),
            GroupBy::File => marker.resource.file_name().to_string(),
        };
        Some(label)
    }

    // Files at the top of a project get no folder level
    fn folder(marker: &Marker) -> Option<String> {
        let parent = marker.resource.parent()?;
        let project = marker.resource.project()?;
        let folder = parent.as_str().strip_prefix(project)?.trim_start_matches('/');
        if folder.is_empty() {
            None
        } else {
            Some(folder.to_string())
        }
    }

    fn non_empty(value: Option<&str>) -> String {
        match value {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => UNKNOWN_GROUP_LABEL.to_string(),
        }
    }
}
