use crate::config::constants::*;
use crate::enums::attribute_value::AttributeValue;
use crate::enums::issue_details::IssueDetails;
use crate::enums::marker_severity::MarkerSeverity;
use crate::structs::issue::Issue;
use crate::structs::marker::Attributes;
use crate::structs::resource_path::ResourcePath;

pub struct MarkerHelper;

impl MarkerHelper {
    /// Full attribute set written for a freshly projected issue.
    pub fn issue_attributes(issue: &Issue, configuration: &str, resource: &ResourcePath) -> Attributes {
        let mut attributes = Attributes::new();
        let severity = if issue.is_fixed() {
            MarkerSeverity::Info
        } else {
            MarkerSeverity::from_issue_severity(&issue.severity)
        };

        Self::put(&mut attributes, ATTR_CONFIGURATION_NAME, configuration);
        if let Some(handle) = Self::element_handle(resource) {
            Self::put(&mut attributes, ATTR_ELEMENT_HANDLE, handle);
        }
        Self::put(&mut attributes, ATTR_SOURCE_URI, issue.uri());
        Self::put(&mut attributes, ATTR_SEVERITY, severity.as_int());
        Self::put(&mut attributes, ATTR_ISSUE_SEVERITY, issue.severity.as_str());
        Self::put(&mut attributes, ATTR_RULE_ID, issue.rule_id.as_str());
        Self::put(&mut attributes, ATTR_EFFORT, issue.effort);

        match &issue.details {
            IssueDetails::Hint(hint) => {
                Self::put(&mut attributes, ATTR_MESSAGE, issue.title.as_str());
                Self::put(&mut attributes, ATTR_LINE_NUMBER, hint.line_number);
                Self::put(&mut attributes, ATTR_TITLE, issue.title.as_str());
                Self::put(&mut attributes, ATTR_HINT, hint.hint.as_str());
                Self::put(&mut attributes, ATTR_LINE, hint.line_number);
                Self::put(&mut attributes, ATTR_COLUMN, hint.column);
                Self::put(&mut attributes, ATTR_LENGTH, hint.length);
                Self::put(&mut attributes, ATTR_SOURCE_SNIPPET, hint.source_snippet.as_str());
            }
            IssueDetails::Classification(classification) => {
                Self::put(&mut attributes, ATTR_MESSAGE, classification.classification.as_str());
                Self::put(&mut attributes, ATTR_CLASSIFICATION, classification.classification.as_str());
                Self::put(&mut attributes, ATTR_DESCRIPTION, classification.description.as_str());
                // Classifications cover the whole file, anchor them at its start
                Self::put(&mut attributes, ATTR_LINE_NUMBER, 1_i64);
                Self::put(&mut attributes, ATTR_CHAR_START, 0_i64);
                Self::put(&mut attributes, ATTR_CHAR_END, 0_i64);
            }
        }

        Self::put(&mut attributes, ATTR_USER_EDITABLE, false);
        attributes
    }

    /// Handle of the source element behind a resource, only Java sources have one.
    pub fn element_handle(resource: &ResourcePath) -> Option<String> {
        if resource.extension() != Some("java") {
            return None;
        }
        let project = resource.project()?;
        let rest = resource.as_str().strip_prefix(project)?.trim_start_matches('/');
        Some(format!("={}/{}", project, rest))
    }

    fn put(attributes: &mut Attributes, key: &str, value: impl Into<AttributeValue>) {
        attributes.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::classification_details::ClassificationDetails;
    use crate::structs::hint_details::HintDetails;

    #[test]
    fn hint_attributes_carry_location_and_text() {
        let issue = Issue::new(
            "h-1",
            "mandatory",
            "ejb-01",
            "Remote EJB",
            "/ws/shop/src/Cart.java",
            IssueDetails::Hint(HintDetails {
                line_number: 12,
                column: 4,
                length: 9,
                source_snippet: "@Remote".to_string(),
                hint: "Use REST".to_string(),
            }),
        );
        let attributes = MarkerHelper::issue_attributes(&issue, "default", &ResourcePath::new("shop/src/Cart.java"));

        assert_eq!(attributes[ATTR_SOURCE_URI], AttributeValue::from("issue://h-1"));
        assert_eq!(attributes[ATTR_SEVERITY], AttributeValue::from(MarkerSeverity::Error.as_int()));
        assert_eq!(attributes[ATTR_LINE], AttributeValue::from(12_i64));
        assert_eq!(attributes[ATTR_MESSAGE], AttributeValue::from("Remote EJB"));
        assert_eq!(attributes[ATTR_ELEMENT_HANDLE], AttributeValue::from("=shop/src/Cart.java"));
        assert_eq!(attributes[ATTR_USER_EDITABLE], AttributeValue::from(false));
        assert!(!attributes.contains_key(ATTR_CLASSIFICATION));
    }

    #[test]
    fn classification_attributes_anchor_at_file_start() {
        let issue = Issue::new(
            "c-1",
            "optional",
            "xml-01",
            "Descriptor",
            "/ws/shop/web.xml",
            IssueDetails::Classification(ClassificationDetails {
                classification: "Web XML".to_string(),
                description: "Servlet descriptor".to_string(),
            }),
        );
        let attributes = MarkerHelper::issue_attributes(&issue, "default", &ResourcePath::new("shop/web.xml"));

        assert_eq!(attributes[ATTR_CLASSIFICATION], AttributeValue::from("Web XML"));
        assert_eq!(attributes[ATTR_LINE_NUMBER], AttributeValue::from(1_i64));
        assert_eq!(attributes[ATTR_CHAR_END], AttributeValue::from(0_i64));
        assert_eq!(attributes[ATTR_SEVERITY], AttributeValue::from(MarkerSeverity::Warning.as_int()));
        assert!(!attributes.contains_key(ATTR_ELEMENT_HANDLE));
    }

    #[test]
    fn fixed_issues_are_written_as_info() {
        let issue = Issue::new("h-2", "mandatory", "r", "T", "/ws/p/A.java", IssueDetails::Hint(HintDetails::default()));
        issue.set_fixed(true);
        let attributes = MarkerHelper::issue_attributes(&issue, "default", &ResourcePath::new("p/A.java"));
        assert_eq!(attributes[ATTR_SEVERITY], AttributeValue::from(MarkerSeverity::Info.as_int()));
    }
}
