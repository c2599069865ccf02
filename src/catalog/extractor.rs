use serde_json::Value;
use tracing::{debug, trace};

use crate::errors::{FieldsError, Result};
use crate::models::field::{FieldCatalog, FieldDefinition, FieldValue};

pub const CUSTOM_FIELD_PREFIX: &str = "customfield_";

/// Builds a [`FieldCatalog`] from a raw `createmeta` response body.
///
/// Walks `projects[].issuetypes[].fields` in document order and keeps the
/// first custom field seen for each display name. Anything missing below the
/// `projects` array is read as empty rather than treated as an error.
pub fn extract_catalog(body: &[u8]) -> Result<FieldCatalog> {
    let document: Value = serde_json::from_slice(body)?;
    extract_from_value(&document)
}

pub fn extract_from_value(document: &Value) -> Result<FieldCatalog> {
    let projects = document["projects"].as_array().ok_or_else(|| {
        FieldsError::MalformedResponse("response has no 'projects' array".to_string())
    })?;

    let mut catalog = FieldCatalog::new();

    for project in projects {
        for issue_type in array_at(project, "issuetypes") {
            collect_fields(issue_type, &mut catalog);
        }
    }

    debug!(
        projects = projects.len(),
        fields = catalog.len(),
        "Extracted custom field catalog"
    );

    Ok(catalog)
}

fn collect_fields(issue_type: &Value, catalog: &mut FieldCatalog) {
    let Some(fields) = issue_type["fields"].as_object() else {
        trace!("Issue type has no fields object, skipping");
        return;
    };

    for (key, field) in fields {
        if !key.starts_with(CUSTOM_FIELD_PREFIX) {
            continue;
        }

        let name = string_at(field, "name");

        if let Some(existing) = catalog.get_by_name(&name) {
            if existing.id != *key {
                debug!(
                    name = %name,
                    kept = %existing.id,
                    skipped = %key,
                    "Duplicate field name with a different ID, keeping the first"
                );
            }
            continue;
        }

        catalog.insert_if_absent(FieldDefinition {
            name,
            id: key.clone(),
            values: allowed_values(field),
        });
    }
}

fn allowed_values(field: &Value) -> Vec<FieldValue> {
    array_at(field, "allowedValues")
        .iter()
        .map(|option| FieldValue {
            value: string_at(option, "value"),
            id: string_at(option, "id"),
        })
        .collect()
}

fn array_at<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value[key].as_array().map(Vec::as_slice).unwrap_or_default()
}

fn string_at(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    fn severity_document() -> Value {
        json!({
            "projects": [{
                "issuetypes": [{
                    "fields": {
                        "customfield_100": {
                            "name": "Severity",
                            "allowedValues": [
                                {"value": "High", "id": "1"},
                                {"value": "Low", "id": "2"}
                            ]
                        },
                        "status": {
                            "name": "Status",
                            "allowedValues": [{"value": "Open", "id": "3"}]
                        }
                    }
                }]
            }]
        })
    }

    #[test]
    fn test_extracts_severity_example() {
        let catalog = extract_catalog(&body(severity_document())).unwrap();

        assert_eq!(catalog.len(), 1);
        let severity = catalog.get_by_name("Severity").unwrap();
        assert_eq!(severity.id, "customfield_100");
        assert_eq!(
            severity.values,
            vec![
                FieldValue { value: "High".to_string(), id: "1".to_string() },
                FieldValue { value: "Low".to_string(), id: "2".to_string() },
            ]
        );
        assert!(catalog.get_by_name("Status").is_none());
    }

    #[test]
    fn test_non_custom_fields_are_never_extracted() {
        let document = json!({
            "projects": [{
                "issuetypes": [{
                    "fields": {
                        "summary": {"name": "Summary"},
                        "priority": {"name": "Priority", "allowedValues": [{"value": "P1", "id": "1"}]},
                        "xcustomfield_1": {"name": "Sneaky"},
                        "customfield_7": {"name": "Team"}
                    }
                }]
            }]
        });

        let catalog = extract_catalog(&body(document)).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["customfield_7"]);
    }

    #[test]
    fn test_duplicate_names_keep_first_in_document_order() {
        let document = json!({
            "projects": [
                {
                    "issuetypes": [
                        {"fields": {
                            "customfield_200": {"name": "Team", "allowedValues": [{"value": "Red", "id": "10"}]},
                            "customfield_100": {"name": "Team", "allowedValues": [{"value": "Blue", "id": "11"}]}
                        }},
                        {"fields": {
                            "customfield_300": {"name": "Team"}
                        }}
                    ]
                },
                {
                    "issuetypes": [
                        {"fields": {"customfield_400": {"name": "Team"}}}
                    ]
                }
            ]
        });

        let catalog = extract_catalog(&body(document)).unwrap();
        assert_eq!(catalog.len(), 1);

        let team = catalog.get_by_name("Team").unwrap();
        assert_eq!(team.id, "customfield_200");
        assert_eq!(team.values.len(), 1);
        assert_eq!(team.values[0].value, "Red");
    }

    #[test]
    fn test_catalog_follows_traversal_order() {
        let document = json!({
            "projects": [
                {"issuetypes": [{"fields": {
                    "customfield_3": {"name": "Gamma"},
                    "customfield_1": {"name": "Alpha"}
                }}]},
                {"issuetypes": [{"fields": {
                    "customfield_2": {"name": "Beta"}
                }}]}
            ]
        });

        let catalog = extract_catalog(&body(document)).unwrap();
        let names: Vec<&str> = catalog.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn test_missing_attributes_read_as_empty() {
        let document = json!({
            "projects": [
                {"key": "NOTYPES"},
                {"issuetypes": [
                    {"name": "Bug"},
                    {"fields": "not an object"},
                    {"fields": {
                        "customfield_1": {
                            "allowedValues": [
                                {"value": "Only value"},
                                {"id": "99"},
                                {"value": 5, "id": null}
                            ]
                        },
                        "customfield_2": {"name": "No options", "allowedValues": "nope"},
                        "customfield_3": "scalar field"
                    }}
                ]}
            ]
        });

        let catalog = extract_catalog(&body(document)).unwrap();

        let unnamed = catalog.get_by_name("").unwrap();
        assert_eq!(unnamed.id, "customfield_1");
        assert_eq!(
            unnamed.values,
            vec![
                FieldValue { value: "Only value".to_string(), id: String::new() },
                FieldValue { value: String::new(), id: "99".to_string() },
                FieldValue::default(),
            ]
        );

        let no_options = catalog.get_by_name("No options").unwrap();
        assert!(no_options.values.is_empty());

        // customfield_3 has no name either, so it loses to customfield_1
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_empty_projects_is_empty_catalog() {
        let catalog = extract_catalog(br#"{"projects": []}"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = extract_catalog(b"<html>Login required</html>").unwrap_err();
        assert!(matches!(err, FieldsError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_projects_is_malformed() {
        let err = extract_catalog(br#"{"errorMessages": ["nope"]}"#).unwrap_err();
        assert!(matches!(err, FieldsError::MalformedResponse(_)));

        let err = extract_catalog(br#"{"projects": {"0": {}}}"#).unwrap_err();
        assert!(matches!(err, FieldsError::MalformedResponse(_)));

        let err = extract_catalog(b"[]").unwrap_err();
        assert!(matches!(err, FieldsError::MalformedResponse(_)));
    }
}
