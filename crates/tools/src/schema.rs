//! Validation of declarative parameter schemas.
//!
//! The catalog is the one wire contract shared with the LLM provider, so
//! every published schema is checked for shape before it leaves the process.

use serde_json::Value;
use thiserror::Error;

/// Types a parameter may declare.
pub const ALLOWED_TYPES: [&str; 6] = ["string", "integer", "number", "boolean", "array", "object"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Schema root must be an object with type \"object\"")]
    NotAnObject,

    #[error("Schema is missing a \"properties\" object")]
    MissingProperties,

    #[error("Property '{property}' has invalid type: {found}")]
    InvalidType { property: String, found: String },

    #[error("Property '{0}' has no description")]
    MissingDescription(String),

    #[error("Required parameter '{0}' is not declared in properties")]
    UndeclaredRequired(String),

    #[error("Property '{0}' has an empty enum")]
    EmptyEnum(String),
}

/// Check that `schema` is a well-formed function-calling parameter schema.
pub fn validate_parameter_schema(schema: &Value) -> Result<(), SchemaError> {
    let root = schema.as_object().ok_or(SchemaError::NotAnObject)?;
    if root.get("type").and_then(Value::as_str) != Some("object") {
        return Err(SchemaError::NotAnObject);
    }

    let properties = root
        .get("properties")
        .and_then(Value::as_object)
        .ok_or(SchemaError::MissingProperties)?;

    for (name, spec) in properties {
        let ty = spec.get("type").and_then(Value::as_str).unwrap_or_default();
        if !ALLOWED_TYPES.contains(&ty) {
            return Err(SchemaError::InvalidType {
                property: name.clone(),
                found: spec.get("type").map(Value::to_string).unwrap_or_else(|| "none".into()),
            });
        }

        let described = spec
            .get("description")
            .and_then(Value::as_str)
            .is_some_and(|d| !d.trim().is_empty());
        if !described {
            return Err(SchemaError::MissingDescription(name.clone()));
        }

        if let Some(values) = spec.get("enum") {
            if values.as_array().is_none_or(Vec::is_empty) {
                return Err(SchemaError::EmptyEnum(name.clone()));
            }
        }
    }

    if let Some(required) = root.get("required").and_then(Value::as_array) {
        for name in required {
            let name = name.as_str().unwrap_or_default();
            if !properties.contains_key(name) {
                return Err(SchemaError::UndeclaredRequired(name.to_string()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_schema() {
        let schema = json!({
            "type": "object",
            "properties": {
                "job_ad_text": { "type": "string", "description": "The ad" },
                "language": { "type": "string", "enum": ["en", "sv"], "description": "Language" }
            },
            "required": ["job_ad_text"]
        });
        assert_eq!(validate_parameter_schema(&schema), Ok(()));
    }

    #[test]
    fn rejects_unknown_type() {
        let schema = json!({
            "type": "object",
            "properties": { "when": { "type": "date", "description": "When" } }
        });
        assert!(matches!(
            validate_parameter_schema(&schema),
            Err(SchemaError::InvalidType { .. })
        ));
    }

    #[test]
    fn rejects_blank_description() {
        let schema = json!({
            "type": "object",
            "properties": { "name": { "type": "string", "description": " " } }
        });
        assert_eq!(
            validate_parameter_schema(&schema),
            Err(SchemaError::MissingDescription("name".into()))
        );
    }

    #[test]
    fn rejects_required_without_property() {
        let schema = json!({
            "type": "object",
            "properties": {},
            "required": ["ghost"]
        });
        assert_eq!(
            validate_parameter_schema(&schema),
            Err(SchemaError::UndeclaredRequired("ghost".into()))
        );
    }

    #[test]
    fn rejects_non_object_root() {
        assert_eq!(validate_parameter_schema(&json!([])), Err(SchemaError::NotAnObject));
        assert_eq!(
            validate_parameter_schema(&json!({"type": "object"})),
            Err(SchemaError::MissingProperties)
        );
    }
}
