//! Run metadata declared by participants in `metadata.json`.
//!
//! Metadata arrives as a loosely typed JSON object. [`Metadata::from_json`]
//! validates every required field once, so downstream code only ever sees a
//! fully populated record.

use crate::errors::MetadataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the submitted model was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "llm-only")]
    LlmOnly,
    #[serde(rename = "human+llm")]
    HumanPlusLlm,
}

impl ModelType {
    pub fn all() -> &'static [ModelType] {
        &[Self::Human, Self::LlmOnly, Self::HumanPlusLlm]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::LlmOnly => "llm-only",
            Self::HumanPlusLlm => "human+llm",
        }
    }

    fn allowed_values() -> String {
        Self::all()
            .iter()
            .map(ModelType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| MetadataError::InvalidEnumValue {
                field: "model_type".to_string(),
                value: s.to_string(),
                allowed: Self::allowed_values(),
            })
    }
}

/// Validated run metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Team name; must match the enclosing team folder
    pub team: String,
    /// Free-form model name
    pub model: String,
    pub model_type: ModelType,
    /// Declared runtime, kept verbatim as written by the participant
    pub runtime_minutes: String,
}

impl Metadata {
    /// Required fields, in the order they are checked
    pub const REQUIRED_FIELDS: [&'static str; 4] = ["team", "model", "model_type", "runtime_minutes"];

    /// Parse metadata from raw JSON text
    pub fn from_json_str(text: &str) -> Result<Self, MetadataError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| MetadataError::Malformed(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Validate a JSON document into metadata.
    ///
    /// Values are stringified and trimmed before checking, so
    /// `"runtime_minutes": 12` is accepted. Unknown fields are ignored.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, MetadataError> {
        let object = value
            .as_object()
            .ok_or_else(|| MetadataError::Malformed(format!("expected an object, got {}", kind_of(value))))?;

        let team = require(object, "team")?;
        let model = require(object, "model")?;
        let model_type = require(object, "model_type")?.parse::<ModelType>()?;
        let runtime_minutes = require(object, "runtime_minutes")?;

        Ok(Self {
            team,
            model,
            model_type,
            runtime_minutes,
        })
    }
}

fn require(
    object: &serde_json::Map<String, serde_json::Value>,
    field: &str,
) -> Result<String, MetadataError> {
    let value = object.get(field).map(stringify).unwrap_or_default();
    let value = value.trim();
    if value.is_empty() {
        return Err(MetadataError::MissingRequiredField {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

fn stringify(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> serde_json::Value {
        json!({
            "team": "graph-wizards",
            "model": "GIN + virtual node",
            "model_type": "human+llm",
            "runtime_minutes": 42
        })
    }

    #[test]
    fn test_valid_metadata() {
        let metadata = Metadata::from_json(&valid()).unwrap();
        assert_eq!(metadata.team, "graph-wizards");
        assert_eq!(metadata.model_type, ModelType::HumanPlusLlm);
        assert_eq!(metadata.runtime_minutes, "42");
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut value = valid();
        value["team"] = json!("  graph-wizards  ");
        let metadata = Metadata::from_json(&value).unwrap();
        assert_eq!(metadata.team, "graph-wizards");
    }

    #[test]
    fn test_missing_and_blank_fields() {
        for field in Metadata::REQUIRED_FIELDS {
            let mut value = valid();
            value.as_object_mut().unwrap().remove(field);
            assert_eq!(
                Metadata::from_json(&value),
                Err(MetadataError::MissingRequiredField {
                    field: field.to_string()
                })
            );

            let mut value = valid();
            value[field] = json!("   ");
            assert!(matches!(
                Metadata::from_json(&value),
                Err(MetadataError::MissingRequiredField { .. })
            ));
        }
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut value = valid();
        value["runtime_minutes"] = serde_json::Value::Null;
        assert!(matches!(
            Metadata::from_json(&value),
            Err(MetadataError::MissingRequiredField { field }) if field == "runtime_minutes"
        ));
    }

    #[test]
    fn test_invalid_model_type() {
        let mut value = valid();
        value["model_type"] = json!("robot");
        match Metadata::from_json(&value) {
            Err(MetadataError::InvalidEnumValue { field, value, allowed }) => {
                assert_eq!(field, "model_type");
                assert_eq!(value, "robot");
                assert_eq!(allowed, "human, llm-only, human+llm");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_fields_checked_in_order() {
        let value = json!({ "model_type": "robot" });
        assert!(matches!(
            Metadata::from_json(&value),
            Err(MetadataError::MissingRequiredField { field }) if field == "team"
        ));
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(matches!(
            Metadata::from_json_str("[1, 2]"),
            Err(MetadataError::Malformed(_))
        ));
        assert!(matches!(
            Metadata::from_json_str("{not json"),
            Err(MetadataError::Malformed(_))
        ));
    }

    #[test]
    fn test_model_type_serde_names() {
        let json = serde_json::to_string(&ModelType::LlmOnly).unwrap();
        assert_eq!(json, "\"llm-only\"");
        assert_eq!("human".parse::<ModelType>().unwrap(), ModelType::Human);
    }
}
