use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// WorkflowDefinition is a versioned document describing a sequence of task
/// references. Definitions are registered by the harness from external JSON
/// documents and live for the duration of the owning test suite.
///
/// (name, version) is the composite unique key; publishing the same pair
/// again is an update-or-create per engine semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Definition name
    pub name: String,

    /// Definition version; together with `name` forms the unique key
    #[serde(default = "default_version")]
    pub version: i32,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered task references making up the workflow
    #[serde(default)]
    pub tasks: Vec<TaskReference>,
}

fn default_version() -> i32 {
    1
}

/// A single task reference inside a workflow definition document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReference {
    /// Task definition name this reference points at
    pub name: String,

    /// Reference name unique within the workflow definition
    pub task_reference_name: String,

    /// Input parameter expressions resolved by the engine at scheduling time
    #[serde(default)]
    pub input_parameters: HashMap<String, Value>,
}

impl WorkflowDefinition {
    /// Parse a definition from a JSON document
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full_document() {
        let document = r#"{
            "name": "order_fulfillment",
            "version": 2,
            "description": "two step flow",
            "tasks": [
                {
                    "name": "fixture_task_0",
                    "task_reference_name": "reserve_stock",
                    "input_parameters": {"sku": "WIDGET-001"}
                },
                {
                    "name": "fixture_task_1",
                    "task_reference_name": "ship_order"
                }
            ]
        }"#;

        let def = WorkflowDefinition::from_json(document).expect("parse");
        assert_eq!(def.name, "order_fulfillment");
        assert_eq!(def.version, 2);
        assert_eq!(def.tasks.len(), 2);
        assert_eq!(def.tasks[0].task_reference_name, "reserve_stock");
        assert_eq!(
            def.tasks[0].input_parameters.get("sku"),
            Some(&serde_json::json!("WIDGET-001"))
        );
        assert!(def.tasks[1].input_parameters.is_empty());
    }

    #[test]
    fn test_from_json_defaults_version_to_one() {
        let def = WorkflowDefinition::from_json(r#"{"name": "minimal"}"#).expect("parse");
        assert_eq!(def.version, 1);
        assert!(def.tasks.is_empty());
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(WorkflowDefinition::from_json("{\"version\": 1}").is_err());
        assert!(WorkflowDefinition::from_json("not json at all").is_err());
    }
}
