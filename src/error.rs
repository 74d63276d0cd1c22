//! # Harness Error Types
//!
//! Structured error handling for harness operations using thiserror.
//! The taxonomy is deliberately small: not-found lookups are the only
//! errors the harness ever recovers from locally; every other
//! engine-reported failure propagates unchanged to the calling test.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by harness operations
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("task definition not found: {name}")]
    TaskDefinitionNotFound { name: String },

    #[error("workflow not found: {workflow_id}")]
    WorkflowNotFound { workflow_id: uuid::Uuid },

    #[error("engine error during {operation}: {message}")]
    Engine { operation: String, message: String },

    #[error("definition document error: {path}: {message}")]
    Document { path: PathBuf, message: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HarnessError {
    /// Create a not-found error for a task definition lookup miss
    pub fn task_definition_not_found(name: impl Into<String>) -> Self {
        Self::TaskDefinitionNotFound { name: name.into() }
    }

    /// Create a not-found error for a workflow instance lookup miss
    pub fn workflow_not_found(workflow_id: uuid::Uuid) -> Self {
        Self::WorkflowNotFound { workflow_id }
    }

    /// Create an engine error for a failed service call
    pub fn engine(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Engine {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a document error for a registrar read/parse failure
    pub fn document(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Document {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Check whether this is a not-found lookup miss
    ///
    /// The Fixture Bootstrapper recovers not-found lookups into an
    /// absent-value result and registers the missing definition. Every
    /// other error kind must propagate.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            HarnessError::TaskDefinitionNotFound { .. } | HarnessError::WorkflowNotFound { .. }
        )
    }
}

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;
