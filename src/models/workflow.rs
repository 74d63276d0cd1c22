use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Workflow instance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Instance is executing tasks
    Running,
    /// Instance is suspended awaiting an external resume
    Paused,
    /// Instance finished successfully
    Completed,
    /// Instance finished with a failure
    Failed,
    /// Instance exceeded its execution timeout
    TimedOut,
    /// Instance was terminated externally
    Terminated,
}

impl WorkflowStatus {
    /// Check if this is a terminal status (no further transitions occur)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::TimedOut | Self::Terminated
        )
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timed_out"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

impl std::str::FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "timed_out" => Ok(Self::TimedOut),
            "terminated" => Ok(Self::Terminated),
            _ => Err(format!("Invalid workflow status: {s}")),
        }
    }
}

impl Default for WorkflowStatus {
    fn default() -> Self {
        Self::Running
    }
}

/// A workflow instance as observed through the executor contract.
///
/// The harness never creates instances directly; it only fetches them to
/// inspect status and terminates the non-terminal ones during reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Instance identifier
    pub workflow_id: Uuid,

    /// Owning definition name
    pub name: String,

    /// Owning definition version
    pub version: i32,

    /// Current status
    pub status: WorkflowStatus,

    /// Input the instance was started with
    #[serde(default)]
    pub input: HashMap<String, Value>,

    /// Why the instance ended early, set when it was terminated or failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_termination: Option<String>,

    /// When the instance started
    pub start_time: DateTime<Utc>,

    /// When the instance reached a terminal status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}
