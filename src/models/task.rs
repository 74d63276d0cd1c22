use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Task instance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Queued, waiting for a worker to poll it
    Scheduled,
    /// Claimed by a worker and executing
    InProgress,
    /// Finished successfully
    Completed,
    /// Finished with a failure
    Failed,
    /// Exceeded its execution or response timeout
    TimedOut,
}

impl TaskStatus {
    /// Check if this is a terminal status (no further transitions occur)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::TimedOut)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timed_out"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "timed_out" => Ok(Self::TimedOut),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

/// A task instance as claimed and updated through the execution contract.
///
/// Input data is populated by the engine before the task becomes pollable;
/// output data and the failure reason are mutated by the worker simulator
/// before the update is pushed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Instance identifier
    pub task_id: Uuid,

    /// Owning task definition name
    pub task_def_name: String,

    /// Workflow instance this task belongs to
    pub workflow_id: Uuid,

    /// Current status
    pub status: TaskStatus,

    /// Input parameters resolved by the engine at scheduling time
    #[serde(default)]
    pub input_data: HashMap<String, Value>,

    /// Output produced by the worker
    #[serde(default)]
    pub output_data: HashMap<String, Value>,

    /// Failure reason, set only when the task did not complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_incompletion: Option<String>,

    /// Worker that currently holds the claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,

    /// Number of times this instance has been polled
    #[serde(default)]
    pub poll_count: u32,

    /// When the engine scheduled the instance
    pub scheduled_time: DateTime<Utc>,

    /// When the instance last changed
    pub update_time: DateTime<Utc>,
}

impl Task {
    /// Mark the task completed, merging any output parameters
    pub fn complete(&mut self, output_params: Option<HashMap<String, Value>>) {
        self.status = TaskStatus::Completed;
        if let Some(params) = output_params {
            self.output_data.extend(params);
        }
        self.update_time = Utc::now();
    }

    /// Mark the task failed with the given reason
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = TaskStatus::Failed;
        self.reason_for_incompletion = Some(reason.into());
        self.update_time = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled_task() -> Task {
        Task {
            task_id: Uuid::new_v4(),
            task_def_name: "fixture_task_0".to_string(),
            workflow_id: Uuid::new_v4(),
            status: TaskStatus::Scheduled,
            input_data: HashMap::new(),
            output_data: HashMap::new(),
            reason_for_incompletion: None,
            worker_id: None,
            poll_count: 0,
            scheduled_time: Utc::now(),
            update_time: Utc::now(),
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(TaskStatus::TimedOut.is_terminal());
        assert!(!TaskStatus::Scheduled.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            "completed".parse::<TaskStatus>().unwrap(),
            TaskStatus::Completed
        );
        assert!("nope".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_complete_merges_output() {
        let mut task = scheduled_task();
        task.output_data
            .insert("existing".to_string(), serde_json::json!(1));

        let mut params = HashMap::new();
        params.insert("key".to_string(), serde_json::json!("value"));
        task.complete(Some(params));

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.output_data.get("existing"), Some(&serde_json::json!(1)));
        assert_eq!(
            task.output_data.get("key"),
            Some(&serde_json::json!("value"))
        );
    }

    #[test]
    fn test_complete_without_params_leaves_output_untouched() {
        let mut task = scheduled_task();
        task.complete(None);
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.output_data.is_empty());
    }

    #[test]
    fn test_fail_records_reason() {
        let mut task = scheduled_task();
        task.fail("boom");
        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(task.reason_for_incompletion.as_deref(), Some("boom"));
    }
}
