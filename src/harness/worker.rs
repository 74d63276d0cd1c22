//! Worker simulator: drives a single task through the poll / ack /
//! update cycle a real worker would perform, without standing up a
//! worker process.

use super::TestHarness;
use crate::error::Result;
use crate::models::PollResult;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

/// What the simulated worker reports back for the task it claimed.
#[derive(Debug)]
enum TaskOutcome {
    Completed(Option<HashMap<String, Value>>),
    Failed(String),
}

impl TestHarness {
    /// Poll one task of `task_name` as `worker_id`, acknowledge it, mark
    /// it completed with `output_params` merged into its output, and push
    /// the update back to the engine.
    ///
    /// When no task is available the result carries no task and nothing
    /// is acknowledged or updated. A non-zero `wait_at_end_seconds`
    /// suspends the caller after the update, which gives the engine time
    /// to act on it before the test asserts.
    pub async fn poll_and_complete_task(
        &self,
        task_name: &str,
        worker_id: &str,
        output_params: Option<HashMap<String, Value>>,
        wait_at_end_seconds: u64,
    ) -> Result<PollResult> {
        self.poll_and_update(
            task_name,
            worker_id,
            TaskOutcome::Completed(output_params),
            wait_at_end_seconds,
        )
        .await
    }

    /// Poll one task of `task_name` as `worker_id`, acknowledge it, mark
    /// it failed with `failure_reason`, and push the update back to the
    /// engine.
    ///
    /// Absent-task and `wait_at_end_seconds` semantics match
    /// [`poll_and_complete_task`](Self::poll_and_complete_task).
    pub async fn poll_and_fail_task(
        &self,
        task_name: &str,
        worker_id: &str,
        failure_reason: &str,
        wait_at_end_seconds: u64,
    ) -> Result<PollResult> {
        self.poll_and_update(
            task_name,
            worker_id,
            TaskOutcome::Failed(failure_reason.to_string()),
            wait_at_end_seconds,
        )
        .await
    }

    async fn poll_and_update(
        &self,
        task_name: &str,
        worker_id: &str,
        outcome: TaskOutcome,
        wait_at_end_seconds: u64,
    ) -> Result<PollResult> {
        let polled = self
            .services()
            .execution
            .poll_task(task_name, worker_id)
            .await?;

        let Some(mut task) = polled else {
            warn!(task_name, worker_id, "No task available to poll");
            return Ok(PollResult::empty());
        };

        let acknowledged = self
            .services()
            .execution
            .ack_task(task.task_id, worker_id)
            .await?;

        match outcome {
            TaskOutcome::Completed(output_params) => task.complete(output_params),
            TaskOutcome::Failed(reason) => task.fail(reason),
        }
        self.services().execution.update_task(&task).await?;

        info!(
            task_id = %task.task_id,
            task_name,
            worker_id,
            status = %task.status,
            acknowledged,
            "Simulated worker updated task"
        );

        if wait_at_end_seconds > 0 {
            tokio::time::sleep(Duration::from_secs(wait_at_end_seconds)).await;
        }

        Ok(PollResult {
            task: Some(task),
            acknowledged,
        })
    }
}
