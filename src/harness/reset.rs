//! State resetter: brings the engine to a quiescent state for the next
//! test by terminating leftover workflows, draining every queue, and
//! truncating the scratch input file.

use super::TestHarness;
use crate::constants::system;
use crate::error::Result;
use tracing::{debug, info, warn};

impl TestHarness {
    /// Terminate every non-terminal workflow instance across all
    /// registered definitions, then flush every queue and truncate the
    /// scratch input file.
    ///
    /// Ordering across workflows is not guaranteed, only completeness.
    /// Any single failure propagates immediately; test isolation depends
    /// on failing loudly rather than continuing past a workflow that
    /// could not be terminated.
    pub async fn reset(&self) -> Result<()> {
        info!("🧹 Resetting engine state between tests");

        let definitions = self.services().metadata.workflow_definitions().await?;
        let mut terminated = 0usize;

        for definition in &definitions {
            let running = self
                .services()
                .execution
                .running_workflow_ids(&definition.name, definition.version)
                .await?;

            for workflow_id in running {
                let workflow = self.services().executor.workflow(workflow_id).await?;
                if workflow.status.is_terminal() {
                    continue;
                }

                warn!(
                    workflow_id = %workflow_id,
                    name = %definition.name,
                    version = definition.version,
                    status = %workflow.status,
                    "Terminating leftover workflow"
                );
                self.services()
                    .executor
                    .terminate_workflow(workflow_id, system::RESET_TERMINATION_REASON)
                    .await?;
                terminated += 1;
            }
        }

        let mut flushed = 0u64;
        for queue in self.services().queues.queues().await? {
            flushed += self.services().queues.flush_queue(&queue.name).await?;
        }

        self.truncate_scratch_file().await?;

        info!(
            definitions = definitions.len(),
            terminated_workflows = terminated,
            flushed_messages = flushed,
            "✅ Engine reset complete"
        );
        Ok(())
    }

    /// Create-or-truncate the scratch file so no test sees another test's
    /// leftover file-based task input.
    async fn truncate_scratch_file(&self) -> Result<()> {
        let path = self.config().scratch_file();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::File::create(&path).await?;

        debug!(path = %path.display(), "Scratch input file truncated");
        Ok(())
    }
}
