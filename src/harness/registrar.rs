//! Definition registrar: loads workflow definition documents from disk
//! and pushes them to the metadata service.

use super::TestHarness;
use crate::error::{HarnessError, Result};
use crate::models::WorkflowDefinition;
use std::path::Path;
use tracing::{debug, info};

impl TestHarness {
    /// Load each JSON document and register it as a workflow definition,
    /// updating in place when a definition with the same name and version
    /// already exists.
    ///
    /// Documents are processed in order and the first failure propagates.
    /// Definitions registered before the failure stay registered; there is
    /// no rollback. Callers wanting a clean slate should [`reset`] first
    /// and retry.
    ///
    /// [`reset`]: TestHarness::reset
    pub async fn register_workflow_definitions<P: AsRef<Path>>(
        &self,
        documents: &[P],
    ) -> Result<()> {
        for document in documents {
            let path = document.as_ref();
            let contents = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| HarnessError::document(path, e.to_string()))?;
            let definition = WorkflowDefinition::from_json(&contents)
                .map_err(|e| HarnessError::document(path, e.to_string()))?;

            debug!(
                name = %definition.name,
                version = definition.version,
                path = %path.display(),
                "Registering workflow definition"
            );
            self.services()
                .metadata
                .update_workflow_definition(definition)
                .await?;
        }

        info!(
            count = documents.len(),
            "📋 Workflow definitions registered"
        );
        Ok(())
    }
}
