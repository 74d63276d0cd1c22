//! # Engine Service Contracts
//!
//! The four narrow contracts through which the harness reaches the engine
//! under test. The harness implements none of them; a deployment wires in
//! HTTP or gRPC clients while the crate's own tests use
//! [`crate::memory::InMemoryEngine`].
//!
//! All contracts are object-safe and `Send + Sync` so they can be shared
//! across a test run behind `Arc<dyn …>` handles.

use crate::error::Result;
use crate::models::{QueueInfo, Task, TaskDefinition, Workflow, WorkflowDefinition};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Task and workflow definition storage.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Register a batch of task definitions
    async fn register_task_definitions(&self, definitions: Vec<TaskDefinition>) -> Result<()>;

    /// Fetch one task definition by name
    ///
    /// # Errors
    ///
    /// Returns a not-found error kind
    /// ([`HarnessError::TaskDefinitionNotFound`](crate::HarnessError::TaskDefinitionNotFound))
    /// when no definition of that name exists.
    async fn task_definition(&self, name: &str) -> Result<TaskDefinition>;

    /// List every registered workflow definition, all versions included
    async fn workflow_definitions(&self) -> Result<Vec<WorkflowDefinition>>;

    /// Publish a workflow definition, updating or creating per engine semantics
    async fn update_workflow_definition(&self, definition: WorkflowDefinition) -> Result<()>;
}

/// Task polling, acknowledgement, and update operations plus the running
/// instance query used by the resetter.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Claim the next available task of the given definition for a worker
    ///
    /// Returns `Ok(None)` when nothing is pollable; callers must not treat
    /// that as an error.
    async fn poll_task(&self, task_name: &str, worker_id: &str) -> Result<Option<Task>>;

    /// Acknowledge receipt of a claimed task; the returned flag is false
    /// when the engine no longer considers the claim acknowledgeable
    async fn ack_task(&self, task_id: Uuid, worker_id: &str) -> Result<bool>;

    /// Push a task update (status, output data, failure reason) to the engine
    async fn update_task(&self, task: &Task) -> Result<()>;

    /// List the ids of running workflow instances for one (name, version) pair
    async fn running_workflow_ids(&self, name: &str, version: i32) -> Result<Vec<Uuid>>;
}

/// Workflow instance fetch and termination.
#[async_trait]
pub trait WorkflowExecutor: Send + Sync {
    /// Fetch a workflow instance by id
    async fn workflow(&self, workflow_id: Uuid) -> Result<Workflow>;

    /// Terminate a workflow instance, recording the reason
    async fn terminate_workflow(&self, workflow_id: Uuid, reason: &str) -> Result<()>;
}

/// Queue introspection and flushing.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// List queue names with metadata
    async fn queues(&self) -> Result<Vec<QueueInfo>>;

    /// Remove every message from the named queue, returning how many were dropped
    async fn flush_queue(&self, queue_name: &str) -> Result<u64>;
}

/// Bundle of the four engine handles consumed by the harness constructor.
///
/// Cloning is cheap; the handles are shared `Arc`s.
#[derive(Clone)]
pub struct EngineServices {
    pub metadata: Arc<dyn MetadataService>,
    pub execution: Arc<dyn ExecutionService>,
    pub executor: Arc<dyn WorkflowExecutor>,
    pub queues: Arc<dyn QueueService>,
}

impl EngineServices {
    /// Bundle four handles that all point at one backing engine, for
    /// engines (like [`crate::memory::InMemoryEngine`]) implementing every
    /// contract on a single type.
    pub fn from_shared<T>(engine: Arc<T>) -> Self
    where
        T: MetadataService + ExecutionService + WorkflowExecutor + QueueService + 'static,
    {
        Self {
            metadata: engine.clone(),
            execution: engine.clone(),
            executor: engine.clone(),
            queues: engine,
        }
    }
}

impl std::fmt::Debug for EngineServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineServices").finish_non_exhaustive()
    }
}
