//! # In-Memory Engine
//!
//! A process-local implementation of the four engine contracts, suitable
//! for exercising the harness without a live deployment.
//!
//! Only the lifecycle the harness actually drives is modeled: starting a
//! workflow schedules its first task on a queue named after the task
//! definition, polling claims the task, and a terminal task update either
//! schedules the next reference or finishes the workflow. A scheduled
//! task's input is the reference's static parameters with the workflow
//! input merged over them.
//!
//! Retry scheduling and timeout enforcement are absent; definitions carry
//! those policies but nothing here acts on them.

use crate::error::{HarnessError, Result};
use crate::models::{
    QueueInfo, Task, TaskDefinition, TaskReference, TaskStatus, Workflow, WorkflowDefinition,
    WorkflowStatus,
};
use crate::services::{ExecutionService, MetadataService, QueueService, WorkflowExecutor};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// In-memory engine backing all four service contracts at once.
///
/// Share it through an `Arc` and bundle it with
/// [`crate::services::EngineServices::from_shared`] for the harness
/// constructor.
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    task_definitions: DashMap<String, TaskDefinition>,
    workflow_definitions: DashMap<(String, i32), WorkflowDefinition>,
    workflows: DashMap<Uuid, Workflow>,
    tasks: DashMap<Uuid, Task>,
    task_queues: DashMap<String, VecDeque<Uuid>>,
    /// Index of the task reference currently in flight, per workflow
    progress: DashMap<Uuid, usize>,
    definition_lookup_fault: AtomicBool,
    termination_fault: AtomicBool,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a workflow instance from a registered definition.
    ///
    /// The first task reference is scheduled immediately; a definition
    /// with no tasks completes on the spot.
    pub fn start_workflow(
        &self,
        name: &str,
        version: i32,
        input: HashMap<String, Value>,
    ) -> Result<Uuid> {
        let definition = self
            .workflow_definitions
            .get(&(name.to_string(), version))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                HarnessError::engine(
                    "start_workflow",
                    format!("no workflow definition {name} v{version}"),
                )
            })?;
        for reference in &definition.tasks {
            if !self.task_definitions.contains_key(&reference.name) {
                return Err(HarnessError::task_definition_not_found(&reference.name));
            }
        }

        let workflow_id = Uuid::new_v4();
        self.workflows.insert(
            workflow_id,
            Workflow {
                workflow_id,
                name: definition.name.clone(),
                version: definition.version,
                status: WorkflowStatus::Running,
                input: input.clone(),
                reason_for_termination: None,
                start_time: Utc::now(),
                end_time: None,
            },
        );

        match definition.tasks.first() {
            Some(reference) => {
                self.progress.insert(workflow_id, 0);
                self.schedule_task(workflow_id, reference, &input);
            }
            None => self.finish_workflow(workflow_id, WorkflowStatus::Completed, None),
        }
        Ok(workflow_id)
    }

    /// Names of every registered task definition, sorted for stable
    /// assertions.
    pub fn task_definition_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .task_definitions
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Fetch a stored task instance by id.
    pub fn task(&self, task_id: Uuid) -> Option<Task> {
        self.tasks.get(&task_id).map(|entry| entry.value().clone())
    }

    /// Make every task definition lookup fail with a non-not-found engine
    /// error until disabled.
    pub fn inject_definition_lookup_fault(&self, enabled: bool) {
        self.definition_lookup_fault
            .store(enabled, Ordering::Relaxed);
    }

    /// Make every termination fail with an engine error until disabled.
    pub fn inject_termination_fault(&self, enabled: bool) {
        self.termination_fault.store(enabled, Ordering::Relaxed);
    }

    fn schedule_task(
        &self,
        workflow_id: Uuid,
        reference: &TaskReference,
        workflow_input: &HashMap<String, Value>,
    ) {
        let mut input_data = reference.input_parameters.clone();
        for (key, value) in workflow_input {
            input_data.insert(key.clone(), value.clone());
        }

        let now = Utc::now();
        let task_id = Uuid::new_v4();
        self.tasks.insert(
            task_id,
            Task {
                task_id,
                task_def_name: reference.name.clone(),
                workflow_id,
                status: TaskStatus::Scheduled,
                input_data,
                output_data: HashMap::new(),
                reason_for_incompletion: None,
                worker_id: None,
                poll_count: 0,
                scheduled_time: now,
                update_time: now,
            },
        );
        self.task_queues
            .entry(reference.name.clone())
            .or_default()
            .push_back(task_id);
    }

    fn finish_workflow(&self, workflow_id: Uuid, status: WorkflowStatus, reason: Option<String>) {
        if let Some(mut workflow) = self.workflows.get_mut(&workflow_id) {
            workflow.status = status;
            workflow.reason_for_termination = reason;
            workflow.end_time = Some(Utc::now());
        }
        self.progress.remove(&workflow_id);
    }

    /// React to a terminal task update: schedule the next reference on
    /// completion, finish the workflow otherwise.
    fn advance_workflow(&self, task: &Task) -> Result<()> {
        let Some((name, version, input, workflow_status)) =
            self.workflows.get(&task.workflow_id).map(|workflow| {
                (
                    workflow.name.clone(),
                    workflow.version,
                    workflow.input.clone(),
                    workflow.status,
                )
            })
        else {
            return Ok(());
        };
        if workflow_status.is_terminal() {
            return Ok(());
        }

        match task.status {
            TaskStatus::Completed => {
                let next_index = self
                    .progress
                    .get(&task.workflow_id)
                    .map_or(1, |entry| *entry.value() + 1);
                let next_reference = self
                    .workflow_definitions
                    .get(&(name.clone(), version))
                    .ok_or_else(|| {
                        HarnessError::engine(
                            "update_task",
                            format!("no workflow definition {name} v{version}"),
                        )
                    })?
                    .tasks
                    .get(next_index)
                    .cloned();

                match next_reference {
                    Some(reference) => {
                        self.progress.insert(task.workflow_id, next_index);
                        self.schedule_task(task.workflow_id, &reference, &input);
                    }
                    None => {
                        self.finish_workflow(task.workflow_id, WorkflowStatus::Completed, None);
                    }
                }
            }
            TaskStatus::Failed => self.finish_workflow(
                task.workflow_id,
                WorkflowStatus::Failed,
                task.reason_for_incompletion.clone(),
            ),
            TaskStatus::TimedOut => self.finish_workflow(
                task.workflow_id,
                WorkflowStatus::TimedOut,
                task.reason_for_incompletion.clone(),
            ),
            TaskStatus::Scheduled | TaskStatus::InProgress => {}
        }
        Ok(())
    }

    fn pop_queued(&self, queue_name: &str) -> Option<Uuid> {
        self.task_queues.get_mut(queue_name)?.pop_front()
    }
}

#[async_trait]
impl MetadataService for InMemoryEngine {
    async fn register_task_definitions(&self, definitions: Vec<TaskDefinition>) -> Result<()> {
        for definition in definitions {
            self.task_definitions
                .insert(definition.name.clone(), definition);
        }
        Ok(())
    }

    async fn task_definition(&self, name: &str) -> Result<TaskDefinition> {
        if self.definition_lookup_fault.load(Ordering::Relaxed) {
            return Err(HarnessError::engine(
                "task_definition",
                "injected lookup failure",
            ));
        }
        self.task_definitions
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| HarnessError::task_definition_not_found(name))
    }

    async fn workflow_definitions(&self) -> Result<Vec<WorkflowDefinition>> {
        Ok(self
            .workflow_definitions
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update_workflow_definition(&self, definition: WorkflowDefinition) -> Result<()> {
        self.workflow_definitions
            .insert((definition.name.clone(), definition.version), definition);
        Ok(())
    }
}

#[async_trait]
impl ExecutionService for InMemoryEngine {
    async fn poll_task(&self, task_name: &str, worker_id: &str) -> Result<Option<Task>> {
        loop {
            let Some(task_id) = self.pop_queued(task_name) else {
                return Ok(None);
            };

            // Entries whose task was already claimed or whose workflow has
            // since finished are stale; discard and keep looking.
            let Some(mut task) = self.tasks.get_mut(&task_id) else {
                continue;
            };
            if task.status != TaskStatus::Scheduled {
                continue;
            }
            let workflow_is_live = self
                .workflows
                .get(&task.workflow_id)
                .is_some_and(|workflow| !workflow.status.is_terminal());
            if !workflow_is_live {
                continue;
            }

            task.status = TaskStatus::InProgress;
            task.worker_id = Some(worker_id.to_string());
            task.poll_count += 1;
            task.update_time = Utc::now();
            return Ok(Some(task.clone()));
        }
    }

    async fn ack_task(&self, task_id: Uuid, worker_id: &str) -> Result<bool> {
        Ok(self.tasks.get(&task_id).is_some_and(|task| {
            task.status == TaskStatus::InProgress && task.worker_id.as_deref() == Some(worker_id)
        }))
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        if !self.tasks.contains_key(&task.task_id) {
            return Err(HarnessError::engine(
                "update_task",
                format!("unknown task {}", task.task_id),
            ));
        }
        self.tasks.insert(task.task_id, task.clone());
        if task.status.is_terminal() {
            self.advance_workflow(task)?;
        }
        Ok(())
    }

    async fn running_workflow_ids(&self, name: &str, version: i32) -> Result<Vec<Uuid>> {
        Ok(self
            .workflows
            .iter()
            .filter(|entry| {
                entry.name == name && entry.version == version && !entry.status.is_terminal()
            })
            .map(|entry| entry.workflow_id)
            .collect())
    }
}

#[async_trait]
impl WorkflowExecutor for InMemoryEngine {
    async fn workflow(&self, workflow_id: Uuid) -> Result<Workflow> {
        self.workflows
            .get(&workflow_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| HarnessError::workflow_not_found(workflow_id))
    }

    async fn terminate_workflow(&self, workflow_id: Uuid, reason: &str) -> Result<()> {
        if self.termination_fault.load(Ordering::Relaxed) {
            return Err(HarnessError::engine(
                "terminate_workflow",
                "injected termination failure",
            ));
        }
        let Some(mut workflow) = self.workflows.get_mut(&workflow_id) else {
            return Err(HarnessError::workflow_not_found(workflow_id));
        };
        if workflow.status.is_terminal() {
            return Ok(());
        }
        workflow.status = WorkflowStatus::Terminated;
        workflow.reason_for_termination = Some(reason.to_string());
        workflow.end_time = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl QueueService for InMemoryEngine {
    async fn queues(&self) -> Result<Vec<QueueInfo>> {
        let mut queues: Vec<QueueInfo> = self
            .task_queues
            .iter()
            .map(|entry| QueueInfo::new(entry.key().clone(), entry.value().len() as u64))
            .collect();
        queues.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(queues)
    }

    async fn flush_queue(&self, queue_name: &str) -> Result<u64> {
        let Some(mut queue) = self.task_queues.get_mut(queue_name) else {
            return Ok(0);
        };
        let flushed = queue.len() as u64;
        queue.clear();
        Ok(flushed)
    }
}
