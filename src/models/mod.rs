pub mod poll_result;
pub mod queue;
pub mod task;
pub mod task_definition;
pub mod workflow;
pub mod workflow_definition;

// Re-export core models for easy access
pub use poll_result::PollResult;
pub use queue::QueueInfo;
pub use task::{Task, TaskStatus};
pub use task_definition::TaskDefinition;
pub use workflow::{Workflow, WorkflowStatus};
pub use workflow_definition::{TaskReference, WorkflowDefinition};
