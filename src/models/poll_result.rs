use crate::models::Task;

/// Outcome of one poll-and-update cycle.
///
/// Pairs the polled task (if any) with the acknowledgement flag returned by
/// the engine. A `PollResult` is consumed by exactly one verification call;
/// the verifier takes it by value so reuse is a compile error rather than a
/// runtime rule.
#[derive(Debug)]
pub struct PollResult {
    /// The task as mutated by the simulator, or `None` when the poll came
    /// back empty. The simulator never synthesizes a task.
    pub task: Option<Task>,

    /// Whether the engine acknowledged the claim
    pub acknowledged: bool,
}

impl PollResult {
    /// Result of a poll that returned no task
    pub fn empty() -> Self {
        Self {
            task: None,
            acknowledged: false,
        }
    }
}
