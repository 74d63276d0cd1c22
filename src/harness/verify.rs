//! Verification helpers for simulated worker runs.

use crate::models::{PollResult, Task};
use serde_json::Value;
use std::collections::HashMap;

/// Assert that `result` carries an acknowledged task whose input
/// contains every `expected_input` entry, and hand the task back for
/// further assertions.
///
/// Takes the [`PollResult`] by value: each poll is verified at most
/// once, and the returned [`Task`] is the only thing that survives the
/// check. Extra input keys beyond `expected_input` are allowed.
///
/// # Panics
///
/// Panics when the result carries no task, when the task was not
/// acknowledged, or when an expected input entry is missing or differs.
#[track_caller]
#[must_use = "the verified task carries the data later assertions need"]
pub fn verify_polled_and_acknowledged(
    result: PollResult,
    expected_input: Option<&HashMap<String, Value>>,
) -> Task {
    let Some(task) = result.task else {
        panic!("expected a polled task, but the poll came back empty");
    };
    assert!(
        result.acknowledged,
        "task {} ({}) was polled but never acknowledged",
        task.task_id, task.task_def_name
    );

    if let Some(expected) = expected_input {
        for (key, expected_value) in expected {
            match task.input_data.get(key) {
                Some(actual) => assert_eq!(
                    actual, expected_value,
                    "task {} input {key:?} was {actual}, expected {expected_value}",
                    task.task_id
                ),
                None => panic!(
                    "task {} input is missing expected key {key:?}",
                    task.task_id
                ),
            }
        }
    }

    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskStatus};
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn acknowledged_result(input_data: HashMap<String, Value>) -> PollResult {
        PollResult {
            task: Some(Task {
                task_id: Uuid::new_v4(),
                task_def_name: "fixture_task_0".to_string(),
                workflow_id: Uuid::new_v4(),
                status: TaskStatus::InProgress,
                input_data,
                output_data: HashMap::new(),
                reason_for_incompletion: None,
                worker_id: Some("test-worker".to_string()),
                poll_count: 1,
                scheduled_time: Utc::now(),
                update_time: Utc::now(),
            }),
            acknowledged: true,
        }
    }

    #[test]
    fn test_verify_returns_task_without_expectations() {
        let result = acknowledged_result(HashMap::new());
        let task = verify_polled_and_acknowledged(result, None);
        assert_eq!(task.task_def_name, "fixture_task_0");
    }

    #[test]
    fn test_verify_accepts_matching_input_subset() {
        let mut input = HashMap::new();
        input.insert("tenant".to_string(), json!("acme"));
        input.insert("attempt".to_string(), json!(3));

        let mut expected = HashMap::new();
        expected.insert("tenant".to_string(), json!("acme"));

        let task = verify_polled_and_acknowledged(acknowledged_result(input), Some(&expected));
        assert_eq!(task.input_data.len(), 2);
    }

    #[test]
    #[should_panic(expected = "came back empty")]
    fn test_verify_panics_on_empty_poll() {
        let _ = verify_polled_and_acknowledged(PollResult::empty(), None);
    }

    #[test]
    #[should_panic(expected = "never acknowledged")]
    fn test_verify_panics_when_not_acknowledged() {
        let mut result = acknowledged_result(HashMap::new());
        result.acknowledged = false;
        let _ = verify_polled_and_acknowledged(result, None);
    }

    #[test]
    #[should_panic(expected = "missing expected key")]
    fn test_verify_panics_on_missing_input_key() {
        let mut expected = HashMap::new();
        expected.insert("tenant".to_string(), json!("acme"));
        let _ =
            verify_polled_and_acknowledged(acknowledged_result(HashMap::new()), Some(&expected));
    }

    #[test]
    #[should_panic(expected = "expected \"acme\"")]
    fn test_verify_panics_on_mismatched_input_value() {
        let mut input = HashMap::new();
        input.insert("tenant".to_string(), json!("globex"));
        let mut expected = HashMap::new();
        expected.insert("tenant".to_string(), json!("acme"));
        let _ = verify_polled_and_acknowledged(acknowledged_result(input), Some(&expected));
    }
}
