//! Property-based coverage for the fixture catalog, the verifier, and the
//! simulated worker cycle.
//!
//! Async properties run each case on a fresh in-memory engine via
//! `tokio_test::block_on`; panics inside a case fail and shrink like any
//! other proptest assertion.

use proptest::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use weft_harness::constants::fixtures;
use weft_harness::{
    fixture_catalog, verify_polled_and_acknowledged, EngineServices, ExecutionService,
    HarnessConfig, InMemoryEngine, MetadataService, PollResult, TaskReference, TaskStatus,
    TestHarness, WorkflowDefinition,
};

fn json_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
    ]
}

fn input_map_strategy() -> impl Strategy<Value = HashMap<String, Value>> {
    prop::collection::hash_map("[a-z][a-z0-9_]{0,7}", json_value_strategy(), 0..6)
}

/// A generated input map together with a random subset of its entries.
fn map_with_subset_strategy(
) -> impl Strategy<Value = (HashMap<String, Value>, HashMap<String, Value>)> {
    input_map_strategy().prop_flat_map(|map| {
        let entries: Vec<(String, Value)> = map.clone().into_iter().collect();
        let len = entries.len();
        prop::sample::subsequence(entries, 0..=len)
            .prop_map(move |subset| (map.clone(), subset.into_iter().collect()))
    })
}

/// Bootstrapped harness plus a started one-step workflow whose only task
/// carries `input_parameters`.
async fn harness_with_single_step_flow(
    input_parameters: HashMap<String, Value>,
) -> (TestHarness, Arc<InMemoryEngine>) {
    let engine = Arc::new(InMemoryEngine::new());
    let harness = TestHarness::new(
        HarnessConfig::default(),
        EngineServices::from_shared(engine.clone()),
    )
    .await
    .expect("harness construction");
    engine
        .update_workflow_definition(WorkflowDefinition {
            name: "prop_flow".to_string(),
            version: 1,
            description: None,
            tasks: vec![TaskReference {
                name: "fixture_task_0".to_string(),
                task_reference_name: "only_step".to_string(),
                input_parameters,
            }],
        })
        .await
        .expect("definition registration");
    engine
        .start_workflow("prop_flow", 1, HashMap::new())
        .expect("workflow start");
    (harness, engine)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: every general-purpose catalog entry carries the same
    /// retry/timeout policy
    #[test]
    fn general_fixture_definitions_follow_policy(index in 0..fixtures::TASK_COUNT) {
        let name = fixtures::task_name(index);
        let catalog = fixture_catalog();
        let def = catalog.iter().find(|d| d.name == name).expect("catalog entry");
        prop_assert_eq!(def.retry_count, 1);
        prop_assert_eq!(def.timeout_seconds, 120);
    }

    /// Property: every no-retry catalog entry really has zero retries
    #[test]
    fn no_retry_fixture_definitions_follow_policy(index in 1..=fixtures::NO_RETRY_TASK_COUNT) {
        let name = fixtures::no_retry_task_name(index);
        let catalog = fixture_catalog();
        let def = catalog.iter().find(|d| d.name == name).expect("catalog entry");
        prop_assert_eq!(def.retry_count, 0);
        prop_assert_eq!(def.timeout_seconds, 120);
    }

    /// Property: verification accepts any subset of the task's actual
    /// input, whatever the values
    #[test]
    fn verifier_accepts_any_matching_input_subset(
        (input, expected) in map_with_subset_strategy()
    ) {
        let task = tokio_test::block_on(async {
            let (_harness, engine) = harness_with_single_step_flow(input.clone()).await;
            engine
                .poll_task("fixture_task_0", "prop-worker")
                .await
                .unwrap()
                .expect("a task was queued")
        });

        let result = PollResult { task: Some(task), acknowledged: true };
        let verified = verify_polled_and_acknowledged(result, Some(&expected));
        prop_assert_eq!(verified.input_data, input);
    }

    /// Property: poll-and-complete lands every output parameter in the
    /// stored task's output data
    #[test]
    fn completed_task_output_contains_all_params(params in input_map_strategy()) {
        let task = tokio_test::block_on(async {
            let (harness, _engine) = harness_with_single_step_flow(HashMap::new()).await;
            let result = harness
                .poll_and_complete_task("fixture_task_0", "prop-worker", Some(params.clone()), 0)
                .await
                .unwrap();
            verify_polled_and_acknowledged(result, None)
        });

        prop_assert_eq!(task.status, TaskStatus::Completed);
        for (key, value) in &params {
            prop_assert_eq!(task.output_data.get(key), Some(value));
        }
    }

    /// Property: poll-and-fail preserves the failure reason verbatim
    #[test]
    fn failure_reason_is_preserved(reason in "[ -~]{1,40}") {
        let task = tokio_test::block_on(async {
            let (harness, _engine) = harness_with_single_step_flow(HashMap::new()).await;
            let result = harness
                .poll_and_fail_task("fixture_task_0", "prop-worker", &reason, 0)
                .await
                .unwrap();
            verify_polled_and_acknowledged(result, None)
        });

        prop_assert_eq!(task.status, TaskStatus::Failed);
        prop_assert_eq!(task.reason_for_incompletion.as_deref(), Some(reason.as_str()));
    }
}
