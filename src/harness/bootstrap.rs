//! Fixture bootstrapper: ensures the canonical task-definition catalog
//! exists before a suite runs.

use super::TestHarness;
use crate::constants::fixtures;
use crate::error::Result;
use crate::models::TaskDefinition;
use tracing::{debug, info};

/// The canonical fixture catalog registered by every harness construction.
///
/// Workflow definition documents used in integration suites reference these
/// names. The catalog is deterministic: 21 general-purpose definitions with
/// one retry, 5 no-retry definitions for response-timeout scenarios, one
/// short-timeout definition, and one definition that times out when a
/// worker stops responding mid-execution.
pub fn fixture_catalog() -> Vec<TaskDefinition> {
    let mut catalog = Vec::with_capacity(fixtures::TASK_COUNT + fixtures::NO_RETRY_TASK_COUNT + 2);

    for index in 0..fixtures::TASK_COUNT {
        catalog.push(
            TaskDefinition::new(fixtures::task_name(index))
                .with_retry_count(1)
                .with_timeout_seconds(fixtures::DEFAULT_TIMEOUT_SECONDS),
        );
    }

    for index in 1..=fixtures::NO_RETRY_TASK_COUNT {
        catalog.push(
            TaskDefinition::new(fixtures::no_retry_task_name(index))
                .with_retry_count(0)
                .with_timeout_seconds(fixtures::DEFAULT_TIMEOUT_SECONDS),
        );
    }

    catalog.push(
        TaskDefinition::new(fixtures::SHORT_TIMEOUT_TASK)
            .with_retry_count(1)
            .with_timeout_seconds(fixtures::SHORT_TIMEOUT_SECONDS),
    );

    catalog.push(
        TaskDefinition::new(fixtures::RESPONSE_TIMEOUT_TASK)
            .with_retry_count(1)
            .with_timeout_seconds(fixtures::DEFAULT_TIMEOUT_SECONDS)
            .with_retry_delay_seconds(0)
            .with_response_timeout_seconds(fixtures::RESPONSE_TIMEOUT_SECONDS),
    );

    catalog
}

impl TestHarness {
    /// Register whichever catalog definitions the engine does not already
    /// hold. A not-found lookup marks a definition as missing; every other
    /// lookup error propagates.
    pub(crate) async fn ensure_fixture_definitions(&self) -> Result<()> {
        let mut missing = Vec::new();

        for definition in fixture_catalog() {
            match self.services().metadata.task_definition(&definition.name).await {
                Ok(_) => {
                    debug!(name = %definition.name, "Fixture task definition already registered");
                }
                Err(e) if e.is_not_found() => missing.push(definition),
                Err(e) => return Err(e),
            }
        }

        if missing.is_empty() {
            debug!("Fixture task-definition catalog already complete");
            return Ok(());
        }

        info!(
            count = missing.len(),
            "📋 Registering missing fixture task definitions"
        );
        self.services()
            .metadata
            .register_task_definitions(missing)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_uniqueness() {
        let catalog = fixture_catalog();
        assert_eq!(catalog.len(), 28);

        let mut names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 28, "catalog names must be unique");
    }

    #[test]
    fn test_general_definitions_policy() {
        let catalog = fixture_catalog();
        for index in 0..fixtures::TASK_COUNT {
            let name = fixtures::task_name(index);
            let def = catalog
                .iter()
                .find(|d| d.name == name)
                .unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(def.retry_count, 1);
            assert_eq!(def.timeout_seconds, 120);
        }
    }

    #[test]
    fn test_no_retry_definitions_policy() {
        let catalog = fixture_catalog();
        for index in 1..=fixtures::NO_RETRY_TASK_COUNT {
            let name = fixtures::no_retry_task_name(index);
            let def = catalog
                .iter()
                .find(|d| d.name == name)
                .unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(def.retry_count, 0);
            assert_eq!(def.timeout_seconds, 120);
        }
    }

    #[test]
    fn test_special_definitions_policy() {
        let catalog = fixture_catalog();

        let short = catalog
            .iter()
            .find(|d| d.name == fixtures::SHORT_TIMEOUT_TASK)
            .expect("short timeout definition");
        assert_eq!(short.timeout_seconds, 5);
        assert_eq!(short.retry_count, 1);

        let responsive = catalog
            .iter()
            .find(|d| d.name == fixtures::RESPONSE_TIMEOUT_TASK)
            .expect("response timeout definition");
        assert_eq!(responsive.timeout_seconds, 120);
        assert_eq!(responsive.retry_count, 1);
        assert_eq!(responsive.retry_delay_seconds, 0);
        assert_eq!(responsive.response_timeout_seconds, 10);
    }
}
