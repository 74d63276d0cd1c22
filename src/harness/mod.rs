//! # Test Harness
//!
//! The entry point integration suites use to drive the Weft engine:
//! construction bootstraps the fixture task-definition catalog, and the
//! methods split across this module's files cover the rest of the test
//! lifecycle: resetting engine state, registering workflow definitions,
//! simulating worker poll/update cycles, and verifying the captured
//! results.
//!
//! Every operation is a short-lived, sequential interaction with the
//! engine. The harness holds no locks and performs no retries of its own;
//! cross-test isolation comes from the idempotent bootstrap and the full
//! reset, and any engine failure surfaces to the calling test unchanged.

mod bootstrap;
mod registrar;
mod reset;
mod verify;
mod worker;

pub use bootstrap::fixture_catalog;
pub use verify::verify_polled_and_acknowledged;

use crate::config::HarnessConfig;
use crate::error::Result;
use crate::logging;
use crate::services::EngineServices;
use tracing::info;

/// Harness driving one engine deployment on behalf of a test suite.
///
/// Cheap to construct repeatedly against a shared engine: the fixture
/// bootstrap skips definitions that already exist.
#[derive(Debug, Clone)]
pub struct TestHarness {
    config: HarnessConfig,
    services: EngineServices,
}

impl TestHarness {
    /// Create a harness and ensure the fixture task definitions exist
    ///
    /// # Errors
    ///
    /// Propagates any non-not-found lookup failure and any registration
    /// failure from the metadata service.
    pub async fn new(config: HarnessConfig, services: EngineServices) -> Result<Self> {
        logging::init_test_logging();

        let harness = Self { config, services };
        harness.ensure_fixture_definitions().await?;

        info!(
            app_id = %harness.config.app_id,
            "✅ Test harness ready"
        );
        Ok(harness)
    }

    /// The configuration this harness was constructed with
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub(crate) fn services(&self) -> &EngineServices {
        &self.services
    }
}
