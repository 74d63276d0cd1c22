//! # Harness Constants
//!
//! Fixed names and values shared across harness components: the fixture
//! task-definition catalog, the reset termination reason, and the scratch
//! file drained between tests.

/// Fixture task-definition catalog parameters
///
/// The catalog is deterministic so that workflow definition documents used
/// by integration suites can reference these names without further setup.
pub mod fixtures {
    /// Name prefix for the general-purpose fixture definitions
    pub const TASK_PREFIX: &str = "fixture_task_";

    /// Number of general-purpose fixture definitions (`fixture_task_0` ..= `fixture_task_20`)
    pub const TASK_COUNT: usize = 21;

    /// Name prefix for the no-retry definitions used by response-timeout scenarios
    pub const NO_RETRY_TASK_PREFIX: &str = "fixture_task_no_retry_";

    /// Number of no-retry definitions (`fixture_task_no_retry_1` ..= `fixture_task_no_retry_5`)
    pub const NO_RETRY_TASK_COUNT: usize = 5;

    /// Definition with a 5 second execution timeout
    pub const SHORT_TIMEOUT_TASK: &str = "fixture_task_short_timeout";

    /// Definition with a 10 second response timeout and zero retry delay,
    /// used to surface mid-execution responsiveness failures
    pub const RESPONSE_TIMEOUT_TASK: &str = "fixture_task_response_timeout";

    /// Execution timeout applied to every catalog entry except the short-timeout one
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

    /// Execution timeout for [`SHORT_TIMEOUT_TASK`]
    pub const SHORT_TIMEOUT_SECONDS: u64 = 5;

    /// Response timeout for [`RESPONSE_TIMEOUT_TASK`]
    pub const RESPONSE_TIMEOUT_SECONDS: u64 = 10;

    /// Name of the nth general-purpose fixture definition
    pub fn task_name(index: usize) -> String {
        format!("{TASK_PREFIX}{index}")
    }

    /// Name of the nth no-retry fixture definition (1-based)
    pub fn no_retry_task_name(index: usize) -> String {
        format!("{NO_RETRY_TASK_PREFIX}{index}")
    }
}

/// System-wide harness constants
pub mod system {
    /// Default application identifier for the harness execution context
    pub const DEFAULT_APP_ID: &str = "weft-harness";

    /// Default resource root for test fixtures and the scratch file
    pub const DEFAULT_RESOURCE_ROOT: &str = "tests/resources";

    /// Scratch file (relative to the resource root) truncated on every reset,
    /// used by tests that exercise file-based task inputs
    pub const SCRATCH_INPUT_FILE: &str = "task_input.json";

    /// Reason recorded on every workflow the resetter terminates
    pub const RESET_TERMINATION_REASON: &str = "terminated by harness reset";
}
