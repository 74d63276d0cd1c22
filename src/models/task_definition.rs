use serde::{Deserialize, Serialize};

/// TaskDefinition describes the retry/timeout policy for one unit of work,
/// referenced by name from workflow definitions.
///
/// Definitions are owned by the engine's metadata store. The harness only
/// registers them (idempotently, during bootstrap) and looks them up; once
/// registered they are immutable for the duration of the test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Unique definition name
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Number of retries the engine attempts after a failure
    pub retry_count: u32,

    /// Execution timeout in seconds; 0 disables the timeout
    pub timeout_seconds: u64,

    /// Seconds the engine waits for a worker status update before
    /// considering the task unresponsive
    pub response_timeout_seconds: u64,

    /// Delay in seconds before a retry attempt is scheduled
    pub retry_delay_seconds: u64,
}

impl TaskDefinition {
    /// Engine-side default: workers must report within a minute.
    pub const DEFAULT_RESPONSE_TIMEOUT_SECONDS: u64 = 60;
    /// Engine-side default delay between retry attempts.
    pub const DEFAULT_RETRY_DELAY_SECONDS: u64 = 60;

    /// Create a definition with engine default policies
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            retry_count: 3,
            timeout_seconds: 120,
            response_timeout_seconds: Self::DEFAULT_RESPONSE_TIMEOUT_SECONDS,
            retry_delay_seconds: Self::DEFAULT_RETRY_DELAY_SECONDS,
        }
    }

    /// Set the retry count
    #[must_use]
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Set the execution timeout
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the response timeout
    #[must_use]
    pub fn with_response_timeout_seconds(mut self, response_timeout_seconds: u64) -> Self {
        self.response_timeout_seconds = response_timeout_seconds;
        self
    }

    /// Set the retry delay
    #[must_use]
    pub fn with_retry_delay_seconds(mut self, retry_delay_seconds: u64) -> Self {
        self.retry_delay_seconds = retry_delay_seconds;
        self
    }
}
