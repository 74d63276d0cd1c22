use serde::{Deserialize, Serialize};

/// Queue introspection record returned by the queue contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueInfo {
    /// Queue name; the engine keys task queues by definition name
    pub name: String,

    /// Number of messages currently waiting
    pub depth: u64,
}

impl QueueInfo {
    pub fn new(name: impl Into<String>, depth: u64) -> Self {
        Self {
            name: name.into(),
            depth,
        }
    }
}
