//! Engine configuration

use crate::TreeError;

/// Configuration for a [`TreeService`](crate::TreeService)
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Highlight snapshots buffered before publishes are rejected
    pub queue_capacity: usize,

    /// Walk the full tree after every mutation (O(n))
    pub verify_invariants: bool,

    /// Name of the owner thread
    pub thread_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            verify_invariants: cfg!(debug_assertions),
            thread_name: "arbor-owner".to_string(),
        }
    }
}

impl EngineConfig {
    /// Set highlight queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Enable or disable post-mutation invariant checks.
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }

    /// Set the owner thread name.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.queue_capacity == 0 {
            return Err(TreeError::InvalidConfiguration(
                "queue capacity must be > 0".to_string(),
            ));
        }
        if self.thread_name.trim().is_empty() {
            return Err(TreeError::InvalidConfiguration(
                "thread name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
