//! # AVL Balancing Engine with Rotation Telemetry
//!
//! This library maintains a self-balancing binary search tree (AVL tree)
//! and reports every rebalancing step as structured telemetry for an
//! external presentation layer.
//!
//! ## Core Algorithm
//!
//! 1. **Insert**: recursive BST descent, at most one rebalance per call
//! 2. **Delete**: recursive descent with successor copy, rebalance at every level
//! 3. **Rotations**: O(1) local single rotations composing the LL/RR/LR/RL cases
//! 4. **Telemetry**: per-call [`MutationReport`], append-only rotation log,
//!    last rotated pair, bounded highlight queue
//!
//! Result: height stays within ~1.44 log2(n + 2) for every sequence of operations.
//!
//! ## Usage Example
//!
//! ```
//! use arbor_avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! tree.insert(30);
//! tree.insert(20);
//! let report = tree.insert(10);
//!
//! assert_eq!(tree.root().map(|node| *node.key()), Some(20));
//! assert_eq!(
//!     report.rotations[0].to_string(),
//!     "Right Rotation on node 30 with left child 20"
//! );
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod tree;       // Balancing engine
pub mod telemetry;  // Rotation records and highlight queue
pub mod service;    // Single-owner tree thread
pub mod config;     // Engine configuration
pub mod script;     // Command parsing for shells driving the engine

// Re-exports for convenience
pub use config::EngineConfig;
pub use service::{TreeHandle, TreeService};
pub use telemetry::{
    Highlight, HighlightQueue, MutationReport, Outcome, RebalanceCase, RotatedPair,
    RotationDirection, RotationEvent, RotationLog,
};
pub use tree::{AvlTree, Node, TreeKey};

use std::fmt;

use thiserror::Error;

/// Structural property checked by [`AvlTree::check_invariants`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    /// Left keys < node key < right keys
    Ordering,
    /// Cached height = 1 + max child height
    Height,
    /// Child heights differ by at most one
    Balance,
    /// Node count matches the tracked length
    Length,
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Invariant::Ordering => "ordering",
            Invariant::Height => "height",
            Invariant::Balance => "balance",
            Invariant::Length => "length",
        };
        f.write_str(name)
    }
}

/// Errors raised around the balancing engine
///
/// Tree operations themselves are total; these cover invariant checks,
/// telemetry delivery and the owner thread.
#[derive(Error, Debug)]
pub enum TreeError {
    /// Structural invariant broken (programming error, never repaired)
    #[error("{invariant} invariant violated at {key}")]
    InvariantViolated {
        /// Which invariant failed
        invariant: Invariant,
        /// Debug rendering of the offending key
        key: String,
    },

    /// Highlight consumer fell behind; snapshot discarded
    #[error("highlight queue full (capacity {capacity})")]
    QueueFull {
        /// Queue capacity
        capacity: usize,
    },

    /// Owner thread is no longer accepting commands
    #[error("tree service stopped")]
    ServiceStopped,

    /// Owner thread panicked
    #[error("tree owner thread panicked")]
    OwnerPanicked,

    /// Owner thread could not be started
    #[error("failed to spawn tree owner thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// Invalid engine configuration
    #[error("invalid engine configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TreeError::InvariantViolated {
            invariant: Invariant::Balance,
            key: "42".to_string(),
        };
        assert_eq!(err.to_string(), "balance invariant violated at 42");
        assert_eq!(
            TreeError::QueueFull { capacity: 8 }.to_string(),
            "highlight queue full (capacity 8)"
        );
    }

    #[test]
    fn test_height_stays_logarithmic() {
        for n in [10usize, 100, 1000, 10_000] {
            let tree: AvlTree<usize> = (0..n).collect();
            let bound = 1.45 * ((n + 2) as f64).log2();
            assert!(
                (tree.height() as f64) <= bound,
                "height {} exceeds {:.2} for n = {}",
                tree.height(),
                bound,
                n
            );
        }
    }
}
