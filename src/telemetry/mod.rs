//! Rotation telemetry
//!
//! The engine never exposes node-local state to a concurrent reader.
//! Instead every mutation returns a [`MutationReport`] describing what it
//! did, and the tree keeps two pieces of state for presentation layers:
//! - an append-only [`RotationLog`] across all mutations
//! - the single most recent [`RotatedPair`], overwritten per rotation

mod queue;

pub use queue::{Highlight, HighlightQueue};

use std::fmt;

#[cfg(feature = "visualize")]
use serde::Serialize;

/// Direction of a single rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub enum RotationDirection {
    /// Pivot's right child is promoted
    Left,
    /// Pivot's left child is promoted
    Right,
}

impl RotationDirection {
    /// Side of the pivot the promoted child came from
    pub fn child_side(self) -> &'static str {
        match self {
            RotationDirection::Left => "right",
            RotationDirection::Right => "left",
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationDirection::Left => f.write_str("Left"),
            RotationDirection::Right => f.write_str("Right"),
        }
    }
}

/// One single rotation performed by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub struct RotationEvent<K> {
    /// Which way the subtree turned
    pub direction: RotationDirection,
    /// Key of the node that moved down
    pub pivot: K,
    /// Key of the child that moved up into the pivot's place
    pub promoted: K,
}

impl<K: Clone> RotationEvent<K> {
    /// The node pair touched by this rotation
    pub fn pair(&self) -> RotatedPair<K> {
        RotatedPair {
            pivot: self.pivot.clone(),
            promoted: self.promoted.clone(),
        }
    }
}

impl<K: fmt::Display> fmt::Display for RotationEvent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Rotation on node {} with {} child {}",
            self.direction,
            self.pivot,
            self.direction.child_side(),
            self.promoted
        )
    }
}

/// Keys of the two nodes touched by the most recent rotation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub struct RotatedPair<K> {
    /// Node that moved down
    pub pivot: K,
    /// Node that moved up
    pub promoted: K,
}

impl<K: PartialEq> RotatedPair<K> {
    /// Whether `key` is one of the two nodes
    pub fn contains(&self, key: &K) -> bool {
        self.pivot == *key || self.promoted == *key
    }
}

impl<K: fmt::Display> fmt::Display for RotatedPair<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.pivot, self.promoted)
    }
}

/// Canonical rebalancing maneuver applied at one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub enum RebalanceCase {
    /// Left-left: single right rotation
    LeftLeft,
    /// Right-right: single left rotation
    RightRight,
    /// Left-right: left rotation of the left child, then right rotation
    LeftRight,
    /// Right-left: right rotation of the right child, then left rotation
    RightLeft,
}

impl RebalanceCase {
    /// Number of single rotations the case performs
    pub fn rotation_count(self) -> usize {
        match self {
            RebalanceCase::LeftLeft | RebalanceCase::RightRight => 1,
            RebalanceCase::LeftRight | RebalanceCase::RightLeft => 2,
        }
    }

    /// Short label (LL, RR, LR, RL)
    pub fn label(self) -> &'static str {
        match self {
            RebalanceCase::LeftLeft => "LL",
            RebalanceCase::RightRight => "RR",
            RebalanceCase::LeftRight => "LR",
            RebalanceCase::RightLeft => "RL",
        }
    }
}

impl fmt::Display for RebalanceCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a mutation did to the key set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub enum Outcome {
    /// A new node was created
    Inserted,
    /// Key already present; nothing changed
    Duplicate,
    /// A node was removed
    Removed,
    /// Key not present; nothing changed
    Absent,
    /// The whole tree was discarded
    Reset,
}

impl Outcome {
    /// Whether the key set changed
    pub fn changed(self) -> bool {
        matches!(self, Outcome::Inserted | Outcome::Removed | Outcome::Reset)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Inserted => "inserted",
            Outcome::Duplicate => "duplicate",
            Outcome::Removed => "removed",
            Outcome::Absent => "absent",
            Outcome::Reset => "reset",
        };
        f.write_str(text)
    }
}

/// Result record returned by every mutation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub struct MutationReport<K> {
    /// Effect on the key set
    pub outcome: Outcome,
    /// Rebalancing cases applied, innermost first
    pub rebalances: Vec<RebalanceCase>,
    /// Every single rotation of this call, in execution order
    pub rotations: Vec<RotationEvent<K>>,
    /// Pair touched by the final rotation, if any
    pub last_rotated: Option<RotatedPair<K>>,
}

impl<K> MutationReport<K> {
    /// Report for an operation that changed nothing structural
    pub fn quiet(outcome: Outcome) -> Self {
        Self {
            outcome,
            rebalances: Vec::new(),
            rotations: Vec::new(),
            last_rotated: None,
        }
    }

    /// Whether any rotation happened
    pub fn rotated(&self) -> bool {
        !self.rotations.is_empty()
    }
}

/// Append-only log of rotations, cleared only by reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationLog<K> {
    entries: Vec<RotationEvent<K>>,
}

impl<K> RotationLog<K> {
    /// Empty log
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[RotationEvent<K>] {
        &self.entries
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&RotationEvent<K>> {
        self.entries.last()
    }

    /// Rotations recorded so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No rotation has happened yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn extend(&mut self, events: impl IntoIterator<Item = RotationEvent<K>>) {
        self.entries.extend(events);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: fmt::Display> RotationLog<K> {
    /// Human-readable descriptions, oldest first
    pub fn descriptions(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

/// Per-call sink the rotation engine writes into
#[derive(Debug)]
pub(crate) struct Recorder<K> {
    rotations: Vec<RotationEvent<K>>,
    rebalances: Vec<RebalanceCase>,
    last_rotated: Option<RotatedPair<K>>,
}

impl<K: Clone> Recorder<K> {
    pub(crate) fn new() -> Self {
        Self {
            rotations: Vec::new(),
            rebalances: Vec::new(),
            last_rotated: None,
        }
    }

    /// Append a rotation and make its pair the current one.
    pub(crate) fn rotation(&mut self, event: RotationEvent<K>) {
        self.last_rotated = Some(event.pair());
        self.rotations.push(event);
    }

    pub(crate) fn rebalance(&mut self, case: RebalanceCase) {
        self.rebalances.push(case);
    }

    pub(crate) fn finish(self, outcome: Outcome) -> MutationReport<K> {
        MutationReport {
            outcome,
            rebalances: self.rebalances,
            rotations: self.rotations,
            last_rotated: self.last_rotated,
        }
    }
}
