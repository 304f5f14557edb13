//! AVL balancing engine
//!
//! Owned-box tree with cached heights. Every public mutation returns a
//! [`MutationReport`]; the tree also keeps the append-only rotation log and
//! the last rotated pair for presentation layers.
//!
//! Invariants after every public operation:
//! 1. Ordering: left keys < node key < right keys
//! 2. Height: `height = 1 + max(height(left), height(right))`
//! 3. Balance: `height(left) - height(right)` in {-1, 0, 1}
//! 4. Uniqueness: no key stored twice

mod balance;
mod delete;
mod fingerprint;
mod insert;
mod node;
mod rotation;
mod traversal;

pub use balance::{balance, height};
pub use node::{Link, Node};
pub use traversal::Inorder;

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::telemetry::{MutationReport, Outcome, Recorder, RotatedPair, RotationLog};
use crate::{Invariant, TreeError};

/// Bounds every key type must meet: total order, cloneable into telemetry,
/// printable in logs.
pub trait TreeKey: Ord + Clone + fmt::Debug {}

impl<T: Ord + Clone + fmt::Debug> TreeKey for T {}

/// Self-balancing binary search tree with rotation telemetry
#[derive(Debug, Clone)]
pub struct AvlTree<K> {
    root: Link<K>,
    len: usize,
    log: RotationLog<K>,
    last_rotated: Option<RotatedPair<K>>,
}

impl<K: TreeKey> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TreeKey> AvlTree<K> {
    /// Empty tree with an empty rotation log
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            log: RotationLog::new(),
            last_rotated: None,
        }
    }

    /// Insert `key`. Inserting a present key is a silent no-op.
    ///
    /// Performs at most one rebalance (one single or double rotation).
    pub fn insert(&mut self, key: K) -> MutationReport<K> {
        self.clear_rotated_marks();
        let mut recorder = Recorder::new();
        let (root, created) = insert::insert(self.root.take(), &key, &mut recorder);
        self.root = Some(root);

        let outcome = if created {
            self.len += 1;
            Outcome::Inserted
        } else {
            tracing::trace!(?key, "duplicate insert ignored");
            Outcome::Duplicate
        };
        self.commit(recorder.finish(outcome))
    }

    /// Remove `key`. Removing an absent key is a silent no-op.
    ///
    /// May rebalance at every level on the path back to the root.
    pub fn delete(&mut self, key: &K) -> MutationReport<K> {
        self.clear_rotated_marks();
        let mut recorder = Recorder::new();
        let mut removed = false;
        self.root = delete::delete(self.root.take(), key, &mut recorder, &mut removed);

        let outcome = if removed {
            self.len -= 1;
            Outcome::Removed
        } else {
            tracing::trace!(?key, "delete of absent key ignored");
            Outcome::Absent
        };
        self.commit(recorder.finish(outcome))
    }

    /// Discard every node and clear the rotation log and rotated pair.
    pub fn reset(&mut self) -> MutationReport<K> {
        tracing::info!(discarded = self.len, "tree reset");
        self.root = None;
        self.len = 0;
        self.log.clear();
        self.last_rotated = None;
        MutationReport::quiet(Outcome::Reset)
    }

    /// Keys in ascending order
    pub fn traverse(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        traversal::inorder(&self.root, &mut keys);
        keys
    }

    /// Borrowing ascending iterator over the keys
    pub fn iter(&self) -> Inorder<'_, K> {
        Inorder::new(self.root.as_deref())
    }

    /// Iterative lookup
    pub fn contains(&self, key: &K) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Number of keys stored
    pub fn len(&self) -> usize {
        self.len
    }

    /// No keys stored
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree (empty = 0)
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Root node, for read-only inspection
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Every rotation since the last reset, oldest first
    pub fn rotation_log(&self) -> &RotationLog<K> {
        &self.log
    }

    /// Pair touched by the most recent rotation, unless consumed or
    /// cleared by a later mutation that did not rotate
    pub fn last_rotated(&self) -> Option<&RotatedPair<K>> {
        self.last_rotated.as_ref()
    }

    /// Consume the last rotated pair, clearing the node marks.
    pub fn take_last_rotated(&mut self) -> Option<RotatedPair<K>> {
        self.set_rotated_marks(false);
        self.last_rotated.take()
    }

    /// Walk the whole tree and report the first broken invariant.
    ///
    /// O(n). A violation means the engine itself is wrong; nothing
    /// attempts to repair the tree.
    pub fn check_invariants(&self) -> Result<(), TreeError> {
        let count = verify(&self.root, None, None)?.1;
        if count != self.len {
            return Err(TreeError::InvariantViolated {
                invariant: Invariant::Length,
                key: format!("{count} nodes, {} counted", self.len),
            });
        }
        Ok(())
    }

    fn commit(&mut self, report: MutationReport<K>) -> MutationReport<K> {
        self.log.extend(report.rotations.iter().cloned());
        self.last_rotated = report.last_rotated.clone();
        self.set_rotated_marks(true);
        report
    }

    fn clear_rotated_marks(&mut self) {
        self.set_rotated_marks(false);
        self.last_rotated = None;
    }

    // Marks follow keys, so successor-copy and removal keep them consistent.
    fn set_rotated_marks(&mut self, value: bool) {
        let Some(pair) = self.last_rotated.as_ref() else {
            return;
        };
        for key in [&pair.pivot, &pair.promoted] {
            if let Some(node) = find_mut(&mut self.root, key) {
                node.rotated = value;
            }
        }
    }
}

impl<K: TreeKey + fmt::Display> AvlTree<K> {
    /// Sideways dump of the tree structure, one node per line
    pub fn structure(&self) -> String {
        traversal::structure(&self.root)
    }
}

impl<K: TreeKey + Hash> AvlTree<K> {
    /// Digest of shape, keys and cached heights
    pub fn fingerprint(&self) -> blake3::Hash {
        fingerprint::fingerprint(&self.root)
    }
}

impl<K: TreeKey> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: TreeKey> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

fn find_mut<'a, K: Ord>(link: &'a mut Link<K>, key: &K) -> Option<&'a mut Node<K>> {
    let mut cursor = link.as_deref_mut();
    while let Some(node) = cursor {
        cursor = match key.cmp(&node.key) {
            Ordering::Less => node.left.as_deref_mut(),
            Ordering::Greater => node.right.as_deref_mut(),
            Ordering::Equal => return Some(node),
        };
    }
    None
}

/// Returns (height, node count) of a verified subtree.
fn verify<K: TreeKey>(
    link: &Link<K>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<(usize, usize), TreeError> {
    let Some(node) = link else {
        return Ok((0, 0));
    };
    let violation = |invariant| TreeError::InvariantViolated {
        invariant,
        key: format!("{:?}", node.key),
    };

    if lower.is_some_and(|lower| node.key <= *lower)
        || upper.is_some_and(|upper| node.key >= *upper)
    {
        return Err(violation(Invariant::Ordering));
    }
    let (left_height, left_count) = verify(&node.left, lower, Some(&node.key))?;
    let (right_height, right_count) = verify(&node.right, Some(&node.key), upper)?;

    if node.height != 1 + left_height.max(right_height) {
        return Err(violation(Invariant::Height));
    }
    if left_height.abs_diff(right_height) > 1 {
        return Err(violation(Invariant::Balance));
    }
    Ok((node.height, left_count + right_count + 1))
}
