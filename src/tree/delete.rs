//! Recursive delete with multi-point rebalancing
//!
//! Unlike insertion, removing a node can shorten a subtree at every level
//! of the return path, so each ancestor re-checks itself. The maneuver is
//! chosen from the heavy child's own balance factor: the removed key's
//! position says nothing about the imbalance at that level.

use std::cmp::Ordering;

use super::balance::{balance, is_out_of_balance};
use super::node::{Link, Node};
use super::rotation::apply_case;
use super::TreeKey;
use crate::telemetry::{RebalanceCase, Recorder};

/// Remove `key` from below `link`, setting `removed` when a node went away.
pub(crate) fn delete<K: TreeKey>(
    link: Link<K>,
    key: &K,
    recorder: &mut Recorder<K>,
    removed: &mut bool,
) -> Link<K> {
    let mut node = link?;

    match key.cmp(&node.key) {
        Ordering::Less => node.left = delete(node.left.take(), key, recorder, removed),
        Ordering::Greater => node.right = delete(node.right.take(), key, recorder, removed),
        Ordering::Equal => {
            *removed = true;
            match (node.left.take(), node.right.take()) {
                (None, None) => return None,
                (Some(child), None) | (None, Some(child)) => return Some(child),
                (Some(left), Some(right)) => {
                    // Two children: the inorder successor's key takes this
                    // node's place and the successor leaves the right subtree.
                    let (successor, rest) = detach_min(right, recorder);
                    let Node { key: successor_key, .. } = *successor;
                    node.key = successor_key;
                    node.left = Some(left);
                    node.right = rest;
                }
            }
        }
    }

    Some(rebalance(node, recorder))
}

/// Unlink the leftmost node of `node`, rebalancing each ancestor on the way
/// back up exactly as deleting its key would.
fn detach_min<K: TreeKey>(
    mut node: Box<Node<K>>,
    recorder: &mut Recorder<K>,
) -> (Box<Node<K>>, Link<K>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (node, rest)
        }
        Some(left) => {
            let (min, rest) = detach_min(left, recorder);
            node.left = rest;
            (min, Some(rebalance(node, recorder)))
        }
    }
}

/// Refresh `node` and fix it if the removal below left it out of balance.
fn rebalance<K: TreeKey>(mut node: Box<Node<K>>, recorder: &mut Recorder<K>) -> Box<Node<K>> {
    node.refresh_height();
    let factor = node.balance_factor();

    let case = if factor > 1 {
        if balance(&node.left) >= 0 {
            RebalanceCase::LeftLeft
        } else {
            RebalanceCase::LeftRight
        }
    } else if factor < -1 {
        if balance(&node.right) <= 0 {
            RebalanceCase::RightRight
        } else {
            RebalanceCase::RightLeft
        }
    } else {
        node.unbalanced = is_out_of_balance(factor);
        return node;
    };

    apply_case(node, case, recorder)
}
