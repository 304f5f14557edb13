//! Recursive insert with single-point rebalancing
//!
//! One insertion can unbalance at most one node on the path back to the
//! root. Fixing it restores that subtree's pre-insert height, so every
//! ancestor above only refreshes its cached height.

use std::cmp::Ordering;

use super::balance::is_out_of_balance;
use super::node::{Link, Node};
use super::rotation::apply_case;
use super::TreeKey;
use crate::telemetry::{RebalanceCase, Recorder};

/// Insert `key` below `link`. Returns the new subtree root and whether a
/// node was created (`false` for a duplicate).
pub(crate) fn insert<K: TreeKey>(
    link: Link<K>,
    key: &K,
    recorder: &mut Recorder<K>,
) -> (Box<Node<K>>, bool) {
    let mut node = match link {
        Some(node) => node,
        None => return (Node::leaf(key.clone()), true),
    };

    let created = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, created) = insert(node.left.take(), key, recorder);
            node.left = Some(child);
            created
        }
        Ordering::Greater => {
            let (child, created) = insert(node.right.take(), key, recorder);
            node.right = Some(child);
            created
        }
        Ordering::Equal => return (node, false),
    };

    node.refresh_height();
    let balance = node.balance_factor();
    match insert_case(&node, key, balance) {
        Some(case) => (apply_case(node, case, recorder), created),
        None => {
            node.unbalanced = is_out_of_balance(balance);
            (node, created)
        }
    }
}

/// Pick the maneuver from the sign of the imbalance and the side of the
/// heavy child the new key went to.
fn insert_case<K: Ord>(node: &Node<K>, key: &K, balance: isize) -> Option<RebalanceCase> {
    if balance > 1 {
        let left = node.left.as_deref()?;
        match key.cmp(&left.key) {
            Ordering::Less => Some(RebalanceCase::LeftLeft),
            Ordering::Greater => Some(RebalanceCase::LeftRight),
            Ordering::Equal => None,
        }
    } else if balance < -1 {
        let right = node.right.as_deref()?;
        match key.cmp(&right.key) {
            Ordering::Greater => Some(RebalanceCase::RightRight),
            Ordering::Less => Some(RebalanceCase::RightLeft),
            Ordering::Equal => None,
        }
    } else {
        None
    }
}
