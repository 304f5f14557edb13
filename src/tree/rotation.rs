//! Single rotations
//!
//! ```text
//!        y                 x
//!       / \   right       / \
//!      x   c  ------>    a   y
//!     / \     <------       / \
//!    a   t     left        t   c
//! ```
//!
//! Exactly three links change: the promoted child's inner link, the
//! pivot's link to it, and the caller's link to the subtree root (the
//! returned box). Heights are refreshed bottom-up: pivot first.

use super::node::Node;
use super::TreeKey;
use crate::telemetry::{RebalanceCase, Recorder, RotationDirection, RotationEvent};

/// Rotate `y` right, promoting its left child. Returns the new subtree root.
pub(crate) fn rotate_right<K: TreeKey>(
    mut y: Box<Node<K>>,
    recorder: &mut Recorder<K>,
) -> Box<Node<K>> {
    let Some(mut x) = y.left.take() else {
        unreachable!("right rotation on a node without a left child");
    };
    y.left = x.right.take();
    y.refresh_height();

    let event = RotationEvent {
        direction: RotationDirection::Right,
        pivot: y.key.clone(),
        promoted: x.key.clone(),
    };
    x.right = Some(y);
    x.refresh_height();

    tracing::debug!(pivot = ?event.pivot, promoted = ?event.promoted, "right rotation");
    recorder.rotation(event);
    x
}

/// Rotate `x` left, promoting its right child. Returns the new subtree root.
pub(crate) fn rotate_left<K: TreeKey>(
    mut x: Box<Node<K>>,
    recorder: &mut Recorder<K>,
) -> Box<Node<K>> {
    let Some(mut y) = x.right.take() else {
        unreachable!("left rotation on a node without a right child");
    };
    x.right = y.left.take();
    x.refresh_height();

    let event = RotationEvent {
        direction: RotationDirection::Left,
        pivot: x.key.clone(),
        promoted: y.key.clone(),
    };
    y.left = Some(x);
    y.refresh_height();

    tracing::debug!(pivot = ?event.pivot, promoted = ?event.promoted, "left rotation");
    recorder.rotation(event);
    y
}

/// Apply one of the four canonical maneuvers at `node`.
pub(crate) fn apply_case<K: TreeKey>(
    mut node: Box<Node<K>>,
    case: RebalanceCase,
    recorder: &mut Recorder<K>,
) -> Box<Node<K>> {
    tracing::debug!(%case, at = ?node.key, "rebalancing");
    recorder.rebalance(case);
    match case {
        RebalanceCase::LeftLeft => rotate_right(node, recorder),
        RebalanceCase::RightRight => rotate_left(node, recorder),
        RebalanceCase::LeftRight => {
            node.left = node.left.take().map(|left| rotate_left(left, recorder));
            rotate_right(node, recorder)
        }
        RebalanceCase::RightLeft => {
            node.right = node.right.take().map(|right| rotate_right(right, recorder));
            rotate_left(node, recorder)
        }
    }
}
