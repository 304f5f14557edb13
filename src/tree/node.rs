//! Tree cell
//!
//! Each node exclusively owns its two child slots. There are no parent
//! pointers and no sharing: a subtree moves as a single `Box`.

use std::fmt;

/// Owned, nullable child slot (absent = empty subtree)
pub type Link<K> = Option<Box<Node<K>>>;

/// AVL tree node
#[derive(Debug, Clone)]
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,

    /// Cached subtree height (leaf = 1)
    pub(crate) height: usize,

    /// Balance factor was outside [-1, 1] when last inspected
    pub(crate) unbalanced: bool,

    /// Member of the most recent rotation's pair
    pub(crate) rotated: bool,
}

impl<K> Node<K> {
    /// Fresh leaf
    pub(crate) fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 1,
            unbalanced: false,
            rotated: false,
        })
    }

    /// Key stored at this node
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Left subtree, if present
    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    /// Right subtree, if present
    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    /// Cached height of the subtree rooted here
    pub fn height(&self) -> usize {
        self.height
    }

    /// `height(left) - height(right)` from the cached child heights
    pub fn balance_factor(&self) -> isize {
        super::balance::height(&self.left) as isize - super::balance::height(&self.right) as isize
    }

    /// Diagnostic: the last inspection saw this node out of balance.
    ///
    /// Overwritten on every inspection; never consulted by the algorithms.
    pub fn is_unbalanced(&self) -> bool {
        self.unbalanced
    }

    /// Diagnostic: this node belongs to the current last-rotated pair.
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// No children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<K: fmt::Display> fmt::Display for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (h={}, bf={})", self.key, self.height, self.balance_factor())
    }
}
