//! Height and balance bookkeeping
//!
//! Both functions read cached heights only: O(1), no recursion.

use super::node::{Link, Node};

/// Height of a possibly absent subtree (absent = 0)
#[inline]
pub fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of a possibly absent subtree (absent = 0)
#[inline]
pub fn balance<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

/// Whether a balance factor lies outside the AVL window [-1, 1]
#[inline]
pub fn is_out_of_balance(balance: isize) -> bool {
    !(-1..=1).contains(&balance)
}

impl<K> Node<K> {
    /// Recompute the cached height from the children's cached heights.
    #[inline]
    pub(crate) fn refresh_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}
