//! Read-only walks
//!
//! Nothing here mutates the tree; all of it borrows immutably, so the
//! borrow checker keeps traversal from interleaving with a mutation.

use std::fmt::{self, Write};

use super::node::{Link, Node};

/// Append the keys below `link` to `out` in ascending order.
pub fn inorder<K: Clone>(link: &Link<K>, out: &mut Vec<K>) {
    if let Some(node) = link {
        inorder(&node.left, out);
        out.push(node.key.clone());
        inorder(&node.right, out);
    }
}

/// Borrowing inorder iterator
///
/// Stack depth: O(height) = O(log n)
#[derive(Debug)]
pub struct Inorder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Inorder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Option<&'a Node<K>>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left();
        }
    }
}

impl<'a, K> Iterator for Inorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.key)
    }
}

/// Sideways structure dump, one node per line:
///
/// ```text
/// 20 h=2
/// |- L 10 h=1
/// `- R 30 h=1
/// ```
///
/// Nodes in the current rotated pair carry a ` [rotated]` suffix.
pub fn structure<K: fmt::Display>(link: &Link<K>) -> String {
    Structure(link).to_string()
}

/// Display adapter over a subtree that renders the sideways dump
struct Structure<'a, K>(&'a Link<K>);

impl<K: fmt::Display> fmt::Display for Structure<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(root) => write_line(f, root, "", None),
            None => Ok(()),
        }
    }
}

fn write_line<K: fmt::Display, W: Write>(
    out: &mut W,
    node: &Node<K>,
    prefix: &str,
    branch: Option<(&str, bool)>,
) -> fmt::Result {
    let child_prefix = match branch {
        None => {
            write!(out, "{} h={}", node.key, node.height)?;
            String::new()
        }
        Some((side, last)) => {
            let connector = if last { "`- " } else { "|- " };
            write!(out, "{prefix}{connector}{side} {} h={}", node.key, node.height)?;
            format!("{prefix}{}", if last { "   " } else { "|  " })
        }
    };
    if node.rotated {
        out.write_str(" [rotated]")?;
    }
    out.write_char('\n')?;

    if let Some(left) = node.left() {
        write_line(out, left, &child_prefix, Some(("L", node.right.is_none())))?;
    }
    if let Some(right) = node.right() {
        write_line(out, right, &child_prefix, Some(("R", true)))?;
    }
    Ok(())
}
