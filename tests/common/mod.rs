#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use arbor_avl::{AvlTree, Node};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("ARBOR_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set ARBOR_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Build a tree by inserting `keys` in order.
pub fn tree_from(keys: &[i64]) -> AvlTree<i64> {
    keys.iter().copied().collect()
}

/// Independent check through the public node API: recomputes heights
/// instead of trusting the cached ones, and checks ordering bounds.
pub fn assert_avl(tree: &AvlTree<i64>) {
    fn walk(node: Option<&Node<i64>>, lower: Option<i64>, upper: Option<i64>) -> usize {
        let Some(node) = node else {
            return 0;
        };
        let key = *node.key();
        if let Some(lower) = lower {
            assert!(key > lower, "key {} not above {}", key, lower);
        }
        if let Some(upper) = upper {
            assert!(key < upper, "key {} not below {}", key, upper);
        }
        let left = walk(node.left(), lower, Some(key));
        let right = walk(node.right(), Some(key), upper);
        let height = 1 + left.max(right);
        assert_eq!(node.height(), height, "cached height wrong at {}", key);
        assert!(left.abs_diff(right) <= 1, "unbalanced at {}", key);
        assert!(!node.is_unbalanced(), "node {} flagged unbalanced", key);
        height
    }

    let height = walk(tree.root(), None, None);
    assert_eq!(tree.height(), height);
    tree.check_invariants().expect("engine invariant check");
}

/// Root key and its direct children, for shape assertions.
pub fn top(tree: &AvlTree<i64>) -> (Option<i64>, Option<i64>, Option<i64>) {
    let root = tree.root();
    (
        root.map(|n| *n.key()),
        root.and_then(|n| n.left()).map(|n| *n.key()),
        root.and_then(|n| n.right()).map(|n| *n.key()),
    )
}
