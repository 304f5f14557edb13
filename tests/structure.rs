//! Golden structure dumps

mod common;

use common::{assert_snapshot, tree_from};

#[test]
fn ascending_seven_structure() {
    let tree = tree_from(&[1, 2, 3, 4, 5, 6, 7]);
    assert_snapshot("ascending_seven.txt", &tree.structure());
}

#[test]
fn cascade_after_delete_structure() {
    let mut tree = tree_from(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
    tree.delete(&12);
    assert_snapshot("cascade_after_delete.txt", &tree.structure());
}

#[test]
fn consumed_pair_leaves_no_marks() {
    let mut tree = tree_from(&[1, 2, 3, 4, 5, 6, 7]);
    tree.take_last_rotated();
    assert!(!tree.structure().contains("[rotated]"));
}
