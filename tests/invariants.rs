//! Property tests: structural invariants hold after every operation

mod common;

use std::collections::BTreeSet;

use arbor_avl::{AvlTree, Outcome};
use common::assert_avl;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Insert(i64),
    Delete(i64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (-50i64..50).prop_map(Step::Insert),
        2 => (-50i64..50).prop_map(Step::Delete),
    ]
}

proptest! {
    #[test]
    fn mixed_operations_keep_avl_shape(steps in proptest::collection::vec(step(), 1..200)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for step in steps {
            match step {
                Step::Insert(key) => {
                    let report = tree.insert(key);
                    let fresh = model.insert(key);
                    prop_assert_eq!(report.outcome == Outcome::Inserted, fresh);
                    // Single-point rebalancing: at most one LL/RR/LR/RL per insert.
                    prop_assert!(report.rebalances.len() <= 1);
                    prop_assert!(report.rotations.len() <= 2);
                }
                Step::Delete(key) => {
                    let report = tree.delete(&key);
                    let present = model.remove(&key);
                    prop_assert_eq!(report.outcome == Outcome::Removed, present);
                }
            }
            assert_avl(&tree);
            prop_assert_eq!(tree.len(), model.len());
        }

        let expected: Vec<i64> = model.into_iter().collect();
        prop_assert_eq!(tree.traverse(), expected);
    }

    #[test]
    fn inorder_is_strictly_ascending(keys in proptest::collection::vec(any::<i64>(), 0..300)) {
        let tree: AvlTree<i64> = keys.iter().copied().collect();
        let walked = tree.traverse();

        prop_assert!(walked.windows(2).all(|pair| pair[0] < pair[1]));
        let distinct: BTreeSet<i64> = keys.into_iter().collect();
        prop_assert_eq!(walked.len(), distinct.len());
        prop_assert!(walked.iter().eq(distinct.iter()));
        prop_assert!(tree.iter().eq(walked.iter()));
    }

    #[test]
    fn duplicate_insert_changes_nothing(
        keys in proptest::collection::vec(0i64..100, 1..100),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree: AvlTree<i64> = keys.iter().copied().collect();
        let key = keys[pick.index(keys.len())];
        let before = tree.fingerprint();
        let logged = tree.rotation_log().len();

        let report = tree.insert(key);

        prop_assert_eq!(report.outcome, Outcome::Duplicate);
        prop_assert!(!report.rotated());
        prop_assert_eq!(tree.fingerprint(), before);
        prop_assert_eq!(tree.rotation_log().len(), logged);
    }

    #[test]
    fn deleting_absent_key_changes_nothing(
        keys in proptest::collection::vec(0i64..100, 0..100),
        missing in 100i64..200,
    ) {
        let mut tree: AvlTree<i64> = keys.iter().copied().collect();
        let before = tree.fingerprint();
        let len = tree.len();

        let report = tree.delete(&missing);

        prop_assert_eq!(report.outcome, Outcome::Absent);
        prop_assert!(!report.rotated());
        prop_assert_eq!(tree.fingerprint(), before);
        prop_assert_eq!(tree.len(), len);
    }

    #[test]
    fn height_stays_logarithmic(keys in proptest::collection::vec(any::<i32>(), 1..500)) {
        let tree: AvlTree<i32> = keys.into_iter().collect();
        let n = tree.len() as f64;
        // AVL bound: h < 1.4405 log2(n + 2) - 0.3277
        let bound = 1.4405 * (n + 2.0).log2() - 0.3277;
        prop_assert!((tree.height() as f64) < bound, "height {} for n = {}", tree.height(), n);
    }

    #[test]
    fn log_records_every_rotation(steps in proptest::collection::vec(step(), 1..100)) {
        let mut tree = AvlTree::new();
        let mut expected = Vec::new();

        for step in steps {
            let report = match step {
                Step::Insert(key) => tree.insert(key),
                Step::Delete(key) => tree.delete(&key),
            };
            let case_rotations: usize =
                report.rebalances.iter().map(|case| case.rotation_count()).sum();
            prop_assert_eq!(case_rotations, report.rotations.len());
            prop_assert_eq!(report.last_rotated.clone(), report.rotations.last().map(|e| e.pair()));
            prop_assert_eq!(tree.last_rotated(), report.last_rotated.as_ref());
            expected.extend(report.rotations);
        }

        prop_assert_eq!(tree.rotation_log().entries(), expected.as_slice());
    }
}
