//! Single-owner service: serialized access from several threads

use std::collections::BTreeSet;
use std::thread;

use arbor_avl::{EngineConfig, Highlight, Outcome, RotatedPair, TreeError, TreeService};

#[test]
fn scenario_through_handle() {
    let service = TreeService::<i64>::spawn(EngineConfig::default().with_invariant_checks(true))
        .expect("service starts");
    let tree = service.handle();
    let highlights = service.highlights();

    tree.insert(30).unwrap();
    tree.insert(20).unwrap();
    assert!(highlights.poll().is_clear());

    let report = tree.insert(10).unwrap();
    assert_eq!(report.rotations.len(), 1);
    assert_eq!(
        highlights.poll(),
        Highlight::Pair(RotatedPair {
            pivot: 30,
            promoted: 20
        })
    );

    assert_eq!(tree.delete(30).unwrap().outcome, Outcome::Removed);
    assert_eq!(tree.delete(10).unwrap().outcome, Outcome::Removed);
    assert_eq!(tree.delete(10).unwrap().outcome, Outcome::Absent);
    assert!(highlights.poll().is_clear());
    assert_eq!(tree.traverse().unwrap(), vec![20]);
    assert_eq!(tree.rotation_log().unwrap().len(), 1);
    assert_eq!(tree.structure().unwrap(), "20 h=1\n");

    service.shutdown().unwrap();
}

#[test]
fn concurrent_writers_are_serialized() {
    let service = TreeService::<i64>::spawn(
        EngineConfig::default()
            .with_queue_capacity(4)
            .with_invariant_checks(true),
    )
    .unwrap();

    let writers: Vec<_> = (0..4i64)
        .map(|worker| {
            let tree = service.handle();
            thread::spawn(move || {
                for i in 0..100 {
                    tree.insert(worker * 1_000 + i).unwrap();
                }
                for i in (0..100).step_by(2) {
                    tree.delete(worker * 1_000 + i).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let expected: BTreeSet<i64> = (0..4i64)
        .flat_map(|worker| (1..100).step_by(2).map(move |i| worker * 1_000 + i))
        .collect();
    let keys = service.handle().traverse().unwrap();
    assert_eq!(keys, expected.into_iter().collect::<Vec<_>>());

    // Nobody drained: the queue filled up and the rest were counted as dropped.
    let highlights = service.highlights();
    assert_eq!(highlights.len(), 4);
    assert!(highlights.dropped() > 0);

    service.shutdown().unwrap();
}

#[test]
fn handles_fail_after_shutdown() {
    let service = TreeService::<i64>::spawn(EngineConfig::default()).unwrap();
    let tree = service.handle();
    tree.insert(1).unwrap();
    service.shutdown().unwrap();

    assert!(matches!(tree.insert(2), Err(TreeError::ServiceStopped)));
    assert!(matches!(tree.traverse(), Err(TreeError::ServiceStopped)));
}

#[test]
fn dropping_service_stops_owner() {
    let tree = {
        let service = TreeService::<i64>::spawn(EngineConfig::default()).unwrap();
        service.handle()
    };
    assert!(matches!(tree.reset(), Err(TreeError::ServiceStopped)));
}
