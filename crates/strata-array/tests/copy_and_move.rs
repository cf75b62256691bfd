//! Integration test: copy and move semantics with compound elements.

use strata_array::{CloneError, DynamicArray};
use strata_test_utils::{CopyFailed, DropLog, FlakyClone};

#[test]
fn copies_of_nested_vectors_are_independent() {
    let mut source = DynamicArray::new();
    source.insert(vec![1, 2]).unwrap();
    source.insert(vec![3]).unwrap();

    let mut copy = source.clone();
    copy[0].push(99);
    copy.remove_at(1);
    source[1].clear();

    assert_eq!(source, [vec![1, 2], vec![]]);
    assert_eq!(copy, [vec![1, 2, 99]]);
}

#[test]
fn clone_from_reuses_destination_identity() {
    let source = DynamicArray::from_slice(&[String::from("x"), String::from("y")]).unwrap();
    let mut dest = DynamicArray::from_slice(&[String::from("old")]).unwrap();
    let id = dest.instance_id();
    dest.clone_from(&source);
    assert_eq!(dest, source);
    assert_eq!(dest.instance_id(), id);
}

#[test]
fn moved_from_array_is_reusable() {
    let mut source = DynamicArray::from_slice(&[1u64, 2, 3]).unwrap();
    let dest = source.take();
    assert_eq!(dest, [1, 2, 3]);
    assert_eq!(source.size(), 0);
    assert_eq!(source.capacity(), 0);

    for v in 0..20 {
        source.insert(v).unwrap();
    }
    assert_eq!(source.len(), 20);
    assert_eq!(dest, [1, 2, 3]);
}

#[test]
fn failed_copy_reports_element_error_and_leaks_nothing() {
    let log = DropLog::new();
    let mut source = DynamicArray::new();
    for id in 0..6 {
        source.insert(FlakyClone::new(id, &log)).unwrap();
    }
    let err = source.try_clone_with(|e| e.try_copy(4)).unwrap_err();
    assert_eq!(err, CloneError::Element(CopyFailed { id: 4 }));
    assert_eq!(log.dropped(), vec![0, 1, 2, 3]);

    drop(source);
    assert_eq!(log.len(), 10);
}

#[test]
fn clone_error_displays_cause() {
    let err: CloneError<CopyFailed> = CloneError::Element(CopyFailed { id: 7 });
    assert_eq!(err.to_string(), "element copy failed: copy of element 7 refused");
}
