//! Unit and property tests for [`IndexedMinHeap`].

use proptest::prelude::*;
use rstest::rstest;

use super::{HeapEntry, HeapError, IndexedMinHeap};
use crate::test_utils::suite_proptest_config;

fn entries_from_keys(keys: &[f64]) -> Vec<HeapEntry> {
    keys.iter()
        .enumerate()
        .map(|(value, &key)| HeapEntry::new(key, value))
        .collect()
}

fn drain_keys(heap: &mut IndexedMinHeap) -> Vec<f64> {
    let mut keys = Vec::with_capacity(heap.len());
    while let Ok(entry) = heap.pop() {
        keys.push(entry.key);
    }
    keys
}

#[test]
fn heapify_and_push_agree_on_pop_order() {
    let keys = [4.0, 2.0, 5.0, 8.0, 9.0];
    let mut heapified =
        IndexedMinHeap::from_entries(keys.len(), entries_from_keys(&keys)).expect("valid entries");
    let mut pushed = IndexedMinHeap::with_capacity(keys.len());
    for entry in entries_from_keys(&keys) {
        pushed.push(entry).expect("push must succeed");
    }
    assert!(heapified.is_consistent());
    assert!(pushed.is_consistent());
    assert_eq!(drain_keys(&mut heapified), [2.0, 4.0, 5.0, 8.0, 9.0]);
    assert_eq!(drain_keys(&mut pushed), [2.0, 4.0, 5.0, 8.0, 9.0]);
}

#[test]
fn pop_on_empty_heap_fails() {
    let mut heap = IndexedMinHeap::with_capacity(2);
    assert_eq!(heap.pop(), Err(HeapError::Empty));
    assert!(heap.peek().is_none());
}

#[test]
fn infinite_keys_sink_to_the_bottom() {
    let mut heap =
        IndexedMinHeap::from_entries(3, entries_from_keys(&[f64::INFINITY, 1.0, 0.5]))
            .expect("valid entries");
    assert_eq!(heap.pop().map(|entry| entry.value), Ok(2));
    assert_eq!(heap.pop().map(|entry| entry.value), Ok(1));
    assert_eq!(heap.pop().map(|entry| entry.value), Ok(0));
}

#[rstest]
#[case::out_of_range(vec![HeapEntry::new(1.0, 3)], HeapError::ValueOutOfRange { value: 3, capacity: 2 })]
#[case::duplicate(
    vec![HeapEntry::new(1.0, 1), HeapEntry::new(2.0, 1)],
    HeapError::DuplicateValue { value: 1 }
)]
fn from_entries_rejects_unindexable_values(
    #[case] entries: Vec<HeapEntry>,
    #[case] expected: HeapError,
) {
    let err = IndexedMinHeap::from_entries(2, entries).expect_err("entries must be rejected");
    assert_eq!(err, expected);
}

#[test]
fn push_rejects_duplicates_and_out_of_range_values() {
    let mut heap = IndexedMinHeap::with_capacity(2);
    heap.push(HeapEntry::new(1.0, 0)).expect("first push");
    assert_eq!(
        heap.push(HeapEntry::new(0.5, 0)),
        Err(HeapError::DuplicateValue { value: 0 })
    );
    assert_eq!(
        heap.push(HeapEntry::new(0.5, 2)),
        Err(HeapError::ValueOutOfRange {
            value: 2,
            capacity: 2
        })
    );
    assert_eq!(heap.len(), 1);
}

#[test]
fn search_tracks_values_through_sifts() {
    let mut heap = IndexedMinHeap::from_entries(4, entries_from_keys(&[4.0, 3.0, 2.0, 1.0]))
        .expect("valid entries");
    assert_eq!(heap.search(3), Some(0));
    heap.update_key(0, 0.0).expect("value 0 is stored");
    assert_eq!(heap.search(0), Some(0));
    assert!(heap.is_consistent());
    heap.remove_value(0).expect("value 0 is stored");
    assert_eq!(heap.search(0), None);
    assert_eq!(
        heap.update_key(0, 1.0),
        Err(HeapError::MissingValue { value: 0 })
    );
    assert!(heap.is_consistent());
}

#[test]
fn update_can_swap_in_an_unused_value() {
    let mut heap = IndexedMinHeap::from_entries(4, entries_from_keys(&[1.0, 2.0]))
        .expect("valid entries");
    let position = heap.search(1).expect("value 1 is stored");
    heap.update(position, HeapEntry::new(0.5, 3))
        .expect("value 3 is unused");
    assert_eq!(heap.search(1), None);
    assert_eq!(heap.search(3), Some(0));
    assert_eq!(
        heap.update(0, HeapEntry::new(0.5, 0)),
        Err(HeapError::DuplicateValue { value: 0 })
    );
    assert!(heap.is_consistent());
}

#[test]
fn positional_operations_reject_out_of_range_positions() {
    let mut heap = IndexedMinHeap::from_entries(2, entries_from_keys(&[1.0])).expect("valid");
    assert_eq!(
        heap.remove(1),
        Err(HeapError::PositionOutOfRange {
            position: 1,
            len: 1
        })
    );
    assert_eq!(
        heap.update(3, HeapEntry::new(0.0, 0)),
        Err(HeapError::PositionOutOfRange {
            position: 3,
            len: 1
        })
    );
}

/// A mutation applied to a heap during the property run.
#[derive(Clone, Debug)]
enum Operation {
    Update { position: usize, key: f64 },
    Remove { position: usize },
    Pop,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (any::<usize>(), 0.0..100.0).prop_map(|(position, key)| Operation::Update { position, key }),
        2 => any::<usize>().prop_map(|position| Operation::Remove { position }),
        1 => Just(Operation::Pop),
    ]
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn pop_yields_non_decreasing_keys(keys in proptest::collection::vec(0.0..1_000.0f64, 0..64)) {
        let mut heap = IndexedMinHeap::with_capacity(keys.len());
        for entry in entries_from_keys(&keys) {
            heap.push(entry).map_err(|err| TestCaseError::fail(err.to_string()))?;
        }
        let mut expected = keys.clone();
        expected.sort_by(f64::total_cmp);
        prop_assert_eq!(drain_keys(&mut heap), expected);
    }

    #[test]
    fn heapify_matches_sequential_push(keys in proptest::collection::vec(0.0..1_000.0f64, 0..64)) {
        let mut heapified = IndexedMinHeap::from_entries(keys.len(), entries_from_keys(&keys))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let mut pushed = IndexedMinHeap::with_capacity(keys.len());
        for entry in entries_from_keys(&keys) {
            pushed.push(entry).map_err(|err| TestCaseError::fail(err.to_string()))?;
        }
        prop_assert_eq!(drain_keys(&mut heapified), drain_keys(&mut pushed));
    }

    #[test]
    fn mutations_preserve_heap_order(
        keys in proptest::collection::vec(0.0..100.0f64, 1..48),
        operations in proptest::collection::vec(operation_strategy(), 0..48),
    ) {
        let mut heap = IndexedMinHeap::from_entries(keys.len(), entries_from_keys(&keys))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        for operation in operations {
            if heap.is_empty() {
                break;
            }
            let len = heap.len();
            match operation {
                Operation::Update { position, key } => {
                    let position = position % len;
                    let value = heap.entries()[position].value;
                    heap.update(position, HeapEntry::new(key, value))
                        .map_err(|err| TestCaseError::fail(err.to_string()))?;
                    prop_assert_eq!(heap.search(value).map(|p| heap.entries()[p].key), Some(key));
                }
                Operation::Remove { position } => {
                    let removed = heap.remove(position % len)
                        .map_err(|err| TestCaseError::fail(err.to_string()))?;
                    prop_assert_eq!(heap.search(removed.value), None);
                }
                Operation::Pop => {
                    let minimum = heap.entries().iter().map(|entry| entry.key).fold(f64::INFINITY, f64::min);
                    let popped = heap.pop().map_err(|err| TestCaseError::fail(err.to_string()))?;
                    prop_assert_eq!(popped.key, minimum);
                }
            }
            prop_assert!(heap.is_consistent());
        }
    }
}
