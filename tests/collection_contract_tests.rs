//! Tests exercising both stores through the `Collection` trait.
//!
//! Every test here is written once against the trait and instantiated for
//! `TreeStore` and `ChainStore`, so the two backing stores stay
//! interchangeable behind the shared contract.

use dualstore::store::{ChainStore, Collection, TreeStore};
use rstest::rstest;
use static_assertions::assert_impl_all;

assert_impl_all!(TreeStore<i32, String>: Send, Sync, Clone);
assert_impl_all!(ChainStore<i32, String>: Send, Sync, Clone);

// =============================================================================
// Generic Contract Checks
// =============================================================================

fn check_insert_find_remove<C: Collection<i32, String> + Default>() {
    let mut store = C::default();
    assert!(store.is_empty());

    store.insert(1, "a".to_string());
    store.insert(2, "b".to_string());
    store.insert(3, "c".to_string());

    assert_eq!(store.len(), 3);
    assert_eq!(store.find(&2), Some(&"b".to_string()));
    assert_eq!(store.find(&4), None);

    assert_eq!(store.remove(&2), Some("b".to_string()));
    assert_eq!(store.remove(&2), None);
    assert_eq!(store.len(), 2);
    assert_eq!(store.find(&2), None);
}

fn check_duplicate_keys_accumulate<C: Collection<i32, String> + Default>() {
    let mut store = C::default();
    store.insert(7, "first".to_string());
    store.insert(7, "second".to_string());

    assert_eq!(store.len(), 2);
    assert!(store.find(&7).is_some());

    assert!(store.remove(&7).is_some());
    assert_eq!(store.len(), 1);
    assert!(store.find(&7).is_some());
    assert!(store.remove(&7).is_some());
    assert_eq!(store.remove(&7), None);
}

fn check_key_enumeration<C: Collection<i32, String> + Default>() {
    let mut store = C::default();
    for key in [9, 1, 7, 3, 5] {
        store.insert(key, key.to_string());
    }

    let mut keys: Vec<i32> = store.keys().into_iter().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 3, 5, 7, 9]);

    let sorted: Vec<i32> = store.sorted_keys().into_iter().copied().collect();
    assert_eq!(sorted, vec![1, 3, 5, 7, 9]);
}

fn check_range_queries<C: Collection<i32, String> + Default>() {
    let mut store = C::default();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        store.insert(key, key.to_string());
    }

    let mut found: Vec<i32> = store.find_range(&3, &7).into_iter().copied().collect();
    found.sort_unstable();
    assert_eq!(found, vec![3, 4, 5, 7]);

    assert!(store.find_range(&7, &3).is_empty());
    assert!(store.find_range(&100, &200).is_empty());
}

fn check_empty_store_operations<C: Collection<i32, String> + Default>() {
    let mut store = C::default();
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());
    assert_eq!(store.find(&1), None);
    assert_eq!(store.remove(&1), None);
    assert!(store.keys().is_empty());
    assert!(store.sorted_keys().is_empty());
    assert!(store.find_range(&1, &10).is_empty());
}

// =============================================================================
// Instantiations for Both Stores
// =============================================================================

#[rstest]
fn test_tree_store_satisfies_insert_find_remove() {
    check_insert_find_remove::<TreeStore<i32, String>>();
}

#[rstest]
fn test_chain_store_satisfies_insert_find_remove() {
    check_insert_find_remove::<ChainStore<i32, String>>();
}

#[rstest]
fn test_tree_store_accumulates_duplicate_keys() {
    check_duplicate_keys_accumulate::<TreeStore<i32, String>>();
}

#[rstest]
fn test_chain_store_accumulates_duplicate_keys() {
    check_duplicate_keys_accumulate::<ChainStore<i32, String>>();
}

#[rstest]
fn test_tree_store_enumerates_keys() {
    check_key_enumeration::<TreeStore<i32, String>>();
}

#[rstest]
fn test_chain_store_enumerates_keys() {
    check_key_enumeration::<ChainStore<i32, String>>();
}

#[rstest]
fn test_tree_store_answers_range_queries() {
    check_range_queries::<TreeStore<i32, String>>();
}

#[rstest]
fn test_chain_store_answers_range_queries() {
    check_range_queries::<ChainStore<i32, String>>();
}

#[rstest]
fn test_tree_store_empty_operations() {
    check_empty_store_operations::<TreeStore<i32, String>>();
}

#[rstest]
fn test_chain_store_empty_operations() {
    check_empty_store_operations::<ChainStore<i32, String>>();
}

// =============================================================================
// Store-Agnostic Usage
// =============================================================================

// Callers can swap the backing store without touching their logic
fn populate_and_summarize<C: Collection<String, u32> + Default>(
    entries: &[(&str, u32)],
) -> (usize, Vec<String>) {
    let mut store = C::default();
    for (key, value) in entries {
        store.insert((*key).to_string(), *value);
    }
    let sorted = store.sorted_keys().into_iter().cloned().collect();
    (store.len(), sorted)
}

#[rstest]
fn test_both_stores_agree_on_shared_workload() {
    let entries = [("cherry", 3), ("apple", 1), ("banana", 2), ("apple", 4)];

    let (tree_len, tree_keys) = populate_and_summarize::<TreeStore<String, u32>>(&entries);
    let (chain_len, chain_keys) = populate_and_summarize::<ChainStore<String, u32>>(&entries);

    assert_eq!(tree_len, chain_len);
    assert_eq!(tree_keys, chain_keys);
    assert_eq!(
        tree_keys,
        vec!["apple".to_string(), "apple".to_string(), "banana".to_string(), "cherry".to_string()]
    );
}
