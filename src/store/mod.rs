//! Key-value backing stores and the contract they satisfy.
//!
//! This module provides two independent, interchangeable implementations of
//! the [`Collection`] contract:
//!
//! - [`TreeStore`]: unbalanced binary search tree (ordered access, ascending
//!   range queries, height inspection)
//! - [`ChainStore`]: separate-chaining hash table (amortized O(1) point
//!   access, load-factor-driven resizing)
//!
//! The two stores never interact; a client binds the contract to one concrete
//! store and issues direct calls into it.
//!
//! # Duplicate Keys
//!
//! Both stores are permissive multimaps: `insert` never overwrites an
//! existing entry, equal keys coexist as distinct entries, `find` returns the
//! first match in traversal or chain order, and `remove` removes exactly the
//! first match.
//!
//! # Examples
//!
//! ## `TreeStore`
//!
//! ```rust
//! use dualstore::store::{Collection, TreeStore};
//!
//! let mut tree = TreeStore::new();
//! tree.insert(5, "five");
//! tree.insert(3, "three");
//! tree.insert(8, "eight");
//!
//! assert_eq!(tree.get(&3), Some(&"three"));
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.sorted_keys(), vec![&3, &5, &8]);
//! ```
//!
//! ## `ChainStore`
//!
//! ```rust
//! use dualstore::store::{ChainStore, Collection};
//!
//! let mut table = ChainStore::new();
//! table.insert(1, "a");
//! table.insert(2, "b");
//! table.insert(3, "c");
//!
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.get(&2), Some(&"b"));
//! assert_eq!(table.sorted_keys(), vec![&1, &2, &3]);
//! ```

mod chain_store;
mod tree_store;

pub use chain_store::ChainStore;
pub use chain_store::ChainStoreIntoIterator;
pub use chain_store::ChainStoreIterator;
pub use tree_store::TreeStore;
pub use tree_store::TreeStoreIntoIterator;
pub use tree_store::TreeStoreIterator;
pub use tree_store::TreeStoreRangeIterator;

// =============================================================================
// Collection Contract
// =============================================================================

/// The abstract operation set every backing store satisfies.
///
/// A `Collection` is an associative container of key-value pairs. Keys must
/// be totally ordered (for range queries and sorted enumeration); the hashed
/// store additionally requires them to be hashable. The contract has no state
/// of its own: each implementation owns its nodes exclusively and cloning a
/// store yields a fully independent duplicate.
///
/// Absence is signalled by `Option`, never by an error: `find` and `remove`
/// return `None` for a missing key, and `insert` always succeeds.
///
/// # Examples
///
/// ```rust
/// use dualstore::store::{ChainStore, Collection, TreeStore};
///
/// fn census<C: Collection<String, u32>>(store: &mut C) -> usize {
///     store.insert("alice".to_string(), 34);
///     store.insert("bob".to_string(), 27);
///     store.len()
/// }
///
/// assert_eq!(census(&mut TreeStore::new()), 2);
/// assert_eq!(census(&mut ChainStore::new()), 2);
/// ```
pub trait Collection<K, V> {
    /// Inserts a key-value pair.
    ///
    /// Never overwrites: if the key is already present, the new entry
    /// coexists with the old one.
    fn insert(&mut self, key: K, value: V);

    /// Removes the first entry matching `key`, returning its value.
    ///
    /// Returns `None` (and leaves the store untouched) if no entry matches.
    /// When duplicates exist, exactly one entry is removed per call.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Returns a reference to the value of the first entry matching `key`.
    fn find(&self, key: &K) -> Option<&V>;

    /// Returns every key `k` with `low <= k <= high`.
    ///
    /// An empty range (`low > high`) yields an empty result. Result order is
    /// implementation-defined: the tree store reports keys in ascending
    /// order, the hashed store in scan order.
    fn find_range(&self, low: &K, high: &K) -> Vec<&K>;

    /// Returns all keys in implementation-defined order.
    ///
    /// The number of keys returned always equals [`len`](Self::len).
    fn keys(&self) -> Vec<&K>;

    /// Returns all keys in ascending order.
    ///
    /// Same multiset of keys as [`keys`](Self::keys), deterministically
    /// sorted regardless of internal layout.
    fn sorted_keys(&self) -> Vec<&K>;

    /// Returns the number of key-value pairs in the store.
    fn len(&self) -> usize;

    /// Returns `true` if the store contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
