//! Key-value store backed by a separate-chaining hash table.
//!
//! This module provides [`ChainStore`], a mutable multimap that hashes each
//! key to a bucket and keeps colliding entries in a singly linked chain per
//! bucket.
//!
//! # Overview
//!
//! `ChainStore` supports insertion, point lookup, removal, range lookup, and
//! key enumeration:
//!
//! - Amortized O(1) insert, average O(1) get and remove under a bounded load
//!   factor
//! - O(n) range queries and key enumeration (the table has no ordering
//!   relation to the hash, so both are necessarily full scans)
//! - O(1) len and `is_empty`
//!
//! When an insertion would push the load factor (`len / capacity`) past the
//! resize threshold, the store doubles its bucket count and rehashes every
//! entry before the new node is linked in.
//!
//! # Duplicate Keys
//!
//! `ChainStore` is a permissive multimap, mirroring the tree store's policy.
//! Inserting prepends at the bucket head with no overwrite-on-existing-key
//! check, so equal keys coexist as distinct chain nodes. `get` returns the
//! first match in chain order (the most recently inserted duplicate), and
//! `remove` splices out exactly the first match.
//!
//! # Examples
//!
//! ```rust
//! use dualstore::store::ChainStore;
//!
//! let mut store = ChainStore::new();
//! store.insert("one".to_string(), 1);
//! store.insert("two".to_string(), 2);
//! store.insert("three".to_string(), 3);
//!
//! assert_eq!(store.get("one"), Some(&1));
//! assert_eq!(store.remove("two"), Some(2));
//! assert_eq!(store.len(), 2);
//! ```
//!
//! # Internal Structure
//!
//! The table is a vector of bucket slots; each slot optionally owns the head
//! of a singly linked chain of `Box`ed nodes. Every chain node exclusively
//! owns its successor, so teardown, cloning, and rehashing are plain
//! ownership transfers with no aliasing.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;

use super::Collection;

// =============================================================================
// Constants
// =============================================================================

/// Default number of buckets for a freshly created store.
const DEFAULT_CAPACITY: usize = 16;

/// Load factor (`len / capacity`) above which an insert first doubles the
/// bucket count.
const LOAD_FACTOR_THRESHOLD: f64 = 0.75;

// =============================================================================
// Hash computation
// =============================================================================

/// Computes the hash of a key with the configured hasher.
///
/// Uses `rustc-hash` when the `fxhash` feature is enabled, `ahash` when the
/// `ahash` feature is enabled, and the standard library's `DefaultHasher`
/// otherwise.
fn compute_hash<Q: Hash + ?Sized>(key: &Q) -> u64 {
    #[cfg(feature = "fxhash")]
    let mut hasher = rustc_hash::FxHasher::default();
    #[cfg(all(feature = "ahash", not(feature = "fxhash")))]
    let mut hasher = ahash::AHasher::default();
    #[cfg(not(any(feature = "fxhash", feature = "ahash")))]
    let mut hasher = std::collections::hash_map::DefaultHasher::new();

    key.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Node Definition
// =============================================================================

/// An owning link to the rest of a bucket chain.
type ChainLink<K, V> = Option<Box<ChainNode<K, V>>>;

/// Internal node structure for a bucket chain.
#[derive(Clone)]
struct ChainNode<K, V> {
    key: K,
    value: V,
    next: ChainLink<K, V>,
}

// =============================================================================
// ChainStore Definition
// =============================================================================

/// A mutable multimap backed by a separate-chaining hash table.
///
/// Keys must implement `Hash` for bucket placement and `Ord` for range
/// queries and sorted enumeration. Duplicate keys are permitted; see the
/// [module docs](self) for the exact policy.
///
/// Cloning a `ChainStore` allocates an independent bucket vector of the
/// source's capacity and reconstructs every chain node, producing a fully
/// detached duplicate.
///
/// # Time Complexity
///
/// | Operation      | Complexity            |
/// |----------------|-----------------------|
/// | `new`          | O(capacity)           |
/// | `get`          | O(chain), avg O(1)    |
/// | `insert`       | amortized O(1)        |
/// | `remove`       | O(chain), avg O(1)    |
/// | `find_range`   | O(n)                  |
/// | `keys`         | O(n)                  |
/// | `len`          | O(1)                  |
///
/// # Examples
///
/// ```rust
/// use dualstore::store::ChainStore;
///
/// let mut store = ChainStore::new();
/// store.insert(42, "answer");
/// assert_eq!(store.get(&42), Some(&"answer"));
/// assert_eq!(store.capacity(), 16);
/// ```
#[derive(Clone)]
pub struct ChainStore<K, V> {
    /// Bucket slots, each owning the head of its chain
    buckets: Vec<ChainLink<K, V>>,
    /// Number of entries
    length: usize,
}

impl<K, V> ChainStore<K, V> {
    /// Creates a new empty store with the default capacity of 16 buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::ChainStore;
    ///
    /// let store: ChainStore<i32, String> = ChainStore::new();
    /// assert!(store.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new empty store with the given number of buckets.
    ///
    /// A capacity of zero is rounded up to one bucket.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::ChainStore;
    ///
    /// let store: ChainStore<i32, String> = ChainStore::with_capacity(4);
    /// assert_eq!(store.capacity(), 4);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Self { buckets, length: 0 }
    }

    /// Returns the number of entries in the store.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the store contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the current number of buckets.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor (`len / capacity`).
    #[allow(clippy::cast_precision_loss)]
    fn load_factor(&self) -> f64 {
        self.length as f64 / self.buckets.len() as f64
    }

    /// Returns the bucket index for `key` under a table of `capacity`
    /// buckets.
    #[allow(clippy::cast_possible_truncation)]
    fn bucket_index<Q: Hash + ?Sized>(key: &Q, capacity: usize) -> usize {
        (compute_hash(key) % capacity as u64) as usize
    }

    /// Returns an iterator over all entries, in bucket order then chain
    /// order.
    ///
    /// The order is an artifact of the hash layout; callers must not depend
    /// on it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::ChainStore;
    ///
    /// let mut store = ChainStore::new();
    /// store.insert(1, "one");
    /// store.insert(2, "two");
    ///
    /// assert_eq!(store.iter().count(), 2);
    /// ```
    #[must_use]
    pub fn iter(&self) -> ChainStoreIterator<'_, K, V> {
        let mut entries = Vec::with_capacity(self.length);
        for chain in &self.buckets {
            let mut cursor = chain.as_deref();
            while let Some(node) = cursor {
                entries.push((&node.key, &node.value));
                cursor = node.next.as_deref();
            }
        }
        ChainStoreIterator {
            entries,
            current_index: 0,
        }
    }
}

impl<K: Hash, V> ChainStore<K, V> {
    /// Creates a store containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::ChainStore;
    ///
    /// let store = ChainStore::singleton(42, "answer");
    /// assert_eq!(store.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        let mut store = Self::new();
        store.insert(key, value);
        store
    }

    /// Inserts a key-value pair.
    ///
    /// The key is hashed to a bucket and the new entry is prepended at the
    /// head of that bucket's chain. There is no overwrite-on-existing-key
    /// check: duplicates coexist, mirroring the tree store's policy.
    ///
    /// If the load factor already exceeds the resize threshold (0.75), the
    /// table doubles its bucket count and rehashes every entry before the
    /// new node is linked in. The threshold comparison is performed in
    /// real-valued arithmetic so small tables still trigger resizing.
    ///
    /// # Complexity
    ///
    /// Amortized O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::ChainStore;
    ///
    /// let mut store = ChainStore::new();
    /// store.insert(1, "one");
    /// store.insert(1, "uno");
    ///
    /// // Both entries coexist; the newest is first in chain order
    /// assert_eq!(store.len(), 2);
    /// assert_eq!(store.get(&1), Some(&"uno"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        if self.load_factor() > LOAD_FACTOR_THRESHOLD {
            self.resize_and_rehash();
        }

        let index = Self::bucket_index(&key, self.buckets.len());
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(ChainNode { key, value, next }));
        self.length += 1;
    }

    /// Doubles the bucket count and rehashes every entry.
    ///
    /// The replacement table is built in full before the store adopts it:
    /// each old node is consumed and a fresh node is linked into the new
    /// table at the index computed from the new capacity. Callers only ever
    /// observe the pre-resize or post-resize state, and the entry count is
    /// unchanged.
    fn resize_and_rehash(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let mut new_buckets: Vec<ChainLink<K, V>> = Vec::with_capacity(new_capacity);
        new_buckets.resize_with(new_capacity, || None);

        let old_buckets = mem::take(&mut self.buckets);
        for mut chain in old_buckets {
            while let Some(node) = chain {
                let ChainNode { key, value, next } = *node;
                chain = next;

                let index = Self::bucket_index(&key, new_capacity);
                let head = new_buckets[index].take();
                new_buckets[index] = Some(Box::new(ChainNode {
                    key,
                    value,
                    next: head,
                }));
            }
        }

        self.buckets = new_buckets;
    }

    /// Returns a reference to the value of the first entry matching the key.
    ///
    /// The key may be any borrowed form of the store's key type, but its
    /// hash and equality must match the key type's. When duplicates exist,
    /// the first match in chain order wins.
    ///
    /// # Complexity
    ///
    /// O(chain length), average O(1) under a bounded load factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::ChainStore;
    ///
    /// let mut store = ChainStore::new();
    /// store.insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(store.get("hello"), Some(&42));
    /// assert_eq!(store.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = Self::bucket_index(key, self.buckets.len());
        let mut cursor = self.buckets[index].as_deref();
        while let Some(node) = cursor {
            if node.key.borrow() == key {
                return Some(&node.value);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    /// Returns `true` if the store contains at least one entry for the key.
    ///
    /// # Complexity
    ///
    /// O(chain length), average O(1).
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the first entry matching the key, returning its value.
    ///
    /// The matching node is spliced out of its bucket's chain: a sole node
    /// empties the bucket, a head node advances the bucket to its successor,
    /// and an interior or tail node is bypassed by its predecessor. Exactly
    /// one entry is removed per call; `None` is returned and nothing changes
    /// if no entry matches.
    ///
    /// # Complexity
    ///
    /// O(chain length), average O(1).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::ChainStore;
    ///
    /// let mut store = ChainStore::new();
    /// store.insert(1, "one");
    ///
    /// assert_eq!(store.remove(&1), Some("one"));
    /// assert_eq!(store.remove(&1), None);
    /// assert!(store.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = Self::bucket_index(key, self.buckets.len());
        let mut cursor = &mut self.buckets[index];
        loop {
            match cursor {
                None => return None,
                Some(node) if node.key.borrow() == key => {
                    let rest = node.next.take();
                    let removed = mem::replace(cursor, rest);
                    self.length -= 1;
                    return removed.map(|node| node.value);
                }
                Some(node) => cursor = &mut node.next,
            }
        }
    }
}

// =============================================================================
// Collection Contract Implementation
// =============================================================================

impl<K: Hash + Ord, V> Collection<K, V> for ChainStore<K, V> {
    fn insert(&mut self, key: K, value: V) {
        ChainStore::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        ChainStore::remove(self, key)
    }

    fn find(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    /// Full scan: the hash layout carries no ordering, so unlike the tree
    /// store every bucket and every chain node must be visited.
    fn find_range(&self, low: &K, high: &K) -> Vec<&K> {
        self.iter()
            .map(|(key, _)| key)
            .filter(|key| (low..=high).contains(key))
            .collect()
    }

    fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn sorted_keys(&self) -> Vec<&K> {
        let mut keys = Collection::keys(self);
        keys.sort_unstable();
        keys
    }

    fn len(&self) -> usize {
        self.length
    }

    fn is_empty(&self) -> bool {
        self.length == 0
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of a [`ChainStore`] in bucket order.
pub struct ChainStoreIterator<'a, K, V> {
    entries: Vec<(&'a K, &'a V)>,
    current_index: usize,
}

impl<'a, K, V> Iterator for ChainStoreIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index >= self.entries.len() {
            None
        } else {
            let entry = self.entries[self.current_index];
            self.current_index += 1;
            Some(entry)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len().saturating_sub(self.current_index);
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for ChainStoreIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.entries.len().saturating_sub(self.current_index)
    }
}

/// An owning iterator over the entries of a [`ChainStore`] in bucket order.
pub struct ChainStoreIntoIterator<K, V> {
    /// Entries in bucket order, reversed so `next` can pop from the back
    entries: Vec<(K, V)>,
}

impl<K, V> Iterator for ChainStoreIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.entries.len(), Some(self.entries.len()))
    }
}

impl<K, V> ExactSizeIterator for ChainStoreIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for ChainStore<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash, V> FromIterator<(K, V)> for ChainStore<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<K: Hash, V> Extend<(K, V)> for ChainStore<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for ChainStore<K, V> {
    type Item = (K, V);
    type IntoIter = ChainStoreIntoIterator<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut entries = Vec::with_capacity(self.length);
        for chain in &mut self.buckets {
            let mut cursor = chain.take();
            while let Some(node) = cursor {
                let ChainNode { key, value, next } = *node;
                entries.push((key, value));
                cursor = next;
            }
        }
        self.length = 0;
        entries.reverse();
        ChainStoreIntoIterator { entries }
    }
}

impl<'a, K, V> IntoIterator for &'a ChainStore<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = ChainStoreIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChainStore<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

/// Unlinks every chain iteratively before the bucket vector is freed.
///
/// A pathological hash could concentrate all entries in one chain; dropping
/// such a chain through the default recursive `Box` drop would recurse once
/// per node.
impl<K, V> Drop for ChainStore<K, V> {
    fn drop(&mut self) {
        for chain in &mut self.buckets {
            let mut cursor = chain.take();
            while let Some(mut node) = cursor {
                cursor = node.next.take();
            }
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for ChainStore<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        // A sequence of pairs rather than a map: duplicate keys must survive
        // the round trip
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct ChainStoreVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> ChainStoreVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for ChainStoreVisitor<K, V>
where
    K: serde::Deserialize<'de> + Hash,
    V: serde::Deserialize<'de>,
{
    type Value = ChainStore<K, V>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of key-value pairs")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut store = ChainStore::new();
        while let Some((key, value)) = access.next_element()? {
            store.insert(key, value);
        }
        Ok(store)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for ChainStore<K, V>
where
    K: serde::Deserialize<'de> + Hash,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ChainStoreVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
