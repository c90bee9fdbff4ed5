//! Ordered key-value store backed by an unbalanced binary search tree.
//!
//! This module provides [`TreeStore`], a mutable ordered multimap that keeps
//! its entries in a plain (deliberately non-self-balancing) binary search
//! tree.
//!
//! # Overview
//!
//! `TreeStore` supports insertion, point lookup, range lookup, ordered key
//! enumeration, and height inspection:
//!
//! - O(height) insert, get, remove
//! - O(n) range queries, key enumeration, height
//! - O(1) len and `is_empty`
//!
//! The tree performs no rebalancing, so `height` degrades to O(n) for
//! adversarial (e.g. sorted) insertion orders. That trade-off is intentional:
//! the structure stays simple and every operation is a direct recursive walk.
//!
//! # Duplicate Keys
//!
//! `TreeStore` is a permissive multimap. Inserting a key that is already
//! present never overwrites: the tie goes to the right subtree and both
//! entries coexist. `get` returns the first match on the descent from the
//! root, and `remove` detaches exactly one matching node per call.
//!
//! # Examples
//!
//! ```rust
//! use dualstore::store::TreeStore;
//!
//! let mut store = TreeStore::new();
//! store.insert(3, "three");
//! store.insert(1, "one");
//! store.insert(2, "two");
//!
//! // Entries are enumerated in sorted key order
//! let keys: Vec<&i32> = store.iter().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // Range queries
//! let range: Vec<(&i32, &&str)> = store.range(1..3).collect();
//! assert_eq!(range.len(), 2); // 1 and 2
//! ```
//!
//! # Internal Structure
//!
//! Every node holds one key-value pair and exclusively owns its two optional
//! children through `Box` links. The BST invariant is: all keys in a node's
//! left subtree are strictly less than the node's key, and all keys in the
//! right subtree are greater than or equal to it.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Bound, RangeBounds};

use super::Collection;

// =============================================================================
// Node Definition
// =============================================================================

/// An owning link to a subtree.
type Link<K, V> = Option<Box<Node<K, V>>>;

/// Internal node structure for the binary search tree.
#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a new leaf node.
    const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

// =============================================================================
// TreeStore Definition
// =============================================================================

/// A mutable ordered multimap backed by an unbalanced binary search tree.
///
/// Keys must implement `Ord`. Entries are kept in sorted key order, enabling
/// ascending enumeration and inclusive range queries. Duplicate keys are
/// permitted; see the [module docs](self) for the exact policy.
///
/// Cloning a `TreeStore` reconstructs every node, producing a fully detached
/// duplicate: mutating the clone never affects the source and vice versa.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(height)         |
/// | `insert`       | O(height)         |
/// | `remove`       | O(height)         |
/// | `contains_key` | O(height)         |
/// | `min`/`max`    | O(height)         |
/// | `range`        | O(n)              |
/// | `height`       | O(n)              |
/// | `len`          | O(1)              |
///
/// # Examples
///
/// ```rust
/// use dualstore::store::TreeStore;
///
/// let mut store = TreeStore::new();
/// store.insert(42, "answer");
/// assert_eq!(store.get(&42), Some(&"answer"));
/// ```
#[derive(Clone)]
pub struct TreeStore<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
}

impl<K, V> TreeStore<K, V> {
    /// Creates a new empty store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let store: TreeStore<i32, String> = TreeStore::new();
    /// assert!(store.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
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

    /// Returns the height of the tree.
    ///
    /// An empty tree has height 0; a single-node tree has height 1; otherwise
    /// the height is one more than the taller subtree of the root.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let mut store = TreeStore::new();
    /// assert_eq!(store.height(), 0);
    ///
    /// store.insert(5, ());
    /// store.insert(3, ());
    /// store.insert(8, ());
    /// store.insert(1, ());
    /// assert_eq!(store.height(), 3); // 5 -> 3 -> 1
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        Self::height_of(&self.root)
    }

    /// Recursive helper for height.
    fn height_of(link: &Link<K, V>) -> usize {
        link.as_deref().map_or(0, |node| {
            1 + Self::height_of(&node.left).max(Self::height_of(&node.right))
        })
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let mut store = TreeStore::new();
    /// store.insert(2, "two");
    /// store.insert(1, "one");
    ///
    /// for (key, value) in store.iter() {
    ///     println!("{key}: {value}");
    /// }
    /// ```
    #[must_use]
    pub fn iter(&self) -> TreeStoreIterator<'_, K, V> {
        let mut entries = Vec::with_capacity(self.length);
        Self::collect_entries_in_order(&self.root, &mut entries);
        TreeStoreIterator {
            entries,
            current_index: 0,
        }
    }

    /// Collects all entries in ascending key order (in-order traversal).
    fn collect_entries_in_order<'a>(link: &'a Link<K, V>, entries: &mut Vec<(&'a K, &'a V)>) {
        if let Some(node) = link {
            Self::collect_entries_in_order(&node.left, entries);
            entries.push((&node.key, &node.value));
            Self::collect_entries_in_order(&node.right, entries);
        }
    }

    /// Consumes a subtree, appending its entries in ascending key order.
    fn drain_in_order(link: Link<K, V>, entries: &mut Vec<(K, V)>) {
        if let Some(node) = link {
            let node = *node;
            Self::drain_in_order(node.left, entries);
            entries.push((node.key, node.value));
            Self::drain_in_order(node.right, entries);
        }
    }
}

impl<K: Ord, V> TreeStore<K, V> {
    /// Creates a store containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let store = TreeStore::singleton(42, "answer");
    /// assert_eq!(store.len(), 1);
    /// assert_eq!(store.get(&42), Some(&"answer"));
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
    /// The descent starts at the root: a strictly smaller key goes left,
    /// anything else goes right. A key equal to an existing key therefore
    /// lands in the right subtree and coexists with the old entry; `insert`
    /// never overwrites.
    ///
    /// # Complexity
    ///
    /// O(height) time, O(1) extra space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let mut store = TreeStore::new();
    /// store.insert(1, "one");
    /// store.insert(1, "uno");
    ///
    /// // Both entries coexist
    /// assert_eq!(store.len(), 2);
    /// assert_eq!(store.get(&1), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        Self::insert_into(&mut self.root, key, value);
        self.length += 1;
    }

    /// Recursive helper for insert.
    fn insert_into(link: &mut Link<K, V>, key: K, value: V) {
        match link {
            None => *link = Some(Box::new(Node::new(key, value))),
            Some(node) => {
                if key < node.key {
                    Self::insert_into(&mut node.left, key, value);
                } else {
                    // Ties go right
                    Self::insert_into(&mut node.right, key, value);
                }
            }
        }
    }

    /// Returns a reference to the value of the first entry matching the key.
    ///
    /// The key may be any borrowed form of the store's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    /// When duplicates exist, the match closest to the root wins.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let mut store = TreeStore::new();
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
        Q: Ord + ?Sized,
    {
        Self::get_from(&self.root, key)
    }

    /// Recursive helper for get.
    fn get_from<'a, Q>(link: &'a Link<K, V>, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = link.as_deref()?;
        match key.cmp(node.key.borrow()) {
            Ordering::Less => Self::get_from(&node.left, key),
            Ordering::Greater => Self::get_from(&node.right, key),
            Ordering::Equal => Some(&node.value),
        }
    }

    /// Returns `true` if the store contains at least one entry for the key.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the first entry matching the key, returning its value.
    ///
    /// The removed node is the first match on the descent from the root.
    /// A leaf is detached outright; a node with one child is replaced by that
    /// child; a node with two children is replaced by its in-order successor
    /// (the minimum of its right subtree), which is detached from the right
    /// subtree and spliced into the removed node's position.
    ///
    /// Returns `None` and leaves the tree untouched if no entry matches.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let mut store = TreeStore::new();
    /// store.insert(2, "two");
    /// store.insert(1, "one");
    /// store.insert(3, "three");
    ///
    /// assert_eq!(store.remove(&2), Some("two"));
    /// assert_eq!(store.remove(&2), None);
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = Self::remove_from(&mut self.root, key);
        if removed.is_some() {
            self.length -= 1;
        }
        removed
    }

    /// Recursive helper for remove: locates the first matching node.
    fn remove_from<Q>(link: &mut Link<K, V>, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match link {
            None => None,
            Some(node) => match key.cmp(node.key.borrow()) {
                Ordering::Less => Self::remove_from(&mut node.left, key),
                Ordering::Greater => Self::remove_from(&mut node.right, key),
                Ordering::Equal => Self::detach(link),
            },
        }
    }

    /// Detaches the node at `link`, reattaching its children.
    fn detach(link: &mut Link<K, V>) -> Option<V> {
        let mut node = link.take()?;
        match (node.left.take(), node.right.take()) {
            (None, None) => {}
            (Some(child), None) | (None, Some(child)) => *link = Some(child),
            (Some(left), Some(right)) => {
                // Splice the in-order successor into the removed position
                let (rest, mut successor) = Self::detach_min(right);
                successor.left = Some(left);
                successor.right = rest;
                *link = Some(successor);
            }
        }
        Some(node.value)
    }

    /// Detaches the minimum node of a non-empty subtree.
    ///
    /// Returns the remaining subtree and the detached node.
    fn detach_min(mut root: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
        match root.left.take() {
            None => {
                let rest = root.right.take();
                (rest, root)
            }
            Some(left) => {
                let (new_left, min) = Self::detach_min(left);
                root.left = new_left;
                (Some(root), min)
            }
        }
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let mut store = TreeStore::new();
    /// store.insert(3, "three");
    /// store.insert(1, "one");
    ///
    /// assert_eq!(store.min(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the maximum key.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns an iterator over entries within the specified range, in
    /// ascending key order.
    ///
    /// The range is specified using Rust's range syntax (`a..b`, `a..=b`,
    /// `a..`, `..b`, `..=b`, `..`). The walk is a full in-order traversal
    /// with a per-node bound test: the tree is unbalanced, so no shape
    /// guarantee would make pruning safe without extra bookkeeping.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualstore::store::TreeStore;
    ///
    /// let mut store = TreeStore::new();
    /// for key in [1, 2, 3, 4, 5] {
    ///     store.insert(key, key * 10);
    /// }
    ///
    /// let range: Vec<(&i32, &i32)> = store.range(2..=4).collect();
    /// assert_eq!(range.len(), 3); // 2, 3, 4
    /// ```
    pub fn range<R, Q>(&self, range: R) -> TreeStoreRangeIterator<'_, K, V>
    where
        R: RangeBounds<Q>,
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut entries = Vec::new();

        for (key, value) in self.iter() {
            let key_borrowed: &Q = key.borrow();

            let in_start = match range.start_bound() {
                Bound::Included(bound) => key_borrowed >= bound,
                Bound::Excluded(bound) => key_borrowed > bound,
                Bound::Unbounded => true,
            };

            let in_end = match range.end_bound() {
                Bound::Included(bound) => key_borrowed <= bound,
                Bound::Excluded(bound) => key_borrowed < bound,
                Bound::Unbounded => true,
            };

            if in_start && in_end {
                entries.push((key, value));
            }
        }

        TreeStoreRangeIterator {
            entries,
            current_index: 0,
        }
    }
}

// =============================================================================
// Collection Contract Implementation
// =============================================================================

impl<K: Ord, V> Collection<K, V> for TreeStore<K, V> {
    fn insert(&mut self, key: K, value: V) {
        TreeStore::insert(self, key, value);
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        TreeStore::remove(self, key)
    }

    fn find(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn find_range(&self, low: &K, high: &K) -> Vec<&K> {
        self.range(low..=high).map(|(key, _)| key).collect()
    }

    fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn sorted_keys(&self) -> Vec<&K> {
        // In-order traversal already yields ascending keys
        Collection::keys(self)
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

/// An iterator over the entries of a [`TreeStore`] in ascending key order.
pub struct TreeStoreIterator<'a, K, V> {
    entries: Vec<(&'a K, &'a V)>,
    current_index: usize,
}

impl<'a, K, V> Iterator for TreeStoreIterator<'a, K, V> {
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

impl<K, V> ExactSizeIterator for TreeStoreIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.entries.len().saturating_sub(self.current_index)
    }
}

/// A range iterator over the entries of a [`TreeStore`] in ascending key
/// order.
pub struct TreeStoreRangeIterator<'a, K, V> {
    entries: Vec<(&'a K, &'a V)>,
    current_index: usize,
}

impl<'a, K, V> Iterator for TreeStoreRangeIterator<'a, K, V> {
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

impl<K, V> ExactSizeIterator for TreeStoreRangeIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.entries.len().saturating_sub(self.current_index)
    }
}

/// An owning iterator over the entries of a [`TreeStore`] in ascending key
/// order.
pub struct TreeStoreIntoIterator<K, V> {
    /// In-order entries, reversed so `next` can pop from the back
    entries: Vec<(K, V)>,
}

impl<K, V> Iterator for TreeStoreIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.entries.len(), Some(self.entries.len()))
    }
}

impl<K, V> ExactSizeIterator for TreeStoreIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for TreeStore<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeStore<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeStore<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for TreeStore<K, V> {
    type Item = (K, V);
    type IntoIter = TreeStoreIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut entries = Vec::with_capacity(self.length);
        Self::drain_in_order(self.root, &mut entries);
        entries.reverse();
        TreeStoreIntoIterator { entries }
    }
}

impl<'a, K, V> IntoIterator for &'a TreeStore<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = TreeStoreIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeStore<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for TreeStore<K, V>
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
struct TreeStoreVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> TreeStoreVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for TreeStoreVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = TreeStore<K, V>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of key-value pairs")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut store = TreeStore::new();
        while let Some((key, value)) = access.next_element()? {
            store.insert(key, value);
        }
        Ok(store)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for TreeStore<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(TreeStoreVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
