//! # dualstore
//!
//! Generic key-value collections with interchangeable backing stores.
//!
//! ## Overview
//!
//! This library exposes one abstract contract, [`Collection`](store::Collection),
//! satisfied by two independent backing stores:
//!
//! - [`TreeStore`](store::TreeStore): an unbalanced binary search tree with
//!   ordered key enumeration and ascending range queries
//! - [`ChainStore`](store::ChainStore): a separate-chaining hash table with
//!   load-factor-driven resizing and amortized O(1) point access
//!
//! Both stores share the same permissive duplicate-key policy: `insert` never
//! overwrites, equal keys coexist as distinct entries, and point lookups
//! return the first match. Cloning either store produces a fully detached
//! structure sharing no storage with the source.
//!
//! ## Feature Flags
//!
//! - `serde`: serialization support for both stores
//! - `fxhash`: hash keys with `rustc-hash` instead of the default hasher
//! - `ahash`: hash keys with `ahash` instead of the default hasher
//!
//! ## Example
//!
//! ```rust
//! use dualstore::prelude::*;
//!
//! fn load<C: Collection<i32, String>>(store: &mut C) {
//!     store.insert(2, "two".to_string());
//!     store.insert(1, "one".to_string());
//!     store.insert(3, "three".to_string());
//! }
//!
//! let mut tree = TreeStore::new();
//! let mut table = ChainStore::new();
//! load(&mut tree);
//! load(&mut table);
//!
//! assert_eq!(tree.sorted_keys(), table.sorted_keys());
//! assert_eq!(Collection::find(&tree, &2), Some(&"two".to_string()));
//! assert_eq!(Collection::find(&table, &2), Some(&"two".to_string()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the contract trait and both backing stores.
///
/// # Usage
///
/// ```rust
/// use dualstore::prelude::*;
/// ```
pub mod prelude {
    pub use crate::store::*;
}

pub mod store;
