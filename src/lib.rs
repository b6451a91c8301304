/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]
#![no_std]

// Note: Keep this in sync with `README.md`.  Note that the doc links must be removed.
//! # Red-black tree ordered map
//!
//! An in-memory map from ordered keys to values, backed by a
//! [red-black tree](https://en.wikipedia.org/wiki/Red-Black_tree).  Lookups, insertions and
//! removals are all logarithmic in the worst case, and iteration visits the entries in key order.
//!
//! # Example
//!
//! ```rust
//! use rbmap::{Error, RedBlackTreeMap};
//!
//! let mut map = RedBlackTreeMap::new();
//!
//! map.insert(3, "three")?;
//! map.insert(1, "one")?;
//! map.insert(2, "two")?;
//!
//! assert_eq!(map.insert(2, "deux"), Err(Error::AlreadyExists));
//! assert_eq!(map.get(&2), Some(&"deux"));
//!
//! assert!(map.update(1, "un"));
//! assert!(!map.update(4, "quatre"));
//!
//! map.remove(&3)?;
//! assert_eq!(map.remove(&3), Err(Error::NotFound));
//!
//! assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &"un"), (&2, &"deux")]);
//! assert_eq!(map.size(), 2);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Key order
//!
//! Keys are compared with their [`Ord`] implementation unless a [`Comparator`] is given when the
//! map is created.  See the [`compare`] module.
//!
//! # Traversal
//!
//! [`RedBlackTreeMap::iter()`] is a lazy, double-ended iterator that borrows the map, so the map
//! cannot change while it is in use.  [`RedBlackTreeMap::snapshot()`] captures the current entries
//! for traversal after the map has been changed.
//!
//! # Thread safety
//!
//! [`RedBlackTreeMapSync`] stores its entries behind atomic reference counts and can be shared
//! between threads.  It is still mutated through `&mut self`, so concurrent writers need a lock
//! around it.
//!
//! # `no_std` support
//!
//! This crate supports `no_std`.  To enable that you need to disable the default feature `std`:
//!
//! ```toml
//! [dependencies]
//! rbmap = { version = "*", default-features = false }
//! ```
//!
//! # Logging
//!
//! Rebalancing is reported through the [`log`](https://docs.rs/log) facade: arena growth and
//! clearing at `debug` level, rotations and fixups at `trace` level.

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod compare;
pub mod error;
pub mod map;

mod tree;
mod utils;

pub use crate::compare::{Comparator, Natural, Reverse};
pub use crate::error::{Error, Result};
pub use crate::map::red_black_tree_map::{RedBlackTreeMap, RedBlackTreeMapSync, Snapshot};
