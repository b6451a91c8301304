/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Key orderings for [`RedBlackTreeMap`](crate::RedBlackTreeMap).
//!
//! The map never compares keys directly: every descent goes through the [`Comparator`] chosen
//! when the map was built.  Any closure `Fn(&K, &K) -> Ordering` is a comparator, so a custom
//! order can be injected without declaring a type:
//!
//! ```
//! # use rbmap::*;
//! # use core::cmp::Ordering;
//! #
//! let mut map = RedBlackTreeMap::with_comparator(|a: &&str, b: &&str| {
//!     a.len().cmp(&b.len()).then_with(|| a.cmp(b))
//! });
//!
//! map.insert("ccc", 3).unwrap();
//! map.insert("a", 1).unwrap();
//! map.insert("bb", 2).unwrap();
//!
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
//! ```

use core::cmp::Ordering;

/// A three-way comparison over keys.
///
/// The comparison must be a total order and must stay the same for the whole lifetime of the
/// map.  Changing it while the map holds entries leaves the map in an unspecified (but memory
/// safe) state.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

/// Orders keys by the reverse of their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: Ord + ?Sized> Comparator<K> for Reverse {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
