/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use super::entry::Entry;
use crate::compare::{Comparator, Natural};
use crate::error::{Error, Result};
use crate::tree::RedBlackTree;
use alloc::vec::Vec;
use archery::{ArcTK, RcK, SharedPointer, SharedPointerKind};
use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::Index;
use core::slice;

pub use crate::tree::IterPtr;

pub type Iter<'a, K, V, C, P> =
    iter::Map<IterPtr<'a, K, V, C, P>, fn(&'a SharedPointer<Entry<K, V>, P>) -> (&'a K, &'a V)>;
pub type IterKeys<'a, K, V, C, P> = iter::Map<Iter<'a, K, V, C, P>, fn((&'a K, &V)) -> &'a K>;
pub type IterValues<'a, K, V, C, P> = iter::Map<Iter<'a, K, V, C, P>, fn((&K, &'a V)) -> &'a V>;
pub type SnapshotIter<'a, K, V, P> = iter::Map<
    slice::Iter<'a, SharedPointer<Entry<K, V>, P>>,
    fn(&'a SharedPointer<Entry<K, V>, P>) -> (&'a K, &'a V),
>;

/// Creates a [`RedBlackTreeMap`](crate::RedBlackTreeMap) containing the given arguments.  Later
/// pairs overwrite earlier pairs with an equal key:
///
/// ```
/// # use rbmap::*;
/// #
/// let mut m = RedBlackTreeMap::new();
/// m.insert(1, "one").unwrap();
/// m.insert(2, "two").unwrap();
/// m.insert(3, "three").unwrap();
///
/// assert_eq!(rbt_map![1 => "one", 2 => "two", 3 => "three"], m);
/// ```
#[macro_export]
macro_rules! rbt_map {
    ($($k:expr => $v:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut m = $crate::RedBlackTreeMap::new();
            $(
                let _ = m.insert($k, $v);
            )*
            m
        }
    };
}

/// Creates a [`RedBlackTreeMapSync`](crate::RedBlackTreeMapSync) containing the given arguments:
///
/// ```
/// # use rbmap::*;
/// #
/// let mut m = RedBlackTreeMap::new_sync();
/// m.insert(1, "one").unwrap();
/// m.insert(2, "two").unwrap();
///
/// assert_eq!(rbt_map_sync![1 => "one", 2 => "two"], m);
/// ```
#[macro_export]
macro_rules! rbt_map_sync {
    ($($k:expr => $v:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut m = $crate::RedBlackTreeMap::new_sync();
            $(
                let _ = m.insert($k, $v);
            )*
            m
        }
    };
}

/// An ordered map implemented with a [red-black tree](https://en.wikipedia.org/wiki/Red-Black_tree).
///
/// Keys are ordered by the map's [`Comparator`], which is [`Natural`] (the key's [`Ord`]) unless
/// another one is given at construction.
///
/// # Complexity
///
/// Let *n* be the number of elements in the map.
///
/// ## Temporal complexity
///
/// | Operation                  | Best case | Average   | Worst case  |
/// |:-------------------------- | ---------:| ---------:| -----------:|
/// | `new()`                    |      Θ(1) |      Θ(1) |        Θ(1) |
/// | `insert()`                 |      Θ(1) | Θ(log(n)) |   Θ(log(n)) |
/// | `remove()`                 |      Θ(1) | Θ(log(n)) |   Θ(log(n)) |
/// | `update()`                 |      Θ(1) | Θ(log(n)) |   Θ(log(n)) |
/// | `get()`                    |      Θ(1) | Θ(log(n)) |   Θ(log(n)) |
/// | `contains_key()`           |      Θ(1) | Θ(log(n)) |   Θ(log(n)) |
/// | `size()`                   |      Θ(1) |      Θ(1) |        Θ(1) |
/// | `clone()`                  |      Θ(n) |      Θ(n) |        Θ(n) |
/// | `snapshot()`               |      Θ(n) |      Θ(n) |        Θ(n) |
/// | iterator creation          |      Θ(1) |      Θ(1) |        Θ(1) |
/// | iterator step              |      Θ(1) |      Θ(1) |   Θ(log(n)) |
/// | iterator full              |      Θ(n) |      Θ(n) |        Θ(n) |
///
/// # Implementation details
///
/// Nodes are kept in an arena and linked by index, with parent links.  A single shared black
/// sentinel stands for every empty leaf.  Insertion and deletion follow the classic bottom-up
/// fixups (see "Introduction to Algorithms" by Cormen et al., chapter 13), and a node with two
/// children is removed by moving its in-order predecessor's entry into it.
///
/// Entries are reference counted with the pointer kind `P`, so a [`Snapshot`] or a `clone()` of
/// the map shares them instead of copying keys and values.
///
/// # Concurrency
///
/// All operations run to completion on the calling thread.  Mutation requires `&mut self`, so
/// the map cannot be changed while an iterator borrows it.  Use [`RedBlackTreeMapSync`] to share
/// a map between threads, and wrap it in a lock if more than one thread has to mutate it.
pub struct RedBlackTreeMap<K, V, C = Natural, P = RcK>
where
    P: SharedPointerKind,
{
    tree: RedBlackTree<K, V, C, P>,
}

pub type RedBlackTreeMapSync<K, V, C = Natural> = RedBlackTreeMap<K, V, C, ArcTK>;

impl<K, V> RedBlackTreeMap<K, V>
where
    K: Ord,
{
    #[must_use]
    pub fn new() -> RedBlackTreeMap<K, V> {
        RedBlackTreeMap::new_with_ptr_kind()
    }

    /// Creates an empty map whose arena holds `capacity` entries before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> RedBlackTreeMap<K, V> {
        RedBlackTreeMap { tree: RedBlackTree::with_capacity(Natural, capacity) }
    }
}

impl<K, V> RedBlackTreeMapSync<K, V>
where
    K: Ord,
{
    #[must_use]
    pub fn new_sync() -> RedBlackTreeMapSync<K, V> {
        RedBlackTreeMap::new_with_ptr_kind()
    }
}

impl<K, V, C> RedBlackTreeMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Creates an empty map ordered by `comparator`.
    #[must_use]
    pub fn with_comparator(comparator: C) -> RedBlackTreeMap<K, V, C> {
        RedBlackTreeMap::with_comparator_and_ptr_kind(comparator)
    }
}

impl<K, V, P> RedBlackTreeMap<K, V, Natural, P>
where
    K: Ord,
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new_with_ptr_kind() -> RedBlackTreeMap<K, V, Natural, P> {
        RedBlackTreeMap::with_comparator_and_ptr_kind(Natural)
    }
}

impl<K, V, C, P> RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
{
    #[must_use]
    pub fn with_comparator_and_ptr_kind(comparator: C) -> RedBlackTreeMap<K, V, C, P> {
        RedBlackTreeMap { tree: RedBlackTree::new(comparator) }
    }

    #[must_use]
    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key).map(|e| &e.value)
    }

    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.get(key).map(|e| (&e.key, &e.value))
    }

    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|e| (&e.key, &e.value))
    }

    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|e| (&e.key, &e.value))
    }

    /// Inserts `value` under `key`.
    ///
    /// If the key is already present its value is overwritten all the same, and
    /// [`Error::AlreadyExists`] reports that no new entry was created.
    ///
    /// ```
    /// # use rbmap::*;
    /// #
    /// let mut map = RedBlackTreeMap::new();
    ///
    /// assert_eq!(map.insert("a", 1), Ok(()));
    /// assert_eq!(map.insert("a", 2), Err(Error::AlreadyExists));
    /// assert_eq!(map.get(&"a"), Some(&2));
    /// assert_eq!(map.size(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if self.tree.insert(key, value) { Ok(()) } else { Err(Error::AlreadyExists) }
    }

    /// Removes the entry with the given key, or reports [`Error::NotFound`].
    pub fn remove(&mut self, key: &K) -> Result<()> {
        match self.tree.remove(key) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound),
        }
    }

    /// Overwrites the value stored under `key`.  Returns `false`, without inserting anything, if
    /// the key is absent.
    pub fn update(&mut self, key: K, value: V) -> bool {
        self.tree.replace(key, value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Iterates over the entries in ascending key order.
    ///
    /// The iterator is lazy and can be abandoned at any point.  Calling `iter()` again (or
    /// cloning an iterator) starts a fresh traversal.
    pub fn iter(&self) -> Iter<'_, K, V, C, P> {
        self.iter_ptr().map(|e| (&e.key, &e.value))
    }

    fn iter_ptr(&self) -> IterPtr<'_, K, V, C, P> {
        IterPtr::new(&self.tree)
    }

    pub fn keys(&self) -> IterKeys<'_, K, V, C, P> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> IterValues<'_, K, V, C, P> {
        self.iter().map(|(_, v)| v)
    }

    /// Captures the current entries, in order, independently of the map.
    ///
    /// The snapshot shares the entries with the map, so taking one does not copy keys or values,
    /// and it is unaffected by later changes to the map.
    ///
    /// ```
    /// # use rbmap::*;
    /// #
    /// let mut map = rbt_map![1 => "one", 2 => "two"];
    /// let snapshot = map.snapshot();
    ///
    /// map.remove(&1).unwrap();
    /// map.update(2, "dois");
    ///
    /// assert_eq!(snapshot.iter().collect::<Vec<_>>(), [(&1, &"one"), (&2, &"two")]);
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&2, &"dois")]);
    /// ```
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<K, V, P> {
        Snapshot { entries: self.iter_ptr().cloned().collect() }
    }
}

impl<K, V, C, P> RedBlackTreeMap<K, V, C, P>
where
    K: Clone,
    V: Clone,
    C: Comparator<K>,
    P: SharedPointerKind,
{
    /// Mutable access to the value stored under `key`.  An entry still shared with a snapshot is
    /// copied before it is handed out.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }
}

impl<K, V, C, P> Index<&K> for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C, P> Clone for RedBlackTreeMap<K, V, C, P>
where
    C: Clone,
    P: SharedPointerKind,
{
    fn clone(&self) -> RedBlackTreeMap<K, V, C, P> {
        RedBlackTreeMap { tree: self.tree.clone() }
    }
}

impl<K, V, C, P> Default for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K> + Default,
    P: SharedPointerKind,
{
    fn default() -> RedBlackTreeMap<K, V, C, P> {
        RedBlackTreeMap::with_comparator_and_ptr_kind(C::default())
    }
}

impl<K, V: PartialEq, C, P, PO> PartialEq<RedBlackTreeMap<K, V, C, PO>>
    for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn eq(&self, other: &RedBlackTreeMap<K, V, C, PO>) -> bool {
        self.size() == other.size()
            && self.iter().all(|(key, value)| other.get(key).is_some_and(|v| *value == *v))
    }
}

impl<K, V: Eq, C, P> Eq for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
{
}

impl<K: PartialOrd, V: PartialOrd, C, P, PO> PartialOrd<RedBlackTreeMap<K, V, C, PO>>
    for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
    PO: SharedPointerKind,
{
    fn partial_cmp(&self, other: &RedBlackTreeMap<K, V, C, PO>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C, P> Ord for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
{
    fn cmp(&self, other: &RedBlackTreeMap<K, V, C, P>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash, V: Hash, C, P> Hash for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Add the hash of length so that if two collections are added one after the other it
        // doesn't hash to the same thing as a single collection with the same elements in the same
        // order.
        self.size().hash(state);

        for e in self {
            e.hash(state);
        }
    }
}

impl<K, V, C, P> Display for RedBlackTreeMap<K, V, C, P>
where
    K: Display,
    V: Display,
    C: Comparator<K>,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        fmt.write_str("{")?;

        for (k, v) in self.iter() {
            if !first {
                fmt.write_str(", ")?;
            }
            k.fmt(fmt)?;
            fmt.write_str(": ")?;
            v.fmt(fmt)?;
            first = false;
        }

        fmt.write_str("}")
    }
}

impl<K, V, C, P> Debug for RedBlackTreeMap<K, V, C, P>
where
    K: Debug,
    V: Debug,
    C: Comparator<K>,
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C, P> IntoIterator for &'a RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C, P>;

    fn into_iter(self) -> Iter<'a, K, V, C, P> {
        self.iter()
    }
}

impl<K, V, C, P> FromIterator<(K, V)> for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K> + Default,
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(into_iter: I) -> RedBlackTreeMap<K, V, C, P> {
        let mut map = RedBlackTreeMap::default();

        map.extend(into_iter);

        map
    }
}

impl<K, V, C, P> Extend<(K, V)> for RedBlackTreeMap<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
{
    /// Pairs with a key already in the map overwrite the stored value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, into_iter: I) {
        for (k, v) in into_iter {
            self.tree.insert(k, v);
        }
    }
}

/// An ordered copy of the entries of a [`RedBlackTreeMap`], taken with
/// [`snapshot()`](RedBlackTreeMap::snapshot).
///
/// The entries are shared with the map they came from, but the snapshot never observes changes
/// made to the map afterwards.  It can be traversed any number of times.
pub struct Snapshot<K, V, P = RcK>
where
    P: SharedPointerKind,
{
    entries: Vec<SharedPointer<Entry<K, V>, P>>,
}

impl<K, V, P> Snapshot<K, V, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> SnapshotIter<'_, K, V, P> {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }
}

impl<K, V, P> Clone for Snapshot<K, V, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Snapshot<K, V, P> {
        Snapshot { entries: self.entries.clone() }
    }
}

impl<K: Debug, V: Debug, P> Debug for Snapshot<K, V, P>
where
    P: SharedPointerKind,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, P> IntoIterator for &'a Snapshot<K, V, P>
where
    P: SharedPointerKind,
{
    type Item = (&'a K, &'a V);
    type IntoIter = SnapshotIter<'a, K, V, P>;

    fn into_iter(self) -> SnapshotIter<'a, K, V, P> {
        self.iter()
    }
}
