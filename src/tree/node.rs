/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Arena nodes: each slot holds an optional shared entry, a color and the indices of its parent
//! and children, with slot [`NIL`] reserved for the sentinel leaf.

use crate::map::entry::Entry;
use archery::{SharedPointer, SharedPointerKind};

/// Index of a node inside the tree arena.
pub(crate) type NodeId = usize;

/// The shared sentinel leaf.  Slot `0` of every arena is reserved for it: it is always black and
/// never holds an entry.
///
/// Its `parent` field is scratch space used while a removal is being repaired, so nothing outside
/// of the removal path may read it.
pub(crate) const NIL: NodeId = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Node<K, V, P>
where
    P: SharedPointerKind,
{
    /// `None` for the sentinel and for slots on the free list.
    pub(crate) entry: Option<SharedPointer<Entry<K, V>, P>>,
    pub(crate) color: Color,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl<K, V, P> Node<K, V, P>
where
    P: SharedPointerKind,
{
    pub(crate) fn sentinel() -> Node<K, V, P> {
        Node { entry: None, color: Color::Black, parent: NIL, left: NIL, right: NIL }
    }

    /// A fresh red node hanging from `parent`, with two sentinel children.
    pub(crate) fn new_red(entry: SharedPointer<Entry<K, V>, P>, parent: NodeId) -> Node<K, V, P> {
        Node { entry: Some(entry), color: Color::Red, parent, left: NIL, right: NIL }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, side: Side) -> &mut NodeId {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Whether this is a sentinel leaf (or a vacant slot).
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.entry.is_none()
    }
}

impl<K, V, P> Clone for Node<K, V, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Node<K, V, P> {
        Node {
            entry: self.entry.clone(),
            color: self.color,
            parent: self.parent,
            left: self.left,
            right: self.right,
        }
    }
}
