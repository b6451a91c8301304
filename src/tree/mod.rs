/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The red-black balancing engine behind [`RedBlackTreeMap`](crate::RedBlackTreeMap).
//!
//! Nodes live in an arena and refer to each other by index.  Slot [`NIL`] is the single shared
//! sentinel leaf, so every live node always has exactly two children and the fixup code never
//! special-cases a missing child.  Both fixups are loops that walk `parent` links upwards.

mod node;

pub(crate) use node::{Color, NIL, Node, NodeId, Side};

use crate::compare::Comparator;
use crate::map::entry::Entry;
use crate::utils::iter_utils;
use alloc::vec::Vec;
use archery::{SharedPointer, SharedPointerKind};
use core::cmp::Ordering;
use core::mem;
use log::{debug, trace};

/// Outcome of a search-guided descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    Found(NodeId),
    /// The key is absent.  It belongs on the `side` sentinel of `parent` (or at the root when
    /// `parent` is `NIL`).
    Vacant { parent: NodeId, side: Side },
}

pub(crate) struct RedBlackTree<K, V, C, P>
where
    P: SharedPointerKind,
{
    nodes: Vec<Node<K, V, P>>,
    /// Vacant slots available for reuse.
    free: Vec<NodeId>,
    root: NodeId,
    size: usize,
    comparator: C,
}

impl<K, V, C, P> RedBlackTree<K, V, C, P>
where
    P: SharedPointerKind,
{
    pub(crate) fn new(comparator: C) -> RedBlackTree<K, V, C, P> {
        RedBlackTree::with_capacity(comparator, 0)
    }

    /// Creates an empty tree with room for `capacity` entries before the arena reallocates.
    pub(crate) fn with_capacity(comparator: C, capacity: usize) -> RedBlackTree<K, V, C, P> {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::sentinel());

        RedBlackTree { nodes, free: Vec::new(), root: NIL, size: 0, comparator }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub(crate) fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id].parent
    }

    #[inline]
    fn left(&self, id: NodeId) -> NodeId {
        self.nodes[id].left
    }

    #[inline]
    fn right(&self, id: NodeId) -> NodeId {
        self.nodes[id].right
    }

    #[inline]
    pub(crate) fn child(&self, id: NodeId, side: Side) -> NodeId {
        self.nodes[id].child(side)
    }

    #[inline]
    fn color(&self, id: NodeId) -> Color {
        self.nodes[id].color
    }

    #[inline]
    fn is_red(&self, id: NodeId) -> bool {
        self.nodes[id].color == Color::Red
    }

    #[inline]
    fn is_black(&self, id: NodeId) -> bool {
        self.nodes[id].color == Color::Black
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(id != NIL || color == Color::Black, "the sentinel must stay black");
        self.nodes[id].color = color;
    }

    #[inline]
    fn set_child(&mut self, parent: NodeId, side: Side, child: NodeId) {
        *self.nodes[parent].child_mut(side) = child;
    }

    /// The entry stored in a live node.
    #[inline]
    pub(crate) fn entry(&self, id: NodeId) -> &SharedPointer<Entry<K, V>, P> {
        match self.nodes[id].entry {
            Some(ref entry) => entry,
            None => unreachable!("node {id} is a sentinel leaf"),
        }
    }

    #[inline]
    fn entry_mut(&mut self, id: NodeId) -> &mut SharedPointer<Entry<K, V>, P> {
        match self.nodes[id].entry {
            Some(ref mut entry) => entry,
            None => unreachable!("node {id} is a sentinel leaf"),
        }
    }

    /// Which child of its parent `id` is.  Must not be called on the root.
    ///
    /// This also works for the sentinel during a removal fixup: its parent link is pointed at the
    /// node it hangs from, and in that situation its sibling is always a live node.
    #[inline]
    fn side_of(&self, id: NodeId) -> Side {
        if self.left(self.parent(id)) == id { Side::Left } else { Side::Right }
    }

    #[inline]
    fn sibling(&self, id: NodeId) -> NodeId {
        self.child(self.parent(id), self.side_of(id).opposite())
    }

    /// Makes `new` take the place of `old` under `parent` (or as the root).
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NIL {
            self.root = new;
        } else if self.left(parent) == old {
            self.nodes[parent].left = new;
        } else {
            debug_assert_eq!(self.right(parent), old);
            self.nodes[parent].right = new;
        }
    }

    fn alloc(&mut self, entry: SharedPointer<Entry<K, V>, P>, parent: NodeId) -> NodeId {
        let node = Node::new_red(entry, parent);

        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                if self.nodes.len() == self.nodes.capacity() {
                    debug!("growing node arena past {} slots", self.nodes.capacity());
                }

                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Returns the slot to the free list and hands back its entry.
    fn release(&mut self, id: NodeId) -> Option<SharedPointer<Entry<K, V>, P>> {
        debug_assert!(id != NIL && !self.nodes[id].is_leaf());

        let node = &mut self.nodes[id];
        let entry = node.entry.take();

        node.color = Color::Black;
        node.parent = NIL;
        node.left = NIL;
        node.right = NIL;

        self.free.push(id);

        entry
    }

    /// Walks from `from` as far as possible towards `side`.  Returns `NIL` for an empty subtree.
    pub(crate) fn extreme(&self, from: NodeId, side: Side) -> NodeId {
        let mut id = from;

        if id != NIL {
            while self.child(id, side) != NIL {
                id = self.child(id, side);
            }
        }

        id
    }

    pub(crate) fn first(&self) -> Option<&Entry<K, V>> {
        match self.extreme(self.root, Side::Left) {
            NIL => None,
            id => Some(&**self.entry(id)),
        }
    }

    pub(crate) fn last(&self) -> Option<&Entry<K, V>> {
        match self.extreme(self.root, Side::Right) {
            NIL => None,
            id => Some(&**self.entry(id)),
        }
    }

    /// Drops every entry.  The arena keeps its allocation.
    pub(crate) fn clear(&mut self) {
        debug!("clearing tree with {} entries", self.size);

        self.nodes.truncate(1);
        self.nodes[NIL] = Node::sentinel();
        self.free.clear();
        self.root = NIL;
        self.size = 0;
    }

    /// Rotates `id` down towards `toward`; its child on the other side takes its place.
    ///
    /// `toward == Side::Left` is a left rotation:
    ///
    /// ```text
    ///       │                          │
    ///     ┏━━━┓                      ┏━━━┓
    ///     ┃ x ┃                      ┃ y ┃
    ///     ┗━━━┛                      ┗━━━┛
    ///      ╱ ╲          ───▶          ╱ ╲
    ///     a  ┏━━━┓                 ┏━━━┓  c
    ///        ┃ y ┃                 ┃ x ┃
    ///        ┗━━━┛                 ┗━━━┛
    ///         ╱ ╲                   ╱ ╲
    ///        b   c                 a   b
    /// ```
    ///
    /// The in-order sequence is unchanged.  The child that moves up must be a live node.
    fn rotate(&mut self, id: NodeId, toward: Side) {
        let pivot = self.child(id, toward.opposite());
        debug_assert_ne!(id, NIL, "cannot rotate the sentinel");
        debug_assert_ne!(pivot, NIL, "cannot rotate a sentinel up");

        trace!("rotating node {id} {toward:?}");

        // The pivot's inner subtree changes hands first so that no subtree is ever unreferenced.
        let inner = self.child(pivot, toward);
        self.set_child(id, toward.opposite(), inner);
        if inner != NIL {
            self.nodes[inner].parent = id;
        }

        let parent = self.parent(id);
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, id, pivot);

        self.set_child(pivot, toward, id);
        self.nodes[id].parent = pivot;
    }

    /// Restores the invariants after `id` was linked in as a red node.
    fn insert_fixup(&mut self, mut id: NodeId) {
        loop {
            let parent = self.parent(id);

            if parent == NIL {
                // `id` is the root.
                self.set_color(id, Color::Black);
                return;
            }

            if self.is_black(parent) {
                return;
            }

            // A red parent is never the root, so the grandparent is live.
            let grandparent = self.parent(parent);
            let uncle = self.sibling(parent);

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);

                id = grandparent;
                continue;
            }

            let side = self.side_of(id);
            let parent_side = self.side_of(parent);

            if side == parent_side {
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate(grandparent, side.opposite());
            } else {
                self.set_color(id, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate(parent, parent_side);
                self.rotate(grandparent, side);
            }

            trace!("insert fixup resolved at node {grandparent}");

            return;
        }
    }

    /// Restores the black height after a black node was spliced out from above `id`.
    ///
    /// `id` is the node that took the removed node's place and may be the sentinel.
    fn remove_fixup(&mut self, mut id: NodeId) {
        while id != self.root && self.is_black(id) {
            let parent = self.parent(id);
            let side = self.side_of(id);
            let mut sibling = self.child(parent, side.opposite());

            if self.is_red(sibling) {
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);

                sibling = self.child(parent, side.opposite());
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());

            if self.is_black(near) && self.is_black(far) {
                self.set_color(sibling, Color::Red);

                id = parent;
                continue;
            }

            if self.is_black(far) {
                self.set_color(sibling, Color::Red);
                self.set_color(near, Color::Black);
                self.rotate(sibling, side.opposite());

                sibling = self.child(parent, side.opposite());
            }

            let far = self.child(sibling, side.opposite());

            self.set_color(sibling, self.color(parent));
            self.set_color(parent, Color::Black);
            self.set_color(far, Color::Black);
            self.rotate(parent, side);

            trace!("remove fixup resolved at node {parent}");

            id = self.root;
        }

        // Either the root or a red node absorbs the missing black.
        self.set_color(id, Color::Black);
    }

    /// Unlinks `id`, which must have at most one live child, and returns its entry.
    fn splice(&mut self, id: NodeId) -> Option<SharedPointer<Entry<K, V>, P>> {
        debug_assert!(self.left(id) == NIL || self.right(id) == NIL);

        let child = if self.left(id) == NIL { self.right(id) } else { self.left(id) };
        let parent = self.parent(id);
        let color = self.color(id);

        // Also done when `child` is the sentinel: the fixup needs to find the parent from there.
        self.nodes[child].parent = parent;
        self.replace_child(parent, id, child);

        let entry = self.release(id);
        self.size -= 1;

        if color == Color::Black {
            self.remove_fixup(child);
        }

        self.nodes[NIL].parent = NIL;

        entry
    }

    fn remove_node(&mut self, id: NodeId) -> Option<SharedPointer<Entry<K, V>, P>> {
        let target = if self.left(id) != NIL && self.right(id) != NIL {
            // The in-order predecessor has no right child.  Its entry moves into `id` and the
            // entry being removed leaves the tree with the predecessor's slot.
            let predecessor = self.extreme(self.left(id), Side::Right);
            let moved = self.nodes[predecessor].entry.take();
            let removed = mem::replace(&mut self.nodes[id].entry, moved);
            self.nodes[predecessor].entry = removed;

            predecessor
        } else {
            id
        };

        self.splice(target)
    }
}

impl<K, V, C, P> RedBlackTree<K, V, C, P>
where
    C: Comparator<K>,
    P: SharedPointerKind,
{
    fn search(&self, key: &K) -> Search {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut id = self.root;

        while id != NIL {
            side = match self.comparator.compare(key, &self.entry(id).key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Search::Found(id),
                Ordering::Greater => Side::Right,
            };
            parent = id;
            id = self.child(id, side);
        }

        Search::Vacant { parent, side }
    }

    pub(crate) fn find(&self, key: &K) -> Option<NodeId> {
        match self.search(key) {
            Search::Found(id) => Some(id),
            Search::Vacant { .. } => None,
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&Entry<K, V>> {
        self.find(key).map(|id| &**self.entry(id))
    }

    /// Inserts the entry and returns whether the key is new.  An existing entry with an equal key
    /// is overwritten without any structural change.
    pub(crate) fn insert(&mut self, key: K, value: V) -> bool {
        match self.search(&key) {
            Search::Found(id) => {
                *self.entry_mut(id) = SharedPointer::new(Entry::new(key, value));

                false
            }
            Search::Vacant { parent, side } => {
                let id = self.alloc(SharedPointer::new(Entry::new(key, value)), parent);

                if parent == NIL {
                    self.root = id;
                } else {
                    self.set_child(parent, side, id);
                }

                self.size += 1;
                self.insert_fixup(id);

                true
            }
        }
    }

    /// Overwrites the entry with an equal key.  Returns `false`, and leaves the tree untouched, if
    /// there is no such entry.
    pub(crate) fn replace(&mut self, key: K, value: V) -> bool {
        match self.find(&key) {
            Some(id) => {
                *self.entry_mut(id) = SharedPointer::new(Entry::new(key, value));

                true
            }
            None => false,
        }
    }

    /// Removes the entry with the given key and returns it.
    pub(crate) fn remove(&mut self, key: &K) -> Option<SharedPointer<Entry<K, V>, P>> {
        let id = self.find(key)?;

        self.remove_node(id)
    }
}

impl<K, V, C, P> RedBlackTree<K, V, C, P>
where
    K: Clone,
    V: Clone,
    C: Comparator<K>,
    P: SharedPointerKind,
{
    /// Mutable access to a stored value.  The entry is copied first if a snapshot shares it.
    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find(key)?;

        Some(&mut SharedPointer::make_mut(self.entry_mut(id)).value)
    }
}

impl<K, V, C, P> Clone for RedBlackTree<K, V, C, P>
where
    C: Clone,
    P: SharedPointerKind,
{
    fn clone(&self) -> RedBlackTree<K, V, C, P> {
        RedBlackTree {
            nodes: self.nodes.clone(),
            free: self.free.clone(),
            root: self.root,
            size: self.size,
            comparator: self.comparator.clone(),
        }
    }
}

/// In-order traversal over the entries of a [`RedBlackTreeMap`](crate::RedBlackTreeMap).
///
/// The iterator keeps an explicit stack of the nodes still to visit, so it is pull-based and can
/// be dropped at any point.  It borrows the tree, which rules out mutation while it is alive.
pub struct IterPtr<'a, K, V, C, P>
where
    P: SharedPointerKind,
{
    tree: &'a RedBlackTree<K, V, C, P>,

    stack_forward: Option<Stack>,
    stack_backward: Option<Stack>,

    left_index: usize,  // inclusive
    right_index: usize, // exclusive
}

// This is a stack for navigating through the tree.  It can be used to go either forwards or
// backwards, but not both: when you call `dig` or `advance`, you must use the same value of
// `backwards` for the entire lifetime of this stack.
//
// The current node is at the top of the stack.  Going forwards, the rest of the stack holds those
// ancestors of the current node that contain it in their left subtree, so keys increase from the
// top of the stack to the bottom.
#[derive(Debug, Clone)]
struct Stack {
    stack: Vec<NodeId>,
}

impl Stack {
    fn new(size: usize) -> Stack {
        Stack { stack: Vec::with_capacity(iter_utils::conservative_height(size) + 1) }
    }

    #[inline]
    fn current(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    fn dig<K, V, C, P>(&mut self, tree: &RedBlackTree<K, V, C, P>, backwards: bool)
    where
        P: SharedPointerKind,
    {
        let side = if backwards { Side::Right } else { Side::Left };

        while let Some(id) = self.current() {
            match tree.child(id, side) {
                NIL => break,
                child => self.stack.push(child),
            }
        }
    }

    fn advance<K, V, C, P>(&mut self, tree: &RedBlackTree<K, V, C, P>, backwards: bool)
    where
        P: SharedPointerKind,
    {
        if let Some(id) = self.stack.pop() {
            let side = if backwards { Side::Left } else { Side::Right };

            match tree.child(id, side) {
                NIL => (),
                child => {
                    self.stack.push(child);
                    self.dig(tree, backwards);
                }
            }
        }
    }
}

impl<'a, K, V, C, P> IterPtr<'a, K, V, C, P>
where
    P: SharedPointerKind,
{
    pub(crate) fn new(tree: &'a RedBlackTree<K, V, C, P>) -> IterPtr<'a, K, V, C, P> {
        IterPtr {
            tree,

            stack_forward: None,
            stack_backward: None,

            left_index: 0,
            right_index: tree.len(),
        }
    }

    fn init_if_needed(&mut self, backwards: bool) {
        let stack_field =
            if backwards { &mut self.stack_backward } else { &mut self.stack_forward };

        if stack_field.is_none() {
            let mut stack = Stack::new(self.tree.len());

            if self.tree.root() != NIL {
                stack.stack.push(self.tree.root());
                stack.dig(self.tree, backwards);
            }

            *stack_field = Some(stack);
        }
    }

    #[inline]
    fn non_empty(&self) -> bool {
        self.left_index < self.right_index
    }

    fn step(&mut self, backwards: bool) -> Option<&'a SharedPointer<Entry<K, V>, P>> {
        self.init_if_needed(backwards);

        if !self.non_empty() {
            return None;
        }

        let tree = self.tree;
        let stack =
            if backwards { self.stack_backward.as_mut() } else { self.stack_forward.as_mut() }?;
        let current = stack.current()?;

        stack.advance(tree, backwards);

        if backwards {
            self.right_index -= 1;
        } else {
            self.left_index += 1;
        }

        Some(tree.entry(current))
    }
}

impl<'a, K, V, C, P> Iterator for IterPtr<'a, K, V, C, P>
where
    P: SharedPointerKind,
{
    type Item = &'a SharedPointer<Entry<K, V>, P>;

    fn next(&mut self) -> Option<&'a SharedPointer<Entry<K, V>, P>> {
        self.step(false)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.right_index - self.left_index;

        (len, Some(len))
    }
}

impl<K, V, C, P> DoubleEndedIterator for IterPtr<'_, K, V, C, P>
where
    P: SharedPointerKind,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step(true)
    }
}

impl<K, V, C, P> ExactSizeIterator for IterPtr<'_, K, V, C, P> where P: SharedPointerKind {}

impl<K, V, C, P> Clone for IterPtr<'_, K, V, C, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Self {
        IterPtr {
            tree: self.tree,

            stack_forward: self.stack_forward.clone(),
            stack_backward: self.stack_backward.clone(),

            left_index: self.left_index,
            right_index: self.right_index,
        }
    }
}
