//! The beach line: the left-to-right sequence of parabolic arcs between the
//! swept and unswept parts of the plane.
//!
//! Arcs live in an arena and are ordered by a red-black tree that is also
//! threaded with `prev`/`next` links, so neighbour access is O(1) and
//! location, insertion and removal are O(log n).  Slot 0 of the arena is
//! the tree's black sentinel (nil).  Slots are never reused, so an `ArcId`
//! held by a stale event can never refer to a different, live arc.

mod balance;
mod locate;

use std::fmt;

use planar_dcel::HalfEdgeId;

use crate::diagram::SiteId;
use crate::event::EventId;

/// Handle to an arc in the beach line arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(pub usize);

impl ArcId {
    /// The sentinel slot.
    const NIL: ArcId = ArcId(0);

    #[inline] fn is_nil(self) -> bool { self == Self::NIL }

    #[inline] fn some(self) -> Option<ArcId> { if self.is_nil() { None } else { Some(self) } }
}

impl fmt::Display for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArcId({})", self.0)
    }
}

/// The part of one site's parabola currently visible on the beach line.
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    pub site: SiteId,
    /// Half-edge traced by this arc's left breakpoint, once it has one.
    pub left_half_edge: Option<HalfEdgeId>,
    /// Half-edge traced by this arc's right breakpoint, once it has one.
    pub right_half_edge: Option<HalfEdgeId>,
    /// Pending circle event predicting this arc's collapse.
    pub event: Option<EventId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color { Red, Black }

#[derive(Clone, Debug)]
struct Node {
    arc:    Arc,
    parent: ArcId,
    left:   ArcId,
    right:  ArcId,
    prev:   ArcId,
    next:   ArcId,
    color:  Color,
    live:   bool,
}

impl Node {
    fn detached(arc: Arc, color: Color) -> Self {
        Self {
            arc,
            parent: ArcId::NIL, left: ArcId::NIL, right: ArcId::NIL,
            prev: ArcId::NIL, next: ArcId::NIL,
            color, live: false,
        }
    }
}

/// Ordered, mutable sequence of arcs.
#[derive(Clone, Debug)]
pub struct BeachLine {
    nodes: Vec<Node>,
    root:  ArcId,
    len:   usize,
}

impl Default for BeachLine {
    fn default() -> Self { Self::new() }
}

impl BeachLine {
    pub fn new() -> Self {
        // The sentinel's payload is never read.
        let nil = Arc { site: SiteId(usize::MAX), left_half_edge: None, right_half_edge: None, event: None };
        Self { nodes: vec![Node::detached(nil, Color::Black)], root: ArcId::NIL, len: 0 }
    }

    /// Number of live arcs.
    #[inline] pub fn len(&self) -> usize { self.len }

    #[inline] pub fn is_empty(&self) -> bool { self.root.is_nil() }

    /// Allocate a detached arc for `site`.  It joins the beach line through
    /// `set_root`, `replace`, `insert_before` or `insert_after`.
    pub fn create_arc(&mut self, site: SiteId) -> ArcId {
        let id = ArcId(self.nodes.len());
        let arc = Arc { site, left_half_edge: None, right_half_edge: None, event: None };
        self.nodes.push(Node::detached(arc, Color::Red));
        id
    }

    /// The arc stored at `id`, live or not.
    #[inline] pub fn arc(&self, id: ArcId) -> &Arc { &self.nodes[id.0].arc }

    #[inline] pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc { &mut self.nodes[id.0].arc }

    /// Returns `true` while `id` is part of the beach line.
    #[inline] pub fn is_live(&self, id: ArcId) -> bool { self.nodes[id.0].live }

    /// Left neighbour of `id`.
    #[inline] pub fn prev(&self, id: ArcId) -> Option<ArcId> { self.nodes[id.0].prev.some() }

    /// Right neighbour of `id`.
    #[inline] pub fn next(&self, id: ArcId) -> Option<ArcId> { self.nodes[id.0].next.some() }

    /// Install the very first arc.
    pub fn set_root(&mut self, id: ArcId) {
        assert!(self.is_empty(), "set_root on a non-empty beach line");
        let node = &mut self.nodes[id.0];
        node.parent = ArcId::NIL;
        node.color = Color::Black;
        node.live = true;
        self.root = id;
        self.len = 1;
    }

    /// The leftmost arc, if any.
    pub fn leftmost(&self) -> Option<ArcId> {
        if self.root.is_nil() { return None }
        Some(self.minimum(self.root))
    }

    /// Iterate over live arcs from left to right.
    pub fn iter(&self) -> Arcs<'_> {
        Arcs { line: self, current: self.leftmost() }
    }

    /// Left-to-right snapshot of the live arcs.
    pub fn inorder(&self) -> Vec<ArcId> { self.iter().collect() }

    // -----------------------------------------------------------------------
    // Structural edits
    // -----------------------------------------------------------------------

    /// Put `new` in the place of `old`, which leaves the beach line.
    pub fn replace(&mut self, old: ArcId, new: ArcId) {
        debug_assert!(self.is_live(old) && !self.is_live(new));
        self.transplant(old, new);

        let (left, right, prev, next, color) = {
            let o = &self.nodes[old.0];
            (o.left, o.right, o.prev, o.next, o.color)
        };
        let n = &mut self.nodes[new.0];
        n.left = left;
        n.right = right;
        n.prev = prev;
        n.next = next;
        n.color = color;
        n.live = true;

        if !left.is_nil()  { self.nodes[left.0].parent = new; }
        if !right.is_nil() { self.nodes[right.0].parent = new; }
        if !prev.is_nil()  { self.nodes[prev.0].next = new; }
        if !next.is_nil()  { self.nodes[next.0].prev = new; }
        self.nodes[old.0].live = false;
    }

    /// Insert `arc` immediately to the left of `pivot`.
    pub fn insert_before(&mut self, pivot: ArcId, arc: ArcId) {
        debug_assert!(self.is_live(pivot) && !self.is_live(arc));
        let prev = self.nodes[pivot.0].prev;

        // The in-order predecessor of a node with a left subtree has no
        // right child, so the slot is always free.
        if self.nodes[pivot.0].left.is_nil() {
            self.nodes[pivot.0].left = arc;
            self.nodes[arc.0].parent = pivot;
        } else {
            self.nodes[prev.0].right = arc;
            self.nodes[arc.0].parent = prev;
        }

        let node = &mut self.nodes[arc.0];
        node.left = ArcId::NIL;
        node.right = ArcId::NIL;
        node.color = Color::Red;
        node.live = true;
        node.prev = prev;
        node.next = pivot;
        if !prev.is_nil() { self.nodes[prev.0].next = arc; }
        self.nodes[pivot.0].prev = arc;

        self.len += 1;
        self.insert_fixup(arc);
    }

    /// Insert `arc` immediately to the right of `pivot`.
    pub fn insert_after(&mut self, pivot: ArcId, arc: ArcId) {
        debug_assert!(self.is_live(pivot) && !self.is_live(arc));
        let next = self.nodes[pivot.0].next;

        if self.nodes[pivot.0].right.is_nil() {
            self.nodes[pivot.0].right = arc;
            self.nodes[arc.0].parent = pivot;
        } else {
            self.nodes[next.0].left = arc;
            self.nodes[arc.0].parent = next;
        }

        let node = &mut self.nodes[arc.0];
        node.left = ArcId::NIL;
        node.right = ArcId::NIL;
        node.color = Color::Red;
        node.live = true;
        node.prev = pivot;
        node.next = next;
        if !next.is_nil() { self.nodes[next.0].prev = arc; }
        self.nodes[pivot.0].next = arc;

        self.len += 1;
        self.insert_fixup(arc);
    }

    /// Remove `z` from the beach line.  Its payload and its last neighbour
    /// links stay readable through the arena.
    pub fn delete(&mut self, z: ArcId) {
        debug_assert!(self.is_live(z));
        let mut y = z;
        let mut y_color = self.nodes[y.0].color;
        let x;

        let (z_left, z_right) = (self.nodes[z.0].left, self.nodes[z.0].right);
        if z_left.is_nil() {
            x = z_right;
            self.transplant(z, z_right);
        } else if z_right.is_nil() {
            x = z_left;
            self.transplant(z, z_left);
        } else {
            y = self.minimum(z_right);
            y_color = self.nodes[y.0].color;
            x = self.nodes[y.0].right;
            if self.nodes[y.0].parent == z {
                // x may be the sentinel; the fixup walks up from its parent.
                self.nodes[x.0].parent = y;
            } else {
                self.transplant(y, x);
                self.nodes[y.0].right = z_right;
                self.nodes[z_right.0].parent = y;
            }
            self.transplant(z, y);
            let z_left = self.nodes[z.0].left;
            self.nodes[y.0].left = z_left;
            self.nodes[z_left.0].parent = y;
            self.nodes[y.0].color = self.nodes[z.0].color;
        }
        if y_color == Color::Black {
            self.delete_fixup(x);
        }

        let (prev, next) = (self.nodes[z.0].prev, self.nodes[z.0].next);
        if !prev.is_nil() { self.nodes[prev.0].next = next; }
        if !next.is_nil() { self.nodes[next.0].prev = prev; }

        self.nodes[z.0].live = false;
        self.len -= 1;
    }
}

/// Left-to-right iterator over live arcs.
pub struct Arcs<'a> {
    line:    &'a BeachLine,
    current: Option<ArcId>,
}

impl<'a> Iterator for Arcs<'a> {
    type Item = ArcId;

    fn next(&mut self) -> Option<ArcId> {
        let id = self.current?;
        self.current = self.line.next(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn sites(line: &BeachLine) -> Vec<usize> {
        line.iter().map(|id| line.arc(id).site.0).collect()
    }

    #[test]
    fn empty_line() {
        let line = BeachLine::new();
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
        assert_eq!(line.leftmost(), None);
        assert!(line.inorder().is_empty());
    }

    #[test]
    fn split_keeps_order_and_links() {
        let mut line = BeachLine::new();
        let a = line.create_arc(SiteId(0));
        line.set_root(a);

        let middle = line.create_arc(SiteId(1));
        let left = line.create_arc(SiteId(0));
        let right = line.create_arc(SiteId(0));
        line.replace(a, middle);
        line.insert_before(middle, left);
        line.insert_after(middle, right);

        assert!(!line.is_live(a));
        assert_eq!(line.inorder(), vec![left, middle, right]);
        assert_eq!(sites(&line), vec![0, 1, 0]);
        assert_eq!(line.prev(middle), Some(left));
        assert_eq!(line.next(middle), Some(right));
        assert_eq!(line.prev(left), None);
        assert_eq!(line.next(right), None);
        assert_eq!(line.leftmost(), Some(left));
        line.assert_valid();

        line.delete(middle);
        assert_eq!(line.inorder(), vec![left, right]);
        assert_eq!(line.next(left), Some(right));
        // The removed arc still remembers where it was.
        assert_eq!(line.prev(middle), Some(left));
        line.assert_valid();
    }

    #[test]
    #[should_panic]
    fn set_root_twice_panics() {
        let mut line = BeachLine::new();
        let a = line.create_arc(SiteId(0));
        let b = line.create_arc(SiteId(1));
        line.set_root(a);
        line.set_root(b);
    }

    #[test]
    fn random_edits_match_vec_model() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut line = BeachLine::new();
        let first = line.create_arc(SiteId(0));
        line.set_root(first);
        let mut model = vec![first];

        for step in 1..2_000 {
            let pos = rng.random_range(0..model.len());
            let pivot = model[pos];
            match rng.random_range(0..4) {
                0 => {
                    let arc = line.create_arc(SiteId(step));
                    line.insert_before(pivot, arc);
                    model.insert(pos, arc);
                }
                1 => {
                    let arc = line.create_arc(SiteId(step));
                    line.insert_after(pivot, arc);
                    model.insert(pos + 1, arc);
                }
                2 => {
                    let arc = line.create_arc(SiteId(step));
                    line.replace(pivot, arc);
                    model[pos] = arc;
                }
                _ if model.len() > 1 => {
                    line.delete(pivot);
                    model.remove(pos);
                }
                _ => {}
            }
            if step % 50 == 0 { line.assert_valid(); }
            assert_eq!(line.len(), model.len());
        }
        assert_eq!(line.inorder(), model);
        line.assert_valid();
    }

    #[test]
    fn tree_stays_shallow() {
        let mut line = BeachLine::new();
        let mut last = line.create_arc(SiteId(0));
        line.set_root(last);
        for i in 1..4_096 {
            let arc = line.create_arc(SiteId(i));
            line.insert_after(last, arc);
            last = arc;
        }
        // A red-black tree never exceeds 2 log2(n + 1).
        assert!(line.height() <= 2 * 13, "height = {}", line.height());
        line.assert_valid();
    }
}
