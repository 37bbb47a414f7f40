//! Red-black rebalancing for the beach line tree.

use super::{ArcId, BeachLine, Color};

impl BeachLine {
    #[inline] fn color(&self, id: ArcId) -> Color { self.nodes[id.0].color }

    #[inline] fn set_color(&mut self, id: ArcId, color: Color) { self.nodes[id.0].color = color; }

    #[inline] fn parent(&self, id: ArcId) -> ArcId { self.nodes[id.0].parent }

    #[inline] fn left(&self, id: ArcId) -> ArcId { self.nodes[id.0].left }

    #[inline] fn right(&self, id: ArcId) -> ArcId { self.nodes[id.0].right }

    /// Leftmost node of the subtree rooted at `id`.
    pub(super) fn minimum(&self, mut id: ArcId) -> ArcId {
        while !self.left(id).is_nil() { id = self.left(id); }
        id
    }

    /// Replace the subtree rooted at `u` with the one rooted at `v`.
    /// `v` may be the sentinel, whose parent is then set for the fixup.
    pub(super) fn transplant(&mut self, u: ArcId, v: ArcId) {
        let parent = self.parent(u);
        if parent.is_nil() {
            self.root = v;
        } else if u == self.left(parent) {
            self.nodes[parent.0].left = v;
        } else {
            self.nodes[parent.0].right = v;
        }
        self.nodes[v.0].parent = parent;
    }

    fn rotate_left(&mut self, x: ArcId) {
        let y = self.right(x);
        let y_left = self.left(y);
        self.nodes[x.0].right = y_left;
        if !y_left.is_nil() { self.nodes[y_left.0].parent = x; }
        self.transplant(x, y);
        self.nodes[y.0].left = x;
        self.nodes[x.0].parent = y;
    }

    fn rotate_right(&mut self, x: ArcId) {
        let y = self.left(x);
        let y_right = self.right(y);
        self.nodes[x.0].left = y_right;
        if !y_right.is_nil() { self.nodes[y_right.0].parent = x; }
        self.transplant(x, y);
        self.nodes[y.0].right = x;
        self.nodes[x.0].parent = y;
    }

    pub(super) fn insert_fixup(&mut self, mut z: ArcId) {
        while self.color(self.parent(z)) == Color::Red {
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.right(parent) {
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle) == Color::Red {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.left(parent) {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    pub(super) fn delete_fixup(&mut self, mut x: ArcId) {
        while x != self.root && self.color(x) == Color::Black {
            let parent = self.parent(x);
            if x == self.left(parent) {
                let mut w = self.right(parent);
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    w = self.right(self.parent(x));
                }
                if self.color(self.left(w)) == Color::Black && self.color(self.right(w)) == Color::Black {
                    self.set_color(w, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.color(self.right(w)) == Color::Black {
                        let w_left = self.left(w);
                        self.set_color(w_left, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(self.parent(x));
                    }
                    let parent = self.parent(x);
                    self.set_color(w, self.color(parent));
                    self.set_color(parent, Color::Black);
                    let w_right = self.right(w);
                    self.set_color(w_right, Color::Black);
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut w = self.left(parent);
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    w = self.left(self.parent(x));
                }
                if self.color(self.left(w)) == Color::Black && self.color(self.right(w)) == Color::Black {
                    self.set_color(w, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.color(self.left(w)) == Color::Black {
                        let w_right = self.right(w);
                        self.set_color(w_right, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(self.parent(x));
                    }
                    let parent = self.parent(x);
                    self.set_color(w, self.color(parent));
                    self.set_color(parent, Color::Black);
                    let w_left = self.left(w);
                    self.set_color(w_left, Color::Black);
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }
        self.set_color(x, Color::Black);
    }
}

#[cfg(test)]
impl BeachLine {
    /// Longest root-to-leaf path, in nodes.
    pub(crate) fn height(&self) -> usize {
        fn walk(line: &BeachLine, id: ArcId) -> usize {
            if id.is_nil() { 0 } else { 1 + walk(line, line.left(id)).max(walk(line, line.right(id))) }
        }
        walk(self, self.root)
    }

    /// Check the red-black properties, parent links and threading.
    pub(crate) fn assert_valid(&self) {
        fn black_height(line: &BeachLine, id: ArcId, order: &mut Vec<ArcId>) -> usize {
            if id.is_nil() { return 1 }
            let (left, right) = (line.left(id), line.right(id));
            if !left.is_nil()  { assert_eq!(line.parent(left), id, "bad parent link"); }
            if !right.is_nil() { assert_eq!(line.parent(right), id, "bad parent link"); }
            if line.color(id) == Color::Red {
                assert_eq!(line.color(left), Color::Black, "red node with red child");
                assert_eq!(line.color(right), Color::Black, "red node with red child");
            }
            assert!(line.is_live(id), "dead arc reachable from root");

            let lh = black_height(line, left, order);
            order.push(id);
            let rh = black_height(line, right, order);
            assert_eq!(lh, rh, "unequal black heights");
            lh + usize::from(line.color(id) == Color::Black)
        }

        assert_eq!(self.color(ArcId::NIL), Color::Black, "sentinel turned red");
        if self.root.is_nil() {
            assert_eq!(self.len, 0);
            return;
        }
        assert_eq!(self.color(self.root), Color::Black, "red root");

        let mut order = Vec::new();
        black_height(self, self.root, &mut order);
        assert_eq!(order.len(), self.len, "len out of sync");
        assert_eq!(order, self.inorder(), "threading disagrees with tree order");
        for pair in order.windows(2) {
            assert_eq!(self.prev(pair[1]), Some(pair[0]));
        }
    }
}
