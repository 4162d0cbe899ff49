//! Entry nodes of the child-sibling encoding.
//!
//! Every node owns at most one downward link (`child`, the head of its
//! children's sibling chain) and one sideways link (`next`). `parent` and
//! `prev` are back-references used only to relink and to walk upward while
//! pruning.

use generational_arena::{Arena, Index};

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// `None` only for the root.
    pub(crate) key: Option<K>,
    /// `None` marks a routing node.
    pub(crate) value: Option<V>,
    pub(crate) child: Option<Index>,
    pub(crate) parent: Option<Index>,
    pub(crate) prev: Option<Index>,
    pub(crate) next: Option<Index>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn root() -> Self {
        Self {
            key: None,
            value: None,
            child: None,
            parent: None,
            prev: None,
            next: None,
        }
    }

    pub(crate) fn routing(key: K, parent: Index) -> Self {
        Self {
            key: Some(key),
            value: None,
            child: None,
            parent: Some(parent),
            prev: None,
            next: None,
        }
    }

    /// Valueless and childless; must not survive a public operation.
    #[inline]
    pub(crate) fn is_dead(&self) -> bool {
        self.value.is_none() && self.child.is_none()
    }
}

/// Read-only handle to one node of an [`EntryTree`](crate::EntryTree).
///
/// Handles borrow the tree, so they can never observe a node that a later
/// mutation pruned.
pub struct EntryNode<'a, K, V> {
    pub(crate) nodes: &'a Arena<Node<K, V>>,
    pub(crate) idx: Index,
}

impl<'a, K, V> Clone for EntryNode<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for EntryNode<'a, K, V> {}

impl<'a, K, V> EntryNode<'a, K, V> {
    #[inline]
    fn node(&self) -> &'a Node<K, V> {
        &self.nodes[self.idx]
    }

    #[inline]
    fn at(&self, idx: Option<Index>) -> Option<Self> {
        idx.map(|idx| Self {
            nodes: self.nodes,
            idx,
        })
    }

    /// The key at this position; `None` only for the root.
    pub fn key(&self) -> Option<&'a K> {
        self.node().key.as_ref()
    }

    /// The stored value, or `None` for a routing node (and the root).
    pub fn value(&self) -> Option<&'a V> {
        self.node().value.as_ref()
    }

    pub fn parent(&self) -> Option<Self> {
        self.at(self.node().parent)
    }

    /// First (leftmost) child.
    pub fn child(&self) -> Option<Self> {
        self.at(self.node().child)
    }

    pub fn next(&self) -> Option<Self> {
        self.at(self.node().next)
    }

    pub fn prev(&self) -> Option<Self> {
        self.at(self.node().prev)
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Number of `child` links between the root and this node.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self.node().parent;
        while let Some(idx) = cur {
            depth += 1;
            cur = self.nodes[idx].parent;
        }
        depth
    }

    /// Iterates this node's children, leftmost first.
    pub fn children(&self) -> Children<'a, K, V> {
        Children { next: self.child() }
    }
}

impl<'a, K, V> PartialEq for EntryNode<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.idx == other.idx
    }
}

impl<'a, K, V> Eq for EntryNode<'a, K, V> {}

impl<'a, K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for EntryNode<'a, K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryNode")
            .field("key", &self.key())
            .field("value", &self.value())
            .finish()
    }
}

/// Iterator over one sibling chain.
pub struct Children<'a, K, V> {
    next: Option<EntryNode<'a, K, V>>,
}

impl<'a, K, V> Iterator for Children<'a, K, V> {
    type Item = EntryNode<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.next = cur.next();
        Some(cur)
    }
}
