//! # entry-tree
//!
//! A prefix tree keyed by sequences of keys, stored in a child-sibling
//! encoding: each node links only to its first child, and a node's children
//! form a doubly-linked sibling chain. Sequences that share a prefix share the
//! nodes of that prefix.
//!
//! ## Example
//!
//! ```rust
//! use entry_tree::EntryTree;
//!
//! let mut tree: EntryTree<&str, u64> = EntryTree::new();
//! tree.add(&["usr", "bin"], Some(1)).unwrap();
//! tree.add(&["usr", "lib"], Some(2)).unwrap();
//!
//! assert_eq!(tree.search(&["usr", "bin"]).unwrap(), Some(&1));
//! assert_eq!(tree.search(&["usr"]).unwrap(), None);
//! assert_eq!(
//!     tree.longest_stored_prefix(&["usr", "share"]).unwrap(),
//!     Some(vec!["usr"])
//! );
//!
//! // A missing element is a caller error, not a miss.
//! assert!(tree.search(&[Some("usr"), None]).is_err());
//! ```
//!
//! ## Routing nodes
//!
//! A sequence that is only a prefix of stored sequences has a node but no
//! value. [`EntryTree::search`] reports it exactly like a sequence that was
//! never inserted. Use [`EntryTree::longest_stored_prefix`] to learn whether a
//! path exists.

mod dump;
mod error;
mod keys;
mod node;

pub use dump::{DumpConfig, Walk};
pub use error::{EntryTreeError, Result};
pub use keys::KeySeq;
pub use node::{Children, EntryNode};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use keys::resolve;
use node::Node;

/// Prefix tree mapping key sequences to values.
///
/// Not synchronized; wrap it in a lock for shared mutation.
#[derive(Clone)]
pub struct EntryTree<K, V> {
    /// Every live node, the root included.
    nodes: Arena<Node<K, V>>,
    /// Keyless, valueless, never removed.
    root: Index,
    /// Nodes holding a value.
    len: usize,
}

impl<K, V> EntryTree<K, V> {
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let root = nodes.insert(Node::root());
        Self {
            nodes,
            root,
            len: 0,
        }
    }

    /// Number of stored entries. Routing nodes are not counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes below the root, routing nodes included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.insert(Node::root());
        self.len = 0;
    }

    pub fn root(&self) -> EntryNode<'_, K, V> {
        EntryNode {
            nodes: &self.nodes,
            idx: self.root,
        }
    }

    /// Pre-order walk of every node below the root; see [`Walk`].
    pub fn walk(&self) -> Walk<'_, K, V> {
        Walk::new(&self.nodes, self.root)
    }

    /// Detaches `idx` from its sibling chain and its parent, dropping it.
    ///
    /// Returns the former parent.
    fn unlink(&mut self, idx: Index) -> Option<Index> {
        let node = self.nodes.remove(idx)?;
        if let Some(prev) = node.prev {
            self.nodes[prev].next = node.next;
        }
        if let Some(next) = node.next {
            self.nodes[next].prev = node.prev;
        }
        let parent = node.parent?;
        if self.nodes[parent].child == Some(idx) {
            self.nodes[parent].child = node.next;
        }
        Some(parent)
    }
}

impl<K: PartialEq, V> EntryTree<K, V> {
    /// Node for the whole sequence, if every position matched.
    fn find(&self, keys: &[&K]) -> Option<Index> {
        if keys.is_empty() {
            return None;
        }
        let mut i = 0;
        let mut cur = self.nodes[self.root].child;
        while let Some(idx) = cur {
            let node = &self.nodes[idx];
            if node.key.as_ref() == Some(keys[i]) {
                if i + 1 == keys.len() {
                    return Some(idx);
                }
                i += 1;
                cur = node.child;
            } else {
                cur = node.next;
            }
        }
        None
    }

    /// Number of leading positions that have a node.
    fn matched_len(&self, keys: &[&K]) -> usize {
        let mut i = 0;
        let mut cur = self.nodes[self.root].child;
        while let Some(idx) = cur {
            if i == keys.len() {
                break;
            }
            let node = &self.nodes[idx];
            if node.key.as_ref() == Some(keys[i]) {
                i += 1;
                cur = node.child;
            } else {
                cur = node.next;
            }
        }
        i
    }

    /// Value stored for exactly this sequence.
    ///
    /// Empty and absent sequences find nothing. A routing node also yields
    /// `None`, indistinguishable from a sequence never inserted.
    pub fn search<S: KeySeq<K> + ?Sized>(&self, keys: &S) -> Result<Option<&V>> {
        let keys = resolve(keys)?;
        Ok(self
            .find(&keys)
            .and_then(|idx| self.nodes[idx].value.as_ref()))
    }

    pub fn search_mut<S: KeySeq<K> + ?Sized>(&mut self, keys: &S) -> Result<Option<&mut V>> {
        let keys = resolve(keys)?;
        match self.find(&keys) {
            Some(idx) => Ok(self.nodes[idx].value.as_mut()),
            None => Ok(None),
        }
    }

    pub fn contains<S: KeySeq<K> + ?Sized>(&self, keys: &S) -> Result<bool> {
        Ok(self.search(keys)?.is_some())
    }

    /// Longest leading run of `keys` that exists as a path in the tree.
    ///
    /// `None` when not even the first key matches (or the input is empty);
    /// otherwise a fresh copy of the matched prefix, possibly all of `keys`.
    pub fn longest_stored_prefix<S: KeySeq<K> + ?Sized>(&self, keys: &S) -> Result<Option<Vec<K>>>
    where
        K: Clone,
    {
        let keys = resolve(keys)?;
        let n = self.matched_len(&keys);
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(keys[..n].iter().map(|&k| k.clone()).collect()))
    }

    /// Stores `value` at `keys`, creating any missing nodes along the path.
    ///
    /// Returns `Ok(false)` without touching the tree when `value` is `None` or
    /// `keys` is empty. Otherwise returns `Ok(true)`, also when an existing
    /// value was overwritten with an equal one.
    #[instrument(level = "trace", skip_all, fields(len = keys.len()))]
    pub fn add<S: KeySeq<K> + ?Sized>(&mut self, keys: &S, value: Option<V>) -> Result<bool>
    where
        K: Clone,
    {
        let Some(value) = value else {
            return Ok(false);
        };
        if keys.is_empty() {
            return Ok(false);
        }
        let keys = resolve(keys)?;

        let mut i = 0;
        let mut parent = self.root;
        let mut cur = self.nodes[parent].child;
        // Last node scanned in the current chain without matching.
        let mut tail = None;
        while let Some(idx) = cur {
            let (matched, child, next) = {
                let node = &self.nodes[idx];
                (node.key.as_ref() == Some(keys[i]), node.child, node.next)
            };
            if !matched {
                tail = Some(idx);
                cur = next;
                continue;
            }
            if i + 1 == keys.len() {
                if self.nodes[idx].value.replace(value).is_none() {
                    self.len += 1;
                }
                return Ok(true);
            }
            i += 1;
            parent = idx;
            tail = None;
            cur = child;
        }

        // The scan fell off a chain: splice after its tail, or start the
        // parent's chain if it had no children.
        let first = self.nodes.insert(Node::routing(keys[i].clone(), parent));
        match tail {
            Some(prev) => {
                self.nodes[prev].next = Some(first);
                self.nodes[first].prev = Some(prev);
            }
            None => self.nodes[parent].child = Some(first),
        }

        let mut last = first;
        for &key in &keys[i + 1..] {
            let idx = self.nodes.insert(Node::routing(key.clone(), last));
            self.nodes[last].child = Some(idx);
            last = idx;
        }
        self.nodes[last].value = Some(value);
        self.len += 1;

        trace!(created = keys.len() - i, "extended path");
        Ok(true)
    }

    /// Removes and returns the value stored at `keys`.
    ///
    /// Afterwards every node left without a value and without children is
    /// pruned, walking upward until a live node or the root is reached.
    #[instrument(level = "trace", skip_all, fields(len = keys.len()))]
    pub fn remove<S: KeySeq<K> + ?Sized>(&mut self, keys: &S) -> Result<Option<V>> {
        let keys = resolve(keys)?;
        let Some(mut idx) = self.find(&keys) else {
            return Ok(None);
        };

        let removed = self.nodes[idx].value.take();
        if removed.is_some() {
            self.len -= 1;
        }

        let mut pruned = 0usize;
        while idx != self.root && self.nodes[idx].is_dead() {
            match self.unlink(idx) {
                Some(parent) => idx = parent,
                None => break,
            }
            pruned += 1;
        }
        if pruned > 0 {
            debug!(pruned, "pruned dead nodes");
        }

        Ok(removed)
    }
}

impl<K, V> Default for EntryTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for EntryTree<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryTree")
            .field("len", &self.len)
            .field("nodes", &self.walk().collect::<Vec<_>>())
            .finish()
    }
}


#[cfg(test)]
mod proptests;
