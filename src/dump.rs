//! Diagnostic traversal and textual dump.
//!
//! The walk is a pre-order over the child-sibling encoding: a node, then its
//! leftmost child's subtree, then its next sibling. It keeps only a cursor and
//! a depth counter, climbing `parent` links to find the next sibling once a
//! subtree is exhausted.

use std::fmt::{self, Display, Write};

use generational_arena::{Arena, Index};

use crate::node::{EntryNode, Node};
use crate::EntryTree;

/// Line format for [`EntryTree::dump_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    /// Repeated once per depth level.
    pub indent: String,
    /// Between key and value.
    pub separator: String,
    /// First line, standing in for the root.
    pub header: String,
    /// Printed in place of an absent value.
    pub absent: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            indent: "   ".to_string(),
            separator: "->".to_string(),
            header: "null->null".to_string(),
            absent: "null".to_string(),
        }
    }
}

impl DumpConfig {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_absent(mut self, absent: impl Into<String>) -> Self {
        self.absent = absent.into();
        self
    }
}

/// Lazy pre-order walk over every node below the root.
///
/// Yields `(depth, node)`, where top-level nodes have depth 1.
pub struct Walk<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    root: Index,
    cur: Option<Index>,
    depth: usize,
}

impl<'a, K, V> Clone for Walk<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            root: self.root,
            cur: self.cur,
            depth: self.depth,
        }
    }
}

impl<'a, K, V> Walk<'a, K, V> {
    pub(crate) fn new(nodes: &'a Arena<Node<K, V>>, root: Index) -> Self {
        Self {
            nodes,
            root,
            cur: nodes[root].child,
            depth: 1,
        }
    }
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = (usize, EntryNode<'a, K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cur?;
        let depth = self.depth;

        if let Some(child) = self.nodes[idx].child {
            self.cur = Some(child);
            self.depth += 1;
        } else {
            let mut up = idx;
            self.cur = loop {
                let node = &self.nodes[up];
                if node.next.is_some() {
                    break node.next;
                }
                match node.parent {
                    Some(parent) if parent != self.root => {
                        up = parent;
                        self.depth -= 1;
                    }
                    _ => break None,
                }
            };
        }

        Some((
            depth,
            EntryNode {
                nodes: self.nodes,
                idx,
            },
        ))
    }
}

impl<K: Display, V: Display> EntryTree<K, V> {
    /// Renders the tree with the default format.
    ///
    /// ```rust
    /// use entry_tree::EntryTree;
    ///
    /// let mut tree: EntryTree<char, u32> = EntryTree::new();
    /// tree.add(&['a', 'b'], Some(7)).unwrap();
    /// assert_eq!(tree.dump(), "null->null\n   a->null\n      b->7\n");
    /// ```
    pub fn dump(&self) -> String {
        self.dump_with(&DumpConfig::default())
    }

    pub fn dump_with(&self, config: &DumpConfig) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dump(&mut out, config);
        out
    }

    fn write_dump<W: Write>(&self, out: &mut W, config: &DumpConfig) -> fmt::Result {
        writeln!(out, "{}", config.header)?;
        for (depth, node) in self.walk() {
            for _ in 0..depth {
                out.write_str(&config.indent)?;
            }
            if let Some(key) = node.key() {
                write!(out, "{key}")?;
            }
            out.write_str(&config.separator)?;
            match node.value() {
                Some(value) => writeln!(out, "{value}")?,
                None => writeln!(out, "{}", config.absent)?,
            }
        }
        Ok(())
    }
}

impl<K: Display, V: Display> Display for EntryTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_dump(f, &DumpConfig::default())
    }
}
