//! Node implementation for the completion trie.
//!
//! `TrieNode` instances are always wrapped in an `Arc` and never mutated once
//! shared. Every transformation copies only the spine it changes and reuses
//! every other subtree by reference, so older roots stay valid.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::util::{match_for_insert, same_leading};

/// The empty-prefix child that marks "a stored string ends here".
static TERMINAL: Lazy<Arc<TrieNode>> = Lazy::new(|| Arc::new(TrieNode::leaf(Vec::new())));

/// Edge-compressed trie node.
///
/// `prefix` is the edge label reaching this node from its parent. Children
/// keep first-insertion order and start with pairwise distinct characters,
/// except for at most one empty-prefix child (the terminal marker). A node
/// without children is itself terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode {
    pub(crate) prefix: Vec<char>,
    pub(crate) children: Vec<Arc<TrieNode>>,
}

impl TrieNode {
    pub(crate) fn new(prefix: Vec<char>, children: Vec<Arc<TrieNode>>) -> Self {
        TrieNode { prefix, children }
    }

    pub(crate) fn leaf(prefix: Vec<char>) -> Self {
        TrieNode {
            prefix,
            children: Vec::new(),
        }
    }

    /// Returns the shared terminal marker.
    pub(crate) fn terminal() -> Arc<TrieNode> {
        Arc::clone(&TERMINAL)
    }

    /// Builds `prefix + child.prefix` over the children of `child`, folding a
    /// single-child chain back into one edge.
    pub(crate) fn joined(prefix: &[char], child: &TrieNode) -> Arc<TrieNode> {
        let mut joined = Vec::with_capacity(prefix.len() + child.prefix.len());
        joined.extend_from_slice(prefix);
        joined.extend_from_slice(&child.prefix);
        Arc::new(TrieNode::new(joined, child.children.clone()))
    }

    /// The edge label of this node.
    pub fn prefix(&self) -> &[char] {
        &self.prefix
    }

    pub fn prefix_string(&self) -> String {
        self.prefix.iter().collect()
    }

    pub fn children(&self) -> &[Arc<TrieNode>] {
        &self.children
    }

    /// Returns whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns whether this node is an empty-prefix terminal marker.
    pub fn is_marker(&self) -> bool {
        self.prefix.is_empty() && self.children.is_empty()
    }

    /// Returns whether a stored string ends exactly at this node.
    pub fn is_terminal(&self) -> bool {
        self.is_leaf() || self.children.iter().any(|c| c.is_marker())
    }

    /// First character of the edge label, if any.
    pub(crate) fn leading(&self) -> Option<char> {
        self.prefix.first().copied()
    }

    /// Number of strings stored in this subtree.
    pub fn len(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(|c| c.len()).sum()
        }
    }

    /// Inserts `value` below `root`, returning the new root.
    ///
    /// Returns `root` itself (same `Arc`) when the string is already stored.
    pub fn insert(root: Option<&Arc<TrieNode>>, value: &str) -> Arc<TrieNode> {
        let value: Vec<char> = value.chars().collect();
        match root {
            Some(node) => Self::insert_at(node, &value),
            None => Arc::new(TrieNode::leaf(value)),
        }
    }

    fn insert_at(node: &Arc<TrieNode>, value: &[char]) -> Arc<TrieNode> {
        let (i, j) = match_for_insert(&node.prefix, value);

        if i < node.prefix.len() {
            // diverged inside the prefix: split it
            let left = if i == 0 {
                Arc::clone(node)
            } else {
                Arc::new(TrieNode::new(node.prefix[i..].to_vec(), node.children.clone()))
            };
            let right = if j == value.len() {
                Self::terminal()
            } else {
                Arc::new(TrieNode::leaf(value[j..].to_vec()))
            };
            return Arc::new(TrieNode::new(node.prefix[..i].to_vec(), vec![left, right]));
        }

        let rest = &value[j..];
        if rest.is_empty() {
            if node.is_terminal() {
                return Arc::clone(node);
            }
            let mut children = node.children.clone();
            children.push(Self::terminal());
            return Arc::new(TrieNode::new(node.prefix.clone(), children));
        }

        let found = node.children.iter().position(|c| match c.leading() {
            Some(first) => same_leading(first, rest[0]),
            None => false,
        });

        if let Some(idx) = found {
            let child = &node.children[idx];
            let updated = Self::insert_at(child, rest);
            if Arc::ptr_eq(&updated, child) {
                return Arc::clone(node);
            }
            let mut children = node.children.clone();
            children[idx] = updated;
            return Arc::new(TrieNode::new(node.prefix.clone(), children));
        }

        let mut children = Vec::with_capacity(node.children.len() + 2);
        if node.children.is_empty() {
            // keep the string that used to end at this leaf
            children.push(Self::terminal());
        } else {
            children.extend(node.children.iter().cloned());
        }
        children.push(Arc::new(TrieNode::leaf(rest.to_vec())));
        Arc::new(TrieNode::new(node.prefix.clone(), children))
    }

    /// Calls `visit` with every stored string below `node`, in child order.
    ///
    /// Each string is `base` followed by the prefixes along the path.
    pub fn enumerate<F>(node: &TrieNode, base: &str, mut visit: F)
    where
        F: FnMut(&str),
    {
        let mut acc = String::from(base);
        Self::enumerate_into(node, &mut acc, &mut visit);
    }

    pub(crate) fn enumerate_into<F>(node: &TrieNode, acc: &mut String, visit: &mut F)
    where
        F: FnMut(&str),
    {
        let mark = acc.len();
        acc.extend(node.prefix.iter());
        if node.children.is_empty() {
            visit(acc);
        } else {
            for child in &node.children {
                Self::enumerate_into(child, acc, visit);
            }
        }
        acc.truncate(mark);
    }

    /// Collects every stored string below `node`.
    pub fn string_list(node: &TrieNode, base: &str) -> Vec<String> {
        let mut out = Vec::new();
        Self::enumerate(node, base, |s| out.push(s.to_string()));
        out
    }

    /// Union of two tries: every string of `b` inserted into `a` in `b`'s
    /// enumeration order.
    ///
    /// The flag reports whether the result differs from `a`. When nothing new
    /// was added, `a` itself is returned.
    pub fn merge(
        a: Option<&Arc<TrieNode>>,
        b: Option<&Arc<TrieNode>>,
    ) -> (Option<Arc<TrieNode>>, bool) {
        let (a, b) = match (a, b) {
            (a, None) => return (a.cloned(), false),
            (None, Some(b)) => return (Some(Arc::clone(b)), true),
            (Some(a), Some(b)) => (a, b),
        };
        if Arc::ptr_eq(a, b) {
            return (Some(Arc::clone(a)), false);
        }

        let mut merged = Arc::clone(a);
        Self::enumerate(b, "", |s| merged = Self::insert(Some(&merged), s));

        let changed = !Arc::ptr_eq(&merged, a);
        debug!(changed, strings = b.len(), "merged trie");
        (Some(merged), changed)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        if self.is_marker() {
            writeln!(f, "{:indent$}<end>", "", indent = indent)?;
        } else {
            writeln!(f, "{:indent$}{:?}", "", self.prefix_string(), indent = indent)?;
        }
        for child in &self.children {
            child.describe(f, indent + 2)?;
        }
        Ok(())
    }
}

impl fmt::Display for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f, 0)
    }
}
