//! The main trie handle.
//!
//! This module contains the `Trie` type, which wraps the current root node and
//! provides the primary API for building, combining and querying candidate sets.

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

use tracing::trace;

use crate::flags::LookupFlags;
use crate::intersect::intersect;
use crate::lookup;
use crate::node::TrieNode;

/// A persistent completion trie.
///
/// A `Trie` is one version of a set of strings. Cloning it only copies the
/// root reference, and every operation leaves nodes reachable from other
/// versions untouched.
///
/// `insert`, `intersect` and `merge` reassign this handle's root. `inserted`,
/// `intersected` and `merged` return a new handle and leave `self` alone.
#[derive(Debug, Clone, Default)]
pub struct Trie {
    /// The root node of the trie, `None` when empty
    pub(crate) root: Option<Arc<TrieNode>>,
}

impl Trie {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use completion_trie::Trie;
    ///
    /// let trie = Trie::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Trie { root: None }
    }

    /// Wraps an existing root node.
    pub fn from_root(root: Option<Arc<TrieNode>>) -> Self {
        Trie { root }
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<&Arc<TrieNode>> {
        self.root.as_ref()
    }

    /// Returns `true` if the trie stores no strings.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of stored strings.
    ///
    /// This walks the whole tree.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.len())
    }

    /// Inserts `value` in place, returning whether the trie changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use completion_trie::Trie;
    ///
    /// let mut trie = Trie::new();
    /// assert!(trie.insert("for"));
    /// assert!(!trie.insert("for"));
    /// assert_eq!(trie.string_list(), vec!["for"]);
    /// ```
    pub fn insert(&mut self, value: &str) -> bool {
        let updated = TrieNode::insert(self.root.as_ref(), value);
        let changed = !self.is_same_root(&updated);
        trace!(value, changed, "insert");
        self.root = Some(updated);
        changed
    }

    /// Returns a new trie that also stores `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use completion_trie::Trie;
    ///
    /// let t1 = Trie::new();
    /// let t2 = t1.inserted("hello");
    ///
    /// assert!(t1.is_empty());
    /// assert!(t2.contains("hello"));
    /// ```
    pub fn inserted(&self, value: &str) -> Self {
        Trie::from_root(Some(TrieNode::insert(self.root.as_ref(), value)))
    }

    /// Keeps only the strings also stored in `other`, returning whether the
    /// trie changed.
    pub fn intersect(&mut self, other: &Trie) -> bool {
        let (root, shared) = intersect(self.root.as_ref(), other.root.as_ref(), 0);
        trace!(shared = shared.bits(), "intersect");
        let changed = match &root {
            Some(root) => !self.is_same_root(root),
            None => self.root.is_some(),
        };
        self.root = root;
        changed
    }

    /// Returns the trie of strings stored in both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use completion_trie::Trie;
    ///
    /// let a: Trie = vec!["cat", "car"].into_iter().collect();
    /// let b: Trie = vec!["car", "cow"].into_iter().collect();
    ///
    /// assert_eq!(a.intersected(&b).string_list(), vec!["car"]);
    /// ```
    pub fn intersected(&self, other: &Trie) -> Self {
        Trie::from_root(intersect(self.root.as_ref(), other.root.as_ref(), 0).0)
    }

    /// Adds every string of `other`, returning whether the trie changed.
    pub fn merge(&mut self, other: &Trie) -> bool {
        let (root, changed) = TrieNode::merge(self.root.as_ref(), other.root.as_ref());
        trace!(changed, "merge");
        self.root = root;
        changed
    }

    /// Returns the union of `self` and `other`.
    ///
    /// Strings of `other` are added after those of `self`, in `other`'s order.
    pub fn merged(&self, other: &Trie) -> Self {
        Trie::from_root(TrieNode::merge(self.root.as_ref(), other.root.as_ref()).0)
    }

    /// Returns `true` if `value` is stored exactly.
    pub fn contains(&self, value: &str) -> bool {
        self.contains_with(value, LookupFlags::NONE)
    }

    /// Looks `value` up under the given flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use completion_trie::{LookupFlags, Trie};
    ///
    /// let trie = Trie::new().inserted("Foo");
    ///
    /// assert!(!trie.contains("foo"));
    /// assert!(trie.contains_with("foo", LookupFlags::CASE_INSENSITIVE));
    /// assert!(trie.contains_with("F", LookupFlags::PARTIAL));
    /// ```
    pub fn contains_with(&self, value: &str, flags: LookupFlags) -> bool {
        lookup::contains(self.root.as_ref(), value, flags)
    }

    /// Lists stored strings starting with `query`, ignoring case.
    pub fn complete(&self, query: &str) -> Vec<String> {
        self.complete_with(query, "", LookupFlags::COMPLETION)
    }

    /// Lists stored strings matching `query` under `flags`, each prefixed with
    /// `base`.
    pub fn complete_with(&self, query: &str, base: &str, flags: LookupFlags) -> Vec<String> {
        lookup::complete(self.root.as_ref(), query, base, flags)
    }

    /// Returns every stored string in insertion order.
    pub fn string_list(&self) -> Vec<String> {
        self.root
            .as_ref()
            .map(|root| TrieNode::string_list(root, ""))
            .unwrap_or_default()
    }

    fn is_same_root(&self, other: &Arc<TrieNode>) -> bool {
        match &self.root {
            Some(root) => Arc::ptr_eq(root, other),
            None => false,
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value.as_ref());
        }
    }
}

// Content equality: the same set of strings, regardless of insertion order
impl PartialEq for Trie {
    fn eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => true,
            (Some(_), Some(_)) => {
                let mut mine = self.string_list();
                let mut theirs = other.string_list();
                mine.sort();
                theirs.sort();
                mine == theirs
            }
            _ => false,
        }
    }
}

impl Eq for Trie {}

impl fmt::Display for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{}", root),
            None => writeln!(f, "<empty>"),
        }
    }
}
