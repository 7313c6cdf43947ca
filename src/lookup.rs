//! Flag-driven lookups into a trie.
//!
//! `contains` and `complete` share one recursive walk. The walk matches the
//! query against stored prefixes under a set of `LookupFlags` and reports every
//! node where the query is exhausted successfully.

use std::sync::Arc;

use crate::flags::LookupFlags;
use crate::node::TrieNode;
use crate::util::skip_whitespace;

/// Extra query characters tolerated under `SKIP_CHARS`.
const SKIP_BUDGET: usize = 1;

/// State shared by one lookup.
struct Walk<'q, F> {
    query: &'q [char],
    flags: LookupFlags,
    /// Prefixes of the ancestors of the node being walked.
    path: String,
    /// Called with the matched node and its path; returns `true` to stop.
    hit: F,
}

impl<'q, F> Walk<'q, F>
where
    F: FnMut(&TrieNode, &str) -> bool,
{
    fn new(query: &'q [char], flags: LookupFlags, base: &str, hit: F) -> Self {
        Walk {
            query,
            flags,
            path: String::from(base),
            hit,
        }
    }

    fn run(&mut self, root: &TrieNode) -> bool {
        let budget = if self.flags.contains(LookupFlags::SKIP_CHARS) {
            SKIP_BUDGET
        } else {
            0
        };
        self.walk(root, 0, budget)
    }

    /// Matches the prefix of `node` against the query from position `j`.
    fn walk(&mut self, node: &TrieNode, mut j: usize, mut skips: usize) -> bool {
        let prefix = &node.prefix;
        let mut i = 0;

        while i < prefix.len() {
            if j == self.query.len() {
                return self.exhausted(node, i);
            }
            let (p, q) = (prefix[i], self.query[j]);
            if p.is_whitespace() && q.is_whitespace() {
                i = skip_whitespace(prefix, i);
                j = skip_whitespace(self.query, j);
            } else if self.flags.chars_match(p, q) {
                i += 1;
                j += 1;
            } else if p.is_whitespace() && self.flags.contains(LookupFlags::SKIP_SPACES) {
                i += 1;
            } else if skips > 0 {
                // the query carries an extra character here
                skips -= 1;
                j += 1;
            } else {
                return false;
            }
        }

        self.descend(node, j, skips)
    }

    /// The whole prefix of `node` matched; continue into its children.
    fn descend(&mut self, node: &TrieNode, j: usize, skips: usize) -> bool {
        if j == self.query.len() {
            return self.exhausted(node, node.prefix.len());
        }

        let q = self.query[j];
        let mark = self.path.len();
        self.path.extend(node.prefix.iter());

        let mut entered = false;
        let mut stop = false;
        for child in node.children.iter().filter(|c| !c.is_marker()) {
            if !self.can_enter(child, q) {
                continue;
            }
            entered = true;
            if self.walk(child, j, skips) {
                stop = true;
                break;
            }
        }
        self.path.truncate(mark);

        if stop {
            return true;
        }
        if !entered && skips > 0 {
            return self.descend(node, j + 1, skips - 1);
        }
        false
    }

    fn can_enter(&self, child: &Arc<TrieNode>, q: char) -> bool {
        match child.leading() {
            Some(first) if first.is_whitespace() => {
                q.is_whitespace() || self.flags.contains(LookupFlags::SKIP_SPACES)
            }
            Some(first) => self.flags.chars_match(first, q),
            None => false,
        }
    }

    /// The query ran out at position `i` of `node`'s prefix.
    ///
    /// Under `SKIP_SPACES` trailing stored whitespace is ignored, including
    /// whitespace that insertion split off into child nodes.
    fn exhausted(&mut self, node: &TrieNode, i: usize) -> bool {
        if self.flags.contains(LookupFlags::PARTIAL) {
            return (self.hit)(node, &self.path);
        }
        let skip_spaces = self.flags.contains(LookupFlags::SKIP_SPACES);
        let i = if skip_spaces {
            skip_whitespace(&node.prefix, i)
        } else {
            i
        };
        if i < node.prefix.len() {
            return false;
        }
        if node.is_terminal() && (self.hit)(node, &self.path) {
            return true;
        }
        if !skip_spaces {
            return false;
        }

        let mark = self.path.len();
        self.path.extend(node.prefix.iter());
        let mut stop = false;
        for child in node.children.iter().filter(|c| !c.is_marker()) {
            if child.prefix.iter().all(|c| c.is_whitespace()) && self.exhausted(child, 0) {
                stop = true;
                break;
            }
        }
        self.path.truncate(mark);
        stop
    }
}

/// Returns whether `value` is stored below `root` under `flags`.
pub fn contains(root: Option<&Arc<TrieNode>>, value: &str, flags: LookupFlags) -> bool {
    let root = match root {
        Some(root) => root,
        None => return false,
    };
    let query: Vec<char> = value.chars().collect();
    Walk::new(&query, flags, "", |_, _| true).run(root)
}

/// Lists the stored strings matching `query` under `flags`, each prefixed with
/// `base`, in child order.
///
/// With `PARTIAL` every string below the point where the query ran out is
/// listed. Without it only whole matches are, in their stored spelling.
pub fn complete(
    root: Option<&Arc<TrieNode>>,
    query: &str,
    base: &str,
    flags: LookupFlags,
) -> Vec<String> {
    let root = match root {
        Some(root) => root,
        None => return Vec::new(),
    };
    let query: Vec<char> = query.chars().collect();
    let partial = flags.contains(LookupFlags::PARTIAL);
    let mut out = Vec::new();

    Walk::new(&query, flags, base, |node: &TrieNode, path: &str| {
        let mut acc = String::from(path);
        if partial {
            TrieNode::enumerate_into(node, &mut acc, &mut |s: &str| out.push(s.to_string()));
        } else {
            acc.extend(node.prefix.iter());
            out.push(acc);
        }
        false
    })
    .run(root);

    out
}
