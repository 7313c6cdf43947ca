//! # Completion Trie
//!
//! A persistent, edge-compressed trie for indexing and ranking code-completion
//! candidates.
//!
//! Nodes are shared through `Arc` and never mutated once built, so every
//! version of a trie stays valid while newer versions share its unchanged
//! subtrees. Readers on any number of threads can query shared versions
//! without locks.
//!
//! ## Features
//!
//! - **Persistent handles**: `Trie` values are cheap to clone; updates copy only the changed spine
//! - **Set algebra**: structural intersection that reuses untouched inputs, and union by insertion
//! - **Flexible lookups**: case-insensitive, partial, whitespace- and typo-tolerant queries
//! - **Ranking**: a fuzzy match-strength score and a stable sort for completion lists
//!
//! ## Example
//!
//! ```rust
//! use completion_trie::{match_strength_sort, Trie};
//!
//! let trie: Trie = vec!["for", "foreach", "forward", "while"].into_iter().collect();
//!
//! let mut hits = trie.complete("fo");
//! assert_eq!(hits, vec!["for", "foreach", "forward"]);
//!
//! match_strength_sort("fw", &mut hits);
//! assert_eq!(hits[0], "forward");
//! ```

mod flags;
mod intersect;
mod lookup;
pub mod node;
mod ranking;
mod trie;
mod util;

// Re-export public types
pub use crate::flags::LookupFlags;
pub use crate::intersect::{intersect, SharedWith};
pub use crate::lookup::{complete, contains};
pub use crate::node::TrieNode;
pub use crate::ranking::{match_strength, match_strength_sort, ranked};
pub use crate::trie::Trie;

/// Errors that can occur while configuring lookups.
///
/// Trie operations themselves are total and never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A flag name in a textual flag set was not recognized
    #[error("unknown lookup flag `{0}`")]
    UnknownFlag(String),
}
