//! Structural intersection of two tries.
//!
//! The walk reports, for every subtree, whether the result is the left input,
//! the right input, both, or neither. Callers reuse an input subtree instead
//! of allocating whenever it already is the answer.

use std::ops::{BitOr, BitOrAssign};
use std::sync::Arc;

use tracing::debug;

use crate::node::TrieNode;
use crate::util::common_prefix;

/// Which inputs an intersection result is identical to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SharedWith(u8);

impl SharedWith {
    pub const NEITHER: SharedWith = SharedWith(0);
    /// The result is the left input (from the given offset).
    pub const LEFT: SharedWith = SharedWith(1);
    /// The result is the right input.
    pub const RIGHT: SharedWith = SharedWith(2);
    pub const BOTH: SharedWith = SharedWith(3);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: SharedWith) -> bool {
        self.0 & other.0 == other.0
    }

    fn swapped(self) -> SharedWith {
        SharedWith((self.0 & 1) << 1 | (self.0 & 2) >> 1)
    }
}

impl BitOr for SharedWith {
    type Output = SharedWith;

    fn bitor(self, rhs: SharedWith) -> SharedWith {
        SharedWith(self.0 | rhs.0)
    }
}

impl BitOrAssign for SharedWith {
    fn bitor_assign(&mut self, rhs: SharedWith) {
        self.0 |= rhs.0;
    }
}

/// Outcome of intersecting two subtrees.
enum Meet {
    Empty,
    /// Equal to one or both inputs; never `NEITHER`.
    Shared(SharedWith),
    Fresh(Arc<TrieNode>),
}

/// Computes the trie of strings stored in both `a` and `b`.
///
/// `offset_into_a` skips that many characters of `a`'s prefix, so a caller can
/// intersect against the tail of an edge without materializing it. The
/// returned flags say whether the result is identical to `a` (from the offset)
/// and/or to `b`. A missing side yields `None`, flagged as shared with that side.
pub fn intersect(
    a: Option<&Arc<TrieNode>>,
    b: Option<&Arc<TrieNode>>,
    offset_into_a: usize,
) -> (Option<Arc<TrieNode>>, SharedWith) {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (a, b) => {
            let mut shared = SharedWith::NEITHER;
            if a.is_none() {
                shared |= SharedWith::LEFT;
            }
            if b.is_none() {
                shared |= SharedWith::RIGHT;
            }
            return (None, shared);
        }
    };

    let offset = offset_into_a.min(a.prefix.len());
    let (node, shared) = match meet(a, offset, b) {
        Meet::Empty => (None, SharedWith::NEITHER),
        Meet::Shared(shared) if shared.contains(SharedWith::LEFT) => {
            (Some(suffix(a, offset)), shared)
        }
        Meet::Shared(shared) => (Some(Arc::clone(b)), shared),
        Meet::Fresh(node) => (Some(node), SharedWith::NEITHER),
    };

    debug!(
        shared = shared.bits(),
        empty = node.is_none(),
        "intersected tries"
    );
    (node, shared)
}

fn suffix(a: &Arc<TrieNode>, offset: usize) -> Arc<TrieNode> {
    if offset == 0 {
        Arc::clone(a)
    } else {
        Arc::new(TrieNode::new(a.prefix[offset..].to_vec(), a.children.clone()))
    }
}

fn meet(a: &Arc<TrieNode>, offset: usize, b: &Arc<TrieNode>) -> Meet {
    if offset == 0 && Arc::ptr_eq(a, b) {
        return Meet::Shared(SharedWith::BOTH);
    }

    let pa = &a.prefix[offset..];
    let pb = &b.prefix[..];
    let n = common_prefix(pa, pb);

    match (n == pa.len(), n == pb.len()) {
        (true, true) => meet_children(a, pa, b),
        (false, true) => {
            // b's edge ends inside a's edge
            let child = match find_child(b, pa[n]) {
                Some(child) => child,
                None => return Meet::Empty,
            };
            match meet(a, offset + n, child) {
                Meet::Empty => Meet::Empty,
                Meet::Shared(shared) if shared.contains(SharedWith::LEFT) => {
                    if shared.contains(SharedWith::RIGHT) && b.children.len() == 1 {
                        Meet::Shared(SharedWith::BOTH)
                    } else {
                        Meet::Shared(SharedWith::LEFT)
                    }
                }
                Meet::Shared(_) if b.children.len() == 1 => Meet::Shared(SharedWith::RIGHT),
                Meet::Shared(_) => Meet::Fresh(TrieNode::joined(pb, child)),
                Meet::Fresh(node) => Meet::Fresh(TrieNode::joined(pb, &node)),
            }
        }
        (true, false) => {
            // a's edge ends inside b's edge; recurse with the sides swapped
            let child = match find_child(a, pb[n]) {
                Some(child) => child,
                None => return Meet::Empty,
            };
            match meet(b, n, child) {
                Meet::Empty => Meet::Empty,
                Meet::Shared(shared) => {
                    let shared = shared.swapped();
                    if shared.contains(SharedWith::RIGHT) {
                        if shared.contains(SharedWith::LEFT) && a.children.len() == 1 {
                            Meet::Shared(SharedWith::BOTH)
                        } else {
                            Meet::Shared(SharedWith::RIGHT)
                        }
                    } else if a.children.len() == 1 {
                        Meet::Shared(SharedWith::LEFT)
                    } else {
                        Meet::Fresh(TrieNode::joined(pa, child))
                    }
                }
                Meet::Fresh(node) => Meet::Fresh(TrieNode::joined(pa, &node)),
            }
        }
        (false, false) => Meet::Empty,
    }
}

fn find_child(node: &TrieNode, leading: char) -> Option<&Arc<TrieNode>> {
    node.children.iter().find(|c| c.leading() == Some(leading))
}

/// Both edges end at the same point: join the children.
///
/// The result keeps `a`'s child order; `b` is searched by leading character.
fn meet_children(a: &Arc<TrieNode>, pa: &[char], b: &Arc<TrieNode>) -> Meet {
    match (a.is_leaf(), b.is_leaf()) {
        (true, true) => return Meet::Shared(SharedWith::BOTH),
        (true, false) if b.is_terminal() => return Meet::Shared(SharedWith::LEFT),
        (false, true) if a.is_terminal() => return Meet::Shared(SharedWith::RIGHT),
        (true, false) | (false, true) => return Meet::Empty,
        (false, false) => {}
    }

    let mut same_a = true;
    let mut same_b = true;
    let mut matched = 0;
    let mut kept = Vec::with_capacity(a.children.len());

    for ca in &a.children {
        let cb = match ca.leading() {
            Some(leading) => find_child(b, leading),
            None => b.children.iter().find(|c| c.is_marker()),
        };
        let cb = match cb {
            Some(cb) => cb,
            None => {
                same_a = false;
                continue;
            }
        };
        matched += 1;

        if ca.is_marker() {
            kept.push(Arc::clone(ca));
            continue;
        }
        match meet(ca, 0, cb) {
            Meet::Empty => {
                same_a = false;
                same_b = false;
            }
            Meet::Shared(shared) => {
                same_a &= shared.contains(SharedWith::LEFT);
                same_b &= shared.contains(SharedWith::RIGHT);
                let reused = if shared.contains(SharedWith::LEFT) { ca } else { cb };
                kept.push(Arc::clone(reused));
            }
            Meet::Fresh(node) => {
                same_a = false;
                same_b = false;
                kept.push(node);
            }
        }
    }
    if matched < b.children.len() {
        same_b = false;
    }

    match (same_a, same_b) {
        (true, true) => return Meet::Shared(SharedWith::BOTH),
        (true, false) => return Meet::Shared(SharedWith::LEFT),
        (false, true) => return Meet::Shared(SharedWith::RIGHT),
        (false, false) => {}
    }

    match kept.len() {
        0 => Meet::Empty,
        1 if kept[0].is_marker() => Meet::Fresh(Arc::new(TrieNode::leaf(pa.to_vec()))),
        1 => Meet::Fresh(TrieNode::joined(pa, &kept[0])),
        _ => Meet::Fresh(Arc::new(TrieNode::new(pa.to_vec(), kept))),
    }
}
