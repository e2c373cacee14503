//! Traversal routines shared by the singly and doubly linked variants.
//!
//! Both node types expose their forward link through [`Forward`], so the
//! walking loops, the index arithmetic and the cycle detector are derived
//! once here instead of per variant. The back-reference of the doubly
//! linked node never takes part in shared traversal; it is used by its
//! owner for relinking only.

use crate::error::OutOfRange;
use std::ptr::NonNull;

/// Link-following capability of a list node.
pub(crate) trait Forward: Sized {
    /// The forward (owning) link, or `None` at the tail of an acyclic chain.
    fn forward(&self) -> Option<NonNull<Self>>;
}

/// Count the nodes reachable from `head`.
///
/// # Safety
///
/// Every node reachable from `head` must be valid, and the chain must be
/// acyclic, otherwise this function does not terminate.
pub(crate) unsafe fn chain_len<N: Forward>(head: Option<NonNull<N>>) -> usize {
    let mut len = 0;
    let mut current = head;
    while let Some(node) = current {
        len += 1;
        current = node.as_ref().forward();
    }
    len
}

/// Walk `n` forward links from `head` and return the node found there, or
/// `None` if the chain holds fewer than `n + 1` nodes.
///
/// # Safety
///
/// Every node reachable from `head` must be valid.
pub(crate) unsafe fn nth_node<N: Forward>(
    head: Option<NonNull<N>>,
    n: usize,
) -> Option<NonNull<N>> {
    let mut remaining = n;
    let mut current = head;
    while let Some(node) = current {
        if remaining == 0 {
            return Some(node);
        }
        remaining -= 1;
        current = node.as_ref().forward();
    }
    None
}

/// Detect a revisited node with a pair of fast/slow cursors, in O(1)
/// auxiliary space. Terminates on cyclic chains, unlike the full-traversal
/// routines above.
///
/// # Safety
///
/// Every node reachable from `head` must be valid.
pub(crate) unsafe fn has_cycle<N: Forward>(head: Option<NonNull<N>>) -> bool {
    let mut slow = head;
    let mut fast = head;
    loop {
        fast = match fast {
            Some(node) => node.as_ref().forward(),
            None => return false,
        };
        fast = match fast {
            Some(node) => node.as_ref().forward(),
            None => return false,
        };
        slow = match slow {
            Some(node) => node.as_ref().forward(),
            // The slow cursor cannot fall off before the fast one.
            None => return false,
        };
        if slow == fast {
            return true;
        }
    }
}

/// Index of the middle element of a list with `len` elements; the lower of
/// the two central indices when `len` is even.
pub(crate) fn middle_index(len: usize) -> usize {
    debug_assert!(len > 0, "empty lists have no middle");
    if len % 2 == 0 {
        len / 2 - 1
    } else {
        len / 2
    }
}

/// Translate an index counted from the tail (tail = index 0) into one
/// counted from the head.
pub(crate) fn index_from_end(len: usize, n: usize) -> Result<usize, OutOfRange> {
    if n >= len {
        return Err(OutOfRange { index: n, len });
    }
    Ok(len - 1 - n)
}
