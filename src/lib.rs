//! This crate provides two linear list containers with owned nodes: a
//! singly linked [`SinglyList`] and a doubly linked [`DoublyList`].
//!
//! Both store an ordered sequence of comparable values and carry the same
//! operation set: head insertion, sorted-ascending insertion, search,
//! extrema, deletion by value, in-place iterative reversal, positional
//! queries from either end, middle-element lookup, and cycle
//! detection/creation. Every operation is a traversal from the head, in
//! *O*(*n*) time and *O*(1) auxiliary space.
//!
//! Here is a quick example showing how the lists work.
//!
//! ```
//! use chain_list::SinglyList;
//!
//! let mut list = SinglyList::new();
//! for value in [20, 5, -3, 4, -3] {
//!     list.insert(value); // each insert prepends
//! }
//!
//! assert_eq!(list.to_string(), "-3 -> 4 -> -3 -> 5 -> 20");
//! assert_eq!(list.find_max(), Some(&20));
//! assert_eq!(list.find_min(), Some(&-3));
//! assert_eq!(list.nth_from_end(0), Ok(&20));
//!
//! list.reverse();
//! assert_eq!(list.to_string(), "20 -> 5 -> -3 -> 4 -> -3");
//! ```
//!
//! # Memory Layout
//!
//! Each node is allocated on the heap and owns its successor through the
//! `next` link; the list itself owns only the head:
//!
//! ```text
//! ╔════════╗     ╔═══════════╗           ╔═══════════╗
//! ║  head  ║ ──→ ║   next    ║ ────────→ ║   next    ║ ──→ ┄┄ ──→ Ø
//! ╚════════╝     ╟───────────╢           ╟───────────╢
//!    List     ┌─ ║  (prev)   ║ ←──────── ║  (prev)   ║
//!    Ø ←──────┘  ╟───────────╢           ╟───────────╢
//!                ║ payload T ║           ║ payload T ║
//!                ╚═══════════╝           ╚═══════════╝
//!                    Node 0                  Node 1
//! ```
//!
//! The doubly linked variant adds the `prev` back-reference shown in
//! parentheses: a non-owning link used only for traversal and relinking,
//! never for lifetime management. Dropping a list releases the chain
//! node by node, front to back.
//!
//! # Cycles
//!
//! `create_cycle` wraps the tail's `next` back to the head (and, in the
//! doubly linked variant, the head's `prev` back to the tail), breaking
//! the finite-chain invariant on purpose so that `has_cycle`, a
//! constant-space fast/slow cursor detector, has something to find.
//! While a cycle is installed, every full-traversal operation diverges;
//! `has_cycle`, `clear` and `Drop` are the only operations guaranteed to
//! terminate on a cyclic list.
//!
//! # Errors
//!
//! The positional queries (`nth_from_start`, `nth_from_end`) return
//! [`OutOfRange`] when the requested index is not within `[0, len)`.
//! Everything else reports absence through `Option` or `bool`.

#[doc(inline)]
pub use doubly::List as DoublyList;
#[doc(inline)]
pub use error::OutOfRange;
#[doc(inline)]
pub use singly::List as SinglyList;

pub mod doubly;
pub mod error;
pub mod singly;

pub mod experiments;

mod traverse;
