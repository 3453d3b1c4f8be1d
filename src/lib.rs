//! # radixmap
//!
//! A concurrent, lock-free radix tree storing values identified by a
//! unique fixed-width integer id.
//!
//! The tree is composed of internal nodes holding a small array of
//! slots. A key is split into chunks of a few bits that serve as an
//! index into that array. Each slot is a single tagged machine word -
//! either a child-node pointer, a tagged value pointer (a leaf), or the
//! empty sentinel - discriminated by the low bit, which alignment keeps
//! free. New nodes are added lazily when two values would land in the
//! same slot.
//!
//! ## Concurrency
//!
//! - Reads walk the tree using sequential atomic loads; insertions
//!   publish with single-word CAS. Both are lock-free: a thread only
//!   repeats a step when another thread made progress in its place.
//! - A fresh node is populated off-tree with the leaf it displaces;
//!   the publishing CAS is the linearization point after which readers
//!   observing the node also observe the migrated leaf.
//! - Every operation runs inside a read-side critical section of the
//!   tree's [`seize`] collector ([`RadixMap::guard`]). Nothing is
//!   removed in this revision, so the guard currently only brackets
//!   the reads - but it is the contract that lets a future removal
//!   retire memory safely instead of freeing it under a reader.
//!
//! ## Limits of this revision
//!
//! - No removal: the tree grows monotonically and frees its nodes and
//!   values only when dropped.
//! - No ordered or range traversal.
//!
//! ## Example
//!
//! ```rust
//! use radixmap::{Keyed, RadixMap};
//!
//! #[derive(Debug)]
//! struct Block {
//!     height: u64,
//!     tx_count: u32,
//! }
//!
//! impl Keyed for Block {
//!     type Key = u64;
//!
//!     fn id(&self) -> u64 {
//!         self.height
//!     }
//! }
//!
//! let index: RadixMap<Block> = RadixMap::new();
//!
//! assert!(index.insert(Box::new(Block { height: 100, tx_count: 3 })).is_ok());
//!
//! // A second value with the same id is handed back untouched.
//! let rejected = index.insert(Box::new(Block { height: 100, tx_count: 9 }));
//! assert_eq!(rejected.unwrap_err().tx_count, 9);
//!
//! let guard = index.guard();
//! assert_eq!(index.get(100, &guard).map(|b| b.tx_count), Some(3));
//! assert!(index.get(101, &guard).is_none());
//! ```

mod node;
mod ordering;
mod reclaim;
mod slot;
mod tracing_helpers;

pub mod key;
pub mod tree;

pub use key::{Keyed, RadixKey};
pub use tree::RadixMap;

// Guard types callers need to name when holding one across calls.
pub use seize::{Guard, LocalGuard};
