//! Internal nodes for [`RadixMap`](crate::RadixMap).
//!
//! An internode is a fan-out array of atomic slots, indexed by one
//! chunk of the key. Nodes are immutable in identity: once published
//! their address never changes and they are never freed while the tree
//! is live; only their slots mutate, independently and atomically.
//!
//! A node is born off-tree when an insertion must disambiguate two keys
//! that collide in a slot: the constructor pre-populates the displaced
//! leaf at that leaf's chunk for the node's level, and the publishing
//! CAS is what makes the node (and the migrated leaf inside it) visible.

use std::fmt as StdFmt;

use crate::key::{Keyed, RadixKey};
use crate::slot::{AtomicSlot, Slot};

// ============================================================================
//  Internode
// ============================================================================

/// An internal routing node: `FAN` atomic slots.
///
/// # Type Parameters
/// * `V` - The stored value type
/// * `FAN` - Fan-out; must be a power of two, at least 2
///
/// # Invariants
/// - A published node is reachable from exactly one slot, which never
///   stops pointing at it in this revision (no deletion).
/// - Slots written before publication are visible to every reader that
///   observes the node pointer.
pub(crate) struct Internode<V, const FAN: usize> {
    slots: [AtomicSlot<V, FAN>; FAN],
}

impl<V, const FAN: usize> Internode<V, FAN> {
    /// Chunk width in bits; `FAN = 2^CHUNK_BITS`.
    pub(crate) const CHUNK_BITS: u32 = {
        assert!(FAN.is_power_of_two(), "FAN must be a power of two");
        assert!(FAN >= 2, "FAN must be at least 2");

        FAN.trailing_zeros()
    };

    /// Index mask for one chunk.
    pub(crate) const MASK: usize = FAN - 1;

    /// Allocate an all-empty node.
    #[must_use]
    pub(crate) fn empty_boxed() -> Box<Self> {
        // Trigger the compile-time FAN check.
        let _: u32 = Self::CHUNK_BITS;

        Box::new(Self {
            slots: std::array::from_fn(|_| AtomicSlot::empty()),
        })
    }

    /// All slots, for the teardown walk.
    #[inline]
    pub(crate) fn slots(&self) -> &[AtomicSlot<V, FAN>; FAN] {
        &self.slots
    }
}

impl<V: Keyed, const FAN: usize> Internode<V, FAN> {
    /// Allocate a node for `level`, pre-populated with `slot` at `key`'s
    /// chunk for that level.
    ///
    /// `key` is the id of the displaced leaf and `slot` its tagged word.
    /// The write is unsynchronized: the node is thread-local until the
    /// caller publishes it by CAS.
    #[must_use]
    pub(crate) fn with_slot(level: u32, key: V::Key, slot: Slot<V, FAN>) -> Box<Self> {
        let mut node = Self::empty_boxed();

        let index: usize = key.chunk(level, Self::CHUNK_BITS) & Self::MASK;
        node.slots[index].set_unsync(slot);

        node
    }

    /// The slot `key` selects at `level`. Pure index computation.
    #[inline]
    pub(crate) fn slot_for(&self, level: u32, key: V::Key) -> &AtomicSlot<V, FAN> {
        &self.slots[key.chunk(level, Self::CHUNK_BITS) & Self::MASK]
    }
}

impl<V, const FAN: usize> StdFmt::Debug for Internode<V, FAN> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        let occupied: usize = self
            .slots
            .iter()
            .filter(|slot| !slot.load().is_empty())
            .count();

        f.debug_struct("Internode")
            .field("fan", &FAN)
            .field("occupied", &occupied)
            .finish_non_exhaustive()
    }
}

// ============================================================================
//  Tests
// ============================================================================
