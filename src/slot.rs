//! Tagged slot words for [`RadixMap`](crate::RadixMap).
//!
//! A slot is one machine word encoding one of three states, so that a
//! single-word CAS can move it between them:
//!
//! | Low bit | Upper bits | State | Payload                    |
//! |---------|------------|-------|----------------------------|
//! | 1       | zero       | empty | none (sentinel)            |
//! | 1       | nonzero    | leaf  | value pointer, tag cleared |
//! | 0       | any        | node  | [`Internode`] pointer      |
//!
//! The low bit is free for tagging because both the stored value type
//! and [`Internode`] are aligned to at least 2 bytes; the tree asserts
//! this at compile time. A node-tagged slot is never null.
//!
//! [`Slot`] is a copied decode of the word; [`AtomicSlot`] is the
//! published cell it was loaded from. Pointer arithmetic goes through
//! `addr`/`map_addr` so the payload pointers keep their provenance.

use std::fmt as StdFmt;
use std::marker::PhantomData;
use std::ptr as StdPtr;
use std::sync::atomic::AtomicPtr;

use crate::node::Internode;
use crate::ordering::{CAS_FAIL, CAS_OK, EXCLUSIVE_LOAD, SLOT_LOAD};

// The single-word CAS protocol requires lock-free pointer atomics.
#[cfg(not(target_has_atomic = "ptr"))]
compile_error!("radixmap requires lock-free pointer-width atomics");

/// The reserved discriminant bit.
const TAG: usize = 0b1;

// ============================================================================
//  Slot
// ============================================================================

/// A decoded slot word: empty, a leaf, or an internal node.
///
/// `Slot` is a plain copy of the word; it stays valid for exactly as
/// long as the pointer it carries. Accessors that materialize references
/// are `unsafe` and leave lifetime and protection to the caller (a
/// read-side guard, or exclusive access to the tree).
pub(crate) struct Slot<V, const FAN: usize> {
    raw: *mut u8,
    _marker: PhantomData<*mut V>,
}

impl<V, const FAN: usize> Clone for Slot<V, FAN> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, const FAN: usize> Copy for Slot<V, FAN> {}

impl<V, const FAN: usize> Slot<V, FAN> {
    /// The empty sentinel: tag bit set, no payload.
    #[inline]
    pub(crate) fn empty() -> Self {
        Self::from_raw(StdPtr::without_provenance_mut(TAG))
    }

    /// Tag a value pointer as a leaf.
    ///
    /// `leaf` must be non-null and at least 2-aligned; the tag occupies
    /// the alignment bit.
    #[inline]
    pub(crate) fn from_leaf(leaf: *mut V) -> Self {
        debug_assert!(!leaf.is_null());
        debug_assert!(leaf.addr() & TAG == 0, "leaf pointer must be 2-aligned");

        Self::from_raw(leaf.cast::<u8>().map_addr(|addr| addr | TAG))
    }

    /// Use a node pointer verbatim; the clear low bit is the node tag.
    ///
    /// Publishing a null node is forbidden.
    #[inline]
    pub(crate) fn from_node(node: *mut Internode<V, FAN>) -> Self {
        debug_assert!(!node.is_null(), "a node slot is never null");
        debug_assert!(node.addr() & TAG == 0, "node pointer must be 2-aligned");

        Self::from_raw(node.cast::<u8>())
    }

    #[inline]
    pub(crate) fn from_raw(raw: *mut u8) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    /// The raw word, for handing to [`AtomicSlot`].
    #[inline]
    pub(crate) fn raw(self) -> *mut u8 {
        self.raw
    }

    // ------------------------------------------------------------------------
    //  Inspectors
    // ------------------------------------------------------------------------

    #[inline]
    pub(crate) fn is_empty(self) -> bool {
        self.raw.addr() == TAG
    }

    #[inline]
    pub(crate) fn is_leaf(self) -> bool {
        self.raw.addr() & TAG != 0 && self.raw.addr() != TAG
    }

    #[inline]
    pub(crate) fn is_node(self) -> bool {
        self.raw.addr() & TAG == 0
    }

    // ------------------------------------------------------------------------
    //  Extraction
    // ------------------------------------------------------------------------

    /// The leaf pointer with the tag stripped.
    ///
    /// Tag-mismatched access is a programming error, not a recoverable
    /// condition.
    #[inline]
    pub(crate) fn as_leaf_ptr(self) -> *mut V {
        debug_assert!(self.is_leaf(), "as_leaf_ptr on a non-leaf slot");

        self.raw.map_addr(|addr| addr & !TAG).cast::<V>()
    }

    /// The node pointer.
    #[inline]
    pub(crate) fn as_node_ptr(self) -> *mut Internode<V, FAN> {
        debug_assert!(self.is_node(), "as_node_ptr on a non-node slot");

        self.raw.cast::<Internode<V, FAN>>()
    }

    /// Borrow the leaf value.
    ///
    /// # Safety
    ///
    /// The slot must be a leaf, the word must have been loaded from a
    /// published slot of a live tree, and the caller must hold a
    /// read-side guard (or exclusive access) for the chosen lifetime.
    #[inline]
    pub(crate) unsafe fn as_leaf<'a>(self) -> &'a V {
        // SAFETY: leaf slots carry a valid, tree-owned value pointer;
        // the caller's guard keeps it alive.
        unsafe { &*self.as_leaf_ptr() }
    }

    /// Borrow the internal node.
    ///
    /// # Safety
    ///
    /// The slot must be a node, loaded from a published slot of a live
    /// tree, under a read-side guard (or exclusive access).
    #[inline]
    pub(crate) unsafe fn as_node<'a>(self) -> &'a Internode<V, FAN> {
        // SAFETY: node slots are never null and point at a published
        // node, which is never freed while the tree is live.
        unsafe { &*self.as_node_ptr() }
    }
}

impl<V, const FAN: usize> StdFmt::Debug for Slot<V, FAN> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        if self.is_empty() {
            f.write_str("Slot::Empty")
        } else if self.is_leaf() {
            f.debug_tuple("Slot::Leaf").field(&self.as_leaf_ptr()).finish()
        } else {
            f.debug_tuple("Slot::Node").field(&self.raw).finish()
        }
    }
}

// ============================================================================
//  AtomicSlot
// ============================================================================

/// A published slot: one atomic word inside a node (or the tree root).
///
/// All mutation of a published slot is by CAS with the orderings in
/// [`crate::ordering`]; the only plain store is [`AtomicSlot::set_unsync`],
/// legal only before the owning node is published.
pub(crate) struct AtomicSlot<V, const FAN: usize> {
    raw: AtomicPtr<u8>,
    _marker: PhantomData<*mut V>,
}

impl<V, const FAN: usize> AtomicSlot<V, FAN> {
    /// A fresh empty slot.
    #[inline]
    pub(crate) fn empty() -> Self {
        Self {
            raw: AtomicPtr::new(Slot::<V, FAN>::empty().raw()),
            _marker: PhantomData,
        }
    }

    /// Load the current word.
    #[inline]
    pub(crate) fn load(&self) -> Slot<V, FAN> {
        Slot::from_raw(self.raw.load(SLOT_LOAD))
    }

    /// Load under exclusive access (`&mut` somewhere up the chain).
    #[inline]
    pub(crate) fn load_exclusive(&self) -> Slot<V, FAN> {
        Slot::from_raw(self.raw.load(EXCLUSIVE_LOAD))
    }

    /// CAS `current` to `new`; on failure returns the observed word.
    #[inline]
    pub(crate) fn compare_exchange(
        &self,
        current: Slot<V, FAN>,
        new: Slot<V, FAN>,
    ) -> Result<(), Slot<V, FAN>> {
        self.raw
            .compare_exchange(current.raw(), new.raw(), CAS_OK, CAS_FAIL)
            .map(|_| ())
            .map_err(Slot::from_raw)
    }

    /// Plain store into a not-yet-published node.
    ///
    /// The `&mut` receiver proves the owning node is still thread-local;
    /// publication (the node CAS) is what makes this write visible.
    #[inline]
    pub(crate) fn set_unsync(&mut self, slot: Slot<V, FAN>) {
        *self.raw.get_mut() = slot.raw();
    }
}

impl<V, const FAN: usize> StdFmt::Debug for AtomicSlot<V, FAN> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_tuple("AtomicSlot").field(&self.load()).finish()
    }
}

// ============================================================================
//  Tests
// ============================================================================
