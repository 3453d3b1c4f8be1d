//! Standard memory orderings for slot access.
//!
//! These constants ensure consistent ordering usage across the codebase
//! and make the intent clear at each access point.
//!
//! Every load and every CAS on a published slot is sequentially
//! consistent: a reader that observes a node pointer must also observe
//! every slot write performed on that node before it was published, and
//! concurrent same-key inserts must agree on a single winner. The only
//! non-SeqCst access is the pre-publication population of a fresh node,
//! which is thread-local until the publishing CAS.

use std::sync::atomic::Ordering;

/// Ordering for loading a published slot during traversal.
pub const SLOT_LOAD: Ordering = Ordering::SeqCst;

/// Ordering for CAS success on a slot (insert and split publication).
pub const CAS_OK: Ordering = Ordering::SeqCst;

/// Ordering for CAS failure.
///
/// The failed value feeds the retry loop, which may descend through it;
/// it needs the same visibility as a plain traversal load.
pub const CAS_FAIL: Ordering = Ordering::SeqCst;

/// Ordering for reads under exclusive access (`&mut self`, teardown).
///
/// Exclusivity already synchronizes; nothing can race these loads.
pub const EXCLUSIVE_LOAD: Ordering = Ordering::Relaxed;
