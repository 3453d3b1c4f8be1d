//! Teardown walk for [`RadixMap`](crate::RadixMap).
//!
//! Nothing is freed while a tree is live: published nodes are immortal
//! and values stay owned by their leaf slots (no deletion in this
//! revision). The one place direct freeing is sound is `Drop`, where
//! the exclusive borrow proves no read-side guard is outstanding. A
//! future deletion operation must instead retire memory through the
//! collector's deferred-free path; this walk is only for the end of the
//! tree's life.

use crate::node::Internode;
use crate::slot::Slot;

/// Free every node and every owned value reachable from `root`.
///
/// Iterative with an explicit stack; the walk order is unspecified.
///
/// # Safety
///
/// - `root` must be the root word of a tree that is no longer reachable
///   by any traversal, with no read-side guard outstanding.
/// - Every leaf pointer under `root` must have come from
///   `Box::into_raw`, every node pointer from a `Box<Internode>` leak;
///   none may have been freed already.
pub(crate) unsafe fn free_subtree<V, const FAN: usize>(root: Slot<V, FAN>) {
    if root.is_empty() {
        return;
    }

    if root.is_leaf() {
        // SAFETY: leaf pointers are Box-owned by the tree; the caller
        // guarantees exclusivity.
        unsafe { drop(Box::from_raw(root.as_leaf_ptr())) };
        return;
    }

    let mut stack: Vec<*mut Internode<V, FAN>> = Vec::with_capacity(16);
    stack.push(root.as_node_ptr());

    while let Some(node_ptr) = stack.pop() {
        // Collect children before freeing the node itself.
        {
            // SAFETY: node pointers on the stack are live until this
            // iteration frees them, and nothing else aliases the tree.
            let node: &Internode<V, FAN> = unsafe { &*node_ptr };

            for slot in node.slots() {
                let child = slot.load_exclusive();

                if child.is_node() {
                    stack.push(child.as_node_ptr());
                } else if child.is_leaf() {
                    // SAFETY: as for the root leaf above.
                    unsafe { drop(Box::from_raw(child.as_leaf_ptr())) };
                }
            }
        }

        // SAFETY: published nodes are Box allocations leaked at
        // publication; each is reachable from exactly one slot, so this
        // is the first and only free.
        unsafe { drop(Box::from_raw(node_ptr)) };
    }
}

// ============================================================================
//  Tests
// ============================================================================
