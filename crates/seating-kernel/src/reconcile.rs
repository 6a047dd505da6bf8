//! Reconciliation of an assignment with a reshaped grid.
//!
//! Placements whose seat survives are carried over unchanged. Freed seats are
//! then filled in row-major order with the students who lost their seat or
//! never had one, in roster order.

use tracing::debug;

use crate::allocator::place_unseated;
use crate::assignment::Assignment;
use crate::roster::{Roster, Student};
use crate::shaper::ValidPositionSet;

/// Adapt `old` to `new_valid`.
///
/// Pure and idempotent: reconciling the result again against the same
/// `new_valid` returns it unchanged.
pub fn reconcile(
    old: &Assignment,
    old_valid: &ValidPositionSet,
    new_valid: &ValidPositionSet,
    students: &[Student],
) -> Assignment {
    let roster: Roster = students.iter().cloned().collect();

    let mut carried = old.clone();
    carried.retain(|pos, id| new_valid.contains(&pos) && roster.contains(id));
    let dropped = old.len() - carried.len();

    let reconciled = place_unseated(&carried, new_valid, students);

    debug!(
        removed_seats = old_valid.difference(new_valid).count(),
        added_seats = new_valid.difference(old_valid).count(),
        carried = carried.len(),
        dropped,
        seated = reconciled.len(),
        "Reconciled assignment"
    );

    reconciled
}
