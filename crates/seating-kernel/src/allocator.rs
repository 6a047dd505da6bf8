//! Placement of students into free seats.
//!
//! `place_unseated` is deterministic: free seats in row-major order are paired
//! with unseated students in roster order. `place_random` discards the current
//! assignment and deals students onto a shuffled seat sequence.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::assignment::Assignment;
use crate::grid::Position;
use crate::roster::{Student, StudentId};
use crate::shaper::ValidPositionSet;

/// Seat every unseated student in the first free valid seats, leaving existing
/// placements untouched. Students beyond capacity stay unseated; a repeated
/// id in `students` is seated once.
pub fn place_unseated(
    assignment: &Assignment,
    valid: &ValidPositionSet,
    students: &[Student],
) -> Assignment {
    let mut placed = assignment.clone();

    let free: Vec<Position> = valid
        .iter()
        .copied()
        .filter(|pos| !assignment.is_occupied(*pos))
        .collect();

    let mut seated: HashSet<&StudentId> = assignment.occupants();
    let remaining = students.iter().filter(|s| seated.insert(&s.id));

    let mut filled = 0;
    for (pos, student) in free.iter().zip(remaining) {
        placed.insert_unchecked(*pos, student.id.clone());
        filled += 1;
    }

    debug!(
        free = free.len(),
        filled,
        unseated = students.len().saturating_sub(placed.len()),
        "Placed unseated students"
    );

    placed
}

/// Deal students in roster order onto a uniformly shuffled sequence of the
/// valid seats. The previous assignment is not consulted.
///
/// At most `min(students, seats)` students are seated. Repeated ids are dealt
/// one seat.
pub fn place_random<R: Rng + ?Sized>(
    valid: &ValidPositionSet,
    students: &[Student],
    rng: &mut R,
) -> Assignment {
    let mut cells: Vec<Position> = valid.iter().copied().collect();
    cells.shuffle(rng);

    let mut dealt: HashSet<&StudentId> = HashSet::new();
    let distinct = students.iter().filter(|s| dealt.insert(&s.id));

    let mut placed = Assignment::new();
    for (pos, student) in cells.into_iter().zip(distinct) {
        placed.insert_unchecked(pos, student.id.clone());
    }

    debug!(
        seats = valid.len(),
        students = students.len(),
        seated = placed.len(),
        "Randomized seating"
    );

    placed
}
