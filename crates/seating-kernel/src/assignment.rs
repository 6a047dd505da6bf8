//! The seat assignment: a partial, injective map from position to student.
//!
//! Three invariants hold after every operation in this crate:
//! - every key is in the current valid position set,
//! - no student sits in two places,
//! - every value names a student still on the roster.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::grid::Position;
use crate::roster::{Roster, StudentId};
use crate::shaper::ValidPositionSet;

/// A broken assignment invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A seat key is not part of the valid position set.
    InvalidPosition(Position),
    /// The same student occupies two seats.
    DuplicateStudent {
        student: StudentId,
        first: Position,
        second: Position,
    },
    /// A seat refers to a student missing from the roster.
    DanglingStudent { position: Position, student: StudentId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPosition(pos) => write!(f, "seat {} is not a valid position", pos),
            Self::DuplicateStudent {
                student,
                first,
                second,
            } => write!(f, "student {} is seated at both {} and {}", student, first, second),
            Self::DanglingStudent { position, student } => {
                write!(f, "seat {} refers to unknown student {}", position, student)
            }
        }
    }
}

impl std::error::Error for Violation {}

/// Mapping from seat position to the student sitting there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    seats: BTreeMap<Position, StudentId>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn student_at(&self, pos: Position) -> Option<&StudentId> {
        self.seats.get(&pos)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.seats.contains_key(&pos)
    }

    pub fn position_of(&self, id: &StudentId) -> Option<Position> {
        self.seats
            .iter()
            .find_map(|(pos, sid)| (sid == id).then_some(*pos))
    }

    /// Seated students as a set.
    pub fn occupants(&self) -> HashSet<&StudentId> {
        self.seats.values().collect()
    }

    /// Entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &StudentId)> {
        self.seats.iter().map(|(pos, id)| (*pos, id))
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Seat `id` at `pos`.
    ///
    /// Refuses positions outside `valid`, occupied positions, and students
    /// already seated elsewhere. Returns whether the write happened.
    pub fn seat(&mut self, pos: Position, id: StudentId, valid: &ValidPositionSet) -> bool {
        if !valid.contains(&pos) || self.seats.contains_key(&pos) {
            return false;
        }
        if self.position_of(&id).is_some() {
            return false;
        }
        self.seats.insert(pos, id);
        true
    }

    /// Remove whoever sits at `pos`.
    pub fn vacate(&mut self, pos: Position) -> Option<StudentId> {
        self.seats.remove(&pos)
    }

    /// Remove every seat held by `id`. Returns how many were removed.
    pub fn purge(&mut self, id: &StudentId) -> usize {
        let before = self.seats.len();
        self.seats.retain(|_, sid| sid != id);
        before - self.seats.len()
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(Position, &StudentId) -> bool) {
        self.seats.retain(|pos, id| keep(*pos, id));
    }

    /// Exchange the occupants of two positions; either may be empty.
    pub(crate) fn exchange(&mut self, a: Position, b: Position) {
        let at_a = self.seats.remove(&a);
        let at_b = self.seats.remove(&b);
        if let Some(id) = at_a {
            self.seats.insert(b, id);
        }
        if let Some(id) = at_b {
            self.seats.insert(a, id);
        }
    }

    /// Unchecked insert for code paths that have already validated the write.
    pub(crate) fn insert_unchecked(&mut self, pos: Position, id: StudentId) {
        self.seats.insert(pos, id);
    }

    /// Check all three invariants, reporting the first violation found.
    pub fn verify(&self, valid: &ValidPositionSet, roster: &Roster) -> Result<(), Violation> {
        let mut seen: BTreeMap<&StudentId, Position> = BTreeMap::new();
        for (pos, id) in &self.seats {
            if !valid.contains(pos) {
                return Err(Violation::InvalidPosition(*pos));
            }
            if !roster.contains(id) {
                return Err(Violation::DanglingStudent {
                    position: *pos,
                    student: id.clone(),
                });
            }
            if let Some(first) = seen.insert(id, *pos) {
                return Err(Violation::DuplicateStudent {
                    student: id.clone(),
                    first,
                    second: *pos,
                });
            }
        }
        Ok(())
    }
}
