//! Drag-and-drop relocation of a seated student.
//!
//! A gesture runs `Idle -> Dragging -> Resolved`. It can only start on an
//! occupied valid seat. On release the pointer displacement is snapped to the
//! nearest cell and turned into a move (empty target) or a swap (occupied
//! target). Dropping outside a seat, on the source itself, or cancelling the
//! gesture leaves the assignment untouched.

use tracing::{debug, trace};

use crate::assignment::Assignment;
use crate::grid::{GridSpec, Position, SeatGeometry};
use crate::roster::StudentId;
use crate::shaper::ValidPositionSet;

/// Pointer displacement in pixels, accumulated since the press.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Why a drop left the assignment unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The snapped target cell has no seat.
    NoSeat(Position),
    /// The source seat is empty or no longer valid.
    EmptySource(Position),
    /// The input system aborted the gesture.
    Cancelled,
    /// Release arrived without an active drag.
    NotDragging,
    /// The displacement was not a finite number.
    BadDisplacement,
}

/// Terminal result of one gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The student moved into an empty seat; the source is now empty.
    Moved { from: Position, to: Position },
    /// The student traded seats with `displaced`.
    Swapped {
        from: Position,
        to: Position,
        displaced: StudentId,
    },
    /// Dropped back onto the source seat.
    Unchanged(Position),
    Rejected(RejectReason),
}

impl Outcome {
    /// Whether the assignment was modified.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Moved { .. } | Self::Swapped { .. })
    }
}

/// State of the gesture machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        source: Position,
        displacement: Displacement,
    },
    Resolved(Outcome),
}

/// Snap a drop to a grid cell.
///
/// The seat's pixel origin plus the displacement is divided by the cell stride,
/// rounded to the nearest cell and clamped into the grid. Returns `None` for
/// non-finite displacements.
pub fn snap(
    source: Position,
    displacement: Displacement,
    grid: &GridSpec,
    geometry: &SeatGeometry,
) -> Option<Position> {
    if !displacement.dx.is_finite() || !displacement.dy.is_finite() {
        return None;
    }
    let stride = geometry.stride();
    let (x, y) = geometry.origin(source);

    let col = ((x + displacement.dx) / stride).round();
    let row = ((y + displacement.dy) / stride).round();

    let col = col.clamp(0.0, f64::from(grid.cols.saturating_sub(1)));
    let row = row.clamp(0.0, f64::from(grid.rows.saturating_sub(1)));

    Some(Position::new(row as u8, col as u8))
}

/// Move or swap the student at `source` onto `target`.
///
/// Returns the new assignment and what happened. Rejections return an
/// unchanged copy.
pub fn relocate(
    assignment: &Assignment,
    valid: &ValidPositionSet,
    source: Position,
    target: Position,
) -> (Assignment, Outcome) {
    if !valid.contains(&source) || !assignment.is_occupied(source) {
        return (
            assignment.clone(),
            Outcome::Rejected(RejectReason::EmptySource(source)),
        );
    }
    if !valid.contains(&target) {
        return (
            assignment.clone(),
            Outcome::Rejected(RejectReason::NoSeat(target)),
        );
    }
    if source == target {
        return (assignment.clone(), Outcome::Unchanged(source));
    }

    let displaced = assignment.student_at(target).cloned();
    let mut next = assignment.clone();
    next.exchange(source, target);

    let outcome = match displaced {
        None => Outcome::Moved {
            from: source,
            to: target,
        },
        Some(displaced) => Outcome::Swapped {
            from: source,
            to: target,
            displaced,
        },
    };
    (next, outcome)
}

/// Snap a drop and apply it in one step.
pub fn resolve_drop(
    assignment: &Assignment,
    valid: &ValidPositionSet,
    grid: &GridSpec,
    geometry: &SeatGeometry,
    source: Position,
    displacement: Displacement,
) -> (Assignment, Outcome) {
    match snap(source, displacement, grid, geometry) {
        Some(target) => relocate(assignment, valid, source, target),
        None => (
            assignment.clone(),
            Outcome::Rejected(RejectReason::BadDisplacement),
        ),
    }
}

/// Drives one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct RelocationResolver {
    state: GestureState,
}

impl RelocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Start a gesture on `source`.
    ///
    /// Refused (state unchanged) if a drag is already running or if `source`
    /// is not an occupied valid seat.
    pub fn press(
        &mut self,
        source: Position,
        assignment: &Assignment,
        valid: &ValidPositionSet,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        if !valid.contains(&source) || !assignment.is_occupied(source) {
            trace!(%source, "Drag refused on empty or missing seat");
            return false;
        }
        self.state = GestureState::Dragging {
            source,
            displacement: Displacement::default(),
        };
        true
    }

    /// Record the pointer displacement since the press.
    pub fn drag_to(&mut self, dx: f64, dy: f64) -> bool {
        match &mut self.state {
            GestureState::Dragging { displacement, .. } => {
                *displacement = Displacement::new(dx, dy);
                true
            }
            _ => false,
        }
    }

    /// Finish the gesture and compute the resulting assignment.
    pub fn release(
        &mut self,
        assignment: &Assignment,
        valid: &ValidPositionSet,
        grid: &GridSpec,
        geometry: &SeatGeometry,
    ) -> (Assignment, Outcome) {
        let GestureState::Dragging {
            source,
            displacement,
        } = self.state
        else {
            return (
                assignment.clone(),
                Outcome::Rejected(RejectReason::NotDragging),
            );
        };

        let (next, outcome) =
            resolve_drop(assignment, valid, grid, geometry, source, displacement);
        debug!(%source, ?displacement, ?outcome, "Drag released");
        self.state = GestureState::Resolved(outcome.clone());
        (next, outcome)
    }

    /// Abort the running gesture. The caller keeps its pre-drag assignment.
    pub fn cancel(&mut self) -> Outcome {
        if self.is_dragging() {
            debug!("Drag cancelled");
            self.state = GestureState::Idle;
            Outcome::Rejected(RejectReason::Cancelled)
        } else {
            Outcome::Rejected(RejectReason::NotDragging)
        }
    }
}
