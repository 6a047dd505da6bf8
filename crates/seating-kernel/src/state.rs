//! The seating state value threaded through every operation.
//!
//! `SeatingState` owns the grid, the roster, the derived valid position set and
//! the assignment. Each public mutator is one atomic step: it computes the new
//! assignment from working copies and swaps it in only when complete, so any
//! reader sees either the previous state or the next one.

use rand::Rng;
use tracing::{debug, info};

use crate::allocator::{place_random, place_unseated};
use crate::assignment::{Assignment, Violation};
use crate::config::SeatingConfig;
use crate::grid::{GridSpec, Position, SeatGeometry, Template};
use crate::reconcile::reconcile;
use crate::relocation::{GestureState, Outcome, RelocationResolver};
use crate::roster::{Roster, Student, StudentId};
use crate::shaper::{ValidPositionSet, shape};

#[derive(Debug, Clone)]
pub struct SeatingState {
    grid: GridSpec,
    geometry: SeatGeometry,
    roster: Roster,
    valid: ValidPositionSet,
    seats: Assignment,
    gesture: RelocationResolver,
}

impl SeatingState {
    /// Empty layout using the configured grid defaults.
    pub fn new(config: &SeatingConfig) -> Self {
        Self::with_grid(config.grid.spec(), config.grid.geometry())
    }

    pub fn with_grid(grid: GridSpec, geometry: SeatGeometry) -> Self {
        Self {
            grid,
            geometry,
            roster: Roster::new(),
            valid: shape(&grid),
            seats: Assignment::new(),
            gesture: RelocationResolver::new(),
        }
    }

    /// Assemble a state from already-normalized parts.
    pub(crate) fn from_parts(
        grid: GridSpec,
        geometry: SeatGeometry,
        roster: Roster,
        seats: Assignment,
    ) -> Self {
        Self {
            grid,
            geometry,
            roster,
            valid: shape(&grid),
            seats,
            gesture: RelocationResolver::new(),
        }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn geometry(&self) -> &SeatGeometry {
        &self.geometry
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn valid(&self) -> &ValidPositionSet {
        &self.valid
    }

    pub fn seats(&self) -> &Assignment {
        &self.seats
    }

    pub fn gesture(&self) -> &GestureState {
        self.gesture.state()
    }

    /// The student seated at `pos`, if any.
    pub fn student_at(&self, pos: Position) -> Option<&Student> {
        self.seats
            .student_at(pos)
            .and_then(|id| self.roster.get(id))
    }

    /// Roster members without a seat, in roster order.
    pub fn unseated(&self) -> Vec<&Student> {
        let seated = self.seats.occupants();
        self.roster
            .iter()
            .filter(|s| !seated.contains(&s.id))
            .collect()
    }

    /// Check the assignment invariants against the current grid and roster.
    pub fn verify(&self) -> Result<(), Violation> {
        self.seats.verify(&self.valid, &self.roster)
    }

    /// Resize the grid and/or change template, keeping surviving placements.
    pub fn apply_grid(&mut self, rows: u32, cols: u32, template: Template) {
        self.reshape(GridSpec::new(rows, cols, template));
    }

    /// Change only the template.
    pub fn set_template(&mut self, template: Template) {
        let grid = GridSpec {
            template,
            ..self.grid
        };
        self.reshape(grid);
    }

    /// Change seat size and gap. Seating is unaffected.
    pub fn set_geometry(&mut self, seat_size: u32, gap: u32) {
        self.geometry = SeatGeometry::new(seat_size, gap);
    }

    fn reshape(&mut self, grid: GridSpec) {
        let valid = shape(&grid);
        let seats = reconcile(&self.seats, &self.valid, &valid, self.roster.as_slice());
        info!(
            rows = grid.rows,
            cols = grid.cols,
            template = %grid.template,
            seats = valid.len(),
            seated = seats.len(),
            "Grid applied"
        );
        self.abort_gesture();
        self.grid = grid;
        self.valid = valid;
        self.seats = seats;
    }

    /// Add a student and seat them in the first free seat, if any.
    pub fn add_student(&mut self, name: &str, contact: &str) -> Option<StudentId> {
        let id = self.roster.add(name, contact)?;
        self.fill_free_seats();
        debug!(%id, seated = self.seats.position_of(&id).is_some(), "Student added");
        Some(id)
    }

    /// Bulk import. Blank names are skipped; the new students fill free
    /// seats in import order without moving anybody already seated.
    pub fn import_students<I, N, C>(&mut self, entries: I) -> Vec<StudentId>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let added: Vec<StudentId> = entries
            .into_iter()
            .filter_map(|(name, contact)| self.roster.add(name.as_ref(), contact.as_ref()))
            .collect();
        self.fill_free_seats();
        info!(
            imported = added.len(),
            unseated = self.unseated().len(),
            "Students imported"
        );
        added
    }

    pub fn rename_student(&mut self, id: &StudentId, name: &str) -> bool {
        self.roster.rename(id, name)
    }

    /// Remove a student and free their seat.
    pub fn remove_student(&mut self, id: &StudentId) -> Option<Student> {
        let student = self.roster.remove(id)?;
        let freed = self.seats.purge(id);
        self.abort_gesture();
        debug!(%id, freed, "Student removed");
        Some(student)
    }

    /// Seat `id` at `pos` by hand.
    ///
    /// The student leaves any previous seat; a current occupant of `pos` is
    /// unseated. Returns false (and changes nothing) for unknown students or
    /// positions without a seat.
    pub fn assign(&mut self, id: &StudentId, pos: Position) -> bool {
        if !self.roster.contains(id) || !self.valid.contains(&pos) {
            return false;
        }
        let mut seats = self.seats.clone();
        seats.purge(id);
        let displaced = seats.vacate(pos);
        if !seats.seat(pos, id.clone(), &self.valid) {
            return false;
        }
        debug!(%id, %pos, displaced = ?displaced, "Student assigned");
        self.abort_gesture();
        self.seats = seats;
        true
    }

    /// Unseat whoever sits at `pos`.
    pub fn vacate(&mut self, pos: Position) -> Option<StudentId> {
        let id = self.seats.vacate(pos)?;
        self.abort_gesture();
        Some(id)
    }

    /// Seat everybody who is not seated yet.
    pub fn fill_free_seats(&mut self) {
        self.seats = place_unseated(&self.seats, &self.valid, self.roster.as_slice());
    }

    /// Reseat everybody at random using `rng`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.abort_gesture();
        self.seats = place_random(&self.valid, self.roster.as_slice(), rng);
        info!(seated = self.seats.len(), "Seating randomized");
    }

    /// Reseat everybody at random from the thread-local entropy source.
    pub fn randomize_with_entropy(&mut self) {
        self.randomize(&mut rand::rng());
    }

    /// Drop every student and every placement. The grid is kept.
    pub fn clear(&mut self) {
        self.abort_gesture();
        self.roster.clear();
        self.seats = Assignment::new();
        info!("Layout cleared");
    }

    /// Start dragging the student at `pos`.
    pub fn begin_drag(&mut self, pos: Position) -> bool {
        self.gesture.press(pos, &self.seats, &self.valid)
    }

    /// Update the pointer displacement since the drag began.
    pub fn drag_to(&mut self, dx: f64, dy: f64) -> bool {
        self.gesture.drag_to(dx, dy)
    }

    /// Drop the dragged student and commit the resulting move or swap.
    pub fn release_drag(&mut self) -> Outcome {
        let (seats, outcome) =
            self.gesture
                .release(&self.seats, &self.valid, &self.grid, &self.geometry);
        if outcome.is_mutation() {
            self.seats = seats;
        }
        outcome
    }

    /// Abort the drag; seating stays as it was before the press.
    pub fn cancel_drag(&mut self) -> Outcome {
        self.gesture.cancel()
    }

    fn abort_gesture(&mut self) {
        if self.gesture.is_dragging() {
            self.gesture.cancel();
        }
    }
}

impl Default for SeatingState {
    fn default() -> Self {
        Self::new(&SeatingConfig::default())
    }
}
