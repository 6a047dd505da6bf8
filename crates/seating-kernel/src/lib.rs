//! Seating Kernel: a consistency engine for classroom seat assignment.
//!
//! The kernel keeps a mapping from grid positions to students valid across
//! three kinds of disruption:
//!
//! 1. **Reshape**: grid size or template changes recompute the set of seats
//!    and reconcile the assignment with it ([`reconcile`]).
//! 2. **Bulk import**: new students fill free seats in reading order without
//!    moving anybody ([`place_unseated`]), or everybody is dealt out at random
//!    ([`place_random`]).
//! 3. **Drag relocation**: a pointer displacement snaps to a cell and becomes
//!    a move or a swap ([`RelocationResolver`]).
//!
//! [`SeatingState`] threads these through one owned value. Rendering, file
//! formats and storage live in adapters outside this crate.

pub mod allocator;
pub mod assignment;
pub mod config;
pub mod grid;
pub mod layout;
pub mod reconcile;
pub mod relocation;
pub mod roster;
pub mod shaper;
pub mod state;

pub use allocator::{place_random, place_unseated};
pub use assignment::{Assignment, Violation};
pub use config::{GridDefaults, SeatingConfig};
pub use grid::{GridSpec, Position, SeatGeometry, Template};
pub use layout::LayoutRecord;
pub use reconcile::reconcile;
pub use relocation::{
    Displacement, GestureState, Outcome, RejectReason, RelocationResolver, relocate, resolve_drop,
    snap,
};
pub use roster::{Roster, Student, StudentId};
pub use shaper::{ValidPositionSet, shape, shape_cells};
pub use state::SeatingState;
