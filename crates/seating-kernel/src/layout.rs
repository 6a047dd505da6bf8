//! Layout snapshots exchanged with persistence adapters.
//!
//! A record is an opaque snapshot as far as the kernel is concerned. Loading
//! one recomputes the valid position set and drops every seat entry that would
//! break an assignment invariant before the state is handed out.

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::assignment::Assignment;
use crate::grid::{GridSpec, Position, SeatGeometry, Template};
use crate::roster::{Roster, Student, StudentId};
use crate::shaper::shape;
use crate::state::SeatingState;

/// Stored layout: grid settings, students and `"row_col" -> student id` seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub rows: u32,
    pub cols: u32,
    pub seat_size: u32,
    pub gap: u32,
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub seats: BTreeMap<String, StudentId>,
}

impl LayoutRecord {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse layout record")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize layout record")
    }
}

impl From<&SeatingState> for LayoutRecord {
    fn from(state: &SeatingState) -> Self {
        let grid = state.grid();
        let geometry = state.geometry();
        Self {
            rows: u32::from(grid.rows),
            cols: u32::from(grid.cols),
            seat_size: u32::from(geometry.seat_size),
            gap: u32::from(geometry.gap),
            template: grid.template,
            students: state.roster().iter().cloned().collect(),
            seats: state
                .seats()
                .iter()
                .map(|(pos, id)| (pos.key(), id.clone()))
                .collect(),
        }
    }
}

impl SeatingState {
    /// Rebuild a state from a stored record.
    ///
    /// Never fails: bounds are clamped and seat entries with malformed keys,
    /// positions without a seat, unknown students or repeated students are
    /// dropped with a warning.
    pub fn from_record(record: LayoutRecord) -> Self {
        let grid = GridSpec::new(record.rows, record.cols, record.template);
        let geometry = SeatGeometry::new(record.seat_size, record.gap);
        let valid = shape(&grid);
        let roster: Roster = record.students.into_iter().collect();

        let mut entries: Vec<(Position, StudentId)> = Vec::with_capacity(record.seats.len());
        for (key, id) in record.seats {
            match key.parse::<Position>() {
                Ok(pos) => entries.push((pos, id)),
                Err(err) => warn!(%key, %err, "Dropping seat with malformed key"),
            }
        }
        // Stored keys sort lexically ("10_0" < "2_0"); resolve duplicates in
        // reading order instead.
        entries.sort_by_key(|(pos, _)| *pos);

        let mut seats = Assignment::new();
        let mut seated: HashSet<StudentId> = HashSet::new();
        for (pos, id) in entries {
            if !valid.contains(&pos) {
                warn!(%pos, %id, "Dropping seat outside the current grid");
            } else if !roster.contains(&id) {
                warn!(%pos, %id, "Dropping seat for unknown student");
            } else if !seated.insert(id.clone()) {
                warn!(%pos, %id, "Dropping repeated seat for student");
            } else {
                seats.seat(pos, id, &valid);
            }
        }

        SeatingState::from_parts(grid, geometry, roster, seats)
    }
}
