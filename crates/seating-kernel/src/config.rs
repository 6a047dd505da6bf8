//! Configuration types for the seating kernel.

use serde::Deserialize;

use crate::grid::{GridSpec, SeatGeometry, Template};

/// Top-level seating configuration.
///
/// Loaded from TOML/JSON at runtime; every field has a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeatingConfig {
    /// Grid used for a fresh layout.
    pub grid: GridDefaults,
}

/// Initial grid settings. Values are clamped when applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridDefaults {
    pub rows: u32,
    pub cols: u32,
    pub seat_size: u32,
    pub gap: u32,
    pub template: Template,
}

impl GridDefaults {
    pub fn spec(&self) -> GridSpec {
        GridSpec::new(self.rows, self.cols, self.template)
    }

    pub fn geometry(&self) -> SeatGeometry {
        SeatGeometry::new(self.seat_size, self.gap)
    }
}

impl Default for GridDefaults {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 6,
            seat_size: 64,
            gap: 16,
            template: Template::Full,
        }
    }
}
