//! Grid types: positions, templates, grid bounds and seat geometry.
//!
//! Positions are never stored on their own; they are derived from the grid
//! bounds and used as map keys through their canonical `"{row}_{col}"` form.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Smallest number of rows or columns a grid may have.
pub const MIN_EXTENT: u8 = 1;
/// Largest number of rows or columns a grid may have.
pub const MAX_EXTENT: u8 = 30;

/// Seat edge length bounds (pixels).
pub const MIN_SEAT_SIZE: u16 = 30;
pub const MAX_SEAT_SIZE: u16 = 120;

/// Gap between neighbouring seats (pixels).
pub const MIN_GAP: u16 = 0;
pub const MAX_GAP: u16 = 40;

/// A (row, column) coordinate on the grid.
///
/// The derived ordering compares `row` first, then `col`, which is the
/// row-major reading order used for filling free seats and for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Canonical map key, e.g. `"2_5"`.
    pub fn key(&self) -> String {
        self.to_string()
    }

}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((row, col)) = s.split_once('_') else {
            bail!("seat key {:?} is not of the form row_col", s);
        };
        let row = row
            .parse::<u8>()
            .with_context(|| format!("invalid row in seat key {:?}", s))?;
        let col = col
            .parse::<u8>()
            .with_context(|| format!("invalid column in seat key {:?}", s))?;
        Ok(Self { row, col })
    }
}

/// Named rule deciding which cells of the grid hold a physical seat.
///
/// Unknown names map to [`Template::Full`]; parsing and deserialization
/// never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Template {
    /// Every cell is a seat.
    #[default]
    Full,
    /// Left column, right column and back row; open towards row 0.
    U,
    /// Only the first two rows.
    FrontRows,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Full, Template::U, Template::FrontRows];

    /// Resolve a template name, falling back to `Full` for anything unknown.
    ///
    /// Names match exactly; `"U"` or `" u "` are unknown.
    pub fn parse(name: &str) -> Self {
        match name {
            "full" => Self::Full,
            "u" => Self::U,
            "front-rows" => Self::FrontRows,
            _ => Self::Full,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::U => "u",
            Self::FrontRows => "front-rows",
        }
    }

    /// Whether `pos` holds a seat on a `rows × cols` grid under this template.
    ///
    /// Callers are expected to pass in-bounds positions.
    pub fn admits(&self, pos: Position, rows: u8, cols: u8) -> bool {
        match self {
            Self::Full => true,
            Self::U => pos.col == 0 || pos.col + 1 == cols || pos.row + 1 == rows,
            Self::FrontRows => pos.row < rows.min(2),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Template {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.name().to_string()
    }
}

/// Grid bounds plus template. Changing any field requires reshaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u8,
    pub cols: u8,
    pub template: Template,
}

impl GridSpec {
    /// Build a grid spec, clamping rows and columns into `[1, 30]`.
    pub fn new(rows: u32, cols: u32, template: Template) -> Self {
        Self {
            rows: clamp_extent(rows),
            cols: clamp_extent(cols),
            template,
        }
    }

    /// All in-bounds positions in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position { row, col }))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(4, 6, Template::Full)
    }
}

fn clamp_extent(n: u32) -> u8 {
    n.clamp(MIN_EXTENT as u32, MAX_EXTENT as u32) as u8
}

/// Pixel geometry of the rendered grid. Only relocation reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatGeometry {
    pub seat_size: u16,
    pub gap: u16,
}

impl SeatGeometry {
    /// Build a geometry, clamping seat size into `[30, 120]` and gap into `[0, 40]`.
    pub fn new(seat_size: u32, gap: u32) -> Self {
        Self {
            seat_size: seat_size.clamp(MIN_SEAT_SIZE as u32, MAX_SEAT_SIZE as u32) as u16,
            gap: gap.clamp(MIN_GAP as u32, MAX_GAP as u32) as u16,
        }
    }

    /// Distance between the origins of neighbouring cells.
    pub fn stride(&self) -> f64 {
        f64::from(self.seat_size) + f64::from(self.gap)
    }

    /// Pixel origin `(x, y)` of the cell at `pos`.
    pub fn origin(&self, pos: Position) -> (f64, f64) {
        let stride = self.stride();
        (f64::from(pos.col) * stride, f64::from(pos.row) * stride)
    }
}

impl Default for SeatGeometry {
    fn default() -> Self {
        Self::new(64, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_key_roundtrip() {
        let pos = Position::new(12, 3);
        assert_eq!(pos.key(), "12_3");
        assert_eq!("12_3".parse::<Position>().unwrap(), pos);
    }

    #[test]
    fn test_position_rejects_malformed_keys() {
        assert!("12".parse::<Position>().is_err());
        assert!("a_1".parse::<Position>().is_err());
        assert!("1_-1".parse::<Position>().is_err());
        assert!("1_2_3".parse::<Position>().is_err());
    }

    #[test]
    fn test_positions_order_row_major() {
        let mut cells = vec![
            Position::new(1, 0),
            Position::new(0, 2),
            Position::new(0, 1),
            Position::new(1, 1),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_template_parse_falls_back_to_full() {
        assert_eq!(Template::parse("u"), Template::U);
        assert_eq!(Template::parse("front-rows"), Template::FrontRows);
        assert_eq!(Template::parse("U"), Template::Full);
        assert_eq!(Template::parse(" u "), Template::Full);
        assert_eq!(Template::parse("Front-Rows"), Template::Full);
        assert_eq!(Template::parse("horseshoe"), Template::Full);
        assert_eq!(Template::parse(""), Template::Full);
    }

    #[test]
    fn test_template_serde_unknown_name() {
        let t: Template = serde_json::from_str("\"circle\"").unwrap();
        assert_eq!(t, Template::Full);
        let t: Template = serde_json::from_str("\"FRONT-ROWS\"").unwrap();
        assert_eq!(t, Template::Full);
        assert_eq!(serde_json::to_string(&Template::FrontRows).unwrap(), "\"front-rows\"");
    }

    #[test]
    fn test_grid_spec_clamps_bounds() {
        let spec = GridSpec::new(0, 99, Template::U);
        assert_eq!((spec.rows, spec.cols), (1, 30));
        assert_eq!(spec.cells().count(), 30);
    }

    #[test]
    fn test_geometry_clamps_and_stride() {
        let geo = SeatGeometry::new(10, 100);
        assert_eq!(geo.seat_size, 30);
        assert_eq!(geo.gap, 40);
        assert_eq!(geo.stride(), 70.0);
        assert_eq!(geo.origin(Position::new(2, 1)), (70.0, 140.0));
    }
}
