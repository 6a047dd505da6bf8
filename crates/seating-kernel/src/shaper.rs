//! Grid shaping: derive the set of seated positions from bounds and template.

use std::collections::BTreeSet;

use crate::grid::{GridSpec, Position, Template};

/// Positions that currently hold a physical seat.
///
/// A `BTreeSet` iterates in row-major order, which is the order free seats are
/// filled in and the order exports are written in.
pub type ValidPositionSet = BTreeSet<Position>;

/// Compute the valid position set for a grid spec.
pub fn shape(spec: &GridSpec) -> ValidPositionSet {
    shape_cells(spec.rows, spec.cols, spec.template)
}

/// Compute the valid position set for raw bounds.
///
/// Pure and deterministic. Bounds are taken as given; use [`GridSpec::new`]
/// to clamp adapter input first.
pub fn shape_cells(rows: u8, cols: u8, template: Template) -> ValidPositionSet {
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| Position { row, col }))
        .filter(|pos| template.admits(*pos, rows, cols))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(cells: &[(u8, u8)]) -> ValidPositionSet {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_full_covers_every_cell() {
        let valid = shape_cells(3, 4, Template::Full);
        assert_eq!(valid.len(), 12);
    }

    #[test]
    fn test_u_shape_three_by_three() {
        let valid = shape_cells(3, 3, Template::U);
        assert_eq!(
            valid,
            positions(&[(0, 0), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)])
        );
        assert!(!valid.contains(&Position::new(1, 1)));
        assert!(!valid.contains(&Position::new(0, 1)));
    }

    #[test]
    fn test_u_shape_single_row_is_full() {
        // The only row is the back row.
        assert_eq!(shape_cells(1, 5, Template::U).len(), 5);
    }

    #[test]
    fn test_front_rows_takes_first_two_rows() {
        let valid = shape_cells(5, 3, Template::FrontRows);
        assert_eq!(valid.len(), 6);
        assert!(valid.iter().all(|p| p.row < 2));
    }

    #[test]
    fn test_front_rows_single_row_grid() {
        assert_eq!(shape_cells(1, 4, Template::FrontRows).len(), 4);
    }

    #[test]
    fn test_unknown_template_name_shapes_full() {
        let spec = GridSpec::new(2, 2, Template::parse("auditorium"));
        assert_eq!(shape(&spec), shape_cells(2, 2, Template::Full));
    }

    #[test]
    fn test_iteration_is_row_major() {
        let order: Vec<Position> = shape_cells(2, 3, Template::Full).into_iter().collect();
        assert_eq!(
            order,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(1, 2),
            ]
        );
    }
}
