//! Export adapters: row-major seat listings, CSV and a printable text chart.

use std::fmt;

use seating_kernel::{Position, SeatingState};

/// Widest cell in the printed chart, in characters.
const MAX_CELL_WIDTH: usize = 16;
const MIN_CELL_WIDTH: usize = 5;

/// Marker for grid cells without a seat.
const NO_SEAT: &str = "·";

/// One valid seat and whoever sits there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRow {
    pub key: String,
    pub row: u8,
    pub col: u8,
    pub name: String,
    pub contact: String,
}

/// Every valid seat in row-major order. Empty seats have blank name/contact.
pub fn seat_rows(state: &SeatingState) -> Vec<SeatRow> {
    state
        .valid()
        .iter()
        .map(|pos| {
            let student = state.student_at(*pos);
            SeatRow {
                key: pos.key(),
                row: pos.row,
                col: pos.col,
                name: student.map(|s| s.name.clone()).unwrap_or_default(),
                contact: student.map(|s| s.contact.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

/// CSV with header `seatKey,row,col,name,email`, every cell quoted, CRLF lines.
pub fn to_csv(state: &SeatingState) -> String {
    let mut lines = vec![csv_line(&["seatKey", "row", "col", "name", "email"])];
    for seat in seat_rows(state) {
        let (row, col) = (seat.row.to_string(), seat.col.to_string());
        lines.push(csv_line(&[
            seat.key.as_str(),
            row.as_str(),
            col.as_str(),
            seat.name.as_str(),
            seat.contact.as_str(),
        ]));
    }
    lines.join("\r\n")
}

fn csv_line(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Plain-text seating chart, front row first.
///
/// Each grid row is drawn as a band of two lines: the student's name, then
/// their contact.
pub struct Chart<'a> {
    state: &'a SeatingState,
    title: &'a str,
}

impl<'a> Chart<'a> {
    pub fn new(state: &'a SeatingState, title: &'a str) -> Self {
        Self { state, title }
    }

    fn cell_width(&self) -> usize {
        self.state
            .roster()
            .iter()
            .flat_map(|s| [s.name.chars().count(), s.contact.chars().count()])
            .max()
            .unwrap_or(0)
            .clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH)
    }

    /// Name and contact shown in the cell at `pos`.
    fn labels(&self, pos: Position, width: usize) -> (String, String) {
        if !self.state.valid().contains(&pos) {
            return (NO_SEAT.to_string(), String::new());
        }
        match self.state.student_at(pos) {
            Some(student) => (
                truncate(&student.name, width),
                truncate(&student.contact, width),
            ),
            None => (String::new(), String::new()),
        }
    }
}

impl fmt::Display for Chart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.state.grid();
        let width = self.cell_width();

        writeln!(
            f,
            "{} – seating plan ({} × {})",
            self.title, grid.rows, grid.cols
        )?;
        writeln!(f)?;

        let border = format!(
            "+{}",
            format!("{}+", "-".repeat(width + 2)).repeat(grid.cols as usize)
        );
        writeln!(f, "{}", border)?;

        for row in 0..grid.rows {
            let cells: Vec<(String, String)> = (0..grid.cols)
                .map(|col| self.labels(Position::new(row, col), width))
                .collect();
            for line in [0, 1] {
                write!(f, "|")?;
                for (name, contact) in &cells {
                    let label = if line == 0 { name } else { contact };
                    let pad = width - label.chars().count();
                    write!(f, " {}{} |", label, " ".repeat(pad))?;
                }
                writeln!(f)?;
            }
            writeln!(f, "{}", border)?;
        }

        let unseated: Vec<&str> = self
            .state
            .unseated()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        if !unseated.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unseated: {}", unseated.join(", "))?;
        }
        Ok(())
    }
}

/// Render the seating chart to a string.
pub fn render_chart(state: &SeatingState, title: &str) -> String {
    Chart::new(state, title).to_string()
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width - 1).collect();
    short.push('…');
    short
}
