//! Seatmap - adapters and CLI around the seating kernel.
//!
//! The kernel owns every seating rule; this crate only moves data in and out:
//!
//! - `import`: one-student-per-line roster text into `(name, contact)` pairs
//! - `export`: row-major seat listings, CSV and a printable text chart
//! - `store`: a directory of saved layout snapshots
//! - `config`: TOML configuration for defaults and the store location

pub mod config;
pub mod export;
pub mod import;
pub mod store;

pub use config::AppConfig;
pub use export::{Chart, SeatRow, render_chart, seat_rows, to_csv};
pub use import::parse_roster;
pub use store::LayoutStore;
