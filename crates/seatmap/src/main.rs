//! Seatmap CLI.
//!
//! Each invocation loads the working layout, applies one operation and writes
//! the layout back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seating_kernel::{LayoutRecord, Outcome, Position, SeatingState, StudentId, Template};
use seatmap::{AppConfig, LayoutStore, parse_roster, render_chart, to_csv};

#[derive(Parser)]
#[command(name = "seatmap")]
#[command(about = "Lay out classroom seats, fill them with students, save and print the plan")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Working layout file
    #[arg(long, short, env = "SEATMAP_LAYOUT", default_value = "seatmap.json")]
    layout: PathBuf,

    /// TOML configuration file
    #[arg(long, short, env = "SEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new, empty layout.
    Init {
        #[arg(long)]
        rows: Option<u32>,
        #[arg(long)]
        cols: Option<u32>,
        /// Template: full, u, front-rows
        #[arg(long)]
        template: Option<String>,
        #[arg(long)]
        seat_size: Option<u32>,
        #[arg(long)]
        gap: Option<u32>,
        /// Overwrite an existing layout file
        #[arg(long)]
        force: bool,
    },

    /// Resize the grid, keeping students where their seat still exists.
    Grid {
        #[arg(long)]
        rows: u32,
        #[arg(long)]
        cols: u32,
        /// Template: full, u, front-rows (default: keep current)
        #[arg(long)]
        template: Option<String>,
    },

    /// Switch the seat template.
    Template {
        /// full, u or front-rows; anything else means full
        name: String,
    },

    /// Change seat size and gap (pixels).
    Geometry {
        #[arg(long)]
        seat_size: u32,
        #[arg(long)]
        gap: u32,
    },

    /// Add one student.
    Add {
        name: String,
        #[arg(long, default_value = "")]
        contact: String,
    },

    /// Import students from a file with one `name[,contact]` per line.
    Import { file: PathBuf },

    /// Rename a student (by id or name).
    Rename { student: String, name: String },

    /// Remove a student (by id or name).
    Remove { student: String },

    /// Seat a student by hand.
    Assign { student: String, row: u8, col: u8 },

    /// Empty a seat.
    Vacate { row: u8, col: u8 },

    /// Reseat everybody at random.
    Randomize {
        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Drag the student at (row, col) by a pixel displacement and drop.
    Drag {
        row: u8,
        col: u8,
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        dx: f64,
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        dy: f64,
    },

    /// Print the seating chart.
    Show {
        #[arg(long, default_value = "Class")]
        title: String,
    },

    /// Export the layout.
    Export {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        #[arg(long, default_value = "Class")]
        title: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Save a snapshot of the layout into the store.
    Save,

    /// List stored snapshots.
    List,

    /// Replace the working layout with a stored snapshot.
    Load { name: String },

    /// Remove all students and seats.
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(cli.config.as_deref())?;
    let store = LayoutStore::new(&config.store_dir);

    match cli.command {
        Commands::Init {
            rows,
            cols,
            template,
            seat_size,
            gap,
            force,
        } => {
            if cli.layout.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    cli.layout.display()
                );
            }
            let mut grid = config.grid.clone();
            grid.rows = rows.unwrap_or(grid.rows);
            grid.cols = cols.unwrap_or(grid.cols);
            grid.seat_size = seat_size.unwrap_or(grid.seat_size);
            grid.gap = gap.unwrap_or(grid.gap);
            if let Some(name) = template {
                grid.template = parse_template(&name);
            }
            let state = SeatingState::with_grid(grid.spec(), grid.geometry());
            write_layout(&cli.layout, &state)?;
            println!(
                "Created {} ({} × {}, {} seats)",
                cli.layout.display(),
                state.grid().rows,
                state.grid().cols,
                state.valid().len()
            );
        }

        Commands::Grid {
            rows,
            cols,
            template,
        } => {
            let mut state = read_layout(&cli.layout, &config)?;
            let template = template
                .as_deref()
                .map(parse_template)
                .unwrap_or(state.grid().template);
            state.apply_grid(rows, cols, template);
            write_layout(&cli.layout, &state)?;
            print_summary(&state);
        }

        Commands::Template { name } => {
            let mut state = read_layout(&cli.layout, &config)?;
            state.set_template(parse_template(&name));
            write_layout(&cli.layout, &state)?;
            print_summary(&state);
        }

        Commands::Geometry { seat_size, gap } => {
            let mut state = read_layout(&cli.layout, &config)?;
            state.set_geometry(seat_size, gap);
            write_layout(&cli.layout, &state)?;
            let geometry = state.geometry();
            println!("Seat size {}px, gap {}px", geometry.seat_size, geometry.gap);
        }

        Commands::Add { name, contact } => {
            let mut state = read_layout(&cli.layout, &config)?;
            let Some(id) = state.add_student(&name, &contact) else {
                bail!("Student name must not be empty");
            };
            write_layout(&cli.layout, &state)?;
            match state.seats().position_of(&id) {
                Some(pos) => println!("Added {} at {}", name.trim(), pos),
                None => println!("Added {} (no free seat)", name.trim()),
            }
        }

        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mut state = read_layout(&cli.layout, &config)?;
            let added = state.import_students(parse_roster(&text));
            write_layout(&cli.layout, &state)?;
            println!("Imported {} students", added.len());
            print_summary(&state);
        }

        Commands::Rename { student, name } => {
            let mut state = read_layout(&cli.layout, &config)?;
            let id = resolve_student(&state, &student)?;
            if !state.rename_student(&id, &name) {
                bail!("Student name must not be empty");
            }
            write_layout(&cli.layout, &state)?;
            println!("Renamed {} to {}", student, name.trim());
        }

        Commands::Remove { student } => {
            let mut state = read_layout(&cli.layout, &config)?;
            let id = resolve_student(&state, &student)?;
            if let Some(removed) = state.remove_student(&id) {
                write_layout(&cli.layout, &state)?;
                println!("Removed {}", removed.name);
            }
        }

        Commands::Assign { student, row, col } => {
            let mut state = read_layout(&cli.layout, &config)?;
            let id = resolve_student(&state, &student)?;
            let pos = Position::new(row, col);
            if !state.assign(&id, pos) {
                bail!("No seat at {} in the current layout", pos);
            }
            write_layout(&cli.layout, &state)?;
            println!("Seated {} at {}", student, pos);
        }

        Commands::Vacate { row, col } => {
            let mut state = read_layout(&cli.layout, &config)?;
            let pos = Position::new(row, col);
            match state.vacate(pos) {
                Some(_) => {
                    write_layout(&cli.layout, &state)?;
                    println!("Seat {} is now empty", pos);
                }
                None => println!("Seat {} was already empty", pos),
            }
        }

        Commands::Randomize { seed } => {
            let mut state = read_layout(&cli.layout, &config)?;
            match seed {
                Some(seed) => state.randomize(&mut ChaCha8Rng::seed_from_u64(seed)),
                None => state.randomize_with_entropy(),
            }
            write_layout(&cli.layout, &state)?;
            print_summary(&state);
        }

        Commands::Drag { row, col, dx, dy } => {
            let mut state = read_layout(&cli.layout, &config)?;
            let source = Position::new(row, col);
            if !state.begin_drag(source) {
                bail!("Nobody is seated at {}", source);
            }
            state.drag_to(dx, dy);
            match state.release_drag() {
                Outcome::Moved { from, to } => {
                    write_layout(&cli.layout, &state)?;
                    println!("Moved {} -> {}", from, to);
                }
                Outcome::Swapped { from, to, .. } => {
                    write_layout(&cli.layout, &state)?;
                    println!("Swapped {} <-> {}", from, to);
                }
                outcome => {
                    warn!(?outcome, "Drop rejected");
                    println!("Seat snapped back to {}", source);
                }
            }
        }

        Commands::Show { title } => {
            let state = read_layout(&cli.layout, &config)?;
            print!("{}", render_chart(&state, &title));
        }

        Commands::Export {
            format,
            title,
            output,
        } => {
            let state = read_layout(&cli.layout, &config)?;
            let content = match format {
                ExportFormat::Csv => to_csv(&state),
                ExportFormat::Json => LayoutRecord::from(&state).to_json_pretty()?,
                ExportFormat::Text => render_chart(&state, &title),
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Save => {
            let state = read_layout(&cli.layout, &config)?;
            let name = store.save(&LayoutRecord::from(&state))?;
            println!("Saved as {}", name);
        }

        Commands::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No saved layouts in {}", store.dir().display());
            }
            for name in names {
                println!("{}", name);
            }
        }

        Commands::Load { name } => {
            let state = SeatingState::from_record(store.load(&name)?);
            write_layout(&cli.layout, &state)?;
            info!(file = %name, "Layout loaded");
            print_summary(&state);
        }

        Commands::Clear => {
            let mut state = read_layout(&cli.layout, &config)?;
            state.clear();
            write_layout(&cli.layout, &state)?;
            println!("Cleared all students");
        }
    }

    Ok(())
}

fn parse_template(name: &str) -> Template {
    let template = Template::parse(name);
    if template.name() != name {
        warn!(%name, fallback = %template, "Unknown template");
    }
    template
}

/// Load the working layout, or start from the configured defaults.
fn read_layout(path: &Path, config: &AppConfig) -> Result<SeatingState> {
    if !path.exists() {
        info!(path = %path.display(), "No layout file yet, starting empty");
        return Ok(SeatingState::new(&config.seating()));
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let record = LayoutRecord::from_json(&raw)
        .with_context(|| format!("Invalid layout file {}", path.display()))?;
    Ok(SeatingState::from_record(record))
}

fn write_layout(path: &Path, state: &SeatingState) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = LayoutRecord::from(state).to_json_pretty()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Find a student by exact id, then by name.
fn resolve_student(state: &SeatingState, query: &str) -> Result<StudentId> {
    let id = StudentId::from(query.trim());
    if state.roster().contains(&id) {
        return Ok(id);
    }
    match state.roster().find_by_name(query) {
        Some(student) => Ok(student.id.clone()),
        None => bail!("No student matches {:?}", query),
    }
}

fn print_summary(state: &SeatingState) {
    let grid = state.grid();
    println!(
        "{} × {} ({}), {} seats, {} seated, {} unseated",
        grid.rows,
        grid.cols,
        grid.template,
        state.valid().len(),
        state.seats().len(),
        state.unseated().len()
    );
}
