//! Directory-backed store for layout snapshots.
//!
//! Each save writes a new file named `seatmap_<timestamp>_<random>.json`;
//! nothing is ever overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use rand::Rng;
use seating_kernel::LayoutRecord;
use tracing::{debug, info};

pub struct LayoutStore {
    dir: PathBuf,
}

impl LayoutStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `record` under a fresh name and return that name.
    pub fn save(&self, record: &LayoutRecord) -> Result<String> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create store {}", self.dir.display()))?;

        let name = format!(
            "seatmap_{}_{:08x}.json",
            Local::now().format("%Y%m%d_%H%M%S"),
            rand::rng().random::<u32>()
        );
        let path = self.dir.join(&name);
        fs::write(&path, record.to_json_pretty()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(file = %name, students = record.students.len(), "Layout saved");
        Ok(name)
    }

    /// Names of stored layouts, sorted. A missing directory is an empty store.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read store {}", self.dir.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.to_lowercase().ends_with(".json") {
                names.push(name);
            }
        }
        names.sort();
        debug!(count = names.len(), "Listed stored layouts");
        Ok(names)
    }

    /// Load a stored layout. Only the final component of `name` is used.
    pub fn load(&self, name: &str) -> Result<LayoutRecord> {
        let Some(file) = Path::new(name).file_name() else {
            bail!("Invalid layout name {:?}", name);
        };
        let path = self.dir.join(file);
        if !path.is_file() {
            bail!("Layout {:?} not found in {}", name, self.dir.display());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        LayoutRecord::from_json(&raw).with_context(|| format!("Corrupt layout {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seating_kernel::{GridSpec, SeatGeometry, SeatingState, Template};

    fn record() -> LayoutRecord {
        let mut state =
            SeatingState::with_grid(GridSpec::new(2, 2, Template::Full), SeatGeometry::default());
        state.import_students(vec![("Ana", "a@x"), ("Ben", "")]);
        LayoutRecord::from(&state)
    }

    #[test]
    fn test_save_list_load() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LayoutStore::new(tmp.path().join("plans"));
        assert!(store.list().unwrap().is_empty());

        let name = store.save(&record()).unwrap();
        assert!(name.starts_with("seatmap_") && name.ends_with(".json"));
        assert_eq!(store.list().unwrap(), vec![name]);
    }

    #[test]
    fn test_load_roundtrips_content() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LayoutStore::new(tmp.path());
        let original = record();

        let name = store.save(&original).unwrap();
        assert_eq!(store.load(&name).unwrap(), original);
    }

    #[test]
    fn test_load_strips_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LayoutStore::new(tmp.path().join("inner"));
        let name = store.save(&record()).unwrap();

        let sneaky = format!("../../{}", name);
        assert!(store.load(&sneaky).is_ok());
        fs::write(tmp.path().join("outside.json"), "{}").unwrap();
        assert!(store.load("../outside.json").is_err());
    }

    #[test]
    fn test_list_ignores_other_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.JSON"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("dir.json")).unwrap();

        let store = LayoutStore::new(tmp.path());
        assert_eq!(store.list().unwrap(), vec!["a.JSON", "b.json"]);
    }

    #[test]
    fn test_corrupt_file_reports_context() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("bad.json"), "not json").unwrap();
        let store = LayoutStore::new(tmp.path());

        let err = store.load("bad.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Corrupt layout"));
        assert!(store.load("missing.json").is_err());
    }
}
