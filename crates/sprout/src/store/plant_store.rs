//! File-backed plant database
//!
//! All mutation goes through [`PlantStore`]. Each mutating call clones the
//! current map, applies the change, writes the whole snapshot to disk and only
//! then publishes it, all under one exclusive lock. A failed write leaves the
//! in-memory state untouched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use parking_lot::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, SproutError};
use crate::store::models::{GrowthSample, PlantRecord, Snapshot, WateringEvent};

pub struct PlantStore {
  path: PathBuf,
  plants: RwLock<Snapshot>,
}

impl PlantStore {
  /// Open the database at `path`. A missing file yields an empty store; an
  /// unreadable or corrupt one is an error.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let plants = load_snapshot(&path)?;
    info!(path = %path.display(), plants = plants.len(), "opened plant database");
    Ok(Self { path, plants: RwLock::new(plants) })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Insert a plant, or replace an existing one wholesale (schedule and
  /// growth history start over).
  pub fn add_or_update(&self, name: &str, info: &str) -> Result<()> {
    if name.trim().is_empty() {
      return Err(SproutError::validation("plant name must not be empty"));
    }
    if info.trim().is_empty() {
      return Err(SproutError::validation("plant information must not be empty"));
    }

    self.mutate(|plants| {
      plants.insert(name.to_string(), PlantRecord::new(info.to_string()));
      Ok(())
    })
  }

  /// Delete a plant. Returns `false` (and writes nothing) if it was absent.
  pub fn remove(&self, name: &str) -> Result<bool> {
    let mut guard = self.plants.write();
    if !guard.contains_key(name) {
      debug!(name, "remove ignored for unknown plant");
      return Ok(false);
    }

    let mut next = guard.clone();
    next.remove(name);
    self.commit(&mut guard, next)?;
    Ok(true)
  }

  /// Append a watering event. Dates are not deduplicated.
  pub fn add_watering_event(&self, name: &str, date: NaiveDate, watered: bool) -> Result<()> {
    self.mutate(|plants| {
      record_mut(plants, name)?.push_watering(WateringEvent { date, watered });
      Ok(())
    })
  }

  /// Append a batch of events to one plant in a single write
  pub fn apply_schedule(&self, name: &str, events: &[WateringEvent]) -> Result<()> {
    self.mutate(|plants| {
      let record = record_mut(plants, name)?;
      for event in events {
        record.push_watering(*event);
      }
      Ok(())
    })
  }

  /// Append the same events to every plant in a single write. Returns the
  /// number of plants touched.
  pub fn apply_schedule_to_all(&self, events: &[WateringEvent]) -> Result<usize> {
    self.mutate(|plants| {
      for record in plants.values_mut() {
        for event in events {
          record.push_watering(*event);
        }
      }
      Ok(plants.len())
    })
  }

  /// True iff the plant has any event on exactly `date`. Unknown plants have none.
  pub fn has_watering_on(&self, name: &str, date: NaiveDate) -> bool {
    self.plants.read().get(name).is_some_and(|record| record.has_watering_on(date))
  }

  /// Names of all plants with an event on `date`
  pub fn plants_due_on(&self, date: NaiveDate) -> Vec<String> {
    self
      .plants
      .read()
      .iter()
      .filter(|(_, record)| record.has_watering_on(date))
      .map(|(name, _)| name.clone())
      .collect()
  }

  /// Append a height sample. Same-date samples are kept side by side.
  pub fn add_growth_sample(&self, name: &str, date: NaiveDate, height: u32) -> Result<()> {
    if height == 0 {
      return Err(SproutError::validation("height must be greater than zero"));
    }

    self.mutate(|plants| {
      record_mut(plants, name)?.push_growth(GrowthSample { date, height });
      Ok(())
    })
  }

  pub fn get(&self, name: &str) -> Option<PlantRecord> {
    self.plants.read().get(name).cloned()
  }

  pub fn info(&self, name: &str) -> Option<String> {
    self.plants.read().get(name).map(|record| record.info().to_string())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.plants.read().contains_key(name)
  }

  pub fn names(&self) -> Vec<String> {
    self.plants.read().keys().cloned().collect()
  }

  pub fn is_empty(&self) -> bool {
    self.plants.read().is_empty()
  }

  /// Owned copy of the whole database
  pub fn snapshot(&self) -> Snapshot {
    self.plants.read().clone()
  }

  fn mutate<T>(&self, change: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
    let mut guard = self.plants.write();
    let mut next = guard.clone();
    let value = change(&mut next)?;

    self.commit(&mut guard, next)?;
    Ok(value)
  }

  fn commit(&self, current: &mut Snapshot, next: Snapshot) -> Result<()> {
    persist_snapshot(&self.path, &next)?;
    *current = next;
    Ok(())
  }
}

fn record_mut<'a>(plants: &'a mut Snapshot, name: &str) -> Result<&'a mut PlantRecord> {
  plants.get_mut(name).ok_or_else(|| SproutError::not_found(name))
}

/// Read a snapshot from disk; a missing file is an empty database
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
  if !path.exists() {
    return Ok(Snapshot::new());
  }

  let content = fs::read_to_string(path)
    .map_err(|e| SproutError::storage(format!("failed to read {}: {e}", path.display())))?;

  let snapshot: Snapshot = serde_json::from_str(&content)
    .map_err(|e| SproutError::storage(format!("corrupt plant database {}: {e}", path.display())))?;

  if snapshot.keys().any(|name| name.trim().is_empty()) {
    return Err(SproutError::storage(format!(
      "corrupt plant database {}: plant with blank name",
      path.display()
    )));
  }

  Ok(snapshot)
}

/// Write the whole snapshot to a sibling temp file and rename it into place
pub fn persist_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  fs::create_dir_all(dir)
    .map_err(|e| SproutError::storage(format!("failed to create {}: {e}", dir.display())))?;

  let mut file = NamedTempFile::new_in(dir)
    .map_err(|e| SproutError::storage(format!("failed to create temp file in {}: {e}", dir.display())))?;

  serde_json::to_writer_pretty(&mut file, snapshot)
    .map_err(|e| SproutError::storage(format!("failed to serialize plant database: {e}")))?;
  file.flush().map_err(|e| SproutError::storage(format!("failed to flush plant database: {e}")))?;

  file
    .persist(path)
    .map_err(|e| SproutError::storage(format!("failed to write {}: {e}", path.display())))?;

  debug!(path = %path.display(), plants = snapshot.len(), "persisted plant database");
  Ok(())
}
