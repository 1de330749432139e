//! Flat-file persistence for recorded readings.
//!
//! The store keeps the full sequence in memory and mirrors it to a
//! pretty-printed JSON array on every successful append. The file is
//! opened, rewritten and closed per operation; there is no locking and
//! no protection against a second writer on the same file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::reading::BloodGasReading;

/// Default file name for the persisted readings.
pub const DEFAULT_STORE_FILE: &str = "blood_gas_readings.json";

#[derive(Debug)]
pub struct ReadingStore {
    path: PathBuf,
    readings: Vec<BloodGasReading>,
}

impl ReadingStore {
    /// Load the store from `path`.
    ///
    /// An absent file starts an empty store. A malformed file is logged
    /// and replaced with an empty store rather than propagated; the bad
    /// content is overwritten on the next save.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let readings = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(readings) => readings,
                Err(err) => {
                    warn!(path = %path.display(), %err, "readings file is malformed, starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no readings file yet, starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read readings file, starting empty");
                Vec::new()
            }
        };
        Self { path, readings }
    }

    /// Append a reading and rewrite the whole file.
    ///
    /// On a failed save the in-memory append is kept (not rolled back),
    /// so the reading is included in the next successful save. Cost is
    /// O(n) in the number of stored readings, fine at this scale.
    pub fn append_and_save(&mut self, reading: BloodGasReading) -> Result<()> {
        self.readings.push(reading);
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.readings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// All readings in insertion order.
    pub fn list(&self) -> &[BloodGasReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
