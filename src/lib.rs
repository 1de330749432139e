//! abgsim core library
//!
//! Records blood-gas panel readings (pH, pCO2, pO2, HCO3), classifies
//! each into an acid-base status, and persists the sequence to a flat
//! JSON file. Single-user, single-process, fully synchronous.

pub mod classifier;
pub mod error;
pub mod models;
pub mod service;
pub mod shell;
pub mod store;

pub use classifier::{Classifier, PanelFlags, RangeFlag, ReferenceRanges};
pub use error::{Error, Result};
pub use models::reading::{AcidBaseStatus, BloodGasPanel, BloodGasReading};
pub use service::{PanelSource, RawPanel, ReadingService, SimulatedPanel};
pub use shell::{Shell, ShellState};
pub use store::{ReadingStore, DEFAULT_STORE_FILE};
