//! Reading service: input validation, simulation, classification and
//! persistence for a single record operation.

use chrono::Local;
use rand::Rng;

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::models::reading::{BloodGasPanel, BloodGasReading};
use crate::store::ReadingStore;

/// Raw text for the four manually entered fields, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct RawPanel {
    pub ph: String,
    pub pco2: String,
    pub po2: String,
    pub hco3: String,
}

impl RawPanel {
    /// Parse all four fields. Fails on the first missing or non-numeric
    /// field; nothing is recorded in that case.
    pub fn parse(&self) -> Result<BloodGasPanel> {
        Ok(BloodGasPanel {
            ph: parse_field("pH", &self.ph)?,
            pco2: parse_field("pCO2", &self.pco2)?,
            po2: parse_field("pO2", &self.po2)?,
            hco3: parse_field("HCO3", &self.hco3)?,
        })
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::Validation { field })
}

/// A source of already-numeric panels. The built-in simulator
/// implements this; a serial analyzer would be another implementation
/// behind the same contract.
pub trait PanelSource {
    fn acquire(&mut self) -> Result<BloodGasPanel>;
}

/// Simulated panel generator.
///
/// Draws each value uniformly from a band deliberately wider than the
/// reference ranges so abnormal classifications actually occur.
#[derive(Debug, Default)]
pub struct SimulatedPanel;

impl PanelSource for SimulatedPanel {
    fn acquire(&mut self) -> Result<BloodGasPanel> {
        let mut rng = rand::thread_rng();
        Ok(BloodGasPanel {
            ph: round_to(rng.gen_range(7.2..=7.6), 2),
            pco2: round_to(rng.gen_range(30.0..=50.0), 1),
            po2: round_to(rng.gen_range(60.0..=110.0), 1),
            hco3: round_to(rng.gen_range(18.0..=30.0), 1),
        })
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Coordinates one record operation end to end: classify, timestamp,
/// append, persist, return the completed reading.
#[derive(Debug)]
pub struct ReadingService {
    classifier: Classifier,
    store: ReadingStore,
}

impl ReadingService {
    pub fn new(classifier: Classifier, store: ReadingStore) -> Self {
        Self { classifier, store }
    }

    /// Record from raw manual input. Validation failure aborts before
    /// anything is written.
    pub fn record_manual(&mut self, patient_id: &str, raw: &RawPanel) -> Result<BloodGasReading> {
        let panel = raw.parse()?;
        self.record_panel(patient_id, panel)
    }

    /// Record from a panel source (simulator or external device).
    pub fn record_from(
        &mut self,
        patient_id: &str,
        source: &mut dyn PanelSource,
    ) -> Result<BloodGasReading> {
        let panel = source.acquire()?;
        self.record_panel(patient_id, panel)
    }

    /// Record an already-numeric panel.
    ///
    /// On a save failure the reading stays in memory and the error is
    /// returned; a later successful save will include it.
    pub fn record_panel(
        &mut self,
        patient_id: &str,
        panel: BloodGasPanel,
    ) -> Result<BloodGasReading> {
        let status = self.classifier.interpret(panel.ph, panel.pco2, panel.hco3);
        let reading = BloodGasReading {
            patient_id: patient_id.to_string(),
            ph: panel.ph,
            pco2: panel.pco2,
            po2: panel.po2,
            hco3: panel.hco3,
            status,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        self.store.append_and_save(reading.clone())?;
        Ok(reading)
    }

    pub fn readings(&self) -> &[BloodGasReading] {
        self.store.list()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reading::AcidBaseStatus;
    use std::path::PathBuf;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("abgsim-svc-{}.json", uuid::Uuid::new_v4()))
    }

    fn service(path: &PathBuf) -> ReadingService {
        ReadingService::new(Classifier::default(), ReadingStore::load(path))
    }

    #[test]
    fn manual_entry_records_and_classifies() {
        let path = temp_store_path();
        let mut svc = service(&path);
        let raw = RawPanel {
            ph: "7.20".to_string(),
            pco2: "50".to_string(),
            po2: "80".to_string(),
            hco3: "24".to_string(),
        };
        let reading = svc.record_manual("P001", &raw).unwrap();
        assert_eq!(reading.status, AcidBaseStatus::RespiratoryAcidosis);
        assert_eq!(svc.readings().len(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn non_numeric_field_records_nothing() {
        let path = temp_store_path();
        let mut svc = service(&path);
        let raw = RawPanel {
            ph: "7.20".to_string(),
            pco2: "abc".to_string(),
            po2: "80".to_string(),
            hco3: "24".to_string(),
        };
        let err = svc.record_manual("P001", &raw).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "pCO2" }));
        assert!(svc.readings().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn empty_field_records_nothing() {
        let path = temp_store_path();
        let mut svc = service(&path);
        let raw = RawPanel {
            ph: "7.20".to_string(),
            pco2: "40".to_string(),
            po2: "80".to_string(),
            hco3: String::new(),
        };
        let err = svc.record_manual("P001", &raw).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "HCO3" }));
        assert!(svc.readings().is_empty());
    }

    #[test]
    fn timestamp_has_expected_format() {
        let path = temp_store_path();
        let mut svc = service(&path);
        let panel = BloodGasPanel {
            ph: 7.40,
            pco2: 40.0,
            po2: 90.0,
            hco3: 24.0,
        };
        let reading = svc.record_panel("P001", panel).unwrap();
        assert!(
            chrono::NaiveDateTime::parse_from_str(&reading.timestamp, "%Y-%m-%d %H:%M:%S").is_ok()
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn simulated_panels_stay_in_band() {
        let mut source = SimulatedPanel;
        for _ in 0..200 {
            let panel = source.acquire().unwrap();
            assert!((7.2..=7.6).contains(&panel.ph));
            assert!((30.0..=50.0).contains(&panel.pco2));
            assert!((60.0..=110.0).contains(&panel.po2));
            assert!((18.0..=30.0).contains(&panel.hco3));
            // Rounding: two decimals for pH, one for the rest.
            assert_eq!(panel.ph, round_to(panel.ph, 2));
            assert_eq!(panel.pco2, round_to(panel.pco2, 1));
        }
    }

    #[test]
    fn device_contract_accepts_numeric_panel() {
        struct FixedDevice(BloodGasPanel);
        impl PanelSource for FixedDevice {
            fn acquire(&mut self) -> Result<BloodGasPanel> {
                Ok(self.0)
            }
        }

        let path = temp_store_path();
        let mut svc = service(&path);
        let mut device = FixedDevice(BloodGasPanel {
            ph: 7.50,
            pco2: 30.0,
            po2: 95.0,
            hco3: 24.0,
        });
        let reading = svc.record_from("P002", &mut device).unwrap();
        assert_eq!(reading.status, AcidBaseStatus::RespiratoryAlkalosis);

        std::fs::remove_file(&path).unwrap();
    }
}
