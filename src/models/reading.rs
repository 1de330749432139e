use std::fmt;

use serde::{Deserialize, Serialize};

/// A blood-gas panel as measured: the four raw values before
/// interpretation. Produced by the simulator, by manual entry, or by an
/// external acquisition source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodGasPanel {
    #[serde(rename = "pH")]
    pub ph: f64,
    #[serde(rename = "pCO2")]
    pub pco2: f64,
    #[serde(rename = "pO2")]
    pub po2: f64,
    #[serde(rename = "HCO3")]
    pub hco3: f64,
}

/// A recorded blood-gas reading. Immutable once created; only the
/// reading service constructs these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodGasReading {
    /// Free-text patient identifier; multiple readings per patient are
    /// allowed and kept in insertion order.
    pub patient_id: String,

    #[serde(rename = "pH")]
    pub ph: f64,

    #[serde(rename = "pCO2")]
    pub pco2: f64,

    #[serde(rename = "pO2")]
    pub po2: f64,

    #[serde(rename = "HCO3")]
    pub hco3: f64,

    /// Acid-base interpretation of the panel.
    pub status: AcidBaseStatus,

    /// Local time of recording, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

impl BloodGasReading {
    pub fn panel(&self) -> BloodGasPanel {
        BloodGasPanel {
            ph: self.ph,
            pco2: self.pco2,
            po2: self.po2,
            hco3: self.hco3,
        }
    }
}

/// Acid-base status category derived from pH, pCO2 and HCO3.
///
/// Serializes as the human-readable label (e.g. "Respiratory Acidosis")
/// so the persisted file stays a plain-English record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcidBaseStatus {
    Normal,
    #[serde(rename = "Respiratory Acidosis")]
    RespiratoryAcidosis,
    #[serde(rename = "Metabolic Acidosis")]
    MetabolicAcidosis,
    #[serde(rename = "Respiratory Alkalosis")]
    RespiratoryAlkalosis,
    #[serde(rename = "Metabolic Alkalosis")]
    MetabolicAlkalosis,
}

impl AcidBaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcidBaseStatus::Normal => "Normal",
            AcidBaseStatus::RespiratoryAcidosis => "Respiratory Acidosis",
            AcidBaseStatus::MetabolicAcidosis => "Metabolic Acidosis",
            AcidBaseStatus::RespiratoryAlkalosis => "Respiratory Alkalosis",
            AcidBaseStatus::MetabolicAlkalosis => "Metabolic Alkalosis",
        }
    }
}

impl fmt::Display for AcidBaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
