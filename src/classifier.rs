//! Acid-base classification of blood-gas panels.
//!
//! The interpretation rule is a priority-ordered list of threshold
//! checks against fixed reference ranges; the first matching rule wins.

use crate::models::reading::{AcidBaseStatus, BloodGasPanel};

/// Inclusive clinical normal bounds for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn flag(&self, value: f64) -> RangeFlag {
        if value < self.low {
            RangeFlag::Low
        } else if value > self.high {
            RangeFlag::High
        } else {
            RangeFlag::Normal
        }
    }
}

/// Where a measured value sits relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFlag {
    Low,
    Normal,
    High,
}

impl RangeFlag {
    /// Lab-report style marker: "L", "H", or blank for in-range.
    pub fn marker(&self) -> &'static str {
        match self {
            RangeFlag::Low => "L",
            RangeFlag::Normal => " ",
            RangeFlag::High => "H",
        }
    }
}

/// Reference ranges for the full panel. Built once at startup and held
/// by the classifier; never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRanges {
    pub ph: Range,
    pub pco2: Range,
    pub po2: Range,
    pub hco3: Range,
}

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self {
            ph: Range::new(7.35, 7.45),
            pco2: Range::new(35.0, 45.0),
            po2: Range::new(75.0, 100.0),
            hco3: Range::new(22.0, 26.0),
        }
    }
}

/// Per-parameter range flags for a panel, used when rendering a
/// reading. Display metadata only; classification ignores these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelFlags {
    pub ph: RangeFlag,
    pub pco2: RangeFlag,
    pub po2: RangeFlag,
    pub hco3: RangeFlag,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    ranges: ReferenceRanges,
}

impl Classifier {
    pub fn new(ranges: ReferenceRanges) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &ReferenceRanges {
        &self.ranges
    }

    /// Classify a panel into an acid-base status.
    ///
    /// Checks run in priority order: acidemia with elevated pCO2, then
    /// acidemia with depressed HCO3, then the alkalemia mirror images,
    /// and finally Normal.
    ///
    /// Known gap, kept intentionally for parity with the published rule
    /// table: an abnormal pH with neither pCO2 nor HCO3 confirming a
    /// disorder (e.g. pH 7.30, pCO2 40, HCO3 24) falls through to
    /// Normal. Do not "fix" this without also changing the recorded
    /// status of historical files.
    pub fn interpret(&self, ph: f64, pco2: f64, hco3: f64) -> AcidBaseStatus {
        let r = &self.ranges;
        if ph < r.ph.low {
            if pco2 > r.pco2.high {
                AcidBaseStatus::RespiratoryAcidosis
            } else if hco3 < r.hco3.low {
                AcidBaseStatus::MetabolicAcidosis
            } else {
                AcidBaseStatus::Normal
            }
        } else if ph > r.ph.high {
            if pco2 < r.pco2.low {
                AcidBaseStatus::RespiratoryAlkalosis
            } else if hco3 > r.hco3.high {
                AcidBaseStatus::MetabolicAlkalosis
            } else {
                AcidBaseStatus::Normal
            }
        } else {
            AcidBaseStatus::Normal
        }
    }

    /// Flag each panel value against its reference range.
    pub fn flags(&self, panel: &BloodGasPanel) -> PanelFlags {
        PanelFlags {
            ph: self.ranges.ph.flag(panel.ph),
            pco2: self.ranges.pco2.flag(panel.pco2),
            po2: self.ranges.po2.flag(panel.po2),
            hco3: self.ranges.hco3.flag(panel.hco3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(7.20, 50.0, 24.0 => AcidBaseStatus::RespiratoryAcidosis ; "low ph high pco2")]
    #[test_case(7.20, 40.0, 18.0 => AcidBaseStatus::MetabolicAcidosis ; "low ph low hco3")]
    #[test_case(7.20, 40.0, 24.0 => AcidBaseStatus::Normal ; "low ph unconfirmed falls through")]
    #[test_case(7.50, 30.0, 24.0 => AcidBaseStatus::RespiratoryAlkalosis ; "high ph low pco2")]
    #[test_case(7.50, 40.0, 28.0 => AcidBaseStatus::MetabolicAlkalosis ; "high ph high hco3")]
    #[test_case(7.50, 40.0, 24.0 => AcidBaseStatus::Normal ; "high ph unconfirmed falls through")]
    #[test_case(7.40, 40.0, 24.0 => AcidBaseStatus::Normal ; "all normal")]
    #[test_case(7.35, 46.0, 21.0 => AcidBaseStatus::Normal ; "ph at low bound is normal")]
    #[test_case(7.45, 34.0, 27.0 => AcidBaseStatus::Normal ; "ph at high bound is normal")]
    fn interpret_cases(ph: f64, pco2: f64, hco3: f64) -> AcidBaseStatus {
        Classifier::default().interpret(ph, pco2, hco3)
    }

    #[test]
    fn normal_ph_is_always_normal() {
        let classifier = Classifier::default();
        // Sweep pH across the normal band with extreme pCO2/HCO3 on
        // either side; pH in range short-circuits everything else.
        for step in 0..=10 {
            let ph = 7.35 + f64::from(step) * 0.01;
            for &(pco2, hco3) in &[(20.0, 10.0), (60.0, 40.0), (40.0, 24.0)] {
                assert_eq!(classifier.interpret(ph, pco2, hco3), AcidBaseStatus::Normal);
            }
        }
    }

    #[test]
    fn respiratory_check_takes_priority_over_metabolic() {
        // Both sub-conditions hold; the pCO2 branch is checked first.
        let classifier = Classifier::default();
        assert_eq!(
            classifier.interpret(7.20, 50.0, 18.0),
            AcidBaseStatus::RespiratoryAcidosis
        );
        assert_eq!(
            classifier.interpret(7.50, 30.0, 28.0),
            AcidBaseStatus::RespiratoryAlkalosis
        );
    }

    #[test]
    fn flags_mark_each_parameter() {
        let classifier = Classifier::default();
        let panel = BloodGasPanel {
            ph: 7.30,
            pco2: 48.0,
            po2: 88.0,
            hco3: 20.0,
        };
        let flags = classifier.flags(&panel);
        assert_eq!(flags.ph, RangeFlag::Low);
        assert_eq!(flags.pco2, RangeFlag::High);
        assert_eq!(flags.po2, RangeFlag::Normal);
        assert_eq!(flags.hco3, RangeFlag::Low);
        assert_eq!(flags.pco2.marker(), "H");
    }
}
