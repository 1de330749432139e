//! Interactive menu shell.
//!
//! The loop is an explicit state machine driven one input line at a
//! time, generic over `BufRead`/`Write` so transitions can be exercised
//! in tests without a terminal.

use std::io::{self, BufRead, Write};

use crate::service::{RawPanel, ReadingService, SimulatedPanel};

/// Order in which manual fields are collected.
const MANUAL_FIELDS: [&str; 4] = ["pH", "pCO2", "pO2", "HCO3"];

/// Shell states. `Done` is reachable only through the exit option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    Menu,
    AwaitPatientId,
    AwaitMode {
        patient_id: String,
    },
    AwaitManualFields {
        patient_id: String,
        collected: Vec<String>,
    },
    Done,
}

pub struct Shell {
    service: ReadingService,
    state: ShellState,
}

impl Shell {
    pub fn new(service: ReadingService) -> Self {
        Self {
            service,
            state: ShellState::Menu,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn service(&self) -> &ReadingService {
        &self.service
    }

    /// Run the menu loop until the user exits or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        while self.state != ShellState::Done {
            self.prompt(out)?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break; // EOF behaves like exit
            }
            self.step(line.trim(), out)?;
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.state {
            ShellState::Menu => {
                writeln!(out)?;
                writeln!(out, "Blood Gas Analyzer")?;
                writeln!(out, "  1. Record new reading")?;
                writeln!(out, "  2. View readings")?;
                writeln!(out, "  3. Exit")?;
                write!(out, "Select an option: ")?;
            }
            ShellState::AwaitPatientId => {
                write!(out, "Patient ID: ")?;
            }
            ShellState::AwaitMode { .. } => {
                write!(out, "Enter values manually? (y/n): ")?;
            }
            ShellState::AwaitManualFields { collected, .. } => {
                write!(out, "{}: ", MANUAL_FIELDS[collected.len()])?;
            }
            ShellState::Done => {}
        }
        out.flush()
    }

    /// Advance the state machine by one input line.
    pub fn step<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        let state = std::mem::replace(&mut self.state, ShellState::Menu);
        self.state = match state {
            ShellState::Menu => match line {
                "1" => ShellState::AwaitPatientId,
                "2" => {
                    self.render_all(out)?;
                    ShellState::Menu
                }
                "3" => {
                    writeln!(out, "Goodbye.")?;
                    ShellState::Done
                }
                _ => {
                    writeln!(out, "Invalid choice, please select 1-3.")?;
                    ShellState::Menu
                }
            },
            ShellState::AwaitPatientId => ShellState::AwaitMode {
                patient_id: line.to_string(),
            },
            ShellState::AwaitMode { patient_id } => {
                if line.eq_ignore_ascii_case("y") {
                    ShellState::AwaitManualFields {
                        patient_id,
                        collected: Vec::new(),
                    }
                } else {
                    let mut source = SimulatedPanel;
                    match self.service.record_from(&patient_id, &mut source) {
                        Ok(reading) => {
                            writeln!(out, "Recorded:")?;
                            self.render_reading(out, &reading)?;
                        }
                        Err(err) => writeln!(out, "Error: {err}")?,
                    }
                    ShellState::Menu
                }
            }
            ShellState::AwaitManualFields {
                patient_id,
                mut collected,
            } => {
                collected.push(line.to_string());
                if collected.len() < MANUAL_FIELDS.len() {
                    ShellState::AwaitManualFields {
                        patient_id,
                        collected,
                    }
                } else {
                    let raw = RawPanel {
                        ph: collected[0].clone(),
                        pco2: collected[1].clone(),
                        po2: collected[2].clone(),
                        hco3: collected[3].clone(),
                    };
                    match self.service.record_manual(&patient_id, &raw) {
                        Ok(reading) => {
                            writeln!(out, "Recorded:")?;
                            self.render_reading(out, &reading)?;
                        }
                        Err(err) => writeln!(out, "Error: {err}")?,
                    }
                    ShellState::Menu
                }
            }
            ShellState::Done => ShellState::Done,
        };
        Ok(())
    }

    fn render_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.service.readings().is_empty() {
            writeln!(out, "No readings recorded yet.")?;
            return Ok(());
        }
        for reading in self.service.readings() {
            let flags = self.service.classifier().flags(&reading.panel());
            writeln!(
                out,
                "{} | {} | pH {:.2}{} pCO2 {:.1}{} pO2 {:.1}{} HCO3 {:.1}{} | {}",
                reading.timestamp,
                reading.patient_id,
                reading.ph,
                flags.ph.marker().trim(),
                reading.pco2,
                flags.pco2.marker().trim(),
                reading.po2,
                flags.po2.marker().trim(),
                reading.hco3,
                flags.hco3.marker().trim(),
                reading.status,
            )?;
        }
        Ok(())
    }

    fn render_reading<W: Write>(
        &self,
        out: &mut W,
        reading: &crate::models::reading::BloodGasReading,
    ) -> io::Result<()> {
        let flags = self.service.classifier().flags(&reading.panel());
        writeln!(out, "  Patient:   {}", reading.patient_id)?;
        writeln!(out, "  Time:      {}", reading.timestamp)?;
        writeln!(out, "  pH:        {:.2} {}", reading.ph, flags.ph.marker())?;
        writeln!(out, "  pCO2:      {:.1} {}", reading.pco2, flags.pco2.marker())?;
        writeln!(out, "  pO2:       {:.1} {}", reading.po2, flags.po2.marker())?;
        writeln!(out, "  HCO3:      {:.1} {}", reading.hco3, flags.hco3.marker())?;
        writeln!(out, "  Status:    {}", reading.status)?;
        Ok(())
    }
}
