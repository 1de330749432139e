//! Domain models for blood-gas readings.

pub mod reading;
