//! VIN normalization
//!
//! Turns a raw, possibly OCR-corrupted VIN candidate into a canonical
//! 17-character identifier, and builds vehicle identities from registry data
//! only when the VIN is valid.

pub mod models;
pub mod normalizer;

pub use models::{Vin, VehicleIdentity, VinStatus};
pub use normalizer::{normalize, VIN_LENGTH};
