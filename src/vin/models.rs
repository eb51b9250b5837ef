//! VIN and vehicle identity types

use super::normalizer::{normalize, VIN_LENGTH};
use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized, 17-character VIN.
///
/// Only [`normalize`] creates values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Vin(String);

impl Vin {
    pub(super) fn from_normalized(value: String) -> Self {
        debug_assert_eq!(value.len(), VIN_LENGTH);
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Real VINs never contain I, O or Q. Their presence usually means OCR
    /// misread 1/0, so the VIN is worth double-checking before a registry
    /// lookup. Validity is unaffected.
    pub fn has_restricted_letters(&self) -> bool {
        self.0.chars().any(|c| matches!(c, 'I' | 'O' | 'Q'))
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Vin {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        normalize(&raw)
            .into_vin()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid VIN: {}", raw)))
    }
}

/// Outcome of VIN normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VinStatus {
    Valid(Vin),
    Invalid { cleaned: String, length: usize },
}

impl VinStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn into_vin(self) -> Option<Vin> {
        match self {
            Self::Valid(vin) => Some(vin),
            Self::Invalid { .. } => None,
        }
    }

    /// Convert into a `Result`, reporting invalid VINs as [`AuditError::InvalidVin`]
    pub fn into_result(self) -> Result<Vin> {
        match self {
            Self::Valid(vin) => Ok(vin),
            Self::Invalid { cleaned, length } => Err(AuditError::InvalidVin { cleaned, length }),
        }
    }
}

/// Vehicle identity keyed by VIN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleIdentity {
    pub vin: Vin,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
}

impl VehicleIdentity {
    /// Build an identity from a registry result with a raw, pre-normalization VIN
    pub fn from_registry(
        raw_vin: &str,
        make: Option<String>,
        model: Option<String>,
        year: Option<&str>,
    ) -> Result<Self> {
        let vin = normalize(raw_vin).into_result()?;
        let year = year.and_then(|y| y.trim().parse::<u16>().ok());

        Ok(Self {
            vin,
            make: make.filter(|m| !m.trim().is_empty()),
            model: model.filter(|m| !m.trim().is_empty()),
            year,
        })
    }

    /// "2019 Toyota Camry" style label, skipping unknown parts
    pub fn display_name(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        [year.as_deref(), self.make.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
