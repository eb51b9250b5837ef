//! Raw VIN sanitizer

use super::models::{Vin, VinStatus};
use tracing::debug;

/// Length of a valid VIN
pub const VIN_LENGTH: usize = 17;

/// OCR frequently prepends a spurious `4` to VINs read off contract scans
const SPURIOUS_LEADING_DIGIT: char = '4';

/// Normalize a raw VIN candidate.
///
/// Strips everything that is not an ASCII letter or digit and uppercases the
/// rest. An 18-character result starting with `4` loses that digit; anything
/// still longer than 17 keeps only its last 17 characters (leading noise is
/// assumed, not trailing). Total over any input.
pub fn normalize(raw: &str) -> VinStatus {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if cleaned.len() == VIN_LENGTH + 1 && cleaned.starts_with(SPURIOUS_LEADING_DIGIT) {
        cleaned.remove(0);
    }

    if cleaned.len() > VIN_LENGTH {
        // ASCII only at this point, so byte offsets are char offsets
        cleaned = cleaned[cleaned.len() - VIN_LENGTH..].to_string();
    }

    if cleaned.len() == VIN_LENGTH {
        VinStatus::Valid(Vin::from_normalized(cleaned))
    } else {
        debug!("VIN candidate rejected: {} characters after cleanup", cleaned.len());
        let length = cleaned.len();
        VinStatus::Invalid { cleaned, length }
    }
}
