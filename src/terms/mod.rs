//! Lease term model and coercion of extracted contract fields
//!
//! The extraction collaborator hands over every term as a display string
//! (or "Not Mentioned"). This module owns the closed set of term keys and
//! the sentinel-zero numeric coercion downstream arithmetic relies on.

pub mod models;
pub mod parser;

pub use models::{RawContract, SlaTerms, TermKey};
pub use parser::{is_mentioned, parse_amount, parse_lease_term, InterestTerm};
