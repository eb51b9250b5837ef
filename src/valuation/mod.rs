//! Buyout valuation
//!
//! Combines parsed lease terms with a market reference price into a
//! predicted fair buyout, the equity position versus the contract buyout,
//! and a purchase recommendation. Every result is computed fresh; nothing
//! here holds state between calls.

pub mod engine;
pub mod models;
pub mod parity;

pub use engine::{evaluate, DEFAULT_LEASE_TERM_MONTHS};
pub use models::{MarketReference, Recommendation, ValuationResult};
pub use parity::{estimate_residual_value, market_monthly_lease};
