//! Lease contract auditor
//!
//! Turns extracted lease terms, a raw VIN, a market reference price and an
//! upstream fairness assessment into a normalized vehicle identity, a buyout
//! valuation, a banded fairness rating and a negotiation chat context.
//!
//! The core modules ([`vin`], [`terms`], [`valuation`], [`fairness`],
//! [`negotiation::build_context`]) are synchronous pure functions. The
//! [`api`] module and the chat client are the only parts that do I/O.

pub mod api;
pub mod config;
pub mod error;
pub mod fairness;
pub mod metrics;
pub mod negotiation;
pub mod terms;
pub mod valuation;
pub mod vin;

pub use error::{AuditError, Result};
