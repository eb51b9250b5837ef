//! Depreciation-based buyout valuation
//!
//! The fair buyout projection is a linear heuristic, not an actuarial model:
//! a 60% residual is taken as normal for a 36-month lease and scaled
//! proportionally for other terms.

use super::models::{MarketReference, Recommendation, ValuationResult};
use super::parity::market_monthly_lease;
use crate::terms::{parse_lease_term, SlaTerms, TermKey};
use tracing::debug;

/// Lease term assumed when the contract does not state one
pub const DEFAULT_LEASE_TERM_MONTHS: f64 = 36.0;

/// Residual fraction considered normal over [`DEFAULT_LEASE_TERM_MONTHS`]
const NORMAL_RESIDUAL_FRACTION: f64 = 0.60;

/// Dealer margin on a cash purchase used as the renegotiation target
const NEGOTIATION_MARKUP: f64 = 1.07;

/// Evaluate a contract's buyout against the market.
///
/// Never fabricates a valuation: without a market anchor the predicted
/// buyout is zero and no recommendation is made.
pub fn evaluate(sla: &SlaTerms, market: &MarketReference) -> ValuationResult {
    let contract_buyout = contract_buyout(sla);
    let market_price = market.price();
    let lease_term_months =
        parse_lease_term(sla.get(TermKey::LeaseTermMonths)).unwrap_or(DEFAULT_LEASE_TERM_MONTHS);

    let predicted_buyout = if market_price > 0.0 {
        predict_buyout(market_price, lease_term_months)
    } else {
        0.0
    };

    let market_monthly_payment = market_monthly_lease(
        market_price,
        lease_term_months,
        sla.stated_amount(TermKey::ResidualValue),
    );

    let equity = market_price - contract_buyout;

    let recommendation = if market_price <= 0.0 || contract_buyout <= 0.0 {
        Recommendation::NoRecommendation
    } else if equity > 0.0 {
        Recommendation::ExecuteBuyout
    } else {
        Recommendation::NegotiateDown {
            target_price: market_price * NEGOTIATION_MARKUP,
        }
    };

    let percentage_deviation = if predicted_buyout != 0.0 && contract_buyout > 0.0 {
        Some((contract_buyout - predicted_buyout) / predicted_buyout * 100.0)
    } else {
        None
    };

    debug!(
        contract_buyout,
        market_price,
        lease_term_months,
        predicted_buyout,
        recommendation = recommendation.as_str(),
        "Evaluated buyout"
    );

    ValuationResult {
        predicted_buyout,
        contract_buyout,
        market_price,
        lease_term_months,
        equity,
        equity_is_positive: equity > 0.0,
        recommendation,
        percentage_deviation,
        market_monthly_payment,
    }
}

/// Buyout price if stated, else residual value if stated, else 0
fn contract_buyout(sla: &SlaTerms) -> f64 {
    sla.stated_amount(TermKey::BuyoutPrice)
        .or_else(|| sla.stated_amount(TermKey::ResidualValue))
        .unwrap_or(0.0)
}

/// `market × (1 − 0.60 / (term / 36))`.
///
/// Terms under 21.6 months project a negative buyout; the value is returned
/// as computed.
fn predict_buyout(market_price: f64, lease_term_months: f64) -> f64 {
    let term_ratio = lease_term_months / DEFAULT_LEASE_TERM_MONTHS;
    let depreciation_rate = 1.0 - NORMAL_RESIDUAL_FRACTION / term_ratio;
    market_price * depreciation_rate
}
