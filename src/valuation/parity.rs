//! Market-equivalent lease payment

/// Residual fraction assumed when the contract states none (industry
/// average for 36-month leases)
pub const DEFAULT_RESIDUAL_FRACTION: f64 = 0.55;

/// Residual value estimate from a market price; `None` without a market price
pub fn estimate_residual_value(market_price: f64, residual_fraction: f64) -> Option<f64> {
    (market_price > 0.0).then(|| market_price * residual_fraction)
}

/// Monthly payment a market-priced lease of the same term would carry:
/// `(market − residual) / term`, rounded to cents.
///
/// `residual_value` of `None` (or zero) falls back to
/// [`DEFAULT_RESIDUAL_FRACTION`] of the market price.
pub fn market_monthly_lease(
    market_price: f64,
    lease_term_months: f64,
    residual_value: Option<f64>,
) -> Option<f64> {
    if market_price <= 0.0 || lease_term_months <= 0.0 {
        return None;
    }

    let residual = residual_value
        .filter(|r| *r > 0.0)
        .or_else(|| estimate_residual_value(market_price, DEFAULT_RESIDUAL_FRACTION))?;

    let monthly = (market_price - residual) / lease_term_months;
    Some((monthly * 100.0).round() / 100.0)
}
