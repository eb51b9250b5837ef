//! Data models for valuation

use serde::{Deserialize, Serialize};

/// Market average price supplied by the market-data collaborator.
/// Zero means no market data is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketReference {
    #[serde(default)]
    pub market_average: f64,
}

impl MarketReference {
    pub fn new(market_average: f64) -> Self {
        Self { market_average }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Usable price, with negative or non-finite input treated as absent
    pub fn price(&self) -> f64 {
        if self.market_average.is_finite() && self.market_average > 0.0 {
            self.market_average
        } else {
            0.0
        }
    }

    pub fn is_available(&self) -> bool {
        self.price() > 0.0
    }
}

/// What the holder should do at lease end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Recommendation {
    /// Contract buyout is below market: exercise the buyout
    ExecuteBuyout,
    /// Contract buyout is at or above market: renegotiate towards `target_price`
    NegotiateDown { target_price: f64 },
    /// No market anchor or no contract buyout to compare against
    NoRecommendation,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExecuteBuyout => "execute_buyout",
            Self::NegotiateDown { .. } => "negotiate_down",
            Self::NoRecommendation => "no_recommendation",
        }
    }
}

/// Valuation verdict for one contract against one market reference.
///
/// Derived and immutable: recompute instead of patching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub predicted_buyout: f64,
    pub contract_buyout: f64,
    pub market_price: f64,
    /// Stated term, or 36 when the contract gives none
    pub lease_term_months: f64,
    /// `market_price - contract_buyout`; only meaningful when both are nonzero
    pub equity: f64,
    pub equity_is_positive: bool,
    pub recommendation: Recommendation,
    /// Contract buyout relative to the predicted fair buyout, in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_deviation: Option<f64>,
    /// Monthly payment a market-priced lease of the same term would carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_monthly_payment: Option<f64>,
}

impl ValuationResult {
    pub fn has_market_anchor(&self) -> bool {
        self.market_price > 0.0
    }

    /// One-line explanation of the deviation, e.g. "125.0% above fair market"
    pub fn deviation_summary(&self) -> Option<String> {
        self.percentage_deviation.map(|pct| {
            if pct > 0.0 {
                format!("{:.1}% above fair market", pct)
            } else {
                format!("{:.1}% below fair market", pct.abs())
            }
        })
    }
}
