//! Local heuristic scorer for contracts with no upstream assessment
//!
//! Weights: equity margin 60 points, payment efficiency 20, interest cost 20.

use super::classifier::{classify, EXCELLENT_THRESHOLD};
use super::models::FairnessAssessment;
use crate::terms::{InterestTerm, SlaTerms, TermKey};
use crate::valuation::MarketReference;
use tracing::debug;

/// Score reported when there is no market price to compare against
const NEUTRAL_SCORE: u8 = 50;

const HIGH_APR_FLAG: f64 = 10.0;
const LOW_MILEAGE_FLAG: f64 = 12_000.0;
const HIGH_PAYMENT_FLAG: f64 = 700.0;

/// Score a contract from its own terms and a market reference
pub fn score_contract(sla: &SlaTerms, market: &MarketReference) -> FairnessAssessment {
    let flags = collect_flags(sla);
    let market_price = market.price();

    if market_price <= 0.0 {
        return FairnessAssessment {
            score: NEUTRAL_SCORE,
            assessment: Some(verdict(NEUTRAL_SCORE).to_string()),
            reasons: vec!["Insufficient market data for valuation.".to_string()],
            flags,
        };
    }

    let mut reasons = Vec::new();
    let mut score: u32 = 0;

    score += equity_points(sla, market_price, &mut reasons);
    score += payment_points(sla, market_price, &mut reasons);
    score += interest_points(sla, &mut reasons);

    let score = classify(score.min(100) as u8).score;
    debug!(score, flags = flags.len(), "Scored contract locally");

    FairnessAssessment {
        score,
        assessment: Some(verdict(score).to_string()),
        reasons,
        flags,
    }
}

fn verdict(score: u8) -> &'static str {
    if score >= EXCELLENT_THRESHOLD {
        "Contract appears fair"
    } else {
        "Contract has notable risks"
    }
}

fn equity_points(sla: &SlaTerms, market_price: f64, reasons: &mut Vec<String>) -> u32 {
    let buyout = sla
        .stated_amount(TermKey::BuyoutPrice)
        .or_else(|| sla.stated_amount(TermKey::ResidualValue));

    let Some(buyout) = buyout else {
        reasons.push(
            "No buyout or residual value stated; equity could not be assessed.".to_string(),
        );
        return 25;
    };

    let margin = (market_price - buyout) / market_price;
    if margin > 0.10 {
        reasons.push(format!("High strategic value: equity margin is {:.1}%.", margin * 100.0));
        60
    } else if margin > 0.0 {
        reasons.push("Stable asset: positive equity detected.".to_string());
        45
    } else if margin > -0.15 {
        reasons.push(
            "Standard depreciation: residual is within acceptable market range.".to_string(),
        );
        25
    } else {
        reasons.push("Dilutive asset: residual significantly exceeds market value.".to_string());
        5
    }
}

fn payment_points(sla: &SlaTerms, market_price: f64, reasons: &mut Vec<String>) -> u32 {
    let Some(monthly) = sla.stated_amount(TermKey::MonthlyPayment) else {
        reasons.push("Monthly payment not stated.".to_string());
        return 10;
    };

    let ratio = monthly / market_price;
    if ratio < 0.011 {
        reasons.push(
            "High payment efficiency: monthly cost is low relative to asset value.".to_string(),
        );
        20
    } else if ratio < 0.015 {
        reasons.push("Average market payment.".to_string());
        10
    } else {
        reasons.push(
            "Low payment efficiency: monthly cost is high relative to asset value.".to_string(),
        );
        0
    }
}

fn interest_points(sla: &SlaTerms, reasons: &mut Vec<String>) -> u32 {
    let Some(interest) = InterestTerm::from_field(sla.get(TermKey::InterestRateApr)) else {
        return 10;
    };

    let apr = interest.approx_apr();
    if apr < 5.0 {
        reasons.push(
            "Favorable financing: interest rate is below current market averages.".to_string(),
        );
        20
    } else if apr < 8.5 {
        10
    } else {
        reasons.push("High rent charge: consider negotiating the money factor.".to_string());
        0
    }
}

fn collect_flags(sla: &SlaTerms) -> Vec<String> {
    let mut flags = Vec::new();

    if let Some(interest) = InterestTerm::from_field(sla.get(TermKey::InterestRateApr)) {
        if interest.approx_apr() > HIGH_APR_FLAG {
            flags.push("High interest rate".to_string());
        }
    }

    if let Some(mileage) = sla.stated_amount(TermKey::MileageAllowancePerYear) {
        if mileage < LOW_MILEAGE_FLAG {
            flags.push("Low mileage limit".to_string());
        }
    }

    if let Some(monthly) = sla.stated_amount(TermKey::MonthlyPayment) {
        if monthly > HIGH_PAYMENT_FLAG {
            flags.push("High monthly payment".to_string());
        }
    }

    if sla.is_stated(TermKey::PenaltiesLateFees) {
        flags.push("Strict penalty clauses".to_string());
    }

    if sla.is_stated(TermKey::EarlyTerminationFee) {
        flags.push("Early termination charges".to_string());
    }

    flags
}
