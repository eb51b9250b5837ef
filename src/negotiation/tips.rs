//! Deterministic negotiation guidance
//!
//! Rule-based tips from the contract terms and ready-to-send dealer
//! messages built from the local fairness score. Available without the
//! chat collaborator.

use crate::fairness::{score_contract, FairnessAssessment};
use crate::terms::{InterestTerm, SlaTerms, TermKey};
use crate::valuation::MarketReference;
use serde::{Deserialize, Serialize};
use tracing::debug;

const HIGH_APR: f64 = 6.0;
const HIGH_DOWN_PAYMENT: f64 = 3_000.0;
const LOW_MILEAGE: f64 = 10_000.0;
const HIGH_TERMINATION_FEE: f64 = 500.0;

/// Generic strategies appended after the contract-specific tips
pub const GENERAL_STRATEGIES: [&str; 5] = [
    "Focus on the monthly payment first, then discuss other terms",
    "Mention competitor offers to create leverage",
    "Ask for value-added services instead of price reduction",
    "Use the 'walk-away' power if terms are not favorable",
    "Bundle multiple services for better pricing",
];

/// Dealer messages in three tones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationMessages {
    pub polite: String,
    pub firm: String,
    pub legal_based: String,
}

/// Everything the holder needs to open a negotiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationGuidance {
    pub score: u8,
    pub tips: Vec<String>,
    pub strategies: Vec<String>,
    /// Terms the contract leaves out; worth asking for in writing
    pub missing_terms: Vec<TermKey>,
    pub messages: NegotiationMessages,
}

/// Contract-specific tips, most pressing first
pub fn negotiation_tips(sla: &SlaTerms) -> Vec<String> {
    let mut tips = Vec::new();

    if let Some(interest) = InterestTerm::from_field(sla.get(TermKey::InterestRateApr)) {
        if interest.approx_apr() > HIGH_APR {
            tips.push("Interest rate is above market average. Target 4-5% range.".to_string());
        }
    }

    if sla.stated_amount(TermKey::DownPayment).is_some_and(|down| down > HIGH_DOWN_PAYMENT) {
        tips.push("Down payment seems high. Try to negotiate under $2,000.".to_string());
    }

    if sla
        .stated_amount(TermKey::MileageAllowancePerYear)
        .is_some_and(|miles| miles < LOW_MILEAGE)
    {
        tips.push("Mileage limit is low. Request at least 12,000 miles/year.".to_string());
    }

    if sla
        .stated_amount(TermKey::EarlyTerminationFee)
        .is_some_and(|fee| fee > HIGH_TERMINATION_FEE)
    {
        tips.push("Early termination fee is excessive. Aim for $300 or less.".to_string());
    }

    if !sla.is_stated(TermKey::BuyoutPrice) && !sla.is_stated(TermKey::ResidualValue) {
        tips.push(
            "No buyout or residual value stated. Ask for the lease-end purchase price in writing."
                .to_string(),
        );
    }

    tips
}

/// Polite, firm and legal-based dealer messages.
///
/// The second and third reasons are quoted when there are more than two
/// (the first is usually the equity summary), otherwise all of them.
pub fn template_messages(
    vehicle: Option<&str>,
    sla: &SlaTerms,
    assessment: &FairnessAssessment,
) -> NegotiationMessages {
    let vehicle = vehicle
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("vehicle");
    let monthly = stated_or_quoted(sla, TermKey::MonthlyPayment);
    let apr = stated_or_quoted(sla, TermKey::InterestRateApr);

    let reasons = &assessment.reasons;
    let top = if reasons.len() > 2 { &reasons[1..3] } else { &reasons[..] };
    let concerns = if top.is_empty() {
        "several concerns with the terms".to_string()
    } else {
        top.iter()
            .map(|r| r.trim().trim_end_matches('.'))
            .collect::<Vec<_>>()
            .join(". Additionally, ")
    };

    let polite = format!(
        "Hi, I'm very interested in the {vehicle}, but after reviewing the contract details, \
         I noticed {}. I'd love to work together to find terms that work better for both of us. \
         Would you be open to discussing the {monthly} monthly payment and {apr} APR? \
         I'm a serious buyer and would like to move forward if we can reach an agreement. \
         Thank you for your time!",
        lowercase_first(&concerns),
    );

    let firm = format!(
        "I've reviewed the contract for the {vehicle} and have concerns about several terms. \
         The current fairness score based on market standards is {}/100. Specifically: {concerns}. \
         I need you to revise the {monthly} monthly payment and {apr} APR to market-competitive \
         rates before I can proceed. Please provide an updated offer within 48 hours.",
        assessment.score,
    );

    let legal_based = format!(
        "After thorough analysis of the proposed contract for the {vehicle}, I must highlight \
         several terms that don't align with industry standards and consumer protection \
         guidelines. {}. Per Truth in Lending Act requirements, I'm requesting full disclosure \
         of all fees and a revised offer with competitive rates. The {apr} APR and {monthly} \
         monthly payment structure require adjustment to reflect fair market terms. Please \
         provide documentation supporting these charges or submit revised terms.",
        uppercase_first(&concerns),
    );

    NegotiationMessages {
        polite,
        firm,
        legal_based,
    }
}

/// Score the contract locally, then derive tips and messages from it
pub fn guidance(
    sla: &SlaTerms,
    market: &MarketReference,
    vehicle: Option<&str>,
) -> NegotiationGuidance {
    let assessment = score_contract(sla, market);
    let tips = negotiation_tips(sla);
    let missing_terms = sla.missing_terms();

    debug!(
        score = assessment.score,
        tips = tips.len(),
        missing = missing_terms.len(),
        "Built negotiation guidance"
    );

    NegotiationGuidance {
        score: assessment.score,
        messages: template_messages(vehicle, sla, &assessment),
        tips,
        strategies: GENERAL_STRATEGIES.iter().map(|s| s.to_string()).collect(),
        missing_terms,
    }
}

fn stated_or_quoted(sla: &SlaTerms, key: TermKey) -> &str {
    match sla.get(key) {
        Some(value) if sla.is_stated(key) => value.trim(),
        _ => "quoted",
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tough_contract() -> SlaTerms {
        SlaTerms::default()
            .with(TermKey::InterestRateApr, "7.9%")
            .with(TermKey::DownPayment, "$4,000")
            .with(TermKey::MileageAllowancePerYear, "7,500 miles")
            .with(TermKey::EarlyTerminationFee, "$750")
            .with(TermKey::MonthlyPayment, "$529")
            .with(TermKey::BuyoutPrice, "$24,000")
    }

    #[test]
    fn test_all_rules_fire() {
        let tips = negotiation_tips(&tough_contract());
        assert_eq!(tips.len(), 4);
        assert!(tips[0].starts_with("Interest rate is above market average"));
        assert!(tips[1].starts_with("Down payment seems high"));
        assert!(tips[2].starts_with("Mileage limit is low"));
        assert!(tips[3].starts_with("Early termination fee is excessive"));
    }

    #[test]
    fn test_fair_contract_has_no_tips() {
        let sla = SlaTerms::default()
            .with(TermKey::InterestRateApr, "0.00125")
            .with(TermKey::DownPayment, "$2,000")
            .with(TermKey::MileageAllowancePerYear, "12,000")
            .with(TermKey::EarlyTerminationFee, "$300")
            .with(TermKey::ResidualValue, "$18,000");
        assert!(negotiation_tips(&sla).is_empty());
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let sla = SlaTerms::default()
            .with(TermKey::InterestRateApr, "6%")
            .with(TermKey::DownPayment, "$3,000")
            .with(TermKey::MileageAllowancePerYear, "10,000")
            .with(TermKey::EarlyTerminationFee, "$500")
            .with(TermKey::BuyoutPrice, "$20,000");
        assert!(negotiation_tips(&sla).is_empty());
    }

    #[test]
    fn test_missing_buyout_tip() {
        let tips = negotiation_tips(&SlaTerms::default());
        assert_eq!(tips.len(), 1);
        assert!(tips[0].contains("purchase price in writing"));
    }

    #[test]
    fn test_messages_quote_terms_and_concerns() {
        let assessment = FairnessAssessment {
            score: 42,
            assessment: None,
            reasons: vec![
                "Stable asset: positive equity detected.".to_string(),
                "Low payment efficiency: monthly cost is high relative to asset value.".to_string(),
                "High rent charge: consider negotiating the money factor.".to_string(),
                "ignored".to_string(),
            ],
            flags: vec![],
        };

        let messages = template_messages(Some("2021 Honda Civic"), &tough_contract(), &assessment);

        assert!(messages.polite.contains("the 2021 Honda Civic"));
        assert!(messages.polite.contains("I noticed low payment efficiency"));
        assert!(messages.polite.contains("the $529 monthly payment and 7.9% APR"));
        assert!(messages.firm.contains("42/100"));
        assert!(messages
            .firm
            .contains("Additionally, High rent charge: consider negotiating the money factor."));
        assert!(!messages.firm.contains("ignored"));
        assert!(!messages.polite.contains("Stable asset"));
        assert!(messages.legal_based.starts_with("After thorough analysis"));
        assert!(messages.legal_based.contains("Truth in Lending Act"));
    }

    #[test]
    fn test_messages_without_details() {
        let messages =
            template_messages(Some("  "), &SlaTerms::default(), &FairnessAssessment::default());

        assert!(messages.polite.contains("the vehicle"));
        assert!(messages.polite.contains("several concerns with the terms"));
        assert!(messages.firm.contains("the quoted monthly payment and quoted APR"));
        assert!(messages.legal_based.contains("Several concerns with the terms."));
    }

    #[test]
    fn test_guidance_combines_score_tips_and_gaps() {
        let guidance = guidance(&tough_contract(), &MarketReference::new(20000.0), None);

        // 5 (buyout 20% over market) + 0 (payment 2.6%) + 10 (7.9% APR)
        assert_eq!(guidance.score, 15);
        assert_eq!(guidance.tips.len(), 4);
        assert_eq!(guidance.strategies.len(), GENERAL_STRATEGIES.len());
        assert!(guidance.missing_terms.contains(&TermKey::WarrantyCoverage));
        assert!(!guidance.missing_terms.contains(&TermKey::BuyoutPrice));
        assert!(guidance.messages.firm.contains("15/100"));
    }
}
