//! Request and response types for the HTTP API

use crate::fairness::FairnessAssessment;
use crate::negotiation::ChatMessage;
use crate::terms::{RawContract, SlaTerms};
use crate::valuation::MarketReference;
use serde::{Deserialize, Serialize};

/// VIN normalization request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VinRequest {
    pub raw: String,
}

/// VIN normalization response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VinResponse {
    pub vin: String,
    pub valid: bool,
    /// Contains I, O or Q, likely an OCR misread
    pub suspicious: bool,
}

/// Valuation or local scoring request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRequest {
    #[serde(default)]
    pub sla: SlaTerms,
    #[serde(default)]
    pub market: MarketReference,
}

/// Fairness classification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub assessment: FairnessAssessment,
}

/// Negotiation context request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationRequest {
    /// Extracted contract, absent when nothing was uploaded
    #[serde(default)]
    pub contract: Option<RawContract>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub message: String,
}

/// Opening greeting request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GreetingRequest {
    #[serde(default)]
    pub contract: Option<RawContract>,
}

/// Negotiation guidance request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceRequest {
    #[serde(default)]
    pub sla: SlaTerms,
    #[serde(default)]
    pub market: MarketReference,
    /// Display name such as "2021 Honda Civic"
    #[serde(default)]
    pub vehicle: Option<String>,
}

/// Negotiation context response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationContextResponse {
    pub messages: Vec<ChatMessage>,
}

/// Chat reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// API error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Standard error codes
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_request_defaults() {
        let request: ContractRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.sla, SlaTerms::default());
        assert!(!request.market.is_available());
    }

    #[test]
    fn test_negotiation_request_minimal() {
        let request: NegotiationRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(request.contract.is_none());
        assert!(request.history.is_empty());
    }

    #[test]
    fn test_negotiation_request_with_contract() {
        let request: NegotiationRequest = serde_json::from_str(
            r#"{"contract": {"batch_id": "b-17", "text": "Residual: $18,000"}, "message": "hi"}"#,
        )
        .unwrap();
        let contract = request.contract.unwrap();
        assert_eq!(contract.batch_id, "b-17");
        assert_eq!(contract.text, "Residual: $18,000");
    }
}
