//! HTTP handlers
//!
//! Thin wrappers: deserialize, call the pure core function, record metrics.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::models::{
    error_codes, ApiError, ChatResponse, ClassifyRequest, ContractRequest, GreetingRequest,
    GuidanceRequest, NegotiationContextResponse, NegotiationRequest, VinRequest, VinResponse,
};
use crate::error::AuditError;
use crate::fairness::{classify_assessment, score_contract, ClassifiedAssessment};
use crate::metrics::METRICS;
use crate::negotiation::{
    build_context, guidance, opening_greeting, ChatClient, ChatMessage, NegotiationContext,
    NegotiationGuidance,
};
use crate::valuation::{evaluate, ValuationResult};
use crate::vin::{normalize, VinStatus};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub chat_client: Arc<dyn ChatClient>,
}

type Rejection = (StatusCode, Json<ApiError>);
type ApiResult<T> = Result<Json<T>, Rejection>;
type Payload<T> = Result<Json<T>, JsonRejection>;

fn reject(err: AuditError) -> Rejection {
    let (status, code) = match &err {
        e if e.is_validation() => (StatusCode::UNPROCESSABLE_ENTITY, error_codes::VALIDATION_ERROR),
        AuditError::Upstream(_) => (StatusCode::BAD_GATEWAY, error_codes::UPSTREAM_ERROR),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
    };
    (status, Json(ApiError::new(code, err.to_string())))
}

/// Unwrap a JSON body, reporting malformed input in the `ApiError` shape
fn body<T>(payload: Payload<T>) -> Result<T, Rejection> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ApiError::new(error_codes::VALIDATION_ERROR, rejection.body_text())),
        )
    })
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// GET /metrics
pub async fn metrics() -> Result<String, Rejection> {
    METRICS.gather().map_err(|e| {
        error!("Metrics encoding failed: {}", e);
        reject(AuditError::Internal(e.to_string()))
    })
}

/// Normalize a raw VIN
///
/// POST /api/v1/vin/normalize
pub async fn normalize_vin(payload: Payload<VinRequest>) -> ApiResult<VinResponse> {
    let request = body(payload)?;
    let status = normalize(&request.raw);
    METRICS.record_vin(status.is_valid());

    match status {
        VinStatus::Valid(vin) => Ok(Json(VinResponse {
            suspicious: vin.has_restricted_letters(),
            vin: vin.to_string(),
            valid: true,
        })),
        VinStatus::Invalid { cleaned, length } => {
            info!("Rejected VIN candidate with {} characters", length);
            Err(reject(AuditError::InvalidVin { cleaned, length }))
        }
    }
}

/// Evaluate buyout against market
///
/// POST /api/v1/valuation
pub async fn valuation(payload: Payload<ContractRequest>) -> ApiResult<ValuationResult> {
    let request = body(payload)?;
    let result = evaluate(&request.sla, &request.market);
    METRICS.record_valuation(result.recommendation.as_str());
    Ok(Json(result))
}

/// Classify an upstream fairness assessment
///
/// POST /api/v1/fairness/classify
pub async fn classify(payload: Payload<ClassifyRequest>) -> ApiResult<ClassifiedAssessment> {
    let request = body(payload)?;
    let classified = classify_assessment(request.assessment);
    METRICS.record_classification(classified.band.as_str());
    Ok(Json(classified))
}

/// Score a contract locally, then classify
///
/// POST /api/v1/fairness/score
pub async fn score(payload: Payload<ContractRequest>) -> ApiResult<ClassifiedAssessment> {
    let request = body(payload)?;
    let assessment = score_contract(&request.sla, &request.market);
    let classified = classify_assessment(assessment);
    METRICS.record_classification(classified.band.as_str());
    Ok(Json(classified))
}

fn context_for(request: &NegotiationRequest) -> Result<NegotiationContext, Rejection> {
    if let Some(ref contract) = request.contract {
        debug!(batch_id = %contract.batch_id, "Negotiating over uploaded contract");
    }

    let context = build_context(
        request.contract.as_ref().map(|c| c.text.as_str()),
        &request.history,
        &request.message,
    )
    .map_err(reject)?;
    METRICS.negotiation_contexts.inc();
    Ok(context)
}

/// Opening assistant message for a fresh chat
///
/// POST /api/v1/negotiation/greeting
pub async fn negotiation_greeting(payload: Payload<GreetingRequest>) -> ApiResult<ChatMessage> {
    let request = body(payload)?;
    Ok(Json(opening_greeting(
        request.contract.as_ref().map(|c| c.text.as_str()),
    )))
}

/// Rule-based tips and dealer messages
///
/// POST /api/v1/negotiation/tips
pub async fn negotiation_tips(payload: Payload<GuidanceRequest>) -> ApiResult<NegotiationGuidance> {
    let request = body(payload)?;
    Ok(Json(guidance(
        &request.sla,
        &request.market,
        request.vehicle.as_deref(),
    )))
}

/// Assemble the negotiation context without calling the chat collaborator
///
/// POST /api/v1/negotiation/context
pub async fn negotiation_context(
    payload: Payload<NegotiationRequest>,
) -> ApiResult<NegotiationContextResponse> {
    let request = body(payload)?;
    let context = context_for(&request)?;
    Ok(Json(NegotiationContextResponse {
        messages: context.into_messages(),
    }))
}

/// One negotiation chat turn
///
/// POST /api/v1/negotiation/chat
pub async fn negotiation_chat(
    State(state): State<AppState>,
    payload: Payload<NegotiationRequest>,
) -> ApiResult<ChatResponse> {
    let request = body(payload)?;
    let context = context_for(&request)?;
    let start = Instant::now();

    match state.chat_client.complete(&context).await {
        Ok(response) => {
            METRICS.record_chat(true, start.elapsed().as_secs_f64());
            Ok(Json(ChatResponse { response }))
        }
        Err(e) => {
            METRICS.record_chat(false, start.elapsed().as_secs_f64());
            warn!("Chat collaborator failed: {}", e);
            Err(reject(e.into()))
        }
    }
}
