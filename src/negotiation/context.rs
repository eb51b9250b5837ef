//! Negotiation context builder

use super::models::{ChatMessage, NegotiationContext, Role};
use crate::error::{AuditError, Result};
use tracing::debug;

/// Embedded in place of the contract when none was uploaded
pub const NO_CONTRACT_NOTICE: &str =
    "No specific contract uploaded. Answer based on general automotive knowledge.";

/// Contract text shorter than this is treated as a failed upload for greeting purposes
const MIN_CONTRACT_CHARS: usize = 50;

const PERSONA: &str = "You are an expert car lease consultant and market analyst.";

const INSTRUCTIONS: &str = "1. Answer strictly based on the contract data above when it is available.\n\
2. If no contract is provided, give general expert advice.\n\
3. Be concise, professional, and helpful.";

/// Build the message sequence for one chat turn.
///
/// The contract text is embedded verbatim, never truncated. Fails with
/// [`AuditError::EmptyMessage`] when `new_message` is blank and with
/// [`AuditError::SystemMessageInHistory`] when `history` carries a system
/// message, since the freshly built one must stay unique and first.
pub fn build_context(
    contract_text: Option<&str>,
    history: &[ChatMessage],
    new_message: &str,
) -> Result<NegotiationContext> {
    if new_message.trim().is_empty() {
        return Err(AuditError::EmptyMessage);
    }

    let contract = contract_text.filter(|t| !t.trim().is_empty());

    if let Some(index) = history.iter().position(|m| m.role == Role::System) {
        return Err(AuditError::SystemMessageInHistory { index });
    }

    debug!(
        has_contract = contract.is_some(),
        history_len = history.len(),
        "Building negotiation context"
    );

    Ok(NegotiationContext::from_parts(
        ChatMessage::system(system_prompt(contract)),
        history.to_vec(),
        ChatMessage::user(new_message),
    ))
}

fn system_prompt(contract: Option<&str>) -> String {
    format!(
        "{}\n\n[UPLOADED CONTRACT DATA]:\n{}\n\n[INSTRUCTIONS]:\n{}",
        PERSONA,
        contract.unwrap_or(NO_CONTRACT_NOTICE),
        INSTRUCTIONS
    )
}

/// First assistant message shown before the user asks anything
pub fn opening_greeting(contract_text: Option<&str>) -> ChatMessage {
    let has_contract =
        contract_text.is_some_and(|t| t.trim().chars().count() > MIN_CONTRACT_CHARS);

    let content = if has_contract {
        "Hello! I have the contract details loaded. Ask me about terms, fees, or negotiation strategies."
    } else {
        "Hello! I am your auto lease assistant. I don't see a contract yet, but ask me general questions about market values or lease terms!"
    };

    ChatMessage::assistant(content)
}
