//! Negotiation chat context
//!
//! Assembles the role-tagged message sequence handed to the chat-completion
//! collaborator: one system message carrying the contract, the prior
//! history in order, then the new user message. The HTTP client for that
//! collaborator lives in [`client`]; rule-based guidance that needs no
//! collaborator lives in [`tips`].

pub mod client;
pub mod context;
pub mod models;
pub mod tips;

pub use client::{ChatClient, ChatError, HttpChatClient};
pub use context::{build_context, opening_greeting, NO_CONTRACT_NOTICE};
pub use models::{ChatMessage, NegotiationContext, Role};
pub use tips::{
    guidance, negotiation_tips, template_messages, NegotiationGuidance, NegotiationMessages,
    GENERAL_STRATEGIES,
};
