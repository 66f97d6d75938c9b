// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One line of conversation, both in the on-screen transcript and in the
/// history bundle sent to the answering service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Outbound contact record for `POST /api/lead`. Consent is checked
/// locally before this is ever built, so it is not part of the wire body.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub source: String,
    pub form_id: String,
    pub page_url: String,
    pub name: String,
    pub phone: String,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer: Option<String>,
}

/// Body of `POST /api/chat`. `meta.history` carries the conversation as it
/// stood before `user_message`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: String,
    pub user_message: String,
    pub page_url: String,
    pub meta: ChatMeta,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatMeta {
    pub history: Vec<ChatTurn>,
}

/// Response envelope shared by both endpoints. Missing fields deserialize
/// to their defaults so a malformed body reads as a plain rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
