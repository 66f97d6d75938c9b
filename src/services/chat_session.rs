// src/services/chat_session.rs
//! One browser profile's chat: a persistent session identifier plus the
//! page-lifetime conversation state. The on-screen transcript and the
//! context history are deliberately separate: the transcript is appended
//! optimistically, the history only after a successful round trip.

use std::collections::VecDeque;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::message::{ChatMeta, ChatRequest, ChatTurn, LeadPayload};
use crate::services::api_client::ApiClient;
use crate::storage::{SESSION_KEY, Storage};

/// Most recent 24 turns (12 exchanged pairs) travel with each request.
pub const HISTORY_LIMIT: usize = 24;

pub const GREETING: &str =
    "Привет! Я ИИ-консультант. Подскажу по номерам, датам заезда и помогу забронировать. Что интересует?";
pub const FALLBACK_ANSWER: &str =
    "Сейчас не получается ответить. Попробуйте ещё раз через минуту.";
pub const LEAD_CONFIRMATION: &str = "Спасибо! Контакты отправлены. Менеджер свяжется с вами.";
/// The sub-panel's retry line; worded slightly differently from the one
/// the page forms use.
pub const LEAD_RETRY_MESSAGE: &str = "Не удалось отправить. Попробуйте ещё раз чуть позже.";

const LEAD_TRIGGERS: [&str; 3] = ["телефон", "контакт", "перезвон"];

/// What the sub-panel shows inline when a submission fails: validation
/// keeps its field text, anything that went over the wire gets the
/// retry line.
pub fn lead_error_message(err: &AppError) -> String {
    match err {
        AppError::Validation(message) => message.clone(),
        AppError::Network(_) | AppError::ServerRejected(_) => LEAD_RETRY_MESSAGE.to_string(),
    }
}

/// Case-insensitive scan for words meaning the visitor should leave a
/// phone number. Best effort; false positives are acceptable.
pub fn wants_contact(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    LEAD_TRIGGERS.iter().any(|word| lower.contains(word))
}

#[derive(Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Answered { answer: String, offer_lead: bool },
    /// The backend was unreachable or refused. The transcript got the
    /// fallback line; history stayed as it was.
    Unavailable,
    /// Blank input, nothing happened.
    Ignored,
}

pub struct ChatSession {
    session_id: String,
    transcript: Vec<ChatTurn>,
    history: VecDeque<ChatTurn>,
    lead_prompt_open: bool,
}

impl ChatSession {
    /// Loads the persistent session identifier, creating it on first use.
    /// History always starts empty; only the identifier survives reloads.
    pub fn new(storage: &dyn Storage) -> Self {
        let session_id = match storage.get(SESSION_KEY) {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = Uuid::new_v4().to_string();
                storage.set(SESSION_KEY, &id);
                id
            }
        };
        Self {
            session_id,
            transcript: Vec::new(),
            history: VecDeque::new(),
            lead_prompt_open: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Display state: everything shown in the panel, including optimistic
    /// user lines and fallback answers that never made it into history.
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> impl Iterator<Item = &ChatTurn> {
        self.history.iter()
    }

    pub fn lead_prompt_open(&self) -> bool {
        self.lead_prompt_open
    }

    pub fn close_lead_prompt(&mut self) {
        self.lead_prompt_open = false;
    }

    /// Seeds the greeting line on the first open of a page load.
    /// Display only, never part of the context history.
    pub fn open(&mut self) -> bool {
        if self.transcript.is_empty() {
            self.transcript.push(ChatTurn::assistant(GREETING));
            return true;
        }
        false
    }

    /// One round trip with the answering service. The request carries the
    /// history as it stood before this message.
    pub async fn send_message(
        &mut self,
        client: &ApiClient,
        text: &str,
        page_url: &str,
    ) -> SendOutcome {
        let msg = text.trim();
        if msg.is_empty() {
            return SendOutcome::Ignored;
        }

        self.transcript.push(ChatTurn::user(msg));

        let request = ChatRequest {
            session_id: self.session_id.clone(),
            user_message: msg.to_string(),
            page_url: page_url.to_string(),
            meta: ChatMeta {
                history: self.history.iter().cloned().collect(),
            },
        };

        match client.request_answer(&request).await {
            Ok(answer) => {
                self.transcript.push(ChatTurn::assistant(&answer));
                self.history.push_back(ChatTurn::user(msg));
                self.history.push_back(ChatTurn::assistant(&answer));
                while self.history.len() > HISTORY_LIMIT {
                    self.history.pop_front();
                }
                let offer_lead = wants_contact(&answer);
                if offer_lead {
                    self.lead_prompt_open = true;
                }
                debug!(history = self.history.len(), offer_lead, "assistant answered");
                SendOutcome::Answered { answer, offer_lead }
            }
            Err(err) => {
                // The optimistic user line stays on screen but is not part
                // of the context sent with later messages.
                warn!("chat request failed: {err}");
                self.transcript.push(ChatTurn::assistant(FALLBACK_ANSWER));
                SendOutcome::Unavailable
            }
        }
    }

    /// Contact capture from the chat sub-panel. Validation failures never
    /// reach the network and leave the panel open; so does a failed
    /// submission, surfaced for an inline retry message.
    pub async fn submit_lead_form(
        &mut self,
        client: &ApiClient,
        name: &str,
        phone: &str,
        consent: bool,
        page_url: &str,
    ) -> Result<(), AppError> {
        let name = name.trim();
        let phone = phone.trim();
        if name.is_empty() || phone.is_empty() {
            return Err(AppError::Validation("Укажите имя и телефон.".to_string()));
        }
        if !consent {
            return Err(AppError::Validation(
                "Нужно согласие на обработку персональных данных.".to_string(),
            ));
        }

        let payload = LeadPayload {
            source: "chat_lead".to_string(),
            form_id: "aiChatLead".to_string(),
            page_url: page_url.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            comment: "Лид из чата".to_string(),
            offer: Some(String::new()),
        };
        client.submit_lead(&payload).await?;

        self.lead_prompt_open = false;
        self.transcript.push(ChatTurn::assistant(LEAD_CONFIRMATION));
        info!("chat lead submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn trigger_words_are_case_insensitive() {
        assert!(wants_contact("Оставьте контакт, пожалуйста"));
        assert!(wants_contact("ВАШ ТЕЛЕФОН?"));
        assert!(wants_contact("мы можем перезвонить вам"));
        assert!(!wants_contact("Чем ещё помочь?"));
        assert!(!wants_contact(""));
    }

    #[test]
    fn session_id_is_created_once_and_reused() {
        let storage = MemoryStorage::new();
        let first = ChatSession::new(&storage);
        let second = ChatSession::new(&storage);
        assert_eq!(first.session_id(), second.session_id());

        let other = ChatSession::new(&MemoryStorage::new());
        assert_ne!(first.session_id(), other.session_id());
    }

    #[test]
    fn greeting_appears_once_and_never_in_history() {
        let storage = MemoryStorage::new();
        let mut chat = ChatSession::new(&storage);
        assert!(chat.open());
        assert!(!chat.open());
        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.transcript()[0].content, GREETING);
        assert_eq!(chat.history_len(), 0);
    }
}
