// src/storage.rs
use std::collections::HashMap;
use std::sync::Mutex;

/// Chat session identifier, created once per browser profile.
pub const SESSION_KEY: &str = "ai_chat_session";
/// Cookie-consent decision, "accepted" | "rejected".
pub const CONSENT_KEY: &str = "vasilevo_cookie_consent";

/// localStorage-shaped persistence seam. Only two keys ever live here:
/// the chat session identifier and the cookie-consent decision.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().expect("storage lock").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .expect("storage lock")
            .insert(key.to_string(), value.to_string());
    }
}
