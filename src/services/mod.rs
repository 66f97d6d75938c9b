pub mod api_client;
pub mod chat_session;
pub mod overlay;
pub mod pricing;
pub mod quote_text;
