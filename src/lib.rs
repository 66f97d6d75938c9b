//! Client-side core of the «Санаторий Васильевский» landing page:
//! price quotation, lead capture, the AI chat widget and overlay state.
//!
//! The UI shell translates raw events (clicks, form submits, key presses)
//! into named operations on [`app::App`]; everything that talks to the
//! backend goes through [`services::api_client::ApiClient`].

pub mod app;
pub mod config;
pub mod error;
pub mod message;
pub mod services;
pub mod storage;
