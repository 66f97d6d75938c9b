// src/app.rs
//! Command-dispatch root. The UI shell turns raw DOM events into the
//! named operations here; each operation touches exactly the state it
//! owns and reports effects/results for the shell to render.

use chrono::NaiveDate;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::message::LeadPayload;
use crate::services::api_client::ApiClient;
use crate::services::chat_session::{ChatSession, SendOutcome};
use crate::services::overlay::{Effect, Family, OverlayCoordinator};
use crate::services::pricing::{Quote, RoomType, StayRequest, compute_quote};
use crate::services::quote_text::build_lead_text;
use crate::storage::{CONSENT_KEY, Storage};

pub const QUOTE_MODAL_ID: &str = "calcModal";
pub const BOOKING_MODAL_ID: &str = "bookingModal";
pub const CHAT_PANEL_ID: &str = "aiChatPanel";
pub const MENU_ID: &str = "mobileMenu";

pub const LEAD_RETRY_MESSAGE: &str = "Не удалось отправить. Попробуйте ещё раз или чуть позже.";
pub const LEAD_SENT_MESSAGE: &str = "Заявка отправлена! Мы свяжемся с вами.";
const CONSENT_ERROR: &str = "Поставьте галочку согласия на обработку персональных данных.";

/// Maps a failed lead submission to what the booking/contacts forms show
/// inline: the field-specific text for validation, the single retry line
/// for anything that went over the wire. The chat sub-panel has its own
/// wording, see [`chat_session::lead_error_message`].
///
/// [`chat_session::lead_error_message`]: crate::services::chat_session::lead_error_message
pub fn lead_error_message(err: &AppError) -> String {
    match err {
        AppError::Validation(message) => message.clone(),
        AppError::Network(_) | AppError::ServerRejected(_) => LEAD_RETRY_MESSAGE.to_string(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CookieConsent {
    Accepted,
    Rejected,
}

impl CookieConsent {
    pub fn as_str(self) -> &'static str {
        match self {
            CookieConsent::Accepted => "accepted",
            CookieConsent::Rejected => "rejected",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "accepted" => Some(CookieConsent::Accepted),
            "rejected" => Some(CookieConsent::Rejected),
            _ => None,
        }
    }
}

/// Raw values of the hero form (`#formHome`), pre-parse but post-widget:
/// the steppers and the date picker already produce typed values.
#[derive(Clone, Debug, Default)]
pub struct HomeForm {
    pub name: String,
    pub phone: String,
    pub checkin: Option<NaiveDate>,
    pub days: u32,
    pub adults: u32,
    pub children: u32,
    pub room_code: String,
    pub consent: bool,
}

/// A quote held as the current lead until the next one replaces it.
/// Discarded on replacement; never persisted.
#[derive(Clone, Debug)]
pub struct CurrentLead {
    pub request: StayRequest,
    pub quote: Quote,
    pub lead_text: String,
}

/// Everything the quote modal renders, plus the overlay effects of
/// opening it.
#[derive(Clone, Debug)]
pub struct QuotePresentation {
    pub request: StayRequest,
    pub quote: Quote,
    pub lead_text: String,
    pub effects: Vec<Effect>,
}

/// What the booking modal should show when opened from a trigger button.
#[derive(Clone, Debug)]
pub struct BookingPrefill {
    pub offer: String,
    /// Set only when the comment field was empty; user input is kept.
    pub comment: Option<String>,
    pub effects: Vec<Effect>,
}

pub struct App {
    config: Config,
    client: ApiClient,
    storage: Box<dyn Storage>,
    overlays: OverlayCoordinator,
    chat: ChatSession,
    page_url: String,
    current_lead: Option<CurrentLead>,
    booking_offer: String,
}

impl App {
    pub fn new(host: &str, page_url: impl Into<String>, storage: Box<dyn Storage>) -> Self {
        let client = ApiClient::for_host(host);
        Self::with_client(client, page_url, storage)
    }

    /// Same as [`App::new`] but with an explicit backend root. Tests point
    /// this at an in-process server.
    pub fn with_client(
        client: ApiClient,
        page_url: impl Into<String>,
        storage: Box<dyn Storage>,
    ) -> Self {
        let chat = ChatSession::new(storage.as_ref());
        Self {
            config: Config::default(),
            client,
            storage,
            overlays: OverlayCoordinator::new(),
            chat,
            page_url: page_url.into(),
            current_lead: None,
            booking_offer: String::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Plain widgets (menu, dropdowns) drive the coordinator directly.
    /// Page-level key and click handling goes through [`App::escape`] and
    /// [`App::outside_click`] instead.
    pub fn overlays(&mut self) -> &mut OverlayCoordinator {
        &mut self.overlays
    }

    /// Escape closes every open overlay. When the chat panel goes with
    /// it, the lead sub-panel is hidden too, same as an explicit close.
    pub fn escape(&mut self) -> Vec<Effect> {
        let chat_was_open = self.overlays.any_open(Family::ChatPanel);
        let effects = self.overlays.escape();
        if chat_was_open {
            self.chat.close_lead_prompt();
        }
        effects
    }

    /// A click outside any control dismisses dropdown-style overlays only,
    /// so the chat state is never involved.
    pub fn outside_click(&mut self) -> Vec<Effect> {
        self.overlays.outside_click()
    }

    pub fn current_lead(&self) -> Option<&CurrentLead> {
        self.current_lead.as_ref()
    }

    // ---- cookie banner

    pub fn cookie_decision(&self) -> Option<CookieConsent> {
        self.storage
            .get(CONSENT_KEY)
            .as_deref()
            .and_then(CookieConsent::from_str)
    }

    /// Once a decision is stored the banner never reappears.
    pub fn show_cookie_banner(&self) -> bool {
        self.cookie_decision().is_none()
    }

    pub fn set_cookie_consent(&mut self, consent: CookieConsent) {
        self.storage.set(CONSENT_KEY, consent.as_str());
    }

    // ---- hero form -> quote modal

    /// Validates the hero form, computes the quote and opens the quote
    /// modal. The result replaces whatever lead was current before.
    pub fn submit_home_form(&mut self, form: &HomeForm) -> Result<QuotePresentation, AppError> {
        let name = form.name.trim();
        let phone = form.phone.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Укажите имя.".to_string()));
        }
        if phone.is_empty() {
            return Err(AppError::Validation("Укажите телефон.".to_string()));
        }
        let Some(checkin) = form.checkin else {
            return Err(AppError::Validation("Выберите дату заезда.".to_string()));
        };
        if form.days < 1 {
            return Err(AppError::Validation(
                "Укажите количество дней (минимум 1).".to_string(),
            ));
        }
        if !form.consent {
            return Err(AppError::Validation(CONSENT_ERROR.to_string()));
        }

        let request = StayRequest::clamped(
            RoomType::from_code(&form.room_code),
            form.days,
            form.adults,
            form.children,
            Some(checkin),
        );
        let quote = compute_quote(&request, &self.config);
        let lead_text = build_lead_text(name, phone, &request, &quote, &self.config);

        self.current_lead = Some(CurrentLead {
            request,
            quote,
            lead_text: lead_text.clone(),
        });
        let effects = self.overlays.open(Family::QuoteModal, QUOTE_MODAL_ID);
        info!(total = quote.total, "quote computed");

        Ok(QuotePresentation {
            request,
            quote,
            lead_text,
            effects,
        })
    }

    pub fn close_quote_modal(&mut self) -> Vec<Effect> {
        self.overlays.close(Family::QuoteModal, QUOTE_MODAL_ID)
    }

    /// "Send to manager" from the quote modal: hands back the prepared
    /// lead, if one is current, for the shell to forward.
    pub fn send_current_lead_to_manager(&self) -> Option<&CurrentLead> {
        self.current_lead.as_ref()
    }

    // ---- booking modal

    /// Opening from a trigger button carries its context ("Бронирование:
    /// Люкс" etc.) into the offer field and, if it was empty, the comment.
    pub fn open_booking_modal(&mut self, context: &str, existing_comment: &str) -> BookingPrefill {
        self.booking_offer = context.to_string();
        let comment = if existing_comment.trim().is_empty() && !context.is_empty() {
            Some(context.to_string())
        } else {
            None
        };
        let effects = self.overlays.open(Family::BookingModal, BOOKING_MODAL_ID);
        BookingPrefill {
            offer: context.to_string(),
            comment,
            effects,
        }
    }

    pub fn close_booking_modal(&mut self) -> Vec<Effect> {
        self.overlays.close(Family::BookingModal, BOOKING_MODAL_ID)
    }

    /// Booking modal submit. Success closes the modal; any failure keeps
    /// it open and resubmittable.
    pub async fn submit_booking_form(
        &mut self,
        name: &str,
        phone: &str,
        comment: &str,
        consent: bool,
    ) -> Result<Vec<Effect>, AppError> {
        let payload = self.validated_lead(
            "booking_modal",
            "formBooking",
            name,
            phone,
            comment,
            consent,
            Some(self.booking_offer.clone()),
        )?;
        self.client.submit_lead(&payload).await?;
        Ok(self.close_booking_modal())
    }

    /// Contacts section form. Success means the shell resets the fields.
    pub async fn submit_contacts_form(
        &mut self,
        name: &str,
        phone: &str,
        comment: &str,
        consent: bool,
    ) -> Result<(), AppError> {
        let payload =
            self.validated_lead("contacts_form", "formContacts", name, phone, comment, consent, None)?;
        self.client.submit_lead(&payload).await?;
        Ok(())
    }

    fn validated_lead(
        &self,
        source: &str,
        form_id: &str,
        name: &str,
        phone: &str,
        comment: &str,
        consent: bool,
        offer: Option<String>,
    ) -> Result<LeadPayload, AppError> {
        let name = name.trim();
        let phone = phone.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Укажите имя.".to_string()));
        }
        if phone.is_empty() {
            return Err(AppError::Validation("Укажите телефон.".to_string()));
        }
        if !consent {
            return Err(AppError::Validation(CONSENT_ERROR.to_string()));
        }
        Ok(LeadPayload {
            source: source.to_string(),
            form_id: form_id.to_string(),
            page_url: self.page_url.clone(),
            name: name.to_string(),
            phone: phone.to_string(),
            comment: comment.trim().to_string(),
            offer,
        })
    }

    // ---- chat widget

    /// Fab click when the panel is closed. Returns the overlay effects and
    /// whether the greeting line was just seeded.
    pub fn open_chat(&mut self) -> (Vec<Effect>, bool) {
        let effects = self.overlays.open(Family::ChatPanel, CHAT_PANEL_ID);
        let greeted = self.chat.open();
        (effects, greeted)
    }

    /// Closing the panel also hides the lead sub-panel.
    pub fn close_chat(&mut self) -> Vec<Effect> {
        self.chat.close_lead_prompt();
        self.overlays.close(Family::ChatPanel, CHAT_PANEL_ID)
    }

    pub async fn chat_send(&mut self, text: &str) -> SendOutcome {
        self.chat
            .send_message(&self.client, text, &self.page_url)
            .await
    }

    pub async fn chat_lead_submit(
        &mut self,
        name: &str,
        phone: &str,
        consent: bool,
    ) -> Result<(), AppError> {
        self.chat
            .submit_lead_form(&self.client, name, phone, consent, &self.page_url)
            .await
    }
}
