use chrono::NaiveDate;
use vasilevo_landing::app::{App, CHAT_PANEL_ID, CookieConsent, HomeForm, MENU_ID, QUOTE_MODAL_ID};
use vasilevo_landing::services::overlay::{Effect, Family};
use vasilevo_landing::storage::MemoryStorage;

fn app() -> App {
    App::new("turist-rf.ru", "https://turist-rf.ru/", Box::new(MemoryStorage::new()))
}

fn filled_form() -> HomeForm {
    HomeForm {
        name: "Анна".to_string(),
        phone: "+7 900 000-00-00".to_string(),
        checkin: NaiveDate::from_ymd_opt(2026, 5, 1),
        days: 3,
        adults: 2,
        children: 1,
        room_code: "lux".to_string(),
        consent: true,
    }
}

fn validation_message(app: &mut App, form: HomeForm) -> String {
    match app.submit_home_form(&form) {
        Err(err) => {
            assert!(err.is_validation());
            // Validation keeps its field-specific text on the way to the UI.
            assert_eq!(vasilevo_landing::app::lead_error_message(&err), err.to_string());
            err.to_string()
        }
        Ok(_) => panic!("expected a validation error"),
    }
}

#[test]
fn home_form_is_validated_field_by_field() {
    let mut app = app();

    let mut form = filled_form();
    form.name.clear();
    assert_eq!(validation_message(&mut app, form), "Укажите имя.");

    let mut form = filled_form();
    form.phone = "   ".to_string();
    assert_eq!(validation_message(&mut app, form), "Укажите телефон.");

    let mut form = filled_form();
    form.checkin = None;
    assert_eq!(validation_message(&mut app, form), "Выберите дату заезда.");

    let mut form = filled_form();
    form.days = 0;
    assert_eq!(
        validation_message(&mut app, form),
        "Укажите количество дней (минимум 1)."
    );

    let mut form = filled_form();
    form.consent = false;
    assert_eq!(
        validation_message(&mut app, form),
        "Поставьте галочку согласия на обработку персональных данных."
    );

    // A failed submit never becomes the current lead.
    assert!(app.current_lead().is_none());
}

#[test]
fn home_form_submit_opens_the_quote_modal() {
    let mut app = app();
    let presentation = app.submit_home_form(&filled_form()).unwrap();

    assert_eq!(presentation.quote.base, 71_100);
    assert_eq!(presentation.quote.total, 63_990);
    assert!(presentation.effects.contains(&Effect::ScrollLock(true)));
    assert!(presentation.effects.contains(&Effect::SetAriaHidden {
        id: QUOTE_MODAL_ID.to_string(),
        hidden: false,
    }));
    assert!(app.overlays().is_open(Family::QuoteModal, QUOTE_MODAL_ID));

    assert!(presentation.lead_text.contains("Имя: Анна"));
    assert!(presentation.lead_text.contains("Номер: Люкс"));
    assert!(presentation.lead_text.contains("Дата заезда: 01.05.2026"));
    assert!(presentation.lead_text.contains("Гостей: 3 (взр: 2, дети: 1)"));
    assert!(
        presentation
            .lead_text
            .contains("Скидка: -7\u{a0}110\u{a0}₽ (10%)")
    );
    assert!(presentation.lead_text.contains("Аванс 30%: 19\u{a0}197\u{a0}₽"));
}

#[test]
fn discount_line_collapses_to_a_dash_outside_the_window() {
    let mut app = app();
    let mut form = filled_form();
    form.checkin = NaiveDate::from_ymd_opt(2026, 7, 1);

    let presentation = app.submit_home_form(&form).unwrap();
    assert!(!presentation.quote.discount_applied);
    assert!(presentation.lead_text.contains("Скидка: —"));
}

#[test]
fn each_quote_replaces_the_current_lead() {
    let mut app = app();
    app.submit_home_form(&filled_form()).unwrap();
    let first_total = app.current_lead().unwrap().quote.total;

    let mut form = filled_form();
    form.room_code = "standard".to_string();
    app.submit_home_form(&form).unwrap();

    let lead = app.send_current_lead_to_manager().unwrap();
    assert_ne!(lead.quote.total, first_total);
}

#[test]
fn escape_closes_the_quote_modal_and_releases_scroll() {
    let mut app = app();
    app.submit_home_form(&filled_form()).unwrap();

    let effects = app.escape();
    assert!(!app.overlays().is_open(Family::QuoteModal, QUOTE_MODAL_ID));
    assert!(effects.contains(&Effect::ScrollLock(false)));
}

#[test]
fn outside_click_dismisses_dropdowns_but_not_the_chat() {
    let mut app = app();
    app.overlays().open(Family::Dropdown, "roomType");
    app.open_chat();

    app.outside_click();
    assert!(!app.overlays().any_open(Family::Dropdown));
    assert!(app.overlays().is_open(Family::ChatPanel, CHAT_PANEL_ID));
}

#[test]
fn cookie_banner_shows_until_a_decision_is_stored() {
    let mut app = app();
    assert!(app.show_cookie_banner());
    assert!(app.cookie_decision().is_none());

    app.set_cookie_consent(CookieConsent::Rejected);
    assert!(!app.show_cookie_banner());
    assert_eq!(app.cookie_decision(), Some(CookieConsent::Rejected));
}

#[test]
fn booking_prefill_keeps_a_user_written_comment() {
    let mut app = app();

    let prefill = app.open_booking_modal("Бронирование: Комфорт", "уже написал сам");
    assert_eq!(prefill.offer, "Бронирование: Комфорт");
    assert!(prefill.comment.is_none());

    let prefill = app.open_booking_modal("Бронирование: условия", "");
    assert_eq!(prefill.comment.as_deref(), Some("Бронирование: условия"));
}

#[test]
fn menu_toggle_round_trip() {
    let mut app = app();
    let effects = app.overlays().toggle(Family::Menu, MENU_ID);
    assert!(effects.contains(&Effect::ScrollLock(true)));
    assert!(app.overlays().is_open(Family::Menu, MENU_ID));

    let effects = app.overlays().toggle(Family::Menu, MENU_ID);
    assert!(effects.contains(&Effect::ScrollLock(false)));
    assert!(!app.overlays().any_open(Family::Menu));
}

#[test]
fn chat_greeting_survives_panel_reopen() {
    let mut app = app();
    let (_, greeted) = app.open_chat();
    assert!(greeted);

    app.close_chat();
    let (_, greeted_again) = app.open_chat();
    assert!(!greeted_again);
    assert_eq!(app.chat().transcript().len(), 1);
}
