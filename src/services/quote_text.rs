// src/services/quote_text.rs
//! Renders a computed quote into the human-readable lead summary shown in
//! the calc modal and handed to the manager.

use chrono::NaiveDate;

use crate::config::Config;
use crate::services::pricing::{Quote, StayRequest};

const PLACEHOLDER: &str = "—";
const NBSP: char = '\u{a0}';

/// "71 100 ₽" — whole rubles, NBSP-separated thousands, the way the page
/// renders RUB with zero fraction digits.
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(NBSP);
        }
        out.push(ch);
    }
    out.push(NBSP);
    out.push('₽');
    out
}

/// DD.MM.YYYY, or a placeholder dash when no date was picked.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d.%m.%Y").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn or_placeholder(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() { PLACEHOLDER } else { trimmed }
}

/// Fixed-order lead summary. The discount line only appears when the
/// discount actually applied; otherwise a placeholder keeps the shape.
pub fn build_lead_text(
    name: &str,
    phone: &str,
    request: &StayRequest,
    quote: &Quote,
    config: &Config,
) -> String {
    let discount_line = if quote.discount_applied {
        format!(
            "Скидка: -{} ({}%)",
            format_money(quote.discount),
            config.discount.percent
        )
    } else {
        "Скидка: —".to_string()
    };

    [
        "Заявка с лендинга «Санаторий Васильевский»".to_string(),
        String::new(),
        format!("Имя: {}", or_placeholder(name)),
        format!("Телефон: {}", or_placeholder(phone)),
        format!("Дата заезда: {}", format_date(request.checkin)),
        format!("Ночей: {}", quote.nights),
        format!(
            "Гостей: {} (взр: {}, дети: {})",
            quote.guests, request.adults, request.children
        ),
        format!("Номер: {}", request.room_type.label()),
        String::new(),
        format!("База: {}", format_money(quote.base)),
        discount_line,
        format!("Итого: {}", format_money(quote.total)),
        format!(
            "Аванс {}%: {}",
            config.prepay_percent,
            format_money(quote.prepay)
        ),
        format!("Остаток: {}", format_money(quote.rest)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(0), "0\u{a0}₽");
        assert_eq!(format_money(4200), "4\u{a0}200\u{a0}₽");
        assert_eq!(format_money(71100), "71\u{a0}100\u{a0}₽");
        assert_eq!(format_money(1234567), "1\u{a0}234\u{a0}567\u{a0}₽");
    }

    #[test]
    fn missing_date_renders_dash() {
        assert_eq!(format_date(None), "—");
        let d = NaiveDate::from_ymd_opt(2026, 5, 31).unwrap();
        assert_eq!(format_date(Some(d)), "31.05.2026");
    }
}
