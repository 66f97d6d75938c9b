// src/services/pricing.rs
use chrono::NaiveDate;

use crate::config::{Config, DiscountPolicy};

/// Room categories offered on the landing. Unknown codes fall back to
/// `Standard`, so pricing never fails on bad input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoomType {
    #[default]
    Standard,
    Comfort,
    Lux,
}

impl RoomType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "comfort" => RoomType::Comfort,
            "lux" => RoomType::Lux,
            _ => RoomType::Standard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomType::Standard => "Стандарт",
            RoomType::Comfort => "Комфорт",
            RoomType::Lux => "Люкс",
        }
    }
}

/// Stay parameters after clamping. Build via [`StayRequest::clamped`] so
/// the floors and the stepper caps from the page hold everywhere.
#[derive(Clone, Copy, Debug)]
pub struct StayRequest {
    pub room_type: RoomType,
    pub nights: u32,
    pub adults: u32,
    pub children: u32,
    pub checkin: Option<NaiveDate>,
}

impl StayRequest {
    pub fn clamped(
        room_type: RoomType,
        nights: u32,
        adults: u32,
        children: u32,
        checkin: Option<NaiveDate>,
    ) -> Self {
        Self {
            room_type,
            nights: nights.max(1),
            adults: adults.clamp(1, 8),
            children: children.min(8),
            checkin,
        }
    }
}

/// Fully computed price breakdown for one stay. Derived once from a
/// request and the pricing config, never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub guests: u32,
    pub nights: u32,
    pub per_night: u64,
    pub base: u64,
    pub discount_applied: bool,
    pub discount: u64,
    pub total: u64,
    pub prepay: u64,
    pub rest: u64,
}

/// Half-up rounding of `amount × percent / 100` on whole currency units.
fn round_percent(amount: u64, percent: u32) -> u64 {
    (amount * u64::from(percent) + 50) / 100
}

/// The badge discount applies iff the check-in date falls inside the
/// window, end date inclusive. No date means no discount.
pub fn discount_active(checkin: Option<NaiveDate>, policy: &DiscountPolicy) -> bool {
    match checkin {
        Some(date) => date <= policy.valid_until,
        None => false,
    }
}

/// Pure quote computation. Inputs are re-floored here so a hand-built
/// request cannot produce a zero-guest or zero-night total.
pub fn compute_quote(request: &StayRequest, config: &Config) -> Quote {
    let nights = request.nights.max(1);
    let adults = request.adults.max(1);
    let guests = adults + request.children;

    let per_night = config.rates.per_night(request.room_type);
    let base = per_night * u64::from(nights) * u64::from(guests);

    let discount_applied = discount_active(request.checkin, &config.discount);
    let discount = if discount_applied {
        round_percent(base, config.discount.percent)
    } else {
        0
    };

    let total = base.saturating_sub(discount);
    let prepay = round_percent(total, config.prepay_percent);
    let rest = total.saturating_sub(prepay);

    Quote {
        guests,
        nights,
        per_night,
        base,
        discount_applied,
        discount,
        total,
        prepay,
        rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_percent(35, 30), 11); // 10.5 -> 11
        assert_eq!(round_percent(34, 30), 10); // 10.2 -> 10
        assert_eq!(round_percent(100, 0), 0);
        assert_eq!(round_percent(100, 100), 100);
    }

    #[test]
    fn unknown_room_code_is_standard() {
        assert_eq!(RoomType::from_code("standard"), RoomType::Standard);
        assert_eq!(RoomType::from_code("lux"), RoomType::Lux);
        assert_eq!(RoomType::from_code("penthouse"), RoomType::Standard);
        assert_eq!(RoomType::from_code(""), RoomType::Standard);
    }

    #[test]
    fn clamping_enforces_floors_and_caps() {
        let req = StayRequest::clamped(RoomType::Standard, 0, 0, 12, None);
        assert_eq!(req.nights, 1);
        assert_eq!(req.adults, 1);
        assert_eq!(req.children, 8);
    }
}
