// src/config.rs
use chrono::NaiveDate;

use crate::services::pricing::RoomType;

pub const LOCAL_API_BASE: &str = "http://localhost:8080";
pub const PROD_API_BASE: &str = "https://api.turist-rf.ru";

/// Picks the backend root the way the page does: local hosts talk to the
/// dev backend, everything else to production.
pub fn api_base_for_host(host: &str) -> &'static str {
    if host == "localhost" || host == "127.0.0.1" {
        LOCAL_API_BASE
    } else {
        PROD_API_BASE
    }
}

/// Per-person per-night rates in whole rubles.
#[derive(Clone, Copy, Debug)]
pub struct RateTable {
    pub standard: u64,
    pub comfort: u64,
    pub lux: u64,
}

impl RateTable {
    pub fn per_night(&self, room: RoomType) -> u64 {
        match room {
            RoomType::Standard => self.standard,
            RoomType::Comfort => self.comfort,
            RoomType::Lux => self.lux,
        }
    }
}

/// The landing-wide discount badge: a percentage valid for check-in dates
/// up to and including `valid_until`.
#[derive(Clone, Copy, Debug)]
pub struct DiscountPolicy {
    pub percent: u32,
    pub valid_until: NaiveDate,
}

/// Process-wide pricing configuration. Built once at startup, never
/// mutated afterwards.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub rates: RateTable,
    pub discount: DiscountPolicy,
    pub prepay_percent: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates: RateTable {
                standard: 4200,
                comfort: 5600,
                lux: 7900,
            },
            discount: DiscountPolicy {
                percent: 10,
                valid_until: NaiveDate::from_ymd_opt(2026, 5, 31).expect("valid date"),
            },
            prepay_percent: 30,
        }
    }
}
