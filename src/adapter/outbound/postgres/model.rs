//! Database model types for Diesel ORM.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Integer, Nullable, Text};

use super::schema::notifications_subscribers;
use crate::domain::{
    CoinCode, ConsolidationRow, ExchangeRate, MovementRow, NewSubscriber, Subscriber,
    WindowValues, calc_percent,
};

/// Stored value of an enabled flag.
pub const ENABLED: i16 = 1;
/// Stored value of a disabled flag.
pub const DISABLED: i16 = 0;

/// Database row for a subscriber (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = notifications_subscribers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriberRow {
    pub id: i64,
    pub is_enabled: i16,
    pub telegram_id: i64,
    pub telegram_first_name: String,
    pub telegram_last_name: String,
    pub telegram_username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SubscriberRow> for Subscriber {
    fn from(row: SubscriberRow) -> Self {
        Self {
            id: row.id,
            telegram_id: row.telegram_id,
            first_name: row.telegram_first_name,
            last_name: row.telegram_last_name,
            username: row.telegram_username,
            enabled: row.is_enabled == ENABLED,
            created_at: row.created_at,
        }
    }
}

/// Database row for a subscriber (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = notifications_subscribers)]
pub struct NewSubscriberRow<'a> {
    pub is_enabled: i16,
    pub telegram_id: i64,
    pub telegram_first_name: &'a str,
    pub telegram_last_name: &'a str,
    pub telegram_username: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewSubscriberRow<'a> {
    pub fn new(chat: &'a NewSubscriber, now: DateTime<Utc>) -> Self {
        Self {
            is_enabled: ENABLED,
            telegram_id: chat.telegram_id,
            telegram_first_name: &chat.first_name,
            telegram_last_name: &chat.last_name,
            telegram_username: &chat.username,
            created_at: now,
        }
    }
}

/// One coin's first open / last close per window.
#[derive(QueryableByName, Debug, Clone)]
pub struct MovementRecord {
    #[diesel(sql_type = BigInt)]
    pub coin_id: i64,
    #[diesel(sql_type = Text)]
    pub code: String,
    #[diesel(sql_type = Integer)]
    pub rank: i32,
    #[diesel(sql_type = Nullable<Double>)]
    pub minute10_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub minute10_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour4_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour4_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour12_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour12_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour24_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour24_close: Option<f64>,
}

impl From<MovementRecord> for MovementRow {
    fn from(r: MovementRecord) -> Self {
        Self {
            coin_id: r.coin_id,
            code: CoinCode::new(&r.code),
            rank: r.rank,
            changes: WindowValues {
                minute10: calc_percent(r.minute10_open, r.minute10_close),
                hour: calc_percent(r.hour_open, r.hour_close),
                hour4: calc_percent(r.hour4_open, r.hour4_close),
                hour12: calc_percent(r.hour12_open, r.hour12_close),
                hour24: calc_percent(r.hour24_open, r.hour24_close),
            },
        }
    }
}

/// One coin's lowest open / highest close per window.
#[derive(QueryableByName, Debug, Clone)]
pub struct RateRecord {
    #[diesel(sql_type = BigInt)]
    pub coin_id: i64,
    #[diesel(sql_type = Text)]
    pub code: String,
    #[diesel(sql_type = Integer)]
    pub rank: i32,
    #[diesel(sql_type = Nullable<Double>)]
    pub minute10_min_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub minute10_max_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour_min_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour_max_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour4_min_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour4_max_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour12_min_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour12_max_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour24_min_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub hour24_max_close: Option<f64>,
}

impl From<RateRecord> for ExchangeRate {
    fn from(r: RateRecord) -> Self {
        Self {
            coin_id: r.coin_id,
            code: CoinCode::new(&r.code),
            rank: r.rank,
            min_open: WindowValues {
                minute10: r.minute10_min_open,
                hour: r.hour_min_open,
                hour4: r.hour4_min_open,
                hour12: r.hour12_min_open,
                hour24: r.hour24_min_open,
            },
            max_close: WindowValues {
                minute10: r.minute10_max_close,
                hour: r.hour_max_close,
                hour4: r.hour4_max_close,
                hour12: r.hour12_max_close,
                hour24: r.hour24_max_close,
            },
        }
    }
}

/// Averages feeding the consolidation report.
#[derive(QueryableByName, Debug, Clone)]
pub struct ConsolidationRecord {
    #[diesel(sql_type = BigInt)]
    pub coin_id: i64,
    #[diesel(sql_type = Text)]
    pub code: String,
    #[diesel(sql_type = Integer)]
    pub rank: i32,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_open: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_close: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub price: Option<f64>,
}

impl From<ConsolidationRecord> for ConsolidationRow {
    fn from(r: ConsolidationRecord) -> Self {
        Self {
            coin_id: r.coin_id,
            code: CoinCode::new(&r.code),
            rank: r.rank,
            avg_open: r.avg_open,
            avg_close: r.avg_close,
            price: r.price,
        }
    }
}
