//! Database models for price records.
//!
//! Dates and decimal amounts are stored as `Text`. The date format is fixed
//! width (`%Y-%m-%dT%H:%M:%S`), so lexicographic comparison in SQL equals
//! chronological comparison, which is what the repository's range filter
//! relies on.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use pricebook_core::prices::{NewPrice, Price};
use pricebook_core::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;

pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn encode_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

pub(crate) fn decode_datetime(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).map_err(|e| {
        Error::from(StorageError::DecodeFailed(format!(
            "Invalid stored date '{raw}': {e}"
        )))
    })
}

fn decode_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| {
        Error::from(StorageError::DecodeFailed(format!(
            "Invalid stored amount '{raw}': {e}"
        )))
    })
}

/// Database model for a price record.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PriceDB {
    pub id: i64,
    pub brand_id: i64,
    pub product_id: i64,
    pub price_list: i32,
    pub start_date: String,
    pub end_date: String,
    pub priority: i32,
    pub amount: String,
    pub currency: String,
}

/// Database model for inserting a new price record; SQLite assigns the id.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::prices)]
#[serde(rename_all = "camelCase")]
pub struct NewPriceDB {
    pub brand_id: i64,
    pub product_id: i64,
    pub price_list: i32,
    pub start_date: String,
    pub end_date: String,
    pub priority: i32,
    pub amount: String,
    pub currency: String,
}

impl TryFrom<PriceDB> for Price {
    type Error = Error;

    fn try_from(db: PriceDB) -> Result<Price> {
        // Price::new re-checks the domain invariants, so a corrupted row
        // surfaces as an error instead of a malformed record.
        Price::new(
            db.id,
            db.brand_id,
            db.product_id,
            db.price_list,
            decode_datetime(&db.start_date)?,
            decode_datetime(&db.end_date)?,
            db.priority,
            decode_amount(&db.amount)?,
            db.currency,
        )
    }
}

impl From<NewPrice> for NewPriceDB {
    fn from(domain: NewPrice) -> Self {
        Self {
            brand_id: domain.brand_id,
            product_id: domain.product_id,
            price_list: domain.price_list,
            start_date: encode_datetime(domain.start_date),
            end_date: encode_datetime(domain.end_date),
            priority: domain.priority,
            amount: domain.amount.to_string(),
            currency: domain.currency,
        }
    }
}
