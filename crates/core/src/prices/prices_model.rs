//! Price domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A price record: one tariff row for a (product, brand) pair, valid during
/// an inclusive window and ranked by priority against overlapping rows.
///
/// Immutable once constructed; [`Price::new`] enforces the invariants
/// (`start_date <= end_date`, `priority >= 0`) so an instance in hand is
/// always well-formed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: i64,
    pub brand_id: i64,
    pub product_id: i64,
    pub price_list: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub priority: i32,
    pub amount: Decimal,
    pub currency: String,
}

impl Price {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        brand_id: i64,
        product_id: i64,
        price_list: i32,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        priority: i32,
        amount: Decimal,
        currency: String,
    ) -> Result<Self> {
        validate_window_and_priority(start_date, end_date, priority)?;
        Ok(Self {
            id,
            brand_id,
            product_id,
            price_list,
            start_date,
            end_date,
            priority,
            amount,
            currency,
        })
    }

    /// Whether this record's validity window contains `instant`.
    /// Both bounds are inclusive.
    pub fn applies_at(&self, instant: NaiveDateTime) -> bool {
        self.start_date <= instant && instant <= self.end_date
    }
}

/// Input model for creating a price record; storage assigns the id.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPrice {
    pub brand_id: i64,
    pub product_id: i64,
    pub price_list: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub priority: i32,
    pub amount: Decimal,
    pub currency: String,
}

impl NewPrice {
    /// Checks the same invariants [`Price::new`] enforces, before insert.
    pub fn validate(&self) -> Result<()> {
        validate_window_and_priority(self.start_date, self.end_date, self.priority)
    }
}

fn validate_window_and_priority(
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    priority: i32,
) -> Result<()> {
    if start_date > end_date {
        return Err(ValidationError::InvalidInput(
            "Start date must not be after end date".to_string(),
        )
        .into());
    }
    if priority < 0 {
        return Err(
            ValidationError::InvalidInput("Priority must be non-negative".to_string()).into(),
        );
    }
    Ok(())
}

/// A validated lookup request: which price applies to this product and brand
/// at this instant. Built once per request, discarded after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuery {
    pub application_date: NaiveDateTime,
    pub product_id: i64,
    pub brand_id: i64,
}

impl PriceQuery {
    /// Fails fast with the name of the first absent field. Field names match
    /// the transport-level query parameters so the error is actionable for
    /// the caller.
    pub fn new(
        application_date: Option<NaiveDateTime>,
        product_id: Option<i64>,
        brand_id: Option<i64>,
    ) -> Result<Self> {
        let application_date = application_date
            .ok_or_else(|| ValidationError::MissingField("applicationDate".to_string()))?;
        let product_id =
            product_id.ok_or_else(|| ValidationError::MissingField("productId".to_string()))?;
        let brand_id =
            brand_id.ok_or_else(|| ValidationError::MissingField("brandId".to_string()))?;
        Ok(Self {
            application_date,
            product_id,
            brand_id,
        })
    }
}

/// Response shape for a resolved price. The record id and currency are not
/// re-exposed; only the fields listed here leave the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub product_id: i64,
    pub brand_id: i64,
    pub price_list: i32,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub final_price: Decimal,
}

impl From<Price> for PriceResponse {
    fn from(price: Price) -> Self {
        Self {
            product_id: price.product_id,
            brand_id: price.brand_id,
            price_list: price.price_list,
            start_date: price.start_date,
            end_date: price.end_date,
            final_price: price.amount,
        }
    }
}
