//! Price domain errors.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Domain-level failures of the price resolution rule.
///
/// `NotFound` is the only one: a legitimate "no record covers this instant"
/// outcome, not an invariant violation. It carries the original query fields
/// so callers can render a diagnostic message.
#[derive(Error, Debug)]
pub enum PriceError {
    #[error("No price found for product {product_id}, brand {brand_id} at {application_date}")]
    NotFound {
        application_date: NaiveDateTime,
        product_id: i64,
        brand_id: i64,
    },
}
