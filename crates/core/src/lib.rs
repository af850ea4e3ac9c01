//! Pricebook core: domain models and the price resolution rule.
//!
//! This crate is database-agnostic. Storage lives behind
//! [`prices::PriceRepositoryTrait`] and is implemented by
//! `pricebook-storage-sqlite`; the HTTP surface lives in the server app.
//! The only decision logic in the whole system is here: given a product,
//! a brand and an instant, reduce the set of time-plausible price records
//! to the single applicable one.

pub mod errors;
pub mod prices;

pub use errors::{Error, Result};
