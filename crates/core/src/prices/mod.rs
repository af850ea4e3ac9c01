//! Prices module - domain models, resolution service, and traits.

mod prices_errors;
mod prices_model;
mod prices_service;
mod prices_traits;


pub use prices_errors::PriceError;
pub use prices_model::{NewPrice, Price, PriceQuery, PriceResponse};
pub use prices_service::PriceService;
pub use prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
