use crate::errors::Result;
use crate::prices::prices_model::{NewPrice, Price, PriceQuery, PriceResponse};
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Trait for price repository operations.
///
/// `find_applicable_prices` must return every record for the given
/// (product, brand) pair whose validity window contains `application_date`,
/// inclusive on both bounds. Result order is not significant; the service
/// performs its own selection.
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    fn find_applicable_prices(
        &self,
        application_date: NaiveDateTime,
        product_id: i64,
        brand_id: i64,
    ) -> Result<Vec<Price>>;

    async fn insert_price(&self, new_price: NewPrice) -> Result<Price>;
}

/// Trait for price service operations.
#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    fn get_applicable_price(&self, query: PriceQuery) -> Result<PriceResponse>;
    async fn add_price(&self, new_price: NewPrice) -> Result<Price>;
}
