use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;

use super::prices_errors::PriceError;
use super::prices_model::{NewPrice, Price, PriceQuery, PriceResponse};
use super::prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
use crate::errors::Result;

/// Resolves which price record applies to a validated query.
///
/// Stateless: one repository read per call, no writes, no shared mutable
/// state, safe for concurrent callers.
#[derive(Clone)]
pub struct PriceService {
    repository: Arc<dyn PriceRepositoryTrait>,
}

impl PriceService {
    pub fn new(repository: Arc<dyn PriceRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn resolve(&self, query: PriceQuery) -> Result<PriceResponse> {
        let candidates = self.repository.find_applicable_prices(
            query.application_date,
            query.product_id,
            query.brand_id,
        )?;

        // Business rule: highest priority wins. The storage query may already
        // order by priority, but the selection must not depend on that.
        // Equal priorities break to the lowest price list tag, which keeps
        // the outcome independent of candidate order.
        let selected = candidates
            .into_iter()
            .max_by_key(|p| (p.priority, Reverse(p.price_list)))
            .ok_or(PriceError::NotFound {
                application_date: query.application_date,
                product_id: query.product_id,
                brand_id: query.brand_id,
            })?;

        log::debug!(
            "Resolved price list {} for product {}, brand {} at {}",
            selected.price_list,
            query.product_id,
            query.brand_id,
            query.application_date
        );

        Ok(PriceResponse::from(selected))
    }
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    fn get_applicable_price(&self, query: PriceQuery) -> Result<PriceResponse> {
        self.resolve(query)
    }

    async fn add_price(&self, new_price: NewPrice) -> Result<Price> {
        new_price.validate()?;
        self.repository.insert_price(new_price).await
    }
}
