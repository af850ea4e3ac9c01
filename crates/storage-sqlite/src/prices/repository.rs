use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use pricebook_core::prices::{NewPrice, Price, PriceRepositoryTrait};
use pricebook_core::Result;

use super::model::{encode_datetime, NewPriceDB, PriceDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::prices;

#[derive(Clone)]
pub struct PriceRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        PriceRepository { pool, writer }
    }

    /// Loads every record for the (product, brand) pair whose validity
    /// window contains `application_date`, both bounds inclusive.
    ///
    /// The `ORDER BY priority DESC` mirrors the reference schema's query and
    /// is an optimization hint only; the service performs its own selection
    /// and must not rely on this ordering.
    pub fn find_applicable_prices_impl(
        &self,
        application_date: NaiveDateTime,
        product_id: i64,
        brand_id: i64,
    ) -> Result<Vec<Price>> {
        let mut conn = get_connection(&self.pool)?;
        let instant = encode_datetime(application_date);

        let rows = prices::table
            .filter(prices::product_id.eq(product_id))
            .filter(prices::brand_id.eq(brand_id))
            .filter(prices::start_date.le(&instant))
            .filter(prices::end_date.ge(&instant))
            .order_by(prices::priority.desc())
            .load::<PriceDB>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter().map(Price::try_from).collect()
    }
}

#[async_trait]
impl PriceRepositoryTrait for PriceRepository {
    fn find_applicable_prices(
        &self,
        application_date: NaiveDateTime,
        product_id: i64,
        brand_id: i64,
    ) -> Result<Vec<Price>> {
        self.find_applicable_prices_impl(application_date, product_id, brand_id)
    }

    async fn insert_price(&self, new_price: NewPrice) -> Result<Price> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Price> {
                let new_price_db = NewPriceDB::from(new_price);
                let row = diesel::insert_into(prices::table)
                    .values(&new_price_db)
                    .returning(PriceDB::as_returning())
                    .get_result::<PriceDB>(conn)
                    .map_err(StorageError::from)?;
                Price::try_from(row)
            })
            .await
    }
}
