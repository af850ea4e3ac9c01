use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use pricebook_core::prices::{NewPrice, Price, PriceQuery, PriceResponse};

/// Raw query parameters, kept as strings so both absence and malformed
/// values get a response naming the parameter.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceQueryParams {
    application_date: Option<String>,
    product_id: Option<String>,
    brand_id: Option<String>,
}

fn parse_date(raw: Option<String>) -> ApiResult<Option<NaiveDateTime>> {
    match raw {
        None => Ok(None),
        Some(s) => s.parse::<NaiveDateTime>().map(Some).map_err(|_| {
            ApiError::BadRequest(format!(
                "Invalid value '{s}' for parameter 'applicationDate'. Expected an ISO-8601 date-time"
            ))
        }),
    }
}

fn parse_id(raw: Option<String>, name: &str) -> ApiResult<Option<i64>> {
    match raw {
        None => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(|_| {
            ApiError::BadRequest(format!(
                "Invalid value '{s}' for parameter '{name}'. Expected an integer"
            ))
        }),
    }
}

async fn get_applicable_price(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PriceQueryParams>,
) -> ApiResult<Json<PriceResponse>> {
    let query = PriceQuery::new(
        parse_date(params.application_date)?,
        parse_id(params.product_id, "productId")?,
        parse_id(params.brand_id, "brandId")?,
    )?;
    let response = state.price_service.get_applicable_price(query)?;
    Ok(Json(response))
}

async fn create_price(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPrice>,
) -> ApiResult<Json<Price>> {
    let created = state.price_service.add_price(payload).await?;
    Ok(Json(created))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/prices", get(get_applicable_price).post(create_price))
}
