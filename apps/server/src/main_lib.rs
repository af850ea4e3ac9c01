use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use pricebook_core::prices::{PriceService, PriceServiceTrait};
use pricebook_storage_sqlite::prices::PriceRepository;
use pricebook_storage_sqlite::{create_pool, db, init, run_migrations};

pub struct AppState {
    pub price_service: Arc<dyn PriceServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PRICEBOOK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let price_repo = Arc::new(PriceRepository::new(pool, writer));
    let price_service: Arc<dyn PriceServiceTrait + Send + Sync> =
        Arc::new(PriceService::new(price_repo));

    Ok(Arc::new(AppState { price_service }))
}
