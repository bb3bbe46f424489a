pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use application::order_controller::OrderController;
use application::stock_report_controller::StockReportController;
use application::Controllers;
use domain::errors::DataAccessError;
use infrastructure::catalog_repo::{
    DieselProductRepository, DieselProviderRepository, DieselStoreRepository, DieselWarehouseRepository,
};
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::stock_report_repo::DieselStockReportRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), DataAccessError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DataAccessError::new(e.to_string()))?;
    for version in applied {
        log::info!("Applied migration {}", version);
    }
    Ok(())
}

/// Wires every repository onto the one pool and hands them to the screen
/// controllers.
pub fn build_controllers(pool: DbPool) -> Controllers {
    let warehouses = Arc::new(DieselWarehouseRepository::new(pool.clone()));
    let providers = Arc::new(DieselProviderRepository::new(pool.clone()));
    let products = Arc::new(DieselProductRepository::new(pool.clone()));
    let stores = Arc::new(DieselStoreRepository::new(pool.clone()));
    let reports = Arc::new(DieselStockReportRepository::new(pool.clone()));
    let orders = Arc::new(DieselOrderRepository::new(
        pool,
        warehouses,
        providers.clone(),
    ));
    Controllers {
        orders: OrderController::new(orders, providers, products),
        stock_reports: StockReportController::new(stores, reports),
    }
}
