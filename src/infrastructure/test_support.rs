use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;

use crate::db::{create_pool, DbPool};
use crate::domain::catalog::{ProductId, ProviderId, StockReportId, StoreId, WarehouseId};
use crate::schema::{products, providers, store_stock_report_items, store_stock_reports, stores, warehouses};

use super::models::{
    NewProductRow, NewProviderRow, NewStockReportItemRow, NewStockReportRow, NewStoreRow, NewWarehouseRow,
};
use super::test_container::start_postgres;

/// Starts a throwaway Postgres and runs the embedded migrations against it.
pub async fn setup_db() -> (ContainerAsync<Postgres>, DbPool) {
    let (container, url) = start_postgres().await;
    let pool = create_pool(&url, 4).expect("Failed to create pool");
    {
        let mut conn = pool.get().expect("Failed to get connection");
        conn.run_pending_migrations(crate::MIGRATIONS)
            .expect("Failed to run migrations");
    }
    (container, pool)
}

pub fn seed_warehouse(pool: &DbPool, name: &str) -> WarehouseId {
    let mut conn = pool.get().expect("Failed to get connection");
    let id = diesel::insert_into(warehouses::table)
        .values(&NewWarehouseRow {
            name: name.to_string(),
            email: format!("{}@warehouse.test", name.to_lowercase()),
        })
        .returning(warehouses::id)
        .get_result(&mut conn)
        .expect("insert warehouse failed");
    WarehouseId(id)
}

pub fn seed_provider(pool: &DbPool, name: &str) -> ProviderId {
    let mut conn = pool.get().expect("Failed to get connection");
    let id = diesel::insert_into(providers::table)
        .values(&NewProviderRow {
            name: name.to_string(),
            email: format!("{}@provider.test", name.to_lowercase()),
        })
        .returning(providers::id)
        .get_result(&mut conn)
        .expect("insert provider failed");
    ProviderId(id)
}

pub fn seed_product(pool: &DbPool, name: &str, price: &str) -> ProductId {
    let mut conn = pool.get().expect("Failed to get connection");
    let id = diesel::insert_into(products::table)
        .values(&NewProductRow {
            name: name.to_string(),
            weight: BigDecimal::from_str("1.000").expect("valid decimal"),
            price: BigDecimal::from_str(price).expect("valid decimal"),
        })
        .returning(products::id)
        .get_result(&mut conn)
        .expect("insert product failed");
    ProductId(id)
}

pub fn seed_store(pool: &DbPool, name: &str) -> StoreId {
    let mut conn = pool.get().expect("Failed to get connection");
    let id = diesel::insert_into(stores::table)
        .values(&NewStoreRow {
            name: name.to_string(),
            email: format!("{}@store.test", name.to_lowercase().replace(' ', ".")),
        })
        .returning(stores::id)
        .get_result(&mut conn)
        .expect("insert store failed");
    StoreId(id)
}

/// Files a stock report for `store` with one line per `(product, quantity)`.
pub fn seed_stock_report(
    pool: &DbPool,
    store: StoreId,
    date: NaiveDateTime,
    items: &[(ProductId, i32)],
) -> StockReportId {
    let mut conn = pool.get().expect("Failed to get connection");
    let id: i32 = diesel::insert_into(store_stock_reports::table)
        .values(&NewStockReportRow { store_id: store.0, date })
        .returning(store_stock_reports::id)
        .get_result(&mut conn)
        .expect("insert stock report failed");
    let rows: Vec<NewStockReportItemRow> = items
        .iter()
        .map(|(product, quantity)| NewStockReportItemRow {
            report_id: id,
            product_id: product.0,
            quantity: *quantity,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(store_stock_report_items::table)
            .values(&rows)
            .execute(&mut conn)
            .expect("insert stock report items failed");
    }
    StockReportId(id)
}
