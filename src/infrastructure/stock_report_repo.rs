use std::collections::HashMap;
use std::sync::Arc;

use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{Product, ProductId, StockReportId, Store};
use crate::domain::errors::DataAccessError;
use crate::domain::ports::StockReportRepository;
use crate::domain::stock_report::{StockReport, StockReportItem};
use crate::schema::{products, store_stock_report_items, store_stock_reports};

use super::models::{ProductRow, StockReportItemRow, StockReportRow};

/// Stock reports over the `store_stock_report*` tables.
#[derive(Clone)]
pub struct DieselStockReportRepository {
    pool: DbPool,
}

impl DieselStockReportRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StockReportRepository for DieselStockReportRepository {
    fn reports_for_store(&self, store: &Arc<Store>) -> Result<Vec<StockReport>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let reports = store_stock_reports::table
            .filter(store_stock_reports::store_id.eq(store.id.0))
            .select(StockReportRow::as_select())
            .order((store_stock_reports::date.desc(), store_stock_reports::id.desc()))
            .load(&mut conn)?;

        let report_ids: Vec<i32> = reports.iter().map(|r| r.id).collect();
        let rows: Vec<(StockReportItemRow, ProductRow)> = store_stock_report_items::table
            .inner_join(products::table)
            .filter(store_stock_report_items::report_id.eq_any(report_ids))
            .select((StockReportItemRow::as_select(), ProductRow::as_select()))
            .order((store_stock_report_items::report_id, store_stock_report_items::product_id))
            .load(&mut conn)?;

        // One `Arc` per product across all reports of the store.
        let mut catalogue: HashMap<ProductId, Arc<Product>> = HashMap::new();
        let mut items: HashMap<i32, Vec<StockReportItem>> = HashMap::new();
        for (item, product) in rows {
            let product = catalogue
                .entry(ProductId(product.id))
                .or_insert_with(|| Arc::new(Product::from(product)))
                .clone();
            items.entry(item.report_id).or_default().push(StockReportItem {
                product,
                quantity: item.quantity,
            });
        }

        log::debug!("Loaded {} stock report(s) for store {}", reports.len(), store.id);
        Ok(reports
            .into_iter()
            .map(|report| StockReport {
                id: StockReportId(report.id),
                store: Arc::clone(store),
                date: report.date,
                items: items.remove(&report.id).unwrap_or_default(),
            })
            .collect())
    }
}
