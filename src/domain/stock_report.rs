use std::sync::Arc;

use chrono::NaiveDateTime;

use super::catalog::{Product, StockReportId, Store};

/// How many units of one product a store had when it reported.
#[derive(Debug, Clone, PartialEq)]
pub struct StockReportItem {
    pub product: Arc<Product>,
    pub quantity: i32,
}

/// A store's stock count at a point in time. Read-only for the order screens.
#[derive(Debug, Clone, PartialEq)]
pub struct StockReport {
    pub id: StockReportId,
    pub store: Arc<Store>,
    pub date: NaiveDateTime,
    pub items: Vec<StockReportItem>,
}
