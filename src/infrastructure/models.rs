use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::{
    products, providers, store_stock_report_items, store_stock_reports, stores, warehouse_order_items,
    warehouse_order_revisions, warehouse_orders, warehouses,
};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = warehouses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WarehouseRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = warehouses)]
pub struct NewWarehouseRow {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProviderRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = providers)]
pub struct NewProviderRow {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub weight: BigDecimal,
    pub price: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub name: String,
    pub weight: BigDecimal,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = warehouse_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub provider_id: i32,
    pub warehouse_id: i32,
    pub date: NaiveDateTime,
    pub status: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = warehouse_orders)]
pub struct NewOrderRow {
    pub provider_id: i32,
    pub warehouse_id: i32,
    pub date: NaiveDateTime,
    pub status: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = warehouse_orders)]
pub struct OrderHeaderChanges {
    pub date: NaiveDateTime,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = warehouse_order_items)]
#[diesel(primary_key(order_id, product_id))]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = warehouse_order_items)]
pub struct NewOrderItemRow {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = warehouse_order_revisions)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRevisionRow {
    pub id: i32,
    pub order_id: i32,
    pub status: String,
    pub date: NaiveDateTime,
    pub note: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = warehouse_order_revisions)]
pub struct NewOrderRevisionRow {
    pub order_id: i32,
    pub status: String,
    pub date: NaiveDateTime,
    pub note: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = stores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoreRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = stores)]
pub struct NewStoreRow {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = store_stock_reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockReportRow {
    pub id: i32,
    pub store_id: i32,
    pub date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = store_stock_reports)]
pub struct NewStockReportRow {
    pub store_id: i32,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = store_stock_report_items)]
#[diesel(primary_key(report_id, product_id))]
#[diesel(belongs_to(StockReportRow, foreign_key = report_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockReportItemRow {
    pub report_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = store_stock_report_items)]
pub struct NewStockReportItemRow {
    pub report_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}
