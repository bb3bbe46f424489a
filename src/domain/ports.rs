use std::sync::Arc;

use super::catalog::{
    OrderId, Product, ProductId, Provider, ProviderId, RevisionId, Store, StoreId, Warehouse, WarehouseId,
};
use super::errors::DataAccessError;
use super::order::{NewOrder, OrderDetail, OrderItem, OrderRevision, OrderSummary};
use super::stock_report::StockReport;

/// Persistence for the order aggregate: header, items and revisions.
///
/// Loading contract: `select_by_id` returns the header with every item;
/// the list operations return headers only. Revisions are always loaded on
/// request through `order_revisions`.
pub trait OrderRepository: Send + Sync + 'static {
    /// Inserts the header row only and returns the generated id.
    fn create(&self, order: &NewOrder) -> Result<OrderId, DataAccessError>;

    fn select_by_id(&self, id: OrderId) -> Result<Option<OrderDetail>, DataAccessError>;

    fn all(&self) -> Result<Vec<OrderSummary>, DataAccessError>;

    /// Writes `date` and `status`. Items and revisions are untouched.
    fn update(&self, order: &OrderSummary) -> Result<usize, DataAccessError>;

    /// Deletes the header row; items and revisions follow by cascade.
    fn delete(&self, order: &OrderSummary) -> Result<usize, DataAccessError>;

    fn orders_by_warehouse(&self, warehouse: &Arc<Warehouse>) -> Result<Vec<OrderSummary>, DataAccessError>;

    fn orders_by_provider(&self, provider: &Arc<Provider>) -> Result<Vec<OrderSummary>, DataAccessError>;

    fn order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, DataAccessError>;

    fn insert_order_items(&self, order_id: OrderId, items: &[OrderItem]) -> Result<usize, DataAccessError>;

    /// Revisions of `order` in whatever order storage yields them.
    fn order_revisions(&self, order: &OrderSummary) -> Result<Vec<OrderRevision>, DataAccessError>;

    /// Inserts the first revision without an id and returns the id it got.
    /// Later pending revisions in the slice are left alone.
    fn insert_order_revision(
        &self,
        revisions: &[OrderRevision],
        order_id: OrderId,
    ) -> Result<Option<RevisionId>, DataAccessError>;
}

pub trait WarehouseRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: WarehouseId) -> Result<Option<Warehouse>, DataAccessError>;
}

pub trait ProviderRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: ProviderId) -> Result<Option<Provider>, DataAccessError>;
    fn all(&self) -> Result<Vec<Provider>, DataAccessError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DataAccessError>;
    fn all(&self) -> Result<Vec<Product>, DataAccessError>;
}

pub trait StoreRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: StoreId) -> Result<Option<Store>, DataAccessError>;
}

pub trait StockReportRepository: Send + Sync + 'static {
    /// Every report `store` has filed, newest first, each with its items.
    fn reports_for_store(&self, store: &Arc<Store>) -> Result<Vec<StockReport>, DataAccessError>;
}
