use std::collections::HashMap;
use std::sync::Arc;

use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{OrderId, Product, ProductId, Provider, ProviderId, RevisionId, Warehouse, WarehouseId};
use crate::domain::errors::DataAccessError;
use crate::domain::order::{NewOrder, OrderDetail, OrderItem, OrderRevision, OrderSummary, Status};
use crate::domain::ports::{OrderRepository, ProviderRepository, WarehouseRepository};
use crate::schema::{products, warehouse_order_items, warehouse_order_revisions, warehouse_orders};

use super::models::{
    NewOrderItemRow, NewOrderRevisionRow, NewOrderRow, OrderHeaderChanges, OrderItemRow,
    OrderRevisionRow, OrderRow, ProductRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DataAccessError {
    fn from(e: diesel::result::Error) -> Self {
        DataAccessError(e.to_string())
    }
}

impl From<r2d2::Error> for DataAccessError {
    fn from(e: r2d2::Error) -> Self {
        DataAccessError(e.to_string())
    }
}

fn parse_status(raw: &str) -> Result<Status, DataAccessError> {
    raw.parse::<Status>()
        .map_err(|e| DataAccessError(e.to_string()))
}

// ── Reference resolution ─────────────────────────────────────────────────────

/// Resolves warehouse/provider ids for one multi-row read. Rows pointing at
/// the same entity end up sharing one `Arc`.
struct References<'a> {
    warehouses: &'a dyn WarehouseRepository,
    providers: &'a dyn ProviderRepository,
    warehouse_cache: HashMap<WarehouseId, Arc<Warehouse>>,
    provider_cache: HashMap<ProviderId, Arc<Provider>>,
}

impl<'a> References<'a> {
    fn new(warehouses: &'a dyn WarehouseRepository, providers: &'a dyn ProviderRepository) -> Self {
        Self {
            warehouses,
            providers,
            warehouse_cache: HashMap::new(),
            provider_cache: HashMap::new(),
        }
    }

    fn with_warehouse(mut self, warehouse: &Arc<Warehouse>) -> Self {
        self.warehouse_cache.insert(warehouse.id, Arc::clone(warehouse));
        self
    }

    fn with_provider(mut self, provider: &Arc<Provider>) -> Self {
        self.provider_cache.insert(provider.id, Arc::clone(provider));
        self
    }

    fn warehouse(&mut self, id: WarehouseId) -> Result<Arc<Warehouse>, DataAccessError> {
        if let Some(found) = self.warehouse_cache.get(&id) {
            return Ok(Arc::clone(found));
        }
        let warehouse = self
            .warehouses
            .find_by_id(id)?
            .map(Arc::new)
            .ok_or_else(|| DataAccessError(format!("order references missing warehouse {id}")))?;
        self.warehouse_cache.insert(id, Arc::clone(&warehouse));
        Ok(warehouse)
    }

    fn provider(&mut self, id: ProviderId) -> Result<Arc<Provider>, DataAccessError> {
        if let Some(found) = self.provider_cache.get(&id) {
            return Ok(Arc::clone(found));
        }
        let provider = self
            .providers
            .find_by_id(id)?
            .map(Arc::new)
            .ok_or_else(|| DataAccessError(format!("order references missing provider {id}")))?;
        self.provider_cache.insert(id, Arc::clone(&provider));
        Ok(provider)
    }

    fn summary(&mut self, row: OrderRow) -> Result<OrderSummary, DataAccessError> {
        Ok(OrderSummary {
            id: OrderId(row.id),
            date: row.date,
            status: parse_status(&row.status)?,
            warehouse: self.warehouse(WarehouseId(row.warehouse_id))?,
            provider: self.provider(ProviderId(row.provider_id))?,
        })
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Order aggregate repository over the `warehouse_order*` tables.
///
/// Header, items and revisions are written by separate statements with no
/// enclosing transaction, so a caller that stops between `create` and
/// `insert_order_items` leaves a header without items.
pub struct DieselOrderRepository {
    pool: DbPool,
    warehouses: Arc<dyn WarehouseRepository>,
    providers: Arc<dyn ProviderRepository>,
}

impl DieselOrderRepository {
    pub fn new(
        pool: DbPool,
        warehouses: Arc<dyn WarehouseRepository>,
        providers: Arc<dyn ProviderRepository>,
    ) -> Self {
        Self {
            pool,
            warehouses,
            providers,
        }
    }

    fn references(&self) -> References<'_> {
        References::new(self.warehouses.as_ref(), self.providers.as_ref())
    }

    fn load_items(conn: &mut PgConnection, order_id: OrderId) -> Result<Vec<OrderItem>, DataAccessError> {
        let rows: Vec<(OrderItemRow, ProductRow)> = warehouse_order_items::table
            .inner_join(products::table)
            .filter(warehouse_order_items::order_id.eq(order_id.0))
            .select((OrderItemRow::as_select(), ProductRow::as_select()))
            .load(conn)?;

        let mut catalogue: HashMap<ProductId, Arc<Product>> = HashMap::new();
        Ok(rows
            .into_iter()
            .map(|(item, product)| {
                let product = catalogue
                    .entry(ProductId(product.id))
                    .or_insert_with(|| Arc::new(Product::from(product)))
                    .clone();
                OrderItem::new(item.quantity, item.unit_price, product)
            })
            .collect())
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: &NewOrder) -> Result<OrderId, DataAccessError> {
        let mut conn = self.pool.get()?;

        let id: i32 = diesel::insert_into(warehouse_orders::table)
            .values(&NewOrderRow {
                provider_id: order.provider_id.0,
                warehouse_id: order.warehouse_id.0,
                date: order.date,
                status: order.status.to_string(),
            })
            .returning(warehouse_orders::id)
            .get_result(&mut conn)?;

        log::debug!("Inserted warehouse order header {}", id);
        Ok(OrderId(id))
    }

    fn select_by_id(&self, id: OrderId) -> Result<Option<OrderDetail>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let row = warehouse_orders::table
            .filter(warehouse_orders::id.eq(id.0))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        // Reference lookups check out their own connections.
        drop(conn);

        let Some(row) = row else {
            return Ok(None);
        };

        let summary = self.references().summary(row)?;
        let mut conn = self.pool.get()?;
        let items = Self::load_items(&mut conn, summary.id)?;

        Ok(Some(summary.with_items(items)))
    }

    fn all(&self) -> Result<Vec<OrderSummary>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let rows = warehouse_orders::table
            .select(OrderRow::as_select())
            .order(warehouse_orders::id.asc())
            .load(&mut conn)?;
        drop(conn);

        let mut refs = self.references();
        rows.into_iter().map(|row| refs.summary(row)).collect()
    }

    fn update(&self, order: &OrderSummary) -> Result<usize, DataAccessError> {
        let mut conn = self.pool.get()?;

        let affected = diesel::update(warehouse_orders::table.filter(warehouse_orders::id.eq(order.id.0)))
            .set(&OrderHeaderChanges {
                date: order.date,
                status: order.status.to_string(),
            })
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete(&self, order: &OrderSummary) -> Result<usize, DataAccessError> {
        let mut conn = self.pool.get()?;

        let affected = diesel::delete(warehouse_orders::table.filter(warehouse_orders::id.eq(order.id.0)))
            .execute(&mut conn)?;

        if affected > 0 {
            log::info!("Deleted warehouse order {}", order.id);
        }
        Ok(affected)
    }

    fn orders_by_warehouse(&self, warehouse: &Arc<Warehouse>) -> Result<Vec<OrderSummary>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let rows = warehouse_orders::table
            .filter(warehouse_orders::warehouse_id.eq(warehouse.id.0))
            .select(OrderRow::as_select())
            .order(warehouse_orders::id.asc())
            .load(&mut conn)?;
        drop(conn);

        let mut refs = self.references().with_warehouse(warehouse);
        rows.into_iter().map(|row| refs.summary(row)).collect()
    }

    fn orders_by_provider(&self, provider: &Arc<Provider>) -> Result<Vec<OrderSummary>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let rows = warehouse_orders::table
            .filter(warehouse_orders::provider_id.eq(provider.id.0))
            .select(OrderRow::as_select())
            .order(warehouse_orders::id.asc())
            .load(&mut conn)?;
        drop(conn);

        let mut refs = self.references().with_provider(provider);
        rows.into_iter().map(|row| refs.summary(row)).collect()
    }

    fn order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, DataAccessError> {
        let mut conn = self.pool.get()?;
        Self::load_items(&mut conn, order_id)
    }

    fn insert_order_items(&self, order_id: OrderId, items: &[OrderItem]) -> Result<usize, DataAccessError> {
        if items.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get()?;

        let rows: Vec<NewOrderItemRow> = items
            .iter()
            .map(|item| NewOrderItemRow {
                order_id: order_id.0,
                product_id: item.product.id.0,
                quantity: item.quantity,
                unit_price: item.unit_price.clone(),
            })
            .collect();

        let inserted = diesel::insert_into(warehouse_order_items::table)
            .values(&rows)
            .execute(&mut conn)?;

        log::debug!("Inserted {} item(s) for warehouse order {}", inserted, order_id);
        Ok(inserted)
    }

    fn order_revisions(&self, order: &OrderSummary) -> Result<Vec<OrderRevision>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let rows = warehouse_order_revisions::table
            .filter(warehouse_order_revisions::order_id.eq(order.id.0))
            .select(OrderRevisionRow::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| -> Result<OrderRevision, DataAccessError> {
                Ok(OrderRevision {
                    id: Some(RevisionId(row.id)),
                    order_id: OrderId(row.order_id),
                    date: row.date,
                    note: row.note,
                    status: parse_status(&row.status)?,
                })
            })
            .collect()
    }

    fn insert_order_revision(
        &self,
        revisions: &[OrderRevision],
        order_id: OrderId,
    ) -> Result<Option<RevisionId>, DataAccessError> {
        // Only the first pending revision is written; see DESIGN.md.
        let Some(pending) = revisions.iter().find(|r| !r.is_persisted()) else {
            return Ok(None);
        };
        let mut conn = self.pool.get()?;

        let id: i32 = diesel::insert_into(warehouse_order_revisions::table)
            .values(&NewOrderRevisionRow {
                order_id: order_id.0,
                status: pending.status.to_string(),
                date: pending.date,
                note: pending.note.clone(),
            })
            .returning(warehouse_order_revisions::id)
            .get_result(&mut conn)?;

        Ok(Some(RevisionId(id)))
    }
}
