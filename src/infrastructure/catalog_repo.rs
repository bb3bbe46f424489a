use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{Product, ProductId, Provider, ProviderId, Store, StoreId, Warehouse, WarehouseId};
use crate::domain::errors::DataAccessError;
use crate::domain::ports::{ProductRepository, ProviderRepository, StoreRepository, WarehouseRepository};
use crate::schema::{products, providers, stores, warehouses};

use super::models::{ProductRow, ProviderRow, StoreRow, WarehouseRow};

impl From<WarehouseRow> for Warehouse {
    fn from(row: WarehouseRow) -> Self {
        Warehouse {
            id: WarehouseId(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

impl From<ProviderRow> for Provider {
    fn from(row: ProviderRow) -> Self {
        Provider {
            id: ProviderId(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId(row.id),
            name: row.name,
            weight: row.weight,
            price: row.price,
        }
    }
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            id: StoreId(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Clone)]
pub struct DieselWarehouseRepository {
    pool: DbPool,
}

impl DieselWarehouseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl WarehouseRepository for DieselWarehouseRepository {
    fn find_by_id(&self, id: WarehouseId) -> Result<Option<Warehouse>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let row = warehouses::table
            .filter(warehouses::id.eq(id.0))
            .select(WarehouseRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Warehouse::from))
    }
}

#[derive(Clone)]
pub struct DieselProviderRepository {
    pool: DbPool,
}

impl DieselProviderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProviderRepository for DieselProviderRepository {
    fn find_by_id(&self, id: ProviderId) -> Result<Option<Provider>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let row = providers::table
            .filter(providers::id.eq(id.0))
            .select(ProviderRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Provider::from))
    }

    fn all(&self) -> Result<Vec<Provider>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let rows = providers::table
            .select(ProviderRow::as_select())
            .order(providers::name.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Provider::from).collect())
    }
}

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .filter(products::id.eq(id.0))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn all(&self) -> Result<Vec<Product>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::name.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[derive(Clone)]
pub struct DieselStoreRepository {
    pool: DbPool,
}

impl DieselStoreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StoreRepository for DieselStoreRepository {
    fn find_by_id(&self, id: StoreId) -> Result<Option<Store>, DataAccessError> {
        let mut conn = self.pool.get()?;

        let row = stores::table
            .filter(stores::id.eq(id.0))
            .select(StoreRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Store::from))
    }
}
