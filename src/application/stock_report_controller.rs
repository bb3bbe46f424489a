use std::sync::Arc;

use crate::domain::catalog::StoreId;
use crate::domain::errors::DomainError;
use crate::domain::ports::{StockReportRepository, StoreRepository};
use crate::domain::stock_report::StockReport;

/// Backs the store stock report screen.
pub struct StockReportController {
    stores: Arc<dyn StoreRepository>,
    reports: Arc<dyn StockReportRepository>,
}

impl StockReportController {
    pub fn new(stores: Arc<dyn StoreRepository>, reports: Arc<dyn StockReportRepository>) -> Self {
        Self { stores, reports }
    }

    pub fn reports_for_store(&self, store_id: StoreId) -> Result<Vec<StockReport>, DomainError> {
        let store = self
            .stores
            .find_by_id(store_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Store {store_id}")))?;
        Ok(self.reports.reports_for_store(&Arc::new(store))?)
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Arc;

    use crate::domain::catalog::{Store, StoreId};
    use crate::domain::errors::DataAccessError;
    use crate::domain::ports::{StockReportRepository, StoreRepository};
    use crate::domain::stock_report::StockReport;

    pub struct StaticStores(pub Vec<Arc<Store>>);

    impl StoreRepository for StaticStores {
        fn find_by_id(&self, id: StoreId) -> Result<Option<Store>, DataAccessError> {
            Ok(self.0.iter().find(|s| s.id == id).map(|s| (**s).clone()))
        }
    }

    /// Hands out the reports it was built with, filtered by store.
    pub struct StaticReports(pub Vec<StockReport>);

    impl StockReportRepository for StaticReports {
        fn reports_for_store(&self, store: &Arc<Store>) -> Result<Vec<StockReport>, DataAccessError> {
            Ok(self
                .0
                .iter()
                .filter(|r| r.store.id == store.id)
                .cloned()
                .collect())
        }
    }

    pub fn store(id: i32) -> Arc<Store> {
        Arc::new(Store {
            id: StoreId(id),
            name: format!("Store {id}"),
            email: format!("store{id}@example.com"),
        })
    }
}
