use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{Local, NaiveDateTime};

use crate::domain::catalog::{OrderId, Product, ProductId, Provider, ProviderId, Warehouse};
use crate::domain::errors::DomainError;
use crate::domain::order::{
    calculate_total_price, NewOrder, OrderDetail, OrderItem, OrderRevision, OrderSummary, Status,
};
use crate::domain::ports::{OrderRepository, ProductRepository, ProviderRepository};

const CREATED_NOTE: &str = "Order created";

/// An order being put together on screen, before anything is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftOrder {
    pub warehouse: Arc<Warehouse>,
    pub provider: Option<Arc<Provider>>,
    pub items: Vec<OrderItem>,
}

impl DraftOrder {
    pub fn new(warehouse: Arc<Warehouse>) -> Self {
        Self {
            warehouse,
            provider: None,
            items: Vec::new(),
        }
    }

    pub fn total_price(&self) -> BigDecimal {
        calculate_total_price(&self.items)
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.product.id == product_id)
    }
}

/// Drives the ordering screens: one draft at a time, plus reads and status
/// changes on stored orders.
pub struct OrderController {
    orders: Arc<dyn OrderRepository>,
    providers: Arc<dyn ProviderRepository>,
    products: Arc<dyn ProductRepository>,
    draft: Option<DraftOrder>,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl OrderController {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        providers: Arc<dyn ProviderRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            orders,
            providers,
            products,
            draft: None,
            clock: local_now,
        }
    }

    /// Replaces the wall clock used to stamp orders and revisions.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn orders(&self) -> Arc<dyn OrderRepository> {
        Arc::clone(&self.orders)
    }

    pub fn draft(&self) -> Option<&DraftOrder> {
        self.draft.as_ref()
    }

    fn draft_mut(&mut self) -> Result<&mut DraftOrder, DomainError> {
        self.draft
            .as_mut()
            .ok_or_else(|| DomainError::InvalidInput("No order is being created".to_string()))
    }

    pub fn start_order(&mut self, warehouse: Arc<Warehouse>) -> &DraftOrder {
        log::debug!("Starting a new draft order for warehouse {}", warehouse.id);
        self.draft.insert(DraftOrder::new(warehouse))
    }

    pub fn cancel_draft(&mut self) {
        self.draft = None;
    }

    pub fn choose_provider(&mut self, provider_id: ProviderId) -> Result<&DraftOrder, DomainError> {
        let provider = self
            .providers
            .find_by_id(provider_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Provider {provider_id}")))?;
        let draft = self.draft_mut()?;
        draft.provider = Some(Arc::new(provider));
        Ok(&*draft)
    }

    /// Adds `quantity` of a product to the draft. A product already on the
    /// draft gets the extra quantity and the new unit price.
    pub fn add_product(
        &mut self,
        product_id: ProductId,
        unit_price: BigDecimal,
        quantity: i32,
    ) -> Result<&DraftOrder, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::InvalidInput("Amount must be positive".to_string()));
        }
        if unit_price < BigDecimal::from(0) {
            return Err(DomainError::InvalidInput("Unit price can't be negative".to_string()));
        }
        self.draft_mut()?;

        let product = self
            .products
            .find_by_id(product_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Product {product_id}")))?;

        let draft = self.draft_mut()?;
        match draft.position(product_id) {
            Some(idx) => {
                let item = &mut draft.items[idx];
                item.quantity = item.quantity.checked_add(quantity).ok_or_else(|| {
                    DomainError::InvalidInput("Amount is too large".to_string())
                })?;
                item.unit_price = unit_price;
            }
            None => draft
                .items
                .push(OrderItem::new(quantity, unit_price, Arc::new(product))),
        }
        Ok(&*draft)
    }

    /// Takes `quantity` of a product off the draft, or the whole line when
    /// `quantity` is `None`. A line that drops to zero is removed.
    pub fn remove_product(
        &mut self,
        product_id: ProductId,
        quantity: Option<i32>,
    ) -> Result<&DraftOrder, DomainError> {
        let draft = self.draft_mut()?;
        let idx = draft
            .position(product_id)
            .ok_or_else(|| DomainError::NotFound(format!("Product {product_id} on this order")))?;

        match quantity {
            Some(q) if q <= 0 => {
                return Err(DomainError::InvalidInput("Amount must be positive".to_string()));
            }
            Some(q) if q < draft.items[idx].quantity => draft.items[idx].quantity -= q,
            _ => {
                draft.items.remove(idx);
            }
        }
        Ok(&*draft)
    }

    /// Products offered in the product picker.
    pub fn product_catalogue(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.all()?)
    }

    /// Providers offered in the provider chooser.
    pub fn provider_choices(&self) -> Result<Vec<Provider>, DomainError> {
        Ok(self.providers.all()?)
    }

    pub fn draft_total(&self) -> Option<BigDecimal> {
        self.draft.as_ref().map(DraftOrder::total_price)
    }

    /// Stores the draft: header, then items, then the opening revision.
    /// These are separate writes; a failure part way leaves what was already
    /// written and keeps the draft so the user can retry.
    pub fn finish_order(&mut self) -> Result<OrderId, DomainError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| DomainError::InvalidInput("No order is being created".to_string()))?;
        let provider = draft
            .provider
            .as_ref()
            .ok_or_else(|| DomainError::InvalidInput("Choose a provider first".to_string()))?;
        if draft.items.is_empty() {
            return Err(DomainError::InvalidInput("The order has no products".to_string()));
        }

        let now = (self.clock)();
        let order_id = self.orders.create(&NewOrder {
            provider_id: provider.id,
            warehouse_id: draft.warehouse.id,
            date: now,
            status: Status::Pending,
        })?;
        self.orders.insert_order_items(order_id, &draft.items)?;
        self.orders.insert_order_revision(
            &[OrderRevision::pending(order_id, now, CREATED_NOTE, Status::Pending)],
            order_id,
        )?;

        log::info!(
            "Warehouse order {} finished with {} item(s), total {}",
            order_id,
            draft.items.len(),
            draft.total_price()
        );
        self.draft = None;
        Ok(order_id)
    }

    pub fn get_order(&self, id: OrderId) -> Result<Option<OrderDetail>, DomainError> {
        Ok(self.orders.select_by_id(id)?)
    }

    pub fn orders_for_warehouse(&self, warehouse: &Arc<Warehouse>) -> Result<Vec<OrderSummary>, DomainError> {
        Ok(self.orders.orders_by_warehouse(warehouse)?)
    }

    pub fn orders_for_provider(&self, provider_id: ProviderId) -> Result<Vec<OrderSummary>, DomainError> {
        let provider = self
            .providers
            .find_by_id(provider_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Provider {provider_id}")))?;
        Ok(self.orders.orders_by_provider(&Arc::new(provider))?)
    }

    /// Loads the items a summary was listed without.
    pub fn hydrate(&self, summary: OrderSummary) -> Result<OrderDetail, DomainError> {
        let items = self.orders.order_items(summary.id)?;
        Ok(summary.with_items(items))
    }

    /// Moves an order to `status` and records the change as a revision.
    /// The header keeps its creation date; the revision carries the time of
    /// the change.
    pub fn change_status(
        &self,
        order: &OrderSummary,
        status: Status,
        note: &str,
    ) -> Result<OrderSummary, DomainError> {
        let now = (self.clock)();
        let updated = OrderSummary {
            status,
            ..order.clone()
        };
        if self.orders.update(&updated)? == 0 {
            return Err(DomainError::NotFound(format!("Order {}", order.id)));
        }
        self.orders
            .insert_order_revision(&[OrderRevision::pending(order.id, now, note, status)], order.id)?;
        log::info!("Warehouse order {} moved from {} to {}", order.id, order.status, status);
        Ok(updated)
    }

    pub fn revisions(&self, order: &OrderSummary) -> Result<Vec<OrderRevision>, DomainError> {
        Ok(self.orders.order_revisions(order)?)
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::domain::catalog::{
        OrderId, Product, ProductId, Provider, ProviderId, RevisionId, Warehouse, WarehouseId,
    };
    use crate::domain::errors::DataAccessError;
    use crate::domain::order::{NewOrder, OrderDetail, OrderItem, OrderRevision, OrderSummary};
    use crate::domain::ports::{OrderRepository, ProductRepository, ProviderRepository};

    #[derive(Default)]
    struct State {
        next_id: i32,
        headers: Vec<(OrderId, NewOrder)>,
        items: HashMap<OrderId, Vec<OrderItem>>,
        revisions: Vec<OrderRevision>,
    }

    /// In-memory order store. Reference entities come from the fixed catalogue
    /// it is built with.
    #[derive(Default)]
    pub struct InMemoryOrders {
        state: Mutex<State>,
        warehouses: HashMap<WarehouseId, Arc<Warehouse>>,
        providers: HashMap<ProviderId, Arc<Provider>>,
        pub fail_with: Option<String>,
    }

    impl InMemoryOrders {
        pub fn new(warehouses: &[Arc<Warehouse>], providers: &[Arc<Provider>]) -> Self {
            Self {
                warehouses: warehouses.iter().map(|w| (w.id, Arc::clone(w))).collect(),
                providers: providers.iter().map(|p| (p.id, Arc::clone(p))).collect(),
                ..Default::default()
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Default::default()
            }
        }

        fn check(&self) -> Result<(), DataAccessError> {
            match &self.fail_with {
                Some(message) => Err(DataAccessError::new(message.clone())),
                None => Ok(()),
            }
        }

        fn summary(&self, id: OrderId, header: &NewOrder) -> OrderSummary {
            OrderSummary {
                id,
                date: header.date,
                status: header.status,
                warehouse: Arc::clone(&self.warehouses[&header.warehouse_id]),
                provider: Arc::clone(&self.providers[&header.provider_id]),
            }
        }

        pub fn stored_revisions(&self) -> Vec<OrderRevision> {
            self.state.lock().unwrap().revisions.clone()
        }
    }

    impl OrderRepository for InMemoryOrders {
        fn create(&self, order: &NewOrder) -> Result<OrderId, DataAccessError> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let id = OrderId(state.next_id);
            state.headers.push((id, order.clone()));
            Ok(id)
        }

        fn select_by_id(&self, id: OrderId) -> Result<Option<OrderDetail>, DataAccessError> {
            self.check()?;
            let state = self.state.lock().unwrap();
            Ok(state.headers.iter().find(|(i, _)| *i == id).map(|(i, h)| {
                self.summary(*i, h)
                    .with_items(state.items.get(i).cloned().unwrap_or_default())
            }))
        }

        fn all(&self) -> Result<Vec<OrderSummary>, DataAccessError> {
            self.check()?;
            let state = self.state.lock().unwrap();
            Ok(state.headers.iter().map(|(i, h)| self.summary(*i, h)).collect())
        }

        fn update(&self, order: &OrderSummary) -> Result<usize, DataAccessError> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            match state.headers.iter_mut().find(|(i, _)| *i == order.id) {
                Some((_, header)) => {
                    header.date = order.date;
                    header.status = order.status;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        fn delete(&self, order: &OrderSummary) -> Result<usize, DataAccessError> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            let before = state.headers.len();
            state.headers.retain(|(i, _)| *i != order.id);
            state.items.remove(&order.id);
            state.revisions.retain(|r| r.order_id != order.id);
            Ok(before - state.headers.len())
        }

        fn orders_by_warehouse(&self, warehouse: &Arc<Warehouse>) -> Result<Vec<OrderSummary>, DataAccessError> {
            Ok(self
                .all()?
                .into_iter()
                .filter(|o| o.warehouse.id == warehouse.id)
                .collect())
        }

        fn orders_by_provider(&self, provider: &Arc<Provider>) -> Result<Vec<OrderSummary>, DataAccessError> {
            Ok(self
                .all()?
                .into_iter()
                .filter(|o| o.provider.id == provider.id)
                .collect())
        }

        fn order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, DataAccessError> {
            self.check()?;
            Ok(self
                .state
                .lock()
                .unwrap()
                .items
                .get(&order_id)
                .cloned()
                .unwrap_or_default())
        }

        fn insert_order_items(&self, order_id: OrderId, items: &[OrderItem]) -> Result<usize, DataAccessError> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            state.items.entry(order_id).or_default().extend(items.iter().cloned());
            Ok(items.len())
        }

        fn order_revisions(&self, order: &OrderSummary) -> Result<Vec<OrderRevision>, DataAccessError> {
            self.check()?;
            Ok(self
                .state
                .lock()
                .unwrap()
                .revisions
                .iter()
                .filter(|r| r.order_id == order.id)
                .cloned()
                .collect())
        }

        fn insert_order_revision(
            &self,
            revisions: &[OrderRevision],
            order_id: OrderId,
        ) -> Result<Option<RevisionId>, DataAccessError> {
            self.check()?;
            let Some(pending) = revisions.iter().find(|r| r.id.is_none()) else {
                return Ok(None);
            };
            let mut state = self.state.lock().unwrap();
            let id = RevisionId(state.revisions.len() as i32 + 1);
            state.revisions.push(OrderRevision {
                id: Some(id),
                order_id,
                ..pending.clone()
            });
            Ok(Some(id))
        }
    }

    pub struct StaticProviders(pub Vec<Arc<Provider>>);

    impl ProviderRepository for StaticProviders {
        fn find_by_id(&self, id: ProviderId) -> Result<Option<Provider>, DataAccessError> {
            Ok(self.0.iter().find(|p| p.id == id).map(|p| (**p).clone()))
        }

        fn all(&self) -> Result<Vec<Provider>, DataAccessError> {
            Ok(self.0.iter().map(|p| (**p).clone()).collect())
        }
    }

    pub struct StaticProducts(pub Vec<Arc<Product>>);

    impl ProductRepository for StaticProducts {
        fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DataAccessError> {
            Ok(self.0.iter().find(|p| p.id == id).map(|p| (**p).clone()))
        }

        fn all(&self) -> Result<Vec<Product>, DataAccessError> {
            Ok(self.0.iter().map(|p| (**p).clone()).collect())
        }
    }
}
