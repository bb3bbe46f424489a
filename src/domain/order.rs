use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{OrderId, Product, Provider, ProviderId, RevisionId, Warehouse, WarehouseId};

/// Lifecycle state of a warehouse order. Stored as its upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Approved,
    Fulfilled,
    Cancelled,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Approved,
        Status::Fulfilled,
        Status::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Approved => "APPROVED",
            Status::Fulfilled => "FULFILLED",
            Status::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One line of an order. Only exists as part of its order; the unit price
/// is the price agreed when the line was added, not the product's current one.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub product: Arc<Product>,
}

impl OrderItem {
    pub fn new(quantity: i32, unit_price: BigDecimal, product: Arc<Product>) -> Self {
        Self {
            quantity,
            unit_price,
            product,
        }
    }

    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// Sum of `quantity * unit_price` over `items`; zero when empty.
pub fn calculate_total_price(items: &[OrderItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::from(0), |acc, item| acc + item.line_total())
}

/// Audit entry recording a status at a point in time.
///
/// `id` is `None` until the revision has been written to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRevision {
    pub id: Option<RevisionId>,
    pub order_id: OrderId,
    pub date: NaiveDateTime,
    pub note: String,
    pub status: Status,
}

impl OrderRevision {
    pub fn pending(order_id: OrderId, date: NaiveDateTime, note: impl Into<String>, status: Status) -> Self {
        Self {
            id: None,
            order_id,
            date,
            note: note.into(),
            status,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Header fields needed to insert a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub provider_id: ProviderId,
    pub warehouse_id: WarehouseId,
    pub date: NaiveDateTime,
    pub status: Status,
}

/// An order header with its references resolved but no items loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub date: NaiveDateTime,
    pub status: Status,
    pub warehouse: Arc<Warehouse>,
    pub provider: Arc<Provider>,
}

impl OrderSummary {
    pub fn with_items(self, items: Vec<OrderItem>) -> OrderDetail {
        OrderDetail {
            summary: self,
            items,
        }
    }
}

/// An order header together with every one of its items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub summary: OrderSummary,
    pub items: Vec<OrderItem>,
}

impl OrderDetail {
    pub fn id(&self) -> OrderId {
        self.summary.id
    }

    pub fn total_price(&self) -> BigDecimal {
        calculate_total_price(&self.items)
    }
}

/// The two shapes an order can be observed in.
#[derive(Debug, Clone, PartialEq)]
pub enum WarehouseOrder {
    Summary(OrderSummary),
    Detailed(OrderDetail),
}

impl WarehouseOrder {
    pub fn summary(&self) -> &OrderSummary {
        match self {
            WarehouseOrder::Summary(s) => s,
            WarehouseOrder::Detailed(d) => &d.summary,
        }
    }

    pub fn id(&self) -> OrderId {
        self.summary().id
    }

    /// `None` for a summary: its items were never loaded, which is not the
    /// same as having none.
    pub fn items(&self) -> Option<&[OrderItem]> {
        match self {
            WarehouseOrder::Summary(_) => None,
            WarehouseOrder::Detailed(d) => Some(&d.items),
        }
    }

    pub fn total_price(&self) -> Option<BigDecimal> {
        self.items().map(calculate_total_price)
    }
}

impl From<OrderSummary> for WarehouseOrder {
    fn from(s: OrderSummary) -> Self {
        WarehouseOrder::Summary(s)
    }
}

impl From<OrderDetail> for WarehouseOrder {
    fn from(d: OrderDetail) -> Self {
        WarehouseOrder::Detailed(d)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::str::FromStr;
    use std::sync::Arc;

    use bigdecimal::BigDecimal;
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::catalog::ProductId;

    pub fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    pub fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp")
    }

    pub fn warehouse(id: i32) -> Arc<Warehouse> {
        Arc::new(Warehouse {
            id: WarehouseId(id),
            name: format!("Warehouse {id}"),
            email: format!("wh{id}@example.com"),
        })
    }

    pub fn provider(id: i32) -> Arc<Provider> {
        Arc::new(Provider {
            id: ProviderId(id),
            name: format!("Provider {id}"),
            email: format!("provider{id}@example.com"),
        })
    }

    pub fn product(id: i32, price: &str) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            weight: dec("1.5"),
            price: dec(price),
        })
    }

    pub fn summary(id: i32) -> OrderSummary {
        OrderSummary {
            id: OrderId(id),
            date: timestamp(),
            status: Status::Pending,
            warehouse: warehouse(3),
            provider: provider(7),
        }
    }
}
