use std::fmt;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Storage-assigned warehouse identifier.
    WarehouseId
);
id_type!(
    /// Storage-assigned provider identifier.
    ProviderId
);
id_type!(
    /// Storage-assigned product identifier.
    ProductId
);
id_type!(
    /// Storage-assigned order identifier.
    OrderId
);
id_type!(
    /// Storage-assigned revision identifier.
    RevisionId
);
id_type!(StoreId);
id_type!(StockReportId);

/// The facility an order is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub email: String,
}

/// A shop that reports its stock levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub email: String,
}

/// The counterparty an order is placed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub weight: BigDecimal,
    /// Current catalogue price. Order items keep their own snapshot.
    pub price: BigDecimal,
}
