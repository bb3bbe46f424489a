use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::application::order_controller::{DraftOrder, OrderController};
use crate::application::Controllers;
use crate::domain::catalog::{OrderId, Product, ProductId, Provider, ProviderId, StockReportId, StoreId, Warehouse};
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderDetail, OrderItem, OrderRevision, OrderSummary, Status, WarehouseOrder};
use crate::domain::stock_report::{StockReport, StockReportItem};
use crate::errors::AppError;

// ── Events ───────────────────────────────────────────────────────────────────

/// A user action on one of the ordering screens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    StartOrder,
    ChooseProvider {
        provider_id: ProviderId,
    },
    AddProduct {
        product_id: ProductId,
        /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
        unit_price: String,
        quantity: i32,
    },
    RemoveProduct {
        product_id: ProductId,
        /// Omitted to remove the whole line.
        #[serde(default)]
        quantity: Option<i32>,
    },
    CancelDraft,
    FinishOrder,
    OpenOrder {
        order_id: OrderId,
    },
    ListOrders {
        #[serde(default)]
        provider_id: Option<ProviderId>,
    },
    ChangeStatus {
        order_id: OrderId,
        status: Status,
        #[serde(default)]
        note: String,
    },
    ShowRevisions {
        order_id: OrderId,
    },
    ListProducts,
    ListProviders,
    ListStockReports {
        store_id: StoreId,
    },
}

/// The warehouse the screens act for.
#[derive(Debug, Clone)]
pub struct Session {
    pub warehouse: Arc<Warehouse>,
}

// ── View models ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderItem> for ItemResponse {
    fn from(item: &OrderItem) -> Self {
        ItemResponse {
            product_id: item.product.id,
            product_name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftResponse {
    pub warehouse: String,
    pub provider: Option<String>,
    pub items: Vec<ItemResponse>,
    pub total_price: String,
}

impl From<&DraftOrder> for DraftResponse {
    fn from(draft: &DraftOrder) -> Self {
        DraftResponse {
            warehouse: draft.warehouse.name.clone(),
            provider: draft.provider.as_ref().map(|p| p.name.clone()),
            items: draft.items.iter().map(ItemResponse::from).collect(),
            total_price: draft.total_price().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummaryResponse {
    pub id: OrderId,
    pub date: String,
    pub status: Status,
    pub warehouse: String,
    pub provider: String,
}

impl From<&OrderSummary> for OrderSummaryResponse {
    fn from(o: &OrderSummary) -> Self {
        OrderSummaryResponse {
            id: o.id,
            date: o.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            status: o.status,
            warehouse: o.warehouse.name.clone(),
            provider: o.provider.name.clone(),
        }
    }
}

/// An order as a screen shows it. Listed orders come without `items` and
/// `total_price`; they were never loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub header: OrderSummaryResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<String>,
}

impl From<&WarehouseOrder> for OrderResponse {
    fn from(o: &WarehouseOrder) -> Self {
        OrderResponse {
            header: OrderSummaryResponse::from(o.summary()),
            items: o.items().map(|items| items.iter().map(ItemResponse::from).collect()),
            total_price: o.total_price().map(|total| total.to_string()),
        }
    }
}

impl From<OrderDetail> for OrderResponse {
    fn from(o: OrderDetail) -> Self {
        OrderResponse::from(&WarehouseOrder::from(o))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevisionResponse {
    pub id: Option<i32>,
    pub date: String,
    pub status: Status,
    pub note: String,
}

impl From<&OrderRevision> for RevisionResponse {
    fn from(r: &OrderRevision) -> Self {
        RevisionResponse {
            id: r.id.map(|id| id.0),
            date: r.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            status: r.status,
            note: r.note.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReportItemResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub price: String,
    pub weight: String,
}

impl From<&StockReportItem> for StockReportItemResponse {
    fn from(item: &StockReportItem) -> Self {
        StockReportItemResponse {
            product_id: item.product.id,
            product_name: item.product.name.clone(),
            quantity: item.quantity,
            price: item.product.price.to_string(),
            weight: item.product.weight.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReportResponse {
    pub id: StockReportId,
    pub date: String,
    pub items: Vec<StockReportItemResponse>,
}

impl From<&StockReport> for StockReportResponse {
    fn from(r: &StockReport) -> Self {
        StockReportResponse {
            id: r.id,
            date: r.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            items: r.items.iter().map(StockReportItemResponse::from).collect(),
        }
    }
}

/// What a screen should redraw after an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewUpdate {
    Draft(DraftResponse),
    DraftCancelled,
    OrderFinished { id: OrderId },
    Order(OrderResponse),
    Orders { items: Vec<OrderResponse> },
    Revisions { order_id: OrderId, items: Vec<RevisionResponse> },
    Products { items: Vec<Product> },
    Providers { items: Vec<Provider> },
    StockReports { store_id: StoreId, items: Vec<StockReportResponse> },
}

impl ViewUpdate {
    pub fn orders(orders: Vec<OrderSummary>) -> Self {
        ViewUpdate::Orders {
            items: orders
                .into_iter()
                .map(|o| OrderResponse::from(&WarehouseOrder::from(o)))
                .collect(),
        }
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

fn parse_price(raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|e| AppError::Rejected(format!("Invalid unit price '{}': {}", raw, e)))
}

fn stored_order(controller: &OrderController, order_id: OrderId) -> Result<OrderDetail, AppError> {
    controller
        .get_order(order_id)?
        .ok_or_else(|| DomainError::NotFound(format!("Order {order_id}")).into())
}

/// Runs the one controller call that `event` stands for.
pub fn dispatch(
    controllers: &mut Controllers,
    session: &Session,
    event: UiEvent,
) -> Result<ViewUpdate, AppError> {
    log::debug!("Dispatching {:?}", event);
    let controller = &mut controllers.orders;

    let update = match event {
        UiEvent::StartOrder => {
            ViewUpdate::Draft(controller.start_order(Arc::clone(&session.warehouse)).into())
        }
        UiEvent::ChooseProvider { provider_id } => {
            ViewUpdate::Draft(controller.choose_provider(provider_id)?.into())
        }
        UiEvent::AddProduct {
            product_id,
            unit_price,
            quantity,
        } => {
            let unit_price = parse_price(&unit_price)?;
            ViewUpdate::Draft(controller.add_product(product_id, unit_price, quantity)?.into())
        }
        UiEvent::RemoveProduct {
            product_id,
            quantity,
        } => ViewUpdate::Draft(controller.remove_product(product_id, quantity)?.into()),
        UiEvent::CancelDraft => {
            controller.cancel_draft();
            ViewUpdate::DraftCancelled
        }
        UiEvent::FinishOrder => ViewUpdate::OrderFinished {
            id: controller.finish_order()?,
        },
        UiEvent::OpenOrder { order_id } => {
            ViewUpdate::Order(stored_order(controller, order_id)?.into())
        }
        UiEvent::ListOrders { provider_id: None } => {
            ViewUpdate::orders(controller.orders_for_warehouse(&session.warehouse)?)
        }
        UiEvent::ListOrders {
            provider_id: Some(provider_id),
        } => ViewUpdate::orders(controller.orders_for_provider(provider_id)?),
        UiEvent::ChangeStatus {
            order_id,
            status,
            note,
        } => {
            let order = stored_order(controller, order_id)?;
            let updated = controller.change_status(&order.summary, status, &note)?;
            ViewUpdate::Order(updated.with_items(order.items).into())
        }
        UiEvent::ShowRevisions { order_id } => {
            let order = stored_order(controller, order_id)?;
            let revisions = controller.revisions(&order.summary)?;
            ViewUpdate::Revisions {
                order_id,
                items: revisions.iter().map(RevisionResponse::from).collect(),
            }
        }
        UiEvent::ListProducts => ViewUpdate::Products {
            items: controller.product_catalogue()?,
        },
        UiEvent::ListProviders => ViewUpdate::Providers {
            items: controller.provider_choices()?,
        },
        UiEvent::ListStockReports { store_id } => {
            let reports = controllers.stock_reports.reports_for_store(store_id)?;
            ViewUpdate::StockReports {
                store_id,
                items: reports.iter().map(StockReportResponse::from).collect(),
            }
        }
    };

    Ok(update)
}

/// Decodes one JSON event and dispatches it. Any failure comes back as the
/// notification to show instead of a view.
pub fn handle_line(
    controllers: &mut Controllers,
    session: &Session,
    line: &str,
) -> Result<ViewUpdate, AppError> {
    let event: UiEvent = serde_json::from_str(line)?;
    dispatch(controllers, session, event)
}
