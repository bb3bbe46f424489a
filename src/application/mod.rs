pub mod order_controller;
pub mod stock_report_controller;

use order_controller::OrderController;
use stock_report_controller::StockReportController;

/// Every screen controller the UI dispatcher drives.
pub struct Controllers {
    pub orders: OrderController,
    pub stock_reports: StockReportController,
}
