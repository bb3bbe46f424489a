pub mod catalog_repo;
pub mod models;
pub mod order_repo;
pub mod stock_report_repo;

#[cfg(test)]
mod test_container;
#[cfg(test)]
pub(crate) mod test_support;
