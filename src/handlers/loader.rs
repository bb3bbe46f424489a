use tokio::sync::oneshot;

use crate::domain::errors::DomainError;

/// Runs `load` on the blocking pool and hands its result back through the
/// returned receiver. The task is detached: there is no cancellation and no
/// timeout, and a dropped receiver just discards the result.
pub fn spawn_loader<T, F>(screen: &'static str, load: F) -> oneshot::Receiver<Result<T, DomainError>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let result = load();
        if let Err(e) = &result {
            log::warn!("Loading {} failed: {}", screen, e);
        }
        if tx.send(result).is_err() {
            log::debug!("{} closed before its data arrived", screen);
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::order_controller::fakes::InMemoryOrders;
    use crate::domain::errors::DataAccessError;
    use crate::domain::order::fixtures::{provider, warehouse};
    use crate::domain::ports::OrderRepository;

    #[tokio::test]
    async fn hands_result_back_to_caller() {
        let orders = Arc::new(InMemoryOrders::new(&[warehouse(3)], &[provider(7)]));
        let repo = Arc::clone(&orders);

        let rx = spawn_loader("order list", move || Ok(repo.all()?));

        let loaded = rx.await.expect("loader dropped its sender").expect("load failed");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn failures_arrive_as_errors() {
        let rx = spawn_loader::<(), _>("product list", || {
            Err(DataAccessError::new("timeout").into())
        });

        let err = rx.await.expect("loader dropped its sender").unwrap_err();
        assert_eq!(err.to_string(), "Data access failed: timeout");
    }
}
