use std::sync::Arc;

use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};

use warehouse_orders::config::Config;
use warehouse_orders::domain::errors::DomainError;
use warehouse_orders::domain::ports::{OrderRepository, WarehouseRepository};
use warehouse_orders::errors::AppError;
use warehouse_orders::handlers::loader::spawn_loader;
use warehouse_orders::handlers::orders::{handle_line, Session, ViewUpdate};
use warehouse_orders::infrastructure::catalog_repo::DieselWarehouseRepository;
use warehouse_orders::{build_controllers, create_pool, run_migrations};

fn render(result: Result<ViewUpdate, AppError>) -> serde_json::Result<String> {
    match result {
        Ok(view) => serde_json::to_string(&view),
        Err(e) => {
            log::warn!("Action failed: {}", e);
            serde_json::to_string(&e.notification())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url, config.pool_size)?;
    run_migrations(&pool)?;

    let warehouse = DieselWarehouseRepository::new(pool.clone())
        .find_by_id(config.warehouse_id)?
        .ok_or_else(|| DomainError::NotFound(format!("Warehouse {}", config.warehouse_id)))?;
    let session = Session {
        warehouse: Arc::new(warehouse),
    };
    let mut controllers = build_controllers(pool);

    log::info!("Order screens ready for warehouse {}", session.warehouse.name);

    // Opening screen: the warehouse's orders, loaded off the event loop.
    let orders = controllers.orders.orders();
    let warehouse = Arc::clone(&session.warehouse);
    let initial = spawn_loader("order list", move || Ok(orders.orders_by_warehouse(&warehouse)?));
    if let Ok(loaded) = initial.await {
        let view = loaded
            .map(ViewUpdate::orders)
            .map_err(AppError::from);
        println!("{}", render(view)?);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let result = tokio::task::block_in_place(|| handle_line(&mut controllers, &session, line));
        println!("{}", render(result)?);
    }

    Ok(())
}
