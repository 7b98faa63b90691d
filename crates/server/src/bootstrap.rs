use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use savory_core::config::{AppConfig, ConfigError, LoadOptions};
use savory_db::{
    connect, ensure_menu_seed, migrations, DbPool, RepositoryError, SqlOrderRepository,
};
use savory_fulfillment::{CartStore, Dispatcher, OrderService};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub dispatcher: Arc<Dispatcher>,
    pub cart_store: Arc<CartStore>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("menu seed failed: {0}")]
    MenuSeed(#[source] RepositoryError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let seed = ensure_menu_seed(&db_pool).await.map_err(BootstrapError::MenuSeed)?;
    if !seed.skipped {
        info!(
            event_name = "system.bootstrap.menu_seeded",
            correlation_id = "bootstrap",
            inserted = seed.inserted,
            "baseline menu seeded"
        );
    }

    let cart_store = Arc::new(CartStore::new());
    let orders = Arc::new(SqlOrderRepository::new(db_pool.clone()));
    let dispatcher =
        Arc::new(Dispatcher::new(OrderService::new(Arc::clone(&cart_store), orders)));

    Ok(Application { config, db_pool, dispatcher, cart_store })
}

#[cfg(test)]
mod tests {
    use savory_core::config::{ConfigOverrides, LoadOptions};

    use super::bootstrap;

    fn memory_options() -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some("sqlite::memory:?cache=shared".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_prepares_schema_and_menu() {
        let app = bootstrap(memory_options()).await.expect("bootstrap");

        let (table_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master \
             WHERE type = 'table' AND name IN ('menu_items', 'order_items', 'order_tracking')",
        )
        .fetch_one(&app.db_pool)
        .await
        .expect("expected schema tables after bootstrap");
        assert_eq!(table_count, 3, "bootstrap should expose all order-path tables");

        let menu_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&app.db_pool)
            .await
            .expect("count menu");
        assert!(menu_count > 0, "bootstrap should seed the baseline menu");

        assert!(app.cart_store.is_empty(), "no in-flight carts at startup");

        app.db_pool.close().await;
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_config() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some("postgres://nope".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = result.err().expect("expected config failure").to_string();
        assert!(message.contains("database.url"));
    }
}
