pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, connect_with_settings, DbPool};
pub use fixtures::{ensure_menu_seed, SeedResult, DEFAULT_MENU};
pub use repositories::{
    InMemoryOrderRepository, OrderRepository, RepositoryError, SqlOrderRepository,
};
