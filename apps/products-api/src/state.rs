//! Application state management

use sea_orm::DatabaseConnection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}

#[cfg(test)]
impl AppState {
    /// State around an arbitrary connection, typically a `MockDatabase`
    pub fn for_tests(db: DatabaseConnection) -> Self {
        use crate::config::{Config, Environment};
        use core_config::{app_info, server::ServerConfig};
        use database::postgres::PostgresConfig;

        Self {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgres://localhost/products_test"),
                server: ServerConfig::default(),
                environment: Environment::Development,
                run_migrations: false,
            },
            db,
        }
    }
}
