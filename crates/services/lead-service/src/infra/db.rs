//! Database connection and initialization.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};

use common::DatabaseConfig;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Build the connection handle.
    ///
    /// Connections are opened lazily: an unreachable store does not stop the
    /// service from starting, it fails the requests that need it instead.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy(true)
            .sqlx_logging(false);

        if let Some(schema) = &config.schema {
            options.set_schema_search_path(schema.clone());
        }

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!(schema = ?config.schema, "Database handle ready");

        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
