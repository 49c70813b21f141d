//! Lead service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

/// Lead service configuration.
///
/// Built once at startup and handed to the store and the HTTP server;
/// handlers never read the environment themselves.
#[derive(Debug, Clone)]
pub struct LeadServiceConfig {
    /// Bind address and service name
    pub server: ServiceConfig,
    /// Leads store connection
    pub database: DatabaseConfig,
}

impl LeadServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_url = env::var("LEAD_SERVICE_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| {
                tracing::warn!("DATABASE_URL not set, using development default");
                defaults.database.url.clone()
            });

        Self {
            server: ServiceConfig {
                service_name: defaults.server.service_name,
                host: env::var("LEAD_SERVICE_HOST").unwrap_or(defaults.server.host),
                port: env::var("LEAD_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            database: DatabaseConfig {
                url: database_url,
                schema: env::var("LEAD_SERVICE_DB_SCHEMA")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                max_connections: env::var("LEAD_SERVICE_DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env::var("LEAD_SERVICE_DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.min_connections),
            },
        }
    }

    /// Override the bind address (CLI flags take precedence over env).
    pub fn with_addr(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}

impl Default for LeadServiceConfig {
    fn default() -> Self {
        Self {
            server: ServiceConfig {
                service_name: "lead-service".to_string(),
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig::default(),
        }
    }
}
