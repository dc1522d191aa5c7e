//! In-process helpers for router-level tests: application state over a mock
//! database connection, so handlers can be driven through `oneshot` without
//! a live Postgres.

use std::sync::Arc;

use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use tillbook_shared::config::{AppConfig, DatabaseConfig, ServerConfig, WalletConfig};

use crate::AppState;

/// A mock connection with no prepared results; suitable for handlers that
/// reject at the boundary before touching storage.
pub(crate) fn mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

pub(crate) fn state(db: DatabaseConnection) -> AppState {
    AppState {
        db: Arc::new(db),
        config: Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_owned(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/unused".to_owned(),
                max_connections: 1,
            },
            wallet: WalletConfig::default(),
        }),
    }
}
