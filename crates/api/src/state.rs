use std::sync::Arc;

use crate::auth::CredentialVerifier;
use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sanstha_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// File store for uploaded images.
    pub uploads: Arc<UploadStore>,
    /// Login credential verifier (static pair by default).
    pub verifier: Arc<dyn CredentialVerifier>,
}
