//! Application state shared by the HTTP handlers

use std::sync::Arc;

use axum::http::HeaderName;
use sqlx::PgPool;

use crate::config::AuthConfig;
use crate::domain::DomainError;
use crate::infrastructure::auth::AuthGuard;

/// Guard plus the request-level auth settings
#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<AuthGuard>,
    /// Header carrying the external actor id
    pub actor_header: HeaderName,
    pub conceal_all_failures: bool,
    /// Database pool probed by `/ready`; `None` on the memory backend
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(guard: Arc<AuthGuard>, auth: &AuthConfig) -> Result<Self, DomainError> {
        let actor_header = HeaderName::from_bytes(auth.actor_header.as_bytes()).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid actor header '{}': {}",
                auth.actor_header, e
            ))
        })?;

        Ok(Self {
            guard,
            actor_header,
            conceal_all_failures: auth.conceal_all_failures,
            pool: None,
        })
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("actor_header", &self.actor_header)
            .field("conceal_all_failures", &self.conceal_all_failures)
            .field("pool", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}
