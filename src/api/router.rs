use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::metrics_middleware;
use super::state::AppState;
use super::teams;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router; `metrics` adds the Prometheus scrape endpoint at `metrics_path`
pub fn create_router(
    state: AppState,
    metrics: Option<PrometheusMetrics>,
    metrics_path: &str,
) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/teams", teams::create_teams_router())
        .nest("/v1", teams::create_v1_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http());

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m, metrics_path));
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::AuthConfig;
    use crate::domain::team::{MockTeamMembershipRepository, MockTeamRepository};
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::auth::AuthGuard;
    use crate::infrastructure::user::IdentityResolver;

    fn app() -> Router {
        let guard = Arc::new(AuthGuard::new(
            Arc::new(IdentityResolver::new(Arc::new(MockUserRepository::new()))),
            Arc::new(MockTeamRepository::new()),
            Arc::new(MockTeamMembershipRepository::new()),
        ));
        let state = AppState::new(guard, &AuthConfig::default()).unwrap();

        create_router(state, None, "/metrics")
    }

    async fn status_of(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_probes() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
        assert_eq!(status_of("/live").await, StatusCode::OK);
        assert_eq!(status_of("/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unauthenticated_page_never_reaches_stores() {
        // Mocks without expectations panic if called
        assert_eq!(status_of("/teams/core").await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_metrics_route_absent_when_disabled() {
        assert_eq!(status_of("/metrics").await, StatusCode::NOT_FOUND);
    }
}
