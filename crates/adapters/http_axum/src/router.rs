//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use fleet_app::ports::{MaintenancePersistencePort, UnitOfWork, VehiclePersistencePort};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the JSON API under `/api` and includes a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level.
pub fn build<VR, MR, U>(state: AppState<VR, MR, U>) -> Router
where
    VR: VehiclePersistencePort + Send + Sync + 'static,
    MR: MaintenancePersistencePort + Send + Sync + 'static,
    U: UnitOfWork + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
