use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::repository::SiteStore;

pub mod routes;

/// Server state
pub struct AppState {
    pub store: Arc<dyn SiteStore>,
    /// Required bearer token for admin routes, if any
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn SiteStore>, admin_token: Option<String>) -> Self {
        Self { store, admin_token }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/sites", get(routes::list_sites))
        .route("/api/site/{id}", get(routes::get_site))
        .route("/api/locations", get(routes::get_locations))
        .route("/api/religions", get(routes::get_religions))
        .route("/api/facets/{field}", get(routes::get_facet))
        .route("/api/stats", get(routes::get_stats))
        .route("/api/admin/sites", post(routes::create_site))
        .route(
            "/api/admin/sites/{id}",
            post(routes::replace_site).delete(routes::delete_site),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    if state.admin_token.is_none() {
        tracing::warn!("No admin_token configured; admin routes are unauthenticated");
    }
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("{} Server running at http://{}", crate::ui::Icons::PIN, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
