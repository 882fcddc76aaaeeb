//! Shop Web Server
//!
//! Axum-based HTTP/JSON API for the storefront.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // Purchase graph
        .route(
            "/graph/customers-orders",
            get(routes::graph::list_purchases).post(routes::graph::record_purchase),
        )
        // Customers
        .route(
            "/customers",
            get(routes::customers::list_customers).post(routes::customers::register),
        )
        .route("/login", post(routes::customers::login))
        // Sessions
        .route(
            "/session/{user}",
            get(routes::sessions::get_session).post(routes::sessions::save_session),
        )
        // Products
        .route(
            "/products",
            get(routes::products::list_products)
                .post(routes::products::create_product)
                .layer(DefaultBodyLimit::max(routes::products::MAX_UPLOAD_BYTES)),
        );

    if let Some(dir) = &state.media_dir {
        router = router.nest_service("/media", ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until Ctrl+C or SIGTERM.
///
/// Returns once in-flight requests have finished, after which the caller
/// owns the store handles again and can release them.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
