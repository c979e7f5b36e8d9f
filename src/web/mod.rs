pub mod board;
pub mod status;
pub mod views;

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::ActivitiesClient;
use crate::models::Catalog;
use self::status::StatusBoard;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) client: Arc<ActivitiesClient>,
    /// Last catalog seen. Refreshed on every board load and after each
    /// successful signup; a confirmed removal only drops its own row here,
    /// so this can lag server truth until the next fetch.
    pub(crate) catalog: Arc<Mutex<Option<Catalog>>>,
    pub(crate) status: Arc<Mutex<StatusBoard>>,
}

pub async fn serve(base_url: &str, addr: &str) -> Result<()> {
    let state = AppState {
        client: Arc::new(ActivitiesClient::new(base_url)?),
        catalog: Arc::new(Mutex::new(None)),
        status: Arc::new(Mutex::new(StatusBoard::new())),
    };

    let app = Router::new()
        .route("/", get(board::board_handler))
        .route("/signup", post(board::signup_handler))
        .route("/unregister", post(board::unregister_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Activity board listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
