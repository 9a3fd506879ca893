//! HTTP server exposing the info document and hyperslab reads
//!
//! * `GET /get-info` returns the cached [`info_document`](crate::info::info_document).
//! * `GET /get-data?<dim>_index=N&...` returns one hyperslab of the data
//!   variable, one `<dim>_index` parameter per configured index dimension.
//! * `GET /health` returns `{"status":"ok"}`.
//!
//! libnetcdf is not thread-safe, so each data request opens its own handle on
//! the blocking pool instead of sharing one between workers.

use crate::errors::{NcInfoError, Result};
use crate::info::info_document;
use crate::metadata::read_metadata;
use crate::slab::{parse_index_param, read_slab, Slab, SlabQuery};
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// File every request reads from.
    pub path: PathBuf,

    /// Info document, built once at startup.
    pub info: Value,

    /// Variable `/get-data` reads.
    pub data_variable: String,

    /// Dimensions `/get-data` pins, in parameter order.
    pub index_dims: Vec<String>,
}

impl AppState {
    /// Read the file's metadata and prepare the state for serving it.
    pub fn load(path: PathBuf, data_variable: String, index_dims: Vec<String>) -> Result<Self> {
        let metadata = read_metadata(&path)?;
        Ok(Self {
            info: info_document(&metadata),
            path,
            data_variable,
            index_dims,
        })
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error returned by handlers; client mistakes map to 400, the rest to 500.
#[derive(Debug)]
pub struct ApiError(pub NcInfoError);

impl From<NcInfoError> for ApiError {
    fn from(error: NcInfoError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            tracing::debug!(error = %self.0, "rejected request");
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self.0, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Build the router with its middleware.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get-info", get(get_info_handler))
        .route("/get-data", get(get_data_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// GET /get-info
pub async fn get_info_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(state.info.clone())
}

/// GET /get-data
pub async fn get_data_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> std::result::Result<Json<Value>, ApiError> {
    let indices = state
        .index_dims
        .iter()
        .map(|dim| {
            parse_index_param(&params, &format!("{}_index", dim)).map(|index| (dim.clone(), index))
        })
        .collect::<Result<Vec<_>>>()?;

    let query = SlabQuery::new(state.data_variable.clone(), indices);
    let path = state.path.clone();

    let slab = tokio::task::spawn_blocking(move || -> Result<Slab> {
        let file = netcdf::open(&path)?;
        read_slab(&file, &query)
    })
    .await
    .map_err(|e| NcInfoError::Generic(format!("Data read task failed: {}", e)))??;

    Ok(Json(slab.to_json()))
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Bind `listen` and serve until Ctrl-C.
pub async fn serve(state: AppState, listen: &str) -> Result<()> {
    let addr: SocketAddr = listen.parse().map_err(|e: std::net::AddrParseError| {
        NcInfoError::InvalidArgument {
            name: "listen".to_string(),
            message: e.to_string(),
        }
    })?;

    info!(
        file = %state.path.display(),
        variable = %state.data_variable,
        index_dims = ?state.index_dims,
        "starting server"
    );

    let app = router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
