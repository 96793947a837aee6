//! HTTP surface mirroring the editor's REST contract
//!
//! The editor fetches content types and categories to fill its pickers and
//! asks the block renderer endpoint for server-side previews of dynamic
//! blocks.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::blocks::{self, BlockError, BlockRegistry, RenderContext};
use crate::config::LibraryConfig;
use crate::store::{ContentStore, StoreError};
use crate::BlockLibrary;

/// Server state
pub struct ServerState {
    config: LibraryConfig,
    store: Arc<dyn ContentStore>,
    registry: BlockRegistry,
}

impl ServerState {
    pub fn new(config: LibraryConfig, store: Arc<dyn ContentStore>, registry: BlockRegistry) -> Self {
        Self {
            config,
            store,
            registry,
        }
    }
}

/// Errors turned into JSON error responses
enum ApiError {
    Block(BlockError),
    Store(StoreError),
}

impl From<BlockError> for ApiError {
    fn from(e: BlockError) -> Self {
        ApiError::Block(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Block(e @ BlockError::UnknownBlock(_)) => {
                (StatusCode::NOT_FOUND, "block_invalid", e.to_string())
            }
            ApiError::Block(e) => (StatusCode::BAD_REQUEST, "invalid_params", e.to_string()),
            ApiError::Store(e) => {
                tracing::error!("Content store error: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", e.to_string())
            }
        };
        (status, Json(json!({ "code": code, "message": message }))).into_response()
    }
}

/// Build the router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/wp-json/wp/v2/types", get(types_handler))
        .route("/wp-json/wp/v2/categories", get(categories_handler))
        .route(
            "/wp-json/wp/v2/block-renderer/:namespace/:name",
            get(block_renderer_handler),
        )
        .route("/wp-json/:namespace/v1/blocks", get(blocks_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(library: &BlockLibrary, ip: &str, port: u16) -> Result<()> {
    let store = library.load_store()?;
    let registry = library.register_blocks()?;
    let state = Arc::new(ServerState::new(
        library.config.clone(),
        Arc::new(store),
        registry,
    ));

    let app = router(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Content types keyed by name
async fn types_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<IndexMap<String, Value>>, ApiError> {
    let types = state.store.list_content_types()?;
    let body = types
        .into_iter()
        .map(|t| {
            let entry = json!({ "slug": t.name, "name": t.label });
            (t.name, entry)
        })
        .collect();
    Ok(Json(body))
}

async fn categories_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Value>, ApiError> {
    let categories = state.store.list_categories()?;
    Ok(Json(json!(categories)))
}

#[derive(Debug, Deserialize)]
struct RendererParams {
    #[serde(default)]
    attributes: Option<String>,
}

/// Server-side render of one block instance
async fn block_renderer_handler(
    State(state): State<Arc<ServerState>>,
    Path((namespace, name)): Path<(String, String)>,
    Query(params): Query<RendererParams>,
) -> Result<Json<Value>, ApiError> {
    let block = format!("{}/{}", namespace, name);
    let attributes = blocks::parse_attributes(params.attributes.as_deref().unwrap_or(""))?;

    let context = RenderContext {
        config: &state.config,
        store: state.store.as_ref(),
    };
    let fragment = state.registry.render(&block, &attributes, &context)?;
    Ok(Json(json!({ "rendered": fragment })))
}

/// Registered blocks of a namespace
async fn blocks_handler(
    State(state): State<Arc<ServerState>>,
    Path(namespace): Path<String>,
) -> Json<Value> {
    let prefix = format!("{}/", namespace);
    let blocks: Vec<_> = state
        .registry
        .iter()
        .filter(|b| b.name.starts_with(&prefix))
        .collect();
    Json(json!(blocks))
}
