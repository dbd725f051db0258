use crate::document::SearchResult;
use crate::error::RenderError;
use crate::markup::Element;
use crate::render::ResultRenderer;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub result: SearchResult,
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Also return the markup tree
    #[serde(default)]
    pub tree: bool,
}

#[derive(Debug, Deserialize)]
pub struct RenderListRequest {
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Element>,
}

#[derive(Debug, Serialize)]
pub struct RenderListResponse {
    pub html: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = format!("{:#}", self.0);

        // malformed input is the caller's fault
        let status = if self.0.downcast_ref::<RenderError>().is_some() {
            tracing::warn!("Rejected search result: {}", message);
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            tracing::error!("API error: {}", message);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn render_result(
    State(renderer): State<Arc<ResultRenderer>>,
    Json(req): Json<RenderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item = renderer.render_search_result(&req.result, req.threshold)?;

    let response = RenderResponse {
        html: item.to_string(),
        tree: req.tree.then_some(item),
    };

    Ok(Json(ApiResponse::success(response)))
}

async fn render_list(
    State(renderer): State<Arc<ResultRenderer>>,
    Json(req): Json<RenderListRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pane = renderer.render_search_results(&req.results, req.threshold)?;

    let response = RenderListResponse {
        html: pane.to_string(),
        total: req.results.len(),
    };

    Ok(Json(ApiResponse::success(response)))
}

// ========== Router ==========

pub fn create_router(renderer: Arc<ResultRenderer>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/render", post(render_result))
        .route("/render/list", post(render_list))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(renderer)
}
