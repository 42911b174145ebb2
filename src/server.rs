//! HTTP transport: a health endpoint and the GraphML upload endpoint.
//!
//! Upload checks (extension, empty body) happen here, before the converter
//! runs. Every rejection is a JSON body `{"detail": "..."}`.

use crate::config::ServerConfig;
use crate::convert::{self, check_upload};
use crate::error::{ConvertError, UploadError};
use axum::Json;
use axum::Router;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use bytes::Bytes;
use serde_json::{Value, json};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

/// Path of the conversion endpoint.
pub const CONVERT_PATH: &str = "/api/graphml-to-json";

/// Multipart field carrying the document.
pub const UPLOAD_FIELD: &str = "file";

/// Request failures, mapped to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Missing upload field: file")]
  MissingFile,

  #[error("Invalid multipart body: {0}")]
  Multipart(#[from] MultipartError),

  #[error(transparent)]
  Upload(#[from] UploadError),

  #[error(transparent)]
  Convert(#[from] ConvertError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Multipart(e) => e.status(),
      ApiError::Upload(_) => StatusCode::BAD_REQUEST,
      ApiError::Convert(ConvertError::Render(_)) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Convert(_) => StatusCode::BAD_REQUEST,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let mut body = json!({ "detail": self.to_string() });
    if let ApiError::Convert(e) = &self {
      body["kind"] = Value::from(e.kind());
    }
    (self.status(), Json(body)).into_response()
  }
}

/// A file taken from the multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
  pub filename: String,
  pub content: Bytes,
}

/// Builds the service router with CORS, request tracing and the body limit applied.
pub fn router(config: &ServerConfig) -> Router {
  Router::new()
    .route("/", get(health))
    .route(CONVERT_PATH, post(graphml_to_json))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
    )
}

/// Binds to the configured address and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
  let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
  info!(addr = %listener.local_addr()?, "graphml service listening");
  axum::serve(listener, router(&config))
    .with_graceful_shutdown(shutdown_signal())
    .await
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(error = %e, "could not listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!("shutting down");
}

/// Service identity.
pub async fn health() -> Json<Value> {
  Json(json!({
    "status": "ok",
    "message": format!("GraphML Visualizer API v{}", env!("CARGO_PKG_VERSION")),
    "endpoints": [CONVERT_PATH],
  }))
}

/// Converts the uploaded `file` field into the validated JSON graph.
#[instrument(level = "trace", skip(multipart))]
pub async fn graphml_to_json(mut multipart: Multipart) -> Result<Response, ApiError> {
  let upload = read_upload(&mut multipart).await?;
  if let Err(e) = check_upload(&upload.filename, &upload.content) {
    warn!(filename = %upload.filename, error = %e, "upload rejected");
    return Err(e.into());
  }

  match convert::convert(&upload.content) {
    Ok(graph) => {
      info!(
        filename = %upload.filename,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "converted"
      );
      Ok(Json(graph).into_response())
    }
    Err(e) => {
      info!(filename = %upload.filename, kind = e.kind(), error = %e, "conversion failed");
      Err(e.into())
    }
  }
}

/// Reads the first [UPLOAD_FIELD] field. Other fields are ignored.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
  while let Some(field) = multipart.next_field().await? {
    if field.name() != Some(UPLOAD_FIELD) {
      continue;
    }
    let filename = field.file_name().unwrap_or_default().to_string();
    let content = field.bytes().await?;
    return Ok(Upload { filename, content });
  }
  Err(ApiError::MissingFile)
}
