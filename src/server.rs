use crate::core::handler::ConvertHandler;
use crate::core::{ApiResponse, TextGenerator};
use crate::utils::error::ConvertError;
use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const CONVERT_PATH: &str = "/api/convert";
pub const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Serialize)]
struct Health {
    ok: bool,
    service: &'static str,
}

pub fn router<G: TextGenerator + 'static>(handler: Arc<ConvertHandler<G>>) -> Router {
    Router::new()
        .route(
            "/healthz",
            get(|| async {
                Json(Health {
                    ok: true,
                    service: "hiragana-convert",
                })
            }),
        )
        .route(CONVERT_PATH, any(convert::<G>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(handler)
}

async fn convert<G: TextGenerator + 'static>(
    State(handler): State<Arc<ConvertHandler<G>>>,
    method: Method,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    // 讀 body 失敗 (例如超過上限) 也走 handler，method 與 API key 檢查照常優先
    let response = match body {
        Ok(bytes) => handler.handle(method.as_str(), &bytes).await,
        Err(rejection) => {
            let err = ConvertError::UndecodableBody {
                reason: rejection.body_text(),
            };
            handler.handle_raw(method.as_str(), Err(err)).await
        }
    };
    into_axum_response(response)
}

fn into_axum_response(api: ApiResponse) -> Response {
    let status = StatusCode::from_u16(api.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    for (name, value) in api.headers {
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => {
                headers.insert(name, HeaderValue::from_static(value));
            }
            Err(e) => tracing::warn!("Skipping invalid header {}: {}", name, e),
        }
    }

    // Body 本身不帶 content-type，全部交給 handler 決定
    (status, headers, Body::from(api.body.unwrap_or_default())).into_response()
}

pub async fn serve<G, S>(
    listener: TcpListener,
    handler: Arc<ConvertHandler<G>>,
    shutdown: S,
) -> std::io::Result<()>
where
    G: TextGenerator + 'static,
    S: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("listening on http://{}{}", addr, CONVERT_PATH);
    }
    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
