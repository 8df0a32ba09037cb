use crate::error::RelayError;
use crate::models::chat::{ ChatRequest, ChatResponse };
use crate::relay::CompletionRelay;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
    response::IntoResponse,
    http::StatusCode,
};
use serde::Serialize;
use tower_http::cors::{ Any, CorsLayer };
use log::warn;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Clone)]
struct AppState {
    relay: CompletionRelay,
}

pub fn router(relay: CompletionRelay) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { relay })
}

// Every outcome, including failures, is answered with a `{ "text": ... }` body
// so the front-end can show it as-is.
async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!("Malformed chat request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ChatResponse::new(format!("Invalid request body: {}", rejection.body_text()))),
            );
        }
    };

    match state.relay.handle_completion_request(&req.messages, req.user.as_deref()).await {
        Ok(text) => (StatusCode::OK, Json(ChatResponse::new(text))),
        Err(e) => (status_for(&e), Json(ChatResponse::new(e.to_string()))),
    }
}

fn status_for(err: &RelayError) -> StatusCode {
    match err {
        RelayError::Input(_) => StatusCode::BAD_REQUEST,
        RelayError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
        RelayError::Provider(_) => StatusCode::OK,
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
