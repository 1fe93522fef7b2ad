use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::player_service::{PlayerService, ServeError, CACHE_TTL};

#[derive(Clone)]
pub struct AppState {
    pub players: Arc<PlayerService>,
}

/// The handler is the router fallback: any method on any path is served the
/// same way, matching the permissive surface of the upstream proxy.
pub fn build_router(players: Arc<PlayerService>) -> Router {
    Router::new()
        .fallback(serve_players)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { players })
}

async fn serve_players(State(state): State<AppState>) -> Result<Response, ServeError> {
    let served = state.players.serve_players().await?;
    let headers = [(header::CACHE_CONTROL, cache_control_value())];
    Ok((headers, Json(served.payload)).into_response())
}

/// `max-age` is for client caching, `s-maxage` for the CDN;
/// stale-while-revalidate allows serving stale content while revalidating.
fn cache_control_value() -> String {
    let ttl = CACHE_TTL.as_secs();
    format!(
        "public, max-age={ttl}, s-maxage={ttl}, stale-while-revalidate={}",
        2 * ttl
    )
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        // Failures carry no Cache-Control header; nothing may cache them.
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_control_directive_spans_the_ttl() {
        assert_eq!(
            cache_control_value(),
            "public, max-age=86400, s-maxage=86400, stale-while-revalidate=172800"
        );
    }
}
