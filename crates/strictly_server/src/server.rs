//! HTTP surface: one route per action plus a view of the game.

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_more::{Display, From};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use strictly_farkle::{ActionError, ActionRequest, GameManager};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Shared handle to the one game manager.
///
/// The mutex serialises every request so a transition and its re-mint are
/// never interleaved with another.
#[derive(Debug, Clone, derive_new::new)]
pub struct AppState {
    manager: Arc<Mutex<GameManager>>,
}

impl AppState {
    /// Wraps a manager for sharing across handlers.
    pub fn from_manager(manager: GameManager) -> Self {
        Self::new(Arc::new(Mutex::new(manager)))
    }

    /// The shared manager.
    pub fn manager(&self) -> &Arc<Mutex<GameManager>> {
        &self.manager
    }
}

/// Query of the NewGame link.
#[derive(Debug, Deserialize)]
pub struct NewGameQuery {
    token: u64,
    #[serde(rename = "winningScore")]
    winning_score: String,
}

/// Query of the Roll and NewTurn links.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    token: u64,
}

/// Error returned to HTTP clients.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// The core rejected the action.
    #[display("{}", _0)]
    Action(ActionError),

    /// The request itself was malformed.
    #[display("{}", _0)]
    #[from(ignore)]
    BadRequest(String),

    /// The query string was missing a field or did not parse.
    #[display("{}", _0)]
    Query(QueryRejection),

    /// Rendering the response failed.
    #[display("{}", _0)]
    Render(serde_json::Error),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Action(ActionError::InvalidToken(_))
            | ApiError::Action(ActionError::TokenMismatch { .. }) => StatusCode::FORBIDDEN,
            ApiError::Action(ActionError::InvalidAction(_)) => StatusCode::CONFLICT,
            ApiError::Action(ActionError::InvalidWinningScore(_))
            | ApiError::BadRequest(_)
            | ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::Action(ActionError::InvariantViolation(_)) | ApiError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "Request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Builds the router over the shared manager.
#[instrument(skip(state))]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(view))
        .route("/NewGame", post(new_game))
        .route("/Roll", post(roll))
        .route("/NewTurn", post(new_turn))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Renders the manager as JSON.
fn render(manager: &GameManager) -> Result<Json<Value>, ApiError> {
    Ok(Json(serde_json::to_value(manager.view())?))
}

#[instrument(skip(state))]
async fn view(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let manager = state.manager.lock().await;
    render(&manager)
}

#[instrument(skip(state))]
async fn new_game(
    State(state): State<AppState>,
    query: Result<Query<NewGameQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let winning_score: u32 = query.winning_score.parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "winningScore must be a positive integer, got '{}'",
            query.winning_score
        ))
    })?;
    perform(&state, query.token, ActionRequest::NewGame { winning_score }).await
}

#[instrument(skip(state))]
async fn roll(
    State(state): State<AppState>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    perform(&state, query.token, ActionRequest::Roll).await
}

#[instrument(skip(state))]
async fn new_turn(
    State(state): State<AppState>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    perform(&state, query.token, ActionRequest::NewTurn).await
}

/// Resolves, applies and renders under one lock.
async fn perform(
    state: &AppState,
    token: u64,
    request: ActionRequest,
) -> Result<Json<Value>, ApiError> {
    let mut manager = state.manager.lock().await;
    manager.invoke(token, request)?;
    debug!(phase = %manager.phase(), actions = %manager.active_actions(), "Action applied");
    render(&manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_farkle::ActionKind;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (ActionError::InvalidToken(3), StatusCode::FORBIDDEN),
            (
                ActionError::TokenMismatch {
                    token: 3,
                    issued_for: ActionKind::Roll,
                    requested: ActionKind::NewTurn,
                },
                StatusCode::FORBIDDEN,
            ),
            (ActionError::InvalidAction(ActionKind::Roll), StatusCode::CONFLICT),
            (ActionError::InvalidWinningScore(0), StatusCode::BAD_REQUEST),
            (
                ActionError::InvariantViolation("broken".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
        assert_eq!(
            ApiError::BadRequest("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_error_renders_json_body() {
        use axum::body::to_bytes;

        let error = ApiError::BadRequest("winningScore must be a positive integer".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Body readable");
        let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
        assert!(body["error"].is_string());
    }
}
