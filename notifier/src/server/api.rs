//! REST handlers for background monitoring commands and diagnostics.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::commands::Command;

type ApiResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

/// Standard error response.
pub fn err_json(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "status": "error", "error": message })))
}

/// Map a path action to its command.
pub fn action_command(action: &str) -> Option<Command> {
    match action {
        "start" => Some(Command::StartBackground),
        "stop" => Some(Command::StopBackground),
        "check" => Some(Command::CheckNow),
        _ => None,
    }
}

fn enqueue(state: &SharedState, command: Command) -> ApiResult {
    state
        .send_command(command)
        .map_err(|e| err_json(StatusCode::SERVICE_UNAVAILABLE, &e))?;
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))))
}

/// POST /api/background/{start|stop|check}
pub async fn background_action(
    State(state): State<SharedState>,
    Path(action): Path<String>,
) -> ApiResult {
    let command = action_command(&action)
        .ok_or_else(|| err_json(StatusCode::NOT_FOUND, &format!("unknown action: {action}")))?;
    enqueue(&state, command)
}

/// POST /api/command – same message shape as the WebSocket channel
pub async fn post_command(State(state): State<SharedState>, Json(body): Json<Value>) -> ApiResult {
    let command: Command = serde_json::from_value(body)
        .map_err(|e| err_json(StatusCode::BAD_REQUEST, &format!("invalid command: {e}")))?;
    enqueue(&state, command)
}

/// GET /api/background/status
pub async fn background_status(State(state): State<SharedState>) -> Json<Value> {
    let status = state.controller().status().await;
    Json(json!(status))
}

/// GET /api/notifications – alerts currently in the tray
pub async fn list_notifications(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "notifications": state.tray().snapshot() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_commands() {
        assert_eq!(action_command("start"), Some(Command::StartBackground));
        assert_eq!(action_command("stop"), Some(Command::StopBackground));
        assert_eq!(action_command("check"), Some(Command::CheckNow));
        assert_eq!(action_command("restart"), None);
    }

    #[test]
    fn err_json_shape() {
        let (status, Json(body)) = err_json(StatusCode::NOT_FOUND, "nope");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "status": "error", "error": "nope" }));
    }
}
