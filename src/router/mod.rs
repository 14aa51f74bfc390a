use axum::{
    http::StatusCode,
    routing::{get, post},
    Form, Router,
};
use tracing::{info, warn};

use crate::slack::SlackInteraction;

pub fn get_router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/slack/interactions", post(interaction))
}

async fn root() -> &'static str {
    "Hello, Slack interactions!"
}

/// Slack only needs a 200 within three seconds; the body is ignored.
async fn interaction(
    Form(payload): Form<SlackInteraction>,
) -> Result<StatusCode, (StatusCode, String)> {
    match payload.decode() {
        Ok(callback) => {
            info!(
                kind = %callback.kind(),
                callback_id = %callback.callback_id,
                team = %callback.team.id,
                user = %callback.user.id,
                actions = callback.action_callback.len(),
                "interaction received"
            );
            Ok(StatusCode::OK)
        }
        Err(err) => {
            warn!(path = %err.path(), error = %err, "rejected interaction payload");
            Err((StatusCode::BAD_REQUEST, err.to_string()))
        }
    }
}
