use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;
use tracing::error;

use crate::state::AppState;

// GET / - landing page, read from disk each time so edits show up without a restart
pub async fn home_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let path = state.templates_dir.join("index.html");

    tokio::fs::read_to_string(&path).await.map(Html).map_err(|e| {
        error!(error = %e, path = %path.display(), "failed to load landing page");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to load landing page: {e}"),
        )
    })
}
