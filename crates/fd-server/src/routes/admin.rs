//! External tool status.

use axum::extract::State;
use axum::Json;

use crate::context::AppContext;

/// GET /api/tools
#[utoipa::path(
    get,
    path = "/api/tools",
    responses(
        (status = 200, description = "List external tool availability", body = Vec<fd_av::ToolInfo>)
    )
)]
pub async fn tools(State(ctx): State<AppContext>) -> Json<Vec<fd_av::ToolInfo>> {
    let tools = ctx.tools.clone();
    // check_all spawns each tool with `-version`.
    let infos = tokio::task::spawn_blocking(move || tools.check_all())
        .await
        .unwrap_or_default();
    Json(infos)
}
