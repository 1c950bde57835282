use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::BulkUserActionRequest;
use crate::api::dtos::responses::BulkActionResponse;
use crate::error::AppError;
use crate::state::AppState;

pub async fn bulk_user_action(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkUserActionRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        "Bulk action '{}' requested for {} users",
        payload.action,
        payload.user_ids.len()
    );

    let report = state
        .lifecycle_service
        .apply_bulk(&payload.user_ids, &payload.action, payload.value)
        .await?;

    Ok(Json(BulkActionResponse::from(report)))
}
