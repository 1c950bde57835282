use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::requests::ListUsersQuery;
use crate::domain::services::engagement::ChurnRisk;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let risk = match query.risk.as_deref() {
        Some(s) => Some(
            ChurnRisk::parse(s)
                .ok_or_else(|| AppError::Validation(format!("unknown risk tier: {}", s)))?,
        ),
        None => None,
    };

    let users = state
        .user_detail_service
        .list(query.plan.as_deref(), risk)
        .await?;
    Ok(Json(users))
}

pub async fn get_user_detail(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state.user_detail_service.fetch(&user_id).await?;
    Ok(Json(detail))
}
