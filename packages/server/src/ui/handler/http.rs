//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::GetRoomDetailError,
};
use globetalk_shared::time::timestamp_to_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get summaries of all rooms with stored messages
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    let summaries = match state.get_room_summaries_usecase.execute().await {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::error!("Failed to read room summaries: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> =
        summaries.into_iter().map(RoomSummaryDto::from).collect();
    Ok(Json(room_summaries))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(chat_id).await {
        Ok(detail) => {
            // Domain Model から DTO への変換
            let room_detail = RoomDetailDto {
                chat_id: detail.chat_id.as_str().to_string(),
                last_message: detail
                    .summary
                    .as_ref()
                    .map(|summary| summary.last_message.as_str().to_string()),
                updated_at: detail
                    .summary
                    .as_ref()
                    .map(|summary| timestamp_to_rfc3339(summary.updated_at.value())),
                participants: detail
                    .members
                    .iter()
                    .map(|name| name.as_str().to_string())
                    .collect(),
                message_count: detail.message_count,
            };
            Ok(Json(room_detail))
        }
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
        Err(GetRoomDetailError::Store(e)) => {
            tracing::error!("Failed to read room detail: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
