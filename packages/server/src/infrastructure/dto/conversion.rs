//! Conversion logic between domain entities and DTOs.
//!
//! Conversions are one-way (domain → DTO). Inbound payloads carry raw
//! strings and are validated into value objects by the use cases, so
//! there is no blind DTO → domain path.

use globetalk_shared::time::timestamp_to_rfc3339;

use crate::domain::entity;
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<entity::TranslatedMessage> for dto::TranslatedMessageDto {
    fn from(model: entity::TranslatedMessage) -> Self {
        Self {
            sender: model.sender.into_string(),
            original_text: model.original_text.into_string(),
            translated_text: model.translated_text,
            timestamp: model.timestamp.value(),
        }
    }
}

impl From<entity::TranslatedMessage> for dto::ReceiveMessageEvent {
    fn from(model: entity::TranslatedMessage) -> Self {
        Self {
            r#type: dto::EventType::ReceiveMessage,
            sender: model.sender.into_string(),
            original_text: model.original_text.into_string(),
            translated_text: model.translated_text,
            timestamp: model.timestamp.value(),
        }
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<entity::RoomSummary> for http::RoomSummaryDto {
    fn from(model: entity::RoomSummary) -> Self {
        Self {
            chat_id: model.chat_id.into_string(),
            last_message: model.last_message.into_string(),
            updated_at: timestamp_to_rfc3339(model.updated_at.value()),
        }
    }
}
