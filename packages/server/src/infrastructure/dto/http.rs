//! HTTP API response DTOs.
//!
//! Timestamps are rendered as RFC 3339 strings (UTC) for readability,
//! unlike the WebSocket wire format which uses epoch milliseconds.

use serde::{Deserialize, Serialize};

/// One room in the `GET /api/rooms` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub chat_id: String,
    pub last_message: String,
    pub updated_at: String,
}

/// Response body of `GET /api/rooms/{chat_id}`
///
/// `last_message` and `updated_at` are null for rooms that have live
/// members but no messages yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub chat_id: String,
    pub last_message: Option<String>,
    pub updated_at: Option<String>,
    pub participants: Vec<String>,
    pub message_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_summary_dto_serializes_camel_case_keys() {
        // テスト項目: ルーム要約 DTO が camelCase のキーで直列化される
        // given (前提条件):
        let dto = RoomSummaryDto {
            chat_id: "general".to_string(),
            last_message: "hello".to_string(),
            updated_at: "2023-01-01T00:00:00+00:00".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(value["chatId"], "general");
        assert_eq!(value["lastMessage"], "hello");
        assert_eq!(value["updatedAt"], "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_room_detail_dto_renders_missing_summary_as_null() {
        // テスト項目: メッセージの無いルームでは lastMessage が null になる
        // given (前提条件):
        let dto = RoomDetailDto {
            chat_id: "general".to_string(),
            last_message: None,
            updated_at: None,
            participants: vec!["Alice".to_string()],
            message_count: 0,
        };

        // when (操作):
        let value = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert!(value["lastMessage"].is_null());
        assert!(value["updatedAt"].is_null());
        assert_eq!(value["participants"][0], "Alice");
        assert_eq!(value["messageCount"], 0);
    }
}
