//! WebSocket message DTOs (wire format).
//!
//! All JSON keys and type tags are camelCase. Inbound events are parsed
//! into [`ClientEvent`]; outbound events are serialized from the
//! `*Event` structs below.

use serde::{Deserialize, Serialize};

/// Outbound event type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// 参加直後の履歴一括配信
    ChatHistory,
    /// 新着メッセージの配信
    ReceiveMessage,
    /// 処理失敗の通知
    Error,
}

/// Outbound error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    /// ペイロードの検証に失敗した
    InvalidPayload,
    /// メッセージの永続化に失敗した
    StoreFailed,
}

/// Inbound events sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// チャットルームへの参加要求
    #[serde(rename_all = "camelCase")]
    JoinChat {
        chat_id: String,
        preferred_language: String,
        sender_name: String,
    },
    /// メッセージ送信要求
    #[serde(rename_all = "camelCase")]
    SendMessage {
        text: String,
        chat_id: String,
        sender_name: String,
    },
}

/// A translated message as delivered to one recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedMessageDto {
    pub sender: String,
    pub original_text: String,
    pub translated_text: String,
    pub timestamp: i64,
}

/// Full history replay, sent once to a joining connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryEvent {
    pub r#type: EventType,
    pub messages: Vec<TranslatedMessageDto>,
}

/// A single new message, translated for the receiving connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveMessageEvent {
    pub r#type: EventType,
    pub sender: String,
    pub original_text: String,
    pub translated_text: String,
    pub timestamp: i64,
}

/// Processing failure notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub r#type: EventType,
    pub code: ErrorCode,
    pub message: String,
}
