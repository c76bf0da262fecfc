//! UseCase 層
//!
//! ドメインのルールを組み合わせて 1 つの操作（参加、送信、退出、参照）を
//! 実現する。トランスポート（WebSocket / HTTP）には依存しない。

pub mod error;
pub mod join_chat;
pub mod leave_chat;
pub mod rooms;
pub mod send_message;

pub use error::{GetRoomDetailError, JoinChatError, SendMessageError};
pub use join_chat::JoinChatUseCase;
pub use leave_chat::LeaveChatUseCase;
pub use rooms::{GetRoomDetailUseCase, GetRoomSummariesUseCase, RoomDetail};
pub use send_message::SendMessageUseCase;

/// 翻訳に失敗した場合に translatedText へ入れる代替文言
///
/// 原文はそのまま届くため、受信側は代替文言と合わせて意味を補える。
pub const TRANSLATION_FALLBACK: &str = "[translation failed]";
