//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{StoreError, ValueObjectError};

/// チャット参加処理のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JoinChatError {
    /// ペイロードの検証に失敗した
    #[error("invalid join payload: {0}")]
    InvalidPayload(#[from] ValueObjectError),

    /// 履歴の読み出しに失敗した
    #[error("failed to load chat history: {0}")]
    Store(#[from] StoreError),
}

/// メッセージ送信処理のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    /// 送信元の接続がどのチャットルームにも参加していない
    #[error("sender has not joined any chat")]
    SenderNotJoined,

    /// ペイロードの検証に失敗した
    #[error("invalid send payload: {0}")]
    InvalidPayload(#[from] ValueObjectError),

    /// メッセージの永続化に失敗した
    #[error("failed to persist message: {0}")]
    Store(#[from] StoreError),
}

/// ルーム詳細取得処理のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    /// メッセージも参加者も存在しないルーム
    #[error("chat room not found")]
    RoomNotFound,

    /// ストアへのアクセスに失敗した
    #[error(transparent)]
    Store(#[from] StoreError),
}
