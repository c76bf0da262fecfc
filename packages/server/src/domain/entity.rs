//! エンティティ定義
//!
//! リレーが扱う中心的なデータ構造を定義します。
//! `StoredMessage` は常に原文のまま永続化され、翻訳結果
//! （`TranslatedMessage`）は配信のたびに受信者ごとに導出されます。

use super::{ChatId, ConnectionId, DisplayName, LanguageTag, MessageText, Timestamp};

/// チャットルームに参加中の接続
///
/// 1 接続につき最大 1 つ存在する。同じ接続が再度 joinChat を送った場合、
/// 既存の Participant は新しい内容で上書きされる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// 接続の識別子
    pub connection_id: ConnectionId,
    /// 参加中のチャットルーム
    pub chat_id: ChatId,
    /// この参加者への配信に使う希望言語
    pub preferred_language: LanguageTag,
    /// 表示名
    pub display_name: DisplayName,
    /// 参加日時
    pub joined_at: Timestamp,
}

impl Participant {
    /// 新しい Participant を作成
    pub fn new(
        connection_id: ConnectionId,
        chat_id: ChatId,
        preferred_language: LanguageTag,
        display_name: DisplayName,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            connection_id,
            chat_id,
            preferred_language,
            display_name,
            joined_at,
        }
    }
}

/// 永続化されたチャットメッセージ
///
/// 本文は送信者が書いた原文そのもの。翻訳結果は永続化しない。
/// タイムスタンプはストアが追記時に採番した正準値。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    /// 送信者の表示名
    pub sender: DisplayName,
    /// 原文の本文
    pub original_text: MessageText,
    /// 所属するチャットルーム
    pub chat_id: ChatId,
    /// ストアが採番したタイムスタンプ
    pub timestamp: Timestamp,
}

impl StoredMessage {
    /// 新しい StoredMessage を作成
    pub fn new(
        sender: DisplayName,
        original_text: MessageText,
        chat_id: ChatId,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            sender,
            original_text,
            chat_id,
            timestamp,
        }
    }
}

/// チャットルームの要約
///
/// メッセージ履歴から導出される射影であり、ルーム一覧表示のための
/// 便宜的な情報。正準データはあくまでメッセージ履歴そのもの。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    /// チャットルームの識別子
    pub chat_id: ChatId,
    /// 最後に送信されたメッセージの原文
    pub last_message: MessageText,
    /// 最終更新日時（最後のメッセージのタイムスタンプ）
    pub updated_at: Timestamp,
}

/// 受信者向けに翻訳済みのメッセージ
///
/// 配信の直前に受信者の希望言語へ翻訳して作られる一時的な値。
/// 翻訳に失敗した場合、`translated_text` には代替文言が入る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedMessage {
    /// 送信者の表示名
    pub sender: DisplayName,
    /// 原文の本文
    pub original_text: MessageText,
    /// 受信者の希望言語へ翻訳された本文（または代替文言）
    pub translated_text: String,
    /// 原文メッセージのタイムスタンプ
    pub timestamp: Timestamp,
}

impl TranslatedMessage {
    /// 永続化済みメッセージと翻訳結果から TranslatedMessage を作成
    pub fn new(message: &StoredMessage, translated_text: String) -> Self {
        Self {
            sender: message.sender.clone(),
            original_text: message.original_text.clone(),
            translated_text,
            timestamp: message.timestamp,
        }
    }
}
