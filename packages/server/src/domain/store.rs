//! MessageStore trait 定義
//!
//! ドメイン層が必要とするメッセージ永続化のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatId, DisplayName, MessageText, RoomSummary, StoreError, StoredMessage};

/// Message Store trait
///
/// チャットメッセージの追記専用ストアへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## 依存性の逆転（DIP）
///
/// - ドメイン層が必要とするインターフェースをドメイン層自身が定義
/// - Infrastructure 層がドメイン層のインターフェースに依存
/// - ドメイン層は Infrastructure 層に依存しない
///
/// ## 契約
///
/// - メッセージは必ず原文のまま保存される（翻訳結果は保存しない）
/// - タイムスタンプはストアが追記時に採番し、同一ルーム内で単調非減少
/// - 履歴はタイムスタンプ昇順（同時刻は追記順）で返される
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// メッセージを追記し、採番済みの StoredMessage を返す
    async fn append(
        &self,
        chat_id: ChatId,
        sender: DisplayName,
        original_text: MessageText,
    ) -> Result<StoredMessage, StoreError>;

    /// チャットルームの全履歴をタイムスタンプ昇順で取得
    ///
    /// 存在しないルームは空の履歴として扱う。
    async fn history(&self, chat_id: &ChatId) -> Result<Vec<StoredMessage>, StoreError>;

    /// メッセージを持つ全ルームの要約を最終更新日時の降順で取得
    async fn room_summaries(&self) -> Result<Vec<RoomSummary>, StoreError>;

    /// 単一ルームの要約を取得（メッセージが無ければ None）
    async fn summary(&self, chat_id: &ChatId) -> Result<Option<RoomSummary>, StoreError>;

    /// チャットルームのメッセージ数を取得
    async fn message_count(&self, chat_id: &ChatId) -> Result<usize, StoreError>;
}
