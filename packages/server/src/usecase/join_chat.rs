//! UseCase: チャット参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - 参加者の登録と履歴再生（全履歴の翻訳・一括配信）
//!
//! ### なぜこのテストが必要か
//! - 参加直後のクライアントは履歴イベントだけで画面を再構築するため、
//!   履歴の順序・件数・翻訳の正しさはプロトコルの根幹
//! - 検証失敗・ストア障害で中途半端な参加状態が残らないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴なし／履歴ありの参加、再参加による言語の切り替え
//! - 異常系：ペイロード検証失敗、履歴読み出しの失敗
//! - エッジケース：一部のメッセージだけ翻訳に失敗した場合の代替文言

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{
    ChatId, ConnectionId, DisplayName, LanguageTag, MessageStore, Participant, StoredMessage,
    Timestamp, TranslatedMessage, Translator, ValueObjectError,
};
use crate::infrastructure::{RoomManager, SessionRegistry, dto::websocket::ErrorCode};

use super::TRANSLATION_FALLBACK;
use super::error::JoinChatError;

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    /// 接続中の参加者の対応表
    registry: Arc<SessionRegistry>,
    /// MessageStore（メッセージ永続化の抽象化）
    store: Arc<dyn MessageStore>,
    /// Translator（翻訳サービスの抽象化）
    translator: Arc<dyn Translator>,
    /// RoomManager（接続単位の配信）
    room_manager: Arc<RoomManager>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
    pub fn new(
        registry: Arc<SessionRegistry>,
        store: Arc<dyn MessageStore>,
        translator: Arc<dyn Translator>,
        room_manager: Arc<RoomManager>,
    ) -> Self {
        Self {
            registry,
            store,
            translator,
            room_manager,
        }
    }

    /// チャット参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID（サーバ採番）
    /// * `chat_id` - 参加先チャットルーム（未検証の生文字列）
    /// * `preferred_language` - 希望言語タグ（未検証の生文字列）
    /// * `sender_name` - 表示名（未検証の生文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信した履歴のメッセージ数
    /// * `Err(JoinChatError)` - 参加失敗（エラーイベントは配信済み）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        chat_id: String,
        preferred_language: String,
        sender_name: String,
    ) -> Result<usize, JoinChatError> {
        use globetalk_shared::time::get_utc_timestamp;

        // 1. ペイロードの検証（失敗時は error イベントを配信して中断）
        let (chat_id, language, display_name) =
            match Self::parse_payload(chat_id, preferred_language, sender_name) {
                Ok(parsed) => parsed,
                Err(e) => {
                    self.room_manager
                        .deliver_error(&connection_id, ErrorCode::InvalidPayload, &e.to_string())
                        .await;
                    return Err(JoinChatError::InvalidPayload(e));
                }
            };

        // 2. 参加者を登録（同じ接続の再参加は上書き）
        let participant = Participant::new(
            connection_id.clone(),
            chat_id.clone(),
            language.clone(),
            display_name,
            Timestamp::new(get_utc_timestamp()),
        );
        let replaced = self.registry.join(participant).await;
        if replaced.is_some() {
            tracing::debug!(
                "Connection '{}' re-joined, previous participation replaced",
                connection_id.as_str()
            );
        }

        // 3. 履歴を読み出す（失敗時は登録を取り消して error イベントを配信）
        let history = match self.store.history(&chat_id).await {
            Ok(history) => history,
            Err(e) => {
                // 中途半端な参加状態を残さない
                self.registry.leave(&connection_id).await;
                self.room_manager
                    .deliver_error(&connection_id, ErrorCode::StoreFailed, &e.to_string())
                    .await;
                return Err(JoinChatError::Store(e));
            }
        };

        // 4. 全履歴を希望言語へ翻訳（並行実行、順序は履歴のまま維持される）
        let translations = join_all(
            history
                .iter()
                .map(|message| self.translate_or_fallback(message, &language)),
        )
        .await;

        // 5. 履歴を 1 つの chatHistory イベントとして配信（空でも必ず送る）
        let count = translations.len();
        self.room_manager
            .deliver_history(&connection_id, translations)
            .await;

        Ok(count)
    }

    /// 生文字列のペイロードを値オブジェクトへ変換
    fn parse_payload(
        chat_id: String,
        preferred_language: String,
        sender_name: String,
    ) -> Result<(ChatId, LanguageTag, DisplayName), ValueObjectError> {
        Ok((
            ChatId::try_from(chat_id)?,
            LanguageTag::try_from(preferred_language)?,
            DisplayName::try_from(sender_name)?,
        ))
    }

    /// 1 メッセージを翻訳し、失敗した場合は代替文言に差し替える
    async fn translate_or_fallback(
        &self,
        message: &StoredMessage,
        target_language: &LanguageTag,
    ) -> TranslatedMessage {
        match self
            .translator
            .translate(message.original_text.as_str(), target_language)
            .await
        {
            Ok(translated_text) => TranslatedMessage::new(message, translated_text),
            Err(e) => {
                tracing::warn!(
                    "Translation to '{}' failed, substituting fallback text: {}",
                    target_language.as_str(),
                    e
                );
                TranslatedMessage::new(message, TRANSLATION_FALLBACK.to_string())
            }
        }
    }
}
