//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージの永続化と、受信者ごとの翻訳付きファンアウト配信
//!
//! ### なぜこのテストが必要か
//! - 「永続化が配信に先行する」順序はこのリレーの耐久性保証の根幹
//! - 受信者ごとに異なる翻訳結果が届くこと、ある受信者の失敗が
//!   他の受信者へ波及しないこと（隔離）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数参加者への配信（送信者自身を含む）
//! - 異常系：未参加の接続からの送信、検証失敗、永続化失敗
//! - エッジケース：配信中に消えた接続、一部の言語だけ翻訳に失敗

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{
    ChatId, ConnectionId, DisplayName, LanguageTag, MessageStore, MessageText, Participant,
    StoredMessage, TranslatedMessage, Translator, ValueObjectError,
};
use crate::infrastructure::{RoomManager, SessionRegistry, dto::websocket::ErrorCode};

use super::TRANSLATION_FALLBACK;
use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// 接続中の参加者の対応表
    registry: Arc<SessionRegistry>,
    /// MessageStore（メッセージ永続化の抽象化）
    store: Arc<dyn MessageStore>,
    /// Translator（翻訳サービスの抽象化）
    translator: Arc<dyn Translator>,
    /// RoomManager（接続単位の配信）
    room_manager: Arc<RoomManager>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続 ID
    /// * `chat_id` - 宛先チャットルーム（未検証の生文字列）
    /// * `text` - メッセージ本文（未検証の生文字列）
    /// * `sender_name` - 送信者の表示名（未検証の生文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信に成功した受信者数
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        chat_id: String,
        text: String,
        sender_name: String,
    ) -> Result<usize, SendMessageError> {
        // 1. 送信元が参加済みか確認（未参加の送信はイベントを返さず無視）
        if self.registry.lookup(&connection_id).await.is_none() {
            tracing::warn!(
                "Ignoring sendMessage from connection '{}' that has not joined",
                connection_id.as_str()
            );
            return Err(SendMessageError::SenderNotJoined);
        }

        // 2. ペイロードの検証（失敗時は error イベントを配信して中断）
        let (chat_id, text, sender) = match Self::parse_payload(chat_id, text, sender_name) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.room_manager
                    .deliver_error(&connection_id, ErrorCode::InvalidPayload, &e.to_string())
                    .await;
                return Err(SendMessageError::InvalidPayload(e));
            }
        };

        // 3. メッセージを永続化（配信より先。タイムスタンプはストアが採番）
        let stored = match self.store.append(chat_id.clone(), sender, text).await {
            Ok(stored) => stored,
            Err(e) => {
                self.room_manager
                    .deliver_error(&connection_id, ErrorCode::StoreFailed, &e.to_string())
                    .await;
                return Err(SendMessageError::Store(e));
            }
        };

        // 4. 宛先ルームの参加者を列挙（送信者自身も含まれる）
        let members = self.room_manager.members_of(&chat_id).await;

        // 5. 受信者ごとに翻訳して配信。翻訳・配信の失敗は互いに隔離される
        let deliveries = members
            .iter()
            .map(|member| self.translate_and_deliver(member, &stored));
        let delivered = join_all(deliveries)
            .await
            .into_iter()
            .filter(|delivered| *delivered)
            .count();

        tracing::debug!(
            "Message in chat '{}' delivered to {}/{} members",
            chat_id.as_str(),
            delivered,
            members.len()
        );

        Ok(delivered)
    }

    /// 生文字列のペイロードを値オブジェクトへ変換
    fn parse_payload(
        chat_id: String,
        text: String,
        sender_name: String,
    ) -> Result<(ChatId, MessageText, DisplayName), ValueObjectError> {
        Ok((
            ChatId::try_from(chat_id)?,
            MessageText::try_from(text)?,
            DisplayName::try_from(sender_name)?,
        ))
    }

    /// 1 参加者向けに翻訳して配信
    async fn translate_and_deliver(&self, member: &Participant, message: &StoredMessage) -> bool {
        let translated = self
            .translate_or_fallback(message, &member.preferred_language)
            .await;
        self.room_manager
            .deliver_message(&member.connection_id, translated)
            .await
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
