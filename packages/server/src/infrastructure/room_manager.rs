//! チャットルーム単位の配信を担う RoomManager
//!
//! ## 責務
//!
//! - SessionRegistry からの参加者の列挙
//! - 接続単位での送出イベントの直列化と配信
//!
//! ## 設計ノート
//!
//! 配信失敗（切断直後の接続など）はこの層で警告ログに落として握りつぶし、
//! 呼び出し元へはエラーを伝播しません。ある受信者への配信失敗が
//! 他の受信者への配信に影響してはならないためです。
//! 戻り値の bool は配信が成功したかどうかのみを表します。

use std::sync::Arc;

use crate::domain::{
    ChatId, ConnectionId, MessagePusher, Participant, TranslatedMessage,
};
use crate::infrastructure::dto::websocket::{
    ChatHistoryEvent, ErrorCode, ErrorEvent, EventType, ReceiveMessageEvent, TranslatedMessageDto,
};

/// ルーム単位の列挙と接続単位の配信をまとめたコンポーネント
pub struct RoomManager {
    /// 参加者の対応表
    registry: Arc<super::SessionRegistry>,
    /// 接続単位の送信を行う pusher
    message_pusher: Arc<dyn MessagePusher>,
}

impl RoomManager {
    /// 新しい RoomManager を作成
    pub fn new(
        registry: Arc<super::SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 指定チャットルームの参加者をすべて取得
    pub async fn members_of(&self, chat_id: &ChatId) -> Vec<Participant> {
        self.registry.members_of(chat_id).await
    }

    /// 履歴一括イベント（chatHistory）を 1 接続へ配信
    ///
    /// 履歴が空でも必ず空配列のイベントを送る。
    pub async fn deliver_history(
        &self,
        connection_id: &ConnectionId,
        messages: Vec<TranslatedMessage>,
    ) -> bool {
        let event = ChatHistoryEvent {
            r#type: EventType::ChatHistory,
            messages: messages.into_iter().map(TranslatedMessageDto::from).collect(),
        };
        let payload = serde_json::to_string(&event).unwrap();
        self.deliver(connection_id, &payload).await
    }

    /// 新着メッセージイベント（receiveMessage）を 1 接続へ配信
    pub async fn deliver_message(
        &self,
        connection_id: &ConnectionId,
        message: TranslatedMessage,
    ) -> bool {
        let event = ReceiveMessageEvent::from(message);
        let payload = serde_json::to_string(&event).unwrap();
        self.deliver(connection_id, &payload).await
    }

    /// エラーイベント（error）を 1 接続へ配信
    pub async fn deliver_error(
        &self,
        connection_id: &ConnectionId,
        code: ErrorCode,
        message: &str,
    ) -> bool {
        let event = ErrorEvent {
            r#type: EventType::Error,
            code,
            message: message.to_string(),
        };
        let payload = serde_json::to_string(&event).unwrap();
        self.deliver(connection_id, &payload).await
    }

    /// 配信の共通処理。失敗は警告ログに落として握りつぶす
    async fn deliver(&self, connection_id: &ConnectionId, payload: &str) -> bool {
        match self.message_pusher.push_to(connection_id, payload).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to deliver to connection '{}', skipping: {}",
                    connection_id.as_str(),
                    e
                );
                false
            }
        }
    }
}
