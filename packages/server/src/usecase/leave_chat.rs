//! UseCase: チャット退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveChatUseCase::execute() メソッド
//! - 切断した接続のレジストリ削除と配信チャネルの登録解除
//!
//! ### なぜこのテストが必要か
//! - 退出後の接続が以降の配信対象から外れることを保証
//! - 未参加の接続の切断でも安全に後始末できることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続の切断
//! - エッジケース：joinChat を送らずに切断した接続、二重の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Participant};
use crate::infrastructure::SessionRegistry;

/// チャット退出のユースケース
///
/// 退出は他の参加者へ通知しない。配信対象は送信のたびにレジストリから
/// 算出されるため、ここでの削除だけで以降の配信から外れる。
pub struct LeaveChatUseCase {
    /// 接続中の参加者の対応表
    registry: Arc<SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveChatUseCase {
    /// 新しい LeaveChatUseCase を作成
    pub fn new(registry: Arc<SessionRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// チャット退出を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断した接続の ID
    ///
    /// # Returns
    ///
    /// * `Some(Participant)` - 退出した参加者（参加済みだった場合）
    /// * `None` - 未参加の接続だった場合（冪等）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Participant> {
        // 1. レジストリから削除（未参加なら None）
        let departed = self.registry.leave(connection_id).await;

        // 2. 配信チャネルを登録解除（joinChat 前に切断した接続にも必要）
        self.message_pusher
            .unregister_connection(connection_id)
            .await;

        departed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use crate::{
        domain::{ChatId, DisplayName, LanguageTag, Timestamp},
        infrastructure::WebSocketMessagePusher,
    };

    use super::*;

    fn create_usecase() -> (
        LeaveChatUseCase,
        Arc<SessionRegistry>,
        Arc<WebSocketMessagePusher>,
    ) {
        let registry = Arc::new(SessionRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = LeaveChatUseCase::new(registry.clone(), pusher.clone());
        (usecase, registry, pusher)
    }

    async fn join_member(
        registry: &SessionRegistry,
        pusher: &WebSocketMessagePusher,
        connection: &str,
        chat: &str,
    ) -> ConnectionId {
        let connection_id = ConnectionId::new(connection.to_string()).unwrap();
        let participant = Participant::new(
            connection_id.clone(),
            ChatId::new(chat.to_string()).unwrap(),
            LanguageTag::new("en".to_string()).unwrap(),
            DisplayName::new("Alice".to_string()).unwrap(),
            Timestamp::new(1000),
        );
        registry.join(participant).await;
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_connection(connection_id.clone(), tx).await;
        connection_id
    }

    #[tokio::test]
    async fn test_leave_removes_participant_and_channel() {
        // テスト項目: 退出で参加者がレジストリと配信対象の両方から外れる
        // given (前提条件):
        let (usecase, registry, pusher) = create_usecase();
        let alice = join_member(&registry, &pusher, "conn-alice", "general").await;
        let _bob = join_member(&registry, &pusher, "conn-bob", "general").await;

        // when (操作):
        let departed = usecase.execute(&alice).await;

        // then (期待する結果):
        let departed = departed.expect("participant should have been registered");
        assert_eq!(departed.connection_id, alice);
        assert_eq!(departed.chat_id.as_str(), "general");
        assert!(registry.lookup(&alice).await.is_none());

        // ルームの参加者列挙からも外れている
        let members = registry
            .members_of(&ChatId::new("general".to_string()).unwrap())
            .await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].connection_id.as_str(), "conn-bob");

        // 配信チャネルも解除されている
        let result = pusher.push_to(&alice, "payload").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_leave_before_join_is_safe() {
        // テスト項目: joinChat を送らずに切断した接続の後始末が安全に行える
        // given (前提条件):
        let (usecase, _registry, pusher) = create_usecase();
        let stranger = ConnectionId::new("conn-stranger".to_string()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_connection(stranger.clone(), tx).await;

        // when (操作):
        let departed = usecase.execute(&stranger).await;

        // then (期待する結果): 参加者は返らないがチャネルは解除される
        assert!(departed.is_none());
        assert!(pusher.push_to(&stranger, "payload").await.is_err());
    }

    #[tokio::test]
    async fn test_leave_twice_is_idempotent() {
        // テスト項目: 同じ接続の二重退出で 2 回目は None になる
        // given (前提条件):
        let (usecase, registry, pusher) = create_usecase();
        let alice = join_member(&registry, &pusher, "conn-alice", "general").await;

        // when (操作):
        let first = usecase.execute(&alice).await;
        let second = usecase.execute(&alice).await;

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(registry.count().await, 0);
    }
}
