//! InMemory Message Store 実装
//!
//! ドメイン層が定義する MessageStore trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! メッセージはプロセス内メモリにのみ保持されるため、再起動で失われます。
//! Firestore / PostgreSQL などの永続バックエンドを実装する際も、
//! この trait の契約（原文のみ保存、ストア側でのタイムスタンプ採番、
//! タイムスタンプ昇順の履歴）をそのまま満たす必要があります。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use globetalk_shared::time::Clock;

use crate::domain::{
    ChatId, DisplayName, MessageStore, MessageText, RoomSummary, StoreError, StoredMessage,
    Timestamp,
};

/// インメモリ Message Store 実装
///
/// チャットルームごとのメッセージ列を保持し、ドメイン層の MessageStore trait を
/// 実装します（依存性の逆転）。
///
/// ## タイムスタンプの採番
///
/// タイムスタンプは注入された `Clock` から採番します。システム時計が
/// 巻き戻った場合でも、同一ルーム内の直前のメッセージより小さい値は
/// 採番しません（単調非減少の保証）。
pub struct InMemoryMessageStore {
    /// タイムスタンプ採番に使う時計
    clock: Arc<dyn Clock>,
    /// チャットルームごとのメッセージ列（追記順）
    chats: Mutex<HashMap<ChatId, Vec<StoredMessage>>>,
}

impl InMemoryMessageStore {
    /// 新しい InMemoryMessageStore を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            chats: Mutex::new(HashMap::new()),
        }
    }

    /// メッセージ列から要約を導出
    fn project_summary(chat_id: &ChatId, messages: &[StoredMessage]) -> Option<RoomSummary> {
        messages.last().map(|message| RoomSummary {
            chat_id: chat_id.clone(),
            last_message: message.original_text.clone(),
            updated_at: message.timestamp,
        })
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(
        &self,
        chat_id: ChatId,
        sender: DisplayName,
        original_text: MessageText,
    ) -> Result<StoredMessage, StoreError> {
        let mut chats = self.chats.lock().await;
        let messages = chats.entry(chat_id.clone()).or_default();

        // 時計の巻き戻りがあっても直前のメッセージより過去にはしない
        let now = self.clock.now_utc_millis();
        let floor = messages
            .last()
            .map(|message| message.timestamp.value())
            .unwrap_or(i64::MIN);
        let timestamp = Timestamp::new(now.max(floor));

        let message = StoredMessage::new(sender, original_text, chat_id, timestamp);
        messages.push(message.clone());

        Ok(message)
    }

    async fn history(&self, chat_id: &ChatId) -> Result<Vec<StoredMessage>, StoreError> {
        let chats = self.chats.lock().await;
        Ok(chats.get(chat_id).cloned().unwrap_or_default())
    }

    async fn room_summaries(&self) -> Result<Vec<RoomSummary>, StoreError> {
        let chats = self.chats.lock().await;
        let mut summaries: Vec<RoomSummary> = chats
            .iter()
            .filter_map(|(chat_id, messages)| Self::project_summary(chat_id, messages))
            .collect();

        // 最終更新の新しい順。同時刻はチャット ID 順で安定させる
        summaries.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.chat_id.as_str().cmp(b.chat_id.as_str()))
        });

        Ok(summaries)
    }

    async fn summary(&self, chat_id: &ChatId) -> Result<Option<RoomSummary>, StoreError> {
        let chats = self.chats.lock().await;
        Ok(chats
            .get(chat_id)
            .and_then(|messages| Self::project_summary(chat_id, messages)))
    }

    async fn message_count(&self, chat_id: &ChatId) -> Result<usize, StoreError> {
        let chats = self.chats.lock().await;
        Ok(chats.get(chat_id).map(|messages| messages.len()).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use globetalk_shared::time::FixedClock;

    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - メッセージの追記とタイムスタンプ採番
    // - 履歴の取得順序（追記順の維持）
    // - 要約（RoomSummary）の導出
    // - 時計の巻き戻りに対する単調非減少の保証
    //
    // 【なぜこのテストが必要か】
    // - ストアは履歴再生（joinChat）と配信（sendMessage）の正準データ源
    // - タイムスタンプの順序が崩れると履歴再生の順序保証が壊れる
    //
    // 【どのようなシナリオをテストするか】
    // 1. 追記時に Clock の値が採番される
    // 2. 存在しないルームの履歴は空
    // 3. 同時刻の連続追記でも追記順が保たれる
    // 4. 時計が巻き戻っても直前のタイムスタンプを下回らない
    // 5. 要約が最後のメッセージを反映する
    // 6. 全ルームの要約が最終更新の新しい順に並ぶ
    // ========================================

    /// テスト用に外部から時刻を差し替えられる Clock
    struct SteppingClock {
        current: AtomicI64,
    }

    impl SteppingClock {
        fn new(start: i64) -> Self {
            Self {
                current: AtomicI64::new(start),
            }
        }

        fn set(&self, millis: i64) {
            self.current.store(millis, Ordering::SeqCst);
        }
    }

    impl Clock for SteppingClock {
        fn now_utc_millis(&self) -> i64 {
            self.current.load(Ordering::SeqCst)
        }
    }

    fn chat_id(value: &str) -> ChatId {
        ChatId::new(value.to_string()).unwrap()
    }

    fn sender(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    fn text(value: &str) -> MessageText {
        MessageText::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_append_assigns_clock_timestamp() {
        // テスト項目: 追記時に Clock の現在時刻が採番される
        // given (前提条件):
        let store = InMemoryMessageStore::new(Arc::new(FixedClock::new(1672531200000)));

        // when (操作):
        let message = store
            .append(chat_id("general"), sender("Alice"), text("hello"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.timestamp.value(), 1672531200000);
        assert_eq!(message.original_text.as_str(), "hello");
        assert_eq!(message.chat_id.as_str(), "general");
    }

    #[tokio::test]
    async fn test_history_of_unknown_room_is_empty() {
        // テスト項目: 存在しないルームの履歴は空として扱われる
        // given (前提条件):
        let store = InMemoryMessageStore::new(Arc::new(FixedClock::new(1000)));

        // when (操作):
        let history = store.history(&chat_id("nowhere")).await.unwrap();

        // then (期待する結果):
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_history_preserves_append_order() {
        // テスト項目: 同時刻の連続追記でも履歴は追記順を保つ
        // given (前提条件):
        let store = InMemoryMessageStore::new(Arc::new(FixedClock::new(1000)));
        let room = chat_id("general");

        // when (操作):
        store
            .append(room.clone(), sender("Alice"), text("first"))
            .await
            .unwrap();
        store
            .append(room.clone(), sender("Bob"), text("second"))
            .await
            .unwrap();
        store
            .append(room.clone(), sender("Alice"), text("third"))
            .await
            .unwrap();
        let history = store.history(&room).await.unwrap();

        // then (期待する結果):
        let texts: Vec<&str> = history
            .iter()
            .map(|message| message.original_text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_append_clamps_backward_clock() {
        // テスト項目: 時計が巻き戻ってもタイムスタンプは単調非減少
        // given (前提条件):
        let clock = Arc::new(SteppingClock::new(2000));
        let store = InMemoryMessageStore::new(clock.clone());
        let room = chat_id("general");

        // when (操作):
        let first = store
            .append(room.clone(), sender("Alice"), text("first"))
            .await
            .unwrap();
        clock.set(500); // 時計の巻き戻り
        let second = store
            .append(room.clone(), sender("Alice"), text("second"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(first.timestamp.value(), 2000);
        assert_eq!(second.timestamp.value(), 2000);
    }

    #[tokio::test]
    async fn test_summary_reflects_last_message() {
        // テスト項目: 要約が最後のメッセージの内容とタイムスタンプを反映する
        // given (前提条件):
        let clock = Arc::new(SteppingClock::new(1000));
        let store = InMemoryMessageStore::new(clock.clone());
        let room = chat_id("general");

        // when (操作):
        store
            .append(room.clone(), sender("Alice"), text("older"))
            .await
            .unwrap();
        clock.set(2000);
        store
            .append(room.clone(), sender("Bob"), text("newest"))
            .await
            .unwrap();
        let summary = store.summary(&room).await.unwrap();

        // then (期待する結果):
        let summary = summary.unwrap();
        assert_eq!(summary.last_message.as_str(), "newest");
        assert_eq!(summary.updated_at.value(), 2000);
    }

    #[tokio::test]
    async fn test_summary_of_unknown_room_is_none() {
        // テスト項目: メッセージの無いルームの要約は None
        // given (前提条件):
        let store = InMemoryMessageStore::new(Arc::new(FixedClock::new(1000)));

        // when (操作):
        let summary = store.summary(&chat_id("nowhere")).await.unwrap();

        // then (期待する結果):
        assert!(summary.is_none());
    }

    #[tokio::test]
    async fn test_room_summaries_sorted_by_recency() {
        // テスト項目: 全ルームの要約が最終更新の新しい順に並ぶ
        // given (前提条件):
        let clock = Arc::new(SteppingClock::new(1000));
        let store = InMemoryMessageStore::new(clock.clone());

        // when (操作):
        store
            .append(chat_id("older-room"), sender("Alice"), text("old"))
            .await
            .unwrap();
        clock.set(2000);
        store
            .append(chat_id("newer-room"), sender("Bob"), text("new"))
            .await
            .unwrap();
        let summaries = store.room_summaries().await.unwrap();

        // then (期待する結果):
        let ids: Vec<&str> = summaries
            .iter()
            .map(|summary| summary.chat_id.as_str())
            .collect();
        assert_eq!(ids, vec!["newer-room", "older-room"]);
    }

    #[tokio::test]
    async fn test_message_count_per_room() {
        // テスト項目: ルームごとのメッセージ数が正しく数えられる
        // given (前提条件):
        let store = InMemoryMessageStore::new(Arc::new(FixedClock::new(1000)));
        let room = chat_id("general");

        // when (操作):
        store
            .append(room.clone(), sender("Alice"), text("one"))
            .await
            .unwrap();
        store
            .append(room.clone(), sender("Alice"), text("two"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(store.message_count(&room).await.unwrap(), 2);
        assert_eq!(store.message_count(&chat_id("nowhere")).await.unwrap(), 0);
    }
}
