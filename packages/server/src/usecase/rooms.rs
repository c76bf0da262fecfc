//! UseCase: ルーム一覧・詳細の参照処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetRoomSummariesUseCase::execute() / GetRoomDetailUseCase::execute()
//! - 運用向け read-only API のための集計（サマリ、参加者、件数）
//!
//! ### なぜこのテストが必要か
//! - サマリがメッセージ履歴からの射影と一致することを確認
//! - 「メッセージも参加者も無いルームは存在しない」という 404 判定を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴のあるルーム、参加者だけのルーム（メッセージ未送信）
//! - 異常系：未知のルーム ID、検証を通らないルーム ID

use std::sync::Arc;

use crate::domain::{ChatId, DisplayName, MessageStore, RoomSummary, StoreError};
use crate::infrastructure::SessionRegistry;

use super::error::GetRoomDetailError;

/// ルーム詳細の読み取りモデル
///
/// summary はメッセージが 1 件も無いルームでは None になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub chat_id: ChatId,
    pub summary: Option<RoomSummary>,
    pub members: Vec<DisplayName>,
    pub message_count: usize,
}

/// ルーム一覧取得のユースケース
pub struct GetRoomSummariesUseCase {
    /// MessageStore（メッセージ永続化の抽象化）
    store: Arc<dyn MessageStore>,
}

impl GetRoomSummariesUseCase {
    /// 新しい GetRoomSummariesUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// メッセージが保存されている全ルームのサマリを取得
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<RoomSummary>)` - 更新の新しい順のサマリ
    /// * `Err(StoreError)` - ストアの読み取り失敗
    pub async fn execute(&self) -> Result<Vec<RoomSummary>, StoreError> {
        self.store.room_summaries().await
    }
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// MessageStore（メッセージ永続化の抽象化）
    store: Arc<dyn MessageStore>,
    /// 接続中の参加者の対応表
    registry: Arc<SessionRegistry>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>, registry: Arc<SessionRegistry>) -> Self {
        Self { store, registry }
    }

    /// ルーム詳細を取得
    ///
    /// メッセージ履歴か接続中の参加者のどちらかがあればルームは存在する
    /// とみなす。どちらも無ければ RoomNotFound を返す。
    ///
    /// # Arguments
    ///
    /// * `chat_id` - ルーム ID（未検証の生文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(RoomDetail)` - ルームの詳細
    /// * `Err(GetRoomDetailError)` - ルームが存在しない、またはストア失敗
    pub async fn execute(&self, chat_id: String) -> Result<RoomDetail, GetRoomDetailError> {
        // 検証を通らない ID のルームはそもそも作られないので 404 と同じ扱い
        let chat_id = ChatId::try_from(chat_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;

        let summary = self.store.summary(&chat_id).await?;
        let message_count = self.store.message_count(&chat_id).await?;

        let mut members: Vec<DisplayName> = self
            .registry
            .members_of(&chat_id)
            .await
            .into_iter()
            .map(|participant| participant.display_name)
            .collect();
        members.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        if summary.is_none() && members.is_empty() {
            return Err(GetRoomDetailError::RoomNotFound);
        }

        Ok(RoomDetail {
            chat_id,
            summary,
            members,
            message_count,
        })
    }
}
