//! 接続中の参加者を保持する SessionRegistry
//!
//! ## 責務
//!
//! - 接続 ID → Participant の対応表を管理
//! - チャットルーム単位での参加者の列挙
//!
//! ## 設計ノート
//!
//! リレー全体で唯一の可変共有状態。グローバル変数ではなく、
//! 依存として各 UseCase に注入されます。
//! 参照（lookup, members_of）が書き込みより圧倒的に多いため、
//! `Mutex` ではなく `RwLock` を使用しています。

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::{ChatId, ConnectionId, Participant};

/// 接続中の参加者の対応表
///
/// 1 接続につき最大 1 つの Participant を保持する。
/// 同じ接続に対する再登録（joinChat の再送）は上書きとなる。
pub struct SessionRegistry {
    /// 接続 ID → Participant
    sessions: RwLock<HashMap<ConnectionId, Participant>>,
}

impl SessionRegistry {
    /// 新しい SessionRegistry を作成
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// 参加者を登録し、同じ接続の既存エントリがあれば返す
    pub async fn join(&self, participant: Participant) -> Option<Participant> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(participant.connection_id.clone(), participant)
    }

    /// 参加者を削除し、存在した場合はそのエントリを返す
    ///
    /// 存在しない接続に対しても安全に呼び出せる（冪等）。
    pub async fn leave(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(connection_id)
    }

    /// 接続に対応する参加者を取得
    pub async fn lookup(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let sessions = self.sessions.read().await;
        sessions.get(connection_id).cloned()
    }

    /// 指定チャットルームの参加者をすべて取得
    ///
    /// 順序は保証しない。配信時の列挙に使う。
    pub async fn members_of(&self, chat_id: &ChatId) -> Vec<Participant> {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .filter(|participant| &participant.chat_id == chat_id)
            .cloned()
            .collect()
    }

    /// 登録中の参加者数を取得
    pub async fn count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
