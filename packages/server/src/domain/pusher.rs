//! MessagePusher trait 定義
//!
//! ドメイン層が必要とするメッセージ配信のインターフェースを定義します。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, PushError};

/// 接続ごとの送信チャネル
///
/// WebSocket の書き込みタスクへシリアライズ済みペイロードを渡すチャネル。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Message Pusher trait
///
/// 接続単位でメッセージを配信するインターフェース。
/// UseCase 層はこの trait に依存し、トランスポートの詳細には依存しない。
///
/// ## 設計ノート
///
/// 配信はすべて接続単位（push_to）。ルーム単位の一斉配信は行わない。
/// 受信者ごとに異なる翻訳済みペイロードを送るため、全員に同じ
/// ペイロードを流すブロードキャストはこのドメインには存在しない。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャネルを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャネルを解除（存在しなくてもエラーにしない）
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 特定の接続へシリアライズ済みペイロードを送信
    async fn push_to(&self, connection_id: &ConnectionId, content: &str) -> Result<(), PushError>;
}
