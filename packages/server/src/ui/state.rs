//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::infrastructure::RoomManager;
use crate::usecase::{
    GetRoomDetailUseCase, GetRoomSummariesUseCase, JoinChatUseCase, LeaveChatUseCase,
    SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinChatUseCase（チャット参加のユースケース）
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// LeaveChatUseCase（チャット退出のユースケース）
    pub leave_chat_usecase: Arc<LeaveChatUseCase>,
    /// GetRoomSummariesUseCase（ルーム一覧取得のユースケース）
    pub get_room_summaries_usecase: Arc<GetRoomSummariesUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// RoomManager（接続単位の配信）
    pub room_manager: Arc<RoomManager>,
    /// MessagePusher（メッセージ通知の抽象化）
    pub message_pusher: Arc<dyn MessagePusher>,
}
