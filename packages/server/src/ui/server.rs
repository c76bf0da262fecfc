//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::domain::MessagePusher;
use crate::infrastructure::RoomManager;
use crate::usecase::{
    GetRoomDetailUseCase, GetRoomSummariesUseCase, JoinChatUseCase, LeaveChatUseCase,
    SendMessageUseCase,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Multilingual chat relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_chat_usecase,
///     send_message_usecase,
///     leave_chat_usecase,
///     get_room_summaries_usecase,
///     get_room_detail_usecase,
///     room_manager,
///     message_pusher,
/// );
/// server.run("127.0.0.1".to_string(), 8080, vec![]).await?;
/// ```
pub struct Server {
    /// JoinChatUseCase（チャット参加のユースケース）
    join_chat_usecase: Arc<JoinChatUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// LeaveChatUseCase（チャット退出のユースケース）
    leave_chat_usecase: Arc<LeaveChatUseCase>,
    /// GetRoomSummariesUseCase（ルーム一覧取得のユースケース）
    get_room_summaries_usecase: Arc<GetRoomSummariesUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// RoomManager（接続単位の配信）
    room_manager: Arc<RoomManager>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `join_chat_usecase` - UseCase for joining a chat
    /// * `send_message_usecase` - UseCase for message sending
    /// * `leave_chat_usecase` - UseCase for leaving a chat
    /// * `get_room_summaries_usecase` - UseCase for getting room summaries
    /// * `get_room_detail_usecase` - UseCase for getting room detail
    /// * `room_manager` - Per-connection event delivery
    /// * `message_pusher` - Connection channel registration
    pub fn new(
        join_chat_usecase: Arc<JoinChatUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        leave_chat_usecase: Arc<LeaveChatUseCase>,
        get_room_summaries_usecase: Arc<GetRoomSummariesUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        room_manager: Arc<RoomManager>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            join_chat_usecase,
            send_message_usecase,
            leave_chat_usecase,
            get_room_summaries_usecase,
            get_room_detail_usecase,
            room_manager,
            message_pusher,
        }
    }

    /// Build the axum router for this server
    ///
    /// Exposed separately from [`Server::run`] so tests can drive the router
    /// on an ephemeral listener.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            join_chat_usecase: self.join_chat_usecase,
            send_message_usecase: self.send_message_usecase,
            leave_chat_usecase: self.leave_chat_usecase,
            get_room_summaries_usecase: self.get_room_summaries_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
            room_manager: self.room_manager,
            message_pusher: self.message_pusher,
        });

        // Define handlers
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{chat_id}", get(get_room_detail))
            .with_state(app_state)
    }

    /// Run the chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    /// * `allowed_origins` - CORS origins; an empty list allows any origin
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address,
    /// if an allowed origin is not a valid header value, or if there's an
    /// error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
        allowed_origins: Vec<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let cors = build_cors_layer(&allowed_origins)?;
        let app = self
            .into_router()
            .layer(TraceLayer::new_for_http())
            .layer(cors);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Chat relay server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Build the CORS layer from the configured origins
///
/// An empty origin list means the development default: any origin.
fn build_cors_layer(
    allowed_origins: &[String],
) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    if allowed_origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}
