//! Multilingual chat relay server.
//!
//! Persists original messages and delivers a per-recipient translated copy
//! of the conversation (history on join, live messages) over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin globetalk-server
//! cargo run --bin globetalk-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin globetalk-server -- --translator google --translate-api-key <KEY>
//! ```

use std::{sync::Arc, time::Duration};

use clap::{Parser, ValueEnum};

use globetalk_server::{
    domain::Translator,
    infrastructure::{
        EchoTranslator, GoogleTranslator, InMemoryMessageStore, RoomManager, SessionRegistry,
        WebSocketMessagePusher, translator::DEFAULT_TRANSLATE_ENDPOINT,
    },
    ui::Server,
    usecase::{
        GetRoomDetailUseCase, GetRoomSummariesUseCase, JoinChatUseCase, LeaveChatUseCase,
        SendMessageUseCase,
    },
};
use globetalk_shared::{logger::setup_logger, time::SystemClock};

/// Translation backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TranslatorKind {
    /// Return originals unchanged (no external API, for local development)
    Echo,
    /// Google Cloud Translation API v2
    Google,
}

#[derive(Parser, Debug)]
#[command(name = "globetalk-server")]
#[command(about = "Multilingual chat relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Translation backend to use
    #[arg(long, value_enum, default_value_t = TranslatorKind::Echo)]
    translator: TranslatorKind,

    /// API key for the Google translation backend
    #[arg(long, env = "GOOGLE_TRANSLATE_API_KEY", hide_env_values = true)]
    translate_api_key: Option<String>,

    /// Endpoint of the translation API
    #[arg(long, default_value = DEFAULT_TRANSLATE_ENDPOINT)]
    translate_endpoint: String,

    /// Timeout for a single translation request, in seconds
    #[arg(long, default_value = "10")]
    translate_timeout_secs: u64,

    /// Allowed CORS origin (repeatable; none configured allows any origin)
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. MessageStore
    // 2. Registry / MessagePusher / RoomManager
    // 3. Translator
    // 4. UseCases
    // 5. Server

    // 1. Create MessageStore (in-memory append log with a system clock)
    let store = Arc::new(InMemoryMessageStore::new(Arc::new(SystemClock)));

    // 2. Create the session registry, delivery channel map, and room manager
    let registry = Arc::new(SessionRegistry::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let room_manager = Arc::new(RoomManager::new(registry.clone(), message_pusher.clone()));

    // 3. Create the translation backend selected on the command line
    let translator = build_translator(&args);

    // 4. Create UseCases
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(
        registry.clone(),
        store.clone(),
        translator.clone(),
        room_manager.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        store.clone(),
        translator.clone(),
        room_manager.clone(),
    ));
    let leave_chat_usecase = Arc::new(LeaveChatUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let get_room_summaries_usecase = Arc::new(GetRoomSummariesUseCase::new(store.clone()));
    let get_room_detail_usecase =
        Arc::new(GetRoomDetailUseCase::new(store.clone(), registry.clone()));

    // 5. Create and run the server
    let server = Server::new(
        join_chat_usecase,
        send_message_usecase,
        leave_chat_usecase,
        get_room_summaries_usecase,
        get_room_detail_usecase,
        room_manager,
        message_pusher,
    );
    if let Err(e) = server.run(args.host, args.port, args.allowed_origins).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Build the translation backend selected on the command line
///
/// Exits the process when the Google backend is selected without an API key.
fn build_translator(args: &Args) -> Arc<dyn Translator> {
    match args.translator {
        TranslatorKind::Echo => {
            tracing::info!("Using echo translator (originals are returned unchanged)");
            Arc::new(EchoTranslator)
        }
        TranslatorKind::Google => {
            let Some(api_key) = args.translate_api_key.clone() else {
                tracing::error!(
                    "--translator google requires an API key (--translate-api-key or GOOGLE_TRANSLATE_API_KEY)"
                );
                std::process::exit(1);
            };
            let translator = GoogleTranslator::new(
                api_key,
                args.translate_endpoint.clone(),
                Duration::from_secs(args.translate_timeout_secs),
            )
            .expect("Failed to build translation HTTP client");
            tracing::info!(
                "Using Google translation backend at {}",
                args.translate_endpoint
            );
            Arc::new(translator)
        }
    }
}
