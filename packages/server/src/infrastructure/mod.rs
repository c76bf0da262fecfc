//! Infrastructure 層
//!
//! ドメイン層が定義するポート（MessageStore, Translator, MessagePusher）の
//! 具体的な実装と、配信・参加者管理のコンポーネントを提供します。

pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod room_manager;
pub mod translator;

pub use message_pusher::WebSocketMessagePusher;
pub use registry::SessionRegistry;
pub use repository::InMemoryMessageStore;
pub use room_manager::RoomManager;
pub use translator::{EchoTranslator, GoogleTranslator};
