//! ドメイン層
//!
//! リレーの中心概念（値オブジェクト、エンティティ、ポート）を定義します。
//! この層は他の層に依存しません。

pub mod entity;
pub mod error;
pub mod pusher;
pub mod store;
pub mod translator;
pub mod value_object;

pub use entity::{Participant, RoomSummary, StoredMessage, TranslatedMessage};
pub use error::{PushError, StoreError, TranslationError, ValueObjectError};
pub use pusher::{MessagePusher, PusherChannel};
pub use store::MessageStore;
pub use translator::Translator;
pub use value_object::{
    ChatId, ConnectionId, ConnectionIdFactory, DisplayName, LanguageTag, MessageText, Timestamp,
};
