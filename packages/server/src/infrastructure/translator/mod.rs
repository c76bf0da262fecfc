//! Translator の具体的な実装

pub mod echo;
pub mod google;

pub use echo::EchoTranslator;
pub use google::{DEFAULT_TRANSLATE_ENDPOINT, GoogleTranslator};
