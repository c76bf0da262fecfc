//! 恒等変換の Translator 実装
//!
//! 外部 API の資格情報なしでリレーを動かすための実装。
//! 原文をそのまま「翻訳結果」として返します。
//! ローカル開発とデモ用途を想定しています。

use async_trait::async_trait;

use crate::domain::{LanguageTag, TranslationError, Translator};

/// 原文をそのまま返す Translator
pub struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    async fn translate(
        &self,
        text: &str,
        _target_language: &LanguageTag,
    ) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }
}
