//! Translator trait 定義
//!
//! ドメイン層が必要とする翻訳サービスのインターフェースを定義します。
//! 具体的な実装（外部 API クライアントなど）は Infrastructure 層が提供します。

use async_trait::async_trait;

use super::{LanguageTag, TranslationError};

/// Translator trait
///
/// テキストを受信者の希望言語へ翻訳するインターフェース。
/// UseCase 層はこの trait に依存し、どの翻訳プロバイダを使うかを知らない。
///
/// ## 契約
///
/// - 翻訳はステートレスで、結果はキャッシュされない
/// - 原文の言語は指定しない（プロバイダの自動判定に任せる）
/// - 失敗はすべて `TranslationError` として返し、呼び出し側が
///   代替文言への差し替えを判断する
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// テキストを対象言語へ翻訳
    async fn translate(
        &self,
        text: &str,
        target_language: &LanguageTag,
    ) -> Result<String, TranslationError>;
}
