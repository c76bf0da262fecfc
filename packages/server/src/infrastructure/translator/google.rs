//! Google Cloud Translation API を使った Translator 実装
//!
//! ## 責務
//!
//! - Translation API v2 REST エンドポイントへの翻訳リクエスト
//! - レスポンスの検証と翻訳結果の取り出し
//!
//! ## 設計ノート
//!
//! API キーはクエリパラメータで渡します（v2 REST の仕様）。
//! タイムアウトはクライアント構築時に設定し、超過は
//! `TranslationError::RequestFailed` として返します。
//! 失敗時の代替文言への差し替えはこの層では行いません（UseCase 層の責務）。

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{LanguageTag, TranslationError, Translator};

/// Translation API v2 のデフォルトエンドポイント
pub const DEFAULT_TRANSLATE_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2";

/// 翻訳リクエストのボディ
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'a str,
}

/// 翻訳レスポンスのボディ
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<TranslationItem>,
}

#[derive(Debug, Deserialize)]
struct TranslationItem {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Google Cloud Translation API クライアント
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslator {
    /// 新しい GoogleTranslator を作成
    ///
    /// # 引数
    ///
    /// - `api_key`: Translation API の API キー
    /// - `endpoint`: エンドポイント URL（テストではスタブに差し替える）
    /// - `timeout`: リクエスト全体のタイムアウト
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &LanguageTag,
    ) -> Result<String, TranslationError> {
        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let request = TranslateRequest {
            q: text,
            target: target_language.as_str(),
            format: "text",
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                "Translation provider returned status {} for target '{}'",
                status.as_u16(),
                target_language.as_str()
            );
            return Err(TranslationError::ProviderStatus(status.as_u16()));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|_| TranslationError::MalformedResponse)?;

        body.data
            .translations
            .into_iter()
            .next()
            .map(|item| item.translated_text)
            .ok_or(TranslationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // HTTP 経由の挙動（成功、HTTP エラー、タイムアウト時の代替文言）は
    // tests/relay_test.rs でスタブエンドポイントに対して検証する。
    // ここではリクエスト・レスポンスの直列化形式のみを検証する。

    #[test]
    fn test_request_body_matches_v2_wire_format() {
        // テスト項目: リクエストボディが v2 REST の形式で直列化される
        // given (前提条件):
        let request = TranslateRequest {
            q: "hello",
            target: "fr",
            format: "text",
        };

        // when (操作):
        let value = serde_json::to_value(&request).unwrap();

        // then (期待する結果):
        assert_eq!(value["q"], "hello");
        assert_eq!(value["target"], "fr");
        assert_eq!(value["format"], "text");
    }

    #[test]
    fn test_response_body_parses_translated_text() {
        // テスト項目: v2 REST のレスポンスから翻訳結果を取り出せる
        // given (前提条件):
        let json = r#"{"data":{"translations":[{"translatedText":"bonjour"}]}}"#;

        // when (操作):
        let response: TranslateResponse = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(response.data.translations[0].translated_text, "bonjour");
    }

    #[test]
    fn test_response_without_translations_is_empty() {
        // テスト項目: 翻訳結果が空のレスポンスを検出できる
        // given (前提条件):
        let json = r#"{"data":{"translations":[]}}"#;

        // when (操作):
        let response: TranslateResponse = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert!(response.data.translations.is_empty());
    }
}
