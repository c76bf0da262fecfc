//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクトの検証エラー
///
/// 入力フィールドの検証に失敗した場合に返される。
/// どのフィールドがどの制約に違反したかを保持する。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    /// 空文字列は許可されない
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// 最大長を超過した
    #[error("{0} must be at most {1} characters")]
    TooLong(&'static str, usize),

    /// 言語タグに使用できない文字が含まれている
    #[error("language tag must contain only ASCII letters, digits, and hyphens")]
    InvalidLanguageTag,
}

/// メッセージストアのエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// メッセージの永続化に失敗した
    #[error("failed to append message: {0}")]
    AppendFailed(String),

    /// 履歴の読み出しに失敗した
    #[error("failed to read chat history: {0}")]
    ReadFailed(String),
}

/// 翻訳プロバイダのエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// リクエストの送信自体に失敗した（接続エラー、タイムアウトなど）
    #[error("translation request failed: {0}")]
    RequestFailed(String),

    /// プロバイダが成功以外のステータスコードを返した
    #[error("translation provider returned status {0}")]
    ProviderStatus(u16),

    /// レスポンスボディが期待する形式ではなかった
    #[error("translation provider returned an unexpected response shape")]
    MalformedResponse,

    /// レスポンスに翻訳結果が 1 件も含まれていなかった
    #[error("translation provider returned no translations")]
    EmptyResponse,
}

/// メッセージ配信のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PushError {
    /// 対象の接続が登録されていない
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// 接続は登録されているが送信チャネルが閉じている
    #[error("failed to push to connection '{0}': channel closed")]
    ChannelClosed(String),
}
