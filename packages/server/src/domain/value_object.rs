//! 値オブジェクト定義
//!
//! リレーが扱う識別子・テキストの検証済み表現を定義します。
//! 生の `String` はワイヤ層（DTO）だけで扱い、ドメイン層に入る時点で
//! 必ずこれらの型に変換されます。

use uuid::Uuid;

use super::ValueObjectError;

/// チャットルーム ID の最大文字数
const CHAT_ID_MAX_CHARS: usize = 128;
/// 言語タグの最大文字数（BCP 47 のタグ長を十分に収める値）
const LANGUAGE_TAG_MAX_CHARS: usize = 35;
/// 表示名の最大文字数
const DISPLAY_NAME_MAX_CHARS: usize = 64;
/// メッセージ本文の最大文字数
const MESSAGE_TEXT_MAX_CHARS: usize = 4096;

/// WebSocket 接続の識別子
///
/// サーバが接続ごとに採番する。クライアントは自分の ID を申告しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい ConnectionId を作成（空文字列は拒否）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("connection id"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ConnectionId の採番ファクトリ
///
/// UUID v4 を使用するため、生成された ID は検証なしで構築できる。
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// 新しい ConnectionId を採番
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// チャットルームの識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatId(String);

impl ChatId {
    /// 新しい ChatId を作成（空文字列・最大長超過は拒否）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("chat id"));
        }
        if value.chars().count() > CHAT_ID_MAX_CHARS {
            return Err(ValueObjectError::TooLong("chat id", CHAT_ID_MAX_CHARS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ChatId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 参加者の希望言語を表す言語タグ
///
/// BCP 47 風のタグ（`en`, `ja`, `zh-CN` など）を想定する。
/// タグの意味の妥当性（実在する言語かどうか）は検証せず、
/// 構文チェックのみを行う。翻訳プロバイダがそのまま受け取る。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// 新しい LanguageTag を作成
    ///
    /// 空文字列・最大長超過・ASCII 英数字とハイフン以外の文字を拒否する。
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("language tag"));
        }
        if value.chars().count() > LANGUAGE_TAG_MAX_CHARS {
            return Err(ValueObjectError::TooLong(
                "language tag",
                LANGUAGE_TAG_MAX_CHARS,
            ));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ValueObjectError::InvalidLanguageTag);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 参加者の表示名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// 新しい DisplayName を作成（空文字列・最大長超過は拒否）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("display name"));
        }
        if value.chars().count() > DISPLAY_NAME_MAX_CHARS {
            return Err(ValueObjectError::TooLong(
                "display name",
                DISPLAY_NAME_MAX_CHARS,
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// メッセージ本文
///
/// 空文字列は拒否するが、空白のみの本文は許容する（トリムしない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// 新しい MessageText を作成（空文字列・最大長超過は拒否）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("message text"));
        }
        if value.chars().count() > MESSAGE_TEXT_MAX_CHARS {
            return Err(ValueObjectError::TooLong(
                "message text",
                MESSAGE_TEXT_MAX_CHARS,
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（UTC、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_rejects_empty_string() {
        // テスト項目: 空文字列から ConnectionId を作成できない
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("connection id")));
    }

    #[test]
    fn test_connection_id_factory_generates_unique_ids() {
        // テスト項目: ファクトリが一意な ConnectionId を採番する
        // given (前提条件):

        // when (操作):
        let id1 = ConnectionIdFactory::generate();
        let id2 = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert!(!id1.as_str().is_empty());
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_chat_id_accepts_valid_value() {
        // テスト項目: 有効な文字列から ChatId を作成できる
        // given (前提条件):
        let value = "room-tokyo".to_string();

        // when (操作):
        let chat_id = ChatId::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(chat_id.as_str(), "room-tokyo");
    }

    #[test]
    fn test_chat_id_rejects_too_long_value() {
        // テスト項目: 最大長を超える ChatId は拒否される
        // given (前提条件):
        let value = "a".repeat(129);

        // when (操作):
        let result = ChatId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::TooLong("chat id", 128)));
    }

    #[test]
    fn test_chat_id_accepts_max_length_value() {
        // テスト項目: ちょうど最大長の ChatId は許容される
        // given (前提条件):
        let value = "a".repeat(128);

        // when (操作):
        let result = ChatId::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_language_tag_accepts_bcp47_style_tags() {
        // テスト項目: BCP 47 風の言語タグを作成できる
        // given (前提条件):
        let tags = ["en", "ja", "zh-CN", "pt-BR"];

        for tag in tags {
            // when (操作):
            let result = LanguageTag::new(tag.to_string());

            // then (期待する結果):
            assert!(result.is_ok(), "tag '{}' should be accepted", tag);
        }
    }

    #[test]
    fn test_language_tag_rejects_invalid_characters() {
        // テスト項目: 英数字とハイフン以外を含む言語タグは拒否される
        // given (前提条件):
        let values = ["en_US", "日本語", "en US", "fr!"];

        for value in values {
            // when (操作):
            let result = LanguageTag::new(value.to_string());

            // then (期待する結果):
            assert_eq!(result, Err(ValueObjectError::InvalidLanguageTag));
        }
    }

    #[test]
    fn test_language_tag_rejects_empty_string() {
        // テスト項目: 空の言語タグは拒否される
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = LanguageTag::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("language tag")));
    }

    #[test]
    fn test_display_name_accepts_multibyte_characters() {
        // テスト項目: マルチバイト文字を含む表示名を作成できる
        // given (前提条件):
        let value = "ありす".to_string();

        // when (操作):
        let name = DisplayName::new(value).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "ありす");
    }

    #[test]
    fn test_display_name_rejects_too_long_value() {
        // テスト項目: 最大長を超える表示名は拒否される
        // given (前提条件):
        let value = "x".repeat(65);

        // when (操作):
        let result = DisplayName::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::TooLong("display name", 64)));
    }

    #[test]
    fn test_message_text_rejects_empty_string() {
        // テスト項目: 空のメッセージ本文は拒否される
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = MessageText::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("message text")));
    }

    #[test]
    fn test_message_text_accepts_whitespace_only_value() {
        // テスト項目: 空白のみの本文はトリムされずに許容される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = MessageText::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_message_text_counts_characters_not_bytes() {
        // テスト項目: 本文の長さ制限はバイト数ではなく文字数で判定される
        // given (前提条件):
        // 「あ」は UTF-8 で 3 バイトだが 1 文字として数える
        let value = "あ".repeat(4096);

        // when (操作):
        let result = MessageText::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_try_from_delegates_to_validation() {
        // テスト項目: TryFrom<String> が new と同じ検証を行う
        // given (前提条件):
        let valid = "general".to_string();
        let invalid = String::new();

        // when (操作):
        let ok = ChatId::try_from(valid);
        let err = ChatId::try_from(invalid);

        // then (期待する結果):
        assert!(ok.is_ok());
        assert!(err.is_err());
    }

    #[test]
    fn test_timestamp_preserves_value() {
        // テスト項目: Timestamp が渡された値をそのまま保持する
        // given (前提条件):
        let millis = 1672531200000;

        // when (操作):
        let timestamp = Timestamp::new(millis);

        // then (期待する結果):
        assert_eq!(timestamp.value(), millis);
    }
}
