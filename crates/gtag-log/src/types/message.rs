//! Log message payloads

use std::error::Error;

/// The message half of a log entry: plain text or a captured error
///
/// Both variants report the same kind of payload; an error contributes its
/// display text as the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMessage {
    /// Plain text message
    Text(String),
    /// Display text of an error value
    Error(String),
}

impl LogMessage {
    /// Capture an error's display text
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        LogMessage::Error(err.to_string())
    }

    /// The text sent as the entry's description
    pub fn text(&self) -> &str {
        match self {
            LogMessage::Text(text) | LogMessage::Error(text) => text,
        }
    }
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        LogMessage::Text(text.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(text: String) -> Self {
        LogMessage::Text(text)
    }
}

impl std::fmt::Display for LogMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_error_share_description() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let from_err = LogMessage::from_error(&err);
        let from_text = LogMessage::from("disk full");

        assert_eq!(from_err.text(), from_text.text());
        assert!(matches!(from_err, LogMessage::Error(_)));
        assert!(matches!(from_text, LogMessage::Text(_)));
    }
}
