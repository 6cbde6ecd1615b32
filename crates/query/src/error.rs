//! The single public failure surface: every internal parse failure is
//! folded into one `SelectorParseError`, carrying a message, the
//! original query text, and the unread remainder at the point of
//! failure.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("{message} (while parsing `{query}`, remaining: `{remainder}`)")]
pub struct SelectorParseError {
    pub message: String,
    pub query: String,
    pub remainder: String,
}

impl SelectorParseError {
    pub fn new(message: impl Into<String>, query: impl Into<String>, remainder: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            query: query.into(),
            remainder: remainder.into(),
        }
    }
}
