use serde::{Deserialize, Serialize};

/// Maximum length of the free-text comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 500;

/// A user's rating of the assessment tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Star rating between 1 and 5.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
