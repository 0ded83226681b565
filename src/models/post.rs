use serde::{Deserialize, Serialize};

/// One post as shown on the page. Replaced wholesale on every generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub title: String,
    pub content: String,
}

impl GeneratedPost {
    /// `index` is zero-based; titles start at "Post 1".
    pub fn numbered(index: usize, content: &str) -> Self {
        GeneratedPost {
            title: format!("Post {}", index + 1),
            content: content.to_string(),
        }
    }
}
