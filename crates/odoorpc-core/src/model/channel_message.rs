use serde::{Deserialize, Serialize};

/// Projected message as returned by the channel fetch queries
///
/// Initial and incremental fetches project `id`, `body`, `author_display` and
/// `attachment_ids`; selective fetches only project `id` and
/// `attachment_ids`, so body and author are optional enrichments here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub id: i64,
    pub body: Option<String>,
    pub author_display: Option<String>,
    pub attachment_ids: Vec<i64>,
}

impl ChannelMessage {
    /// Minimal projection carrying only id and attachments
    pub fn bare(id: i64, attachment_ids: Vec<i64>) -> Self {
        Self {
            id,
            body: None,
            author_display: None,
            attachment_ids,
        }
    }
}
