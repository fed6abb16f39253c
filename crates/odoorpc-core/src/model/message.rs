use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::IdNamePair;

/// Server timestamp format used by the backend for `date` fields (UTC, no offset)
pub const SERVER_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reference to the business record a message is posted on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    /// Technical model name, e.g. `mail.channel`
    pub model: String,
    pub res_id: i64,
}

/// A fully hydrated message record
///
/// Every optional relation or optional text field is an `Option`; the wire
/// sentinel `false` is resolved to `None` by the decoder and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,

    /// Author as rendered by the backend (name and email)
    pub author_display: String,

    /// Resolved author partner, `None` for system or anonymous messages
    pub author: Option<IdNamePair>,

    /// Raw server timestamp, see [`Message::posted_at`]
    pub date: String,

    /// The record the message is attached to
    pub target: RecordRef,

    pub needaction: bool,
    pub active: bool,
    pub subject: Option<String>,
    pub partner_ids: Vec<i64>,
    pub parent: Option<IdNamePair>,

    /// HTML body
    pub body: String,

    pub record_name: Option<String>,
    pub email_from: String,
    pub display_name: String,
    pub delete_uid: bool,
    pub author_avatar: Option<String>,
    pub starred: bool,

    pub attachment_ids: Vec<i64>,
    pub ref_partner_ids: Vec<i64>,

    /// Subtype ids; an entry is `None` where the backend sent `null`
    pub subtype_ids: Vec<Option<i64>>,
}

impl Message {
    /// Parse `date` as a naive UTC timestamp
    ///
    /// Returns `None` if the backend sent a format other than
    /// [`SERVER_DATETIME_FORMAT`].
    pub fn posted_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, SERVER_DATETIME_FORMAT).ok()
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachment_ids.is_empty()
    }

    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }
}
