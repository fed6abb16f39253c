//! Record decoders: wire object to typed record and back

use serde_json::{json, Value};

use super::encode;
use super::field::FieldReader;
use crate::errors::DecodeError;
use crate::model::{ChannelMessage, Message, RecordRef};

/// A typed record that can be rebuilt from one wire object
///
/// `decode` must be pure. `to_wire` produces the backend's encoding of the
/// record, such that `decode(&r.to_wire()) == Ok(r)`.
pub trait WireRecord: Sized {
    /// Short name used in log events
    const KIND: &'static str;

    fn decode(raw: &Value) -> Result<Self, DecodeError>;

    fn to_wire(&self) -> Value;
}

/// Decode one wire object into a full [`Message`]
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the first field that does not match
/// its decode rule.
pub fn decode(raw: &Value) -> Result<Message, DecodeError> {
    Message::decode(raw)
}

impl WireRecord for Message {
    const KIND: &'static str = "message";

    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let f = FieldReader::new(raw)?;

        Ok(Message {
            id: f.int("id")?,
            author_display: f.string("author_display")?,
            author: f.optional_relation("author_id")?,
            date: f.string("date")?,
            target: RecordRef {
                model: f.string("model")?,
                res_id: f.int("res_id")?,
            },
            needaction: f.boolean("needaction")?,
            active: f.boolean("active")?,
            subject: f.optional_string("subject")?,
            partner_ids: f.id_list("partner_ids")?,
            parent: f.optional_relation("parent_id")?,
            body: f.string("body")?,
            record_name: f.optional_string("record_name")?,
            email_from: f.string("email_from")?,
            display_name: f.string("display_name")?,
            delete_uid: f.boolean("delete_uid")?,
            author_avatar: f.optional_string("author_avatar")?,
            starred: f.boolean("starred")?,
            attachment_ids: f.id_list_or_empty("attachment_ids")?,
            ref_partner_ids: f.id_list_or_empty("ref_partner_ids")?,
            subtype_ids: f.nullable_id_list_or_empty("subtype_id")?,
        })
    }

    fn to_wire(&self) -> Value {
        json!({
            "id": self.id,
            "author_display": self.author_display,
            "author_id": encode::relation(&self.author),
            "date": self.date,
            "model": self.target.model,
            "res_id": self.target.res_id,
            "needaction": self.needaction,
            "active": self.active,
            "subject": encode::optional_string(&self.subject),
            "partner_ids": self.partner_ids,
            "parent_id": encode::relation(&self.parent),
            "body": self.body,
            "record_name": encode::optional_string(&self.record_name),
            "email_from": self.email_from,
            "display_name": self.display_name,
            "delete_uid": self.delete_uid,
            "author_avatar": encode::optional_string(&self.author_avatar),
            "starred": self.starred,
            "attachment_ids": self.attachment_ids,
            "ref_partner_ids": self.ref_partner_ids,
            "subtype_id": encode::nullable_ids(&self.subtype_ids),
        })
    }
}

impl WireRecord for ChannelMessage {
    const KIND: &'static str = "channel_message";

    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        let f = FieldReader::new(raw)?;

        Ok(ChannelMessage {
            id: f.int("id")?,
            body: f.optional_string("body")?,
            author_display: f.optional_string("author_display")?,
            attachment_ids: f.id_list_or_empty("attachment_ids")?,
        })
    }

    fn to_wire(&self) -> Value {
        let mut wire = json!({
            "id": self.id,
            "attachment_ids": self.attachment_ids,
        });
        if let Value::Object(map) = &mut wire {
            if self.body.is_some() {
                map.insert("body".to_string(), encode::optional_string(&self.body));
            }
            if self.author_display.is_some() {
                map.insert(
                    "author_display".to_string(),
                    encode::optional_string(&self.author_display),
                );
            }
        }
        wire
    }
}
