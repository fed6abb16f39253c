//! Shared wire-message fixtures for the decoder and envelope tests

use odoorpc_core::{IdNamePair, Message, RecordRef};
use serde_json::{json, Value};

/// Wire record as the backend sends it for a plain chat message
#[allow(dead_code)]
pub fn wire_message(id: i64) -> Value {
    json!({
        "id": id,
        "author_display": "Mitchell Admin <admin@example.com>",
        "author_id": [3, "Mitchell Admin"],
        "date": "2024-04-13 09:30:15",
        "res_id": 1,
        "needaction": false,
        "active": true,
        "subject": false,
        "partner_ids": [7, 8],
        "parent_id": false,
        "body": "<p>Hello</p>",
        "record_name": "general",
        "email_from": "admin@example.com",
        "display_name": "general",
        "delete_uid": false,
        "model": "mail.channel",
        "author_avatar": false,
        "starred": true,
        "attachment_ids": [41],
        "ref_partner_ids": [],
        "subtype_id": [1, null]
    })
}

/// Same wire record with one field replaced
#[allow(dead_code)]
pub fn wire_message_with(id: i64, field: &str, value: Value) -> Value {
    let mut raw = wire_message(id);
    raw[field] = value;
    raw
}

/// Same wire record with one field removed
#[allow(dead_code)]
pub fn wire_message_without(id: i64, field: &str) -> Value {
    let mut raw = wire_message(id);
    if let Value::Object(map) = &mut raw {
        map.remove(field);
    }
    raw
}

/// The typed record `wire_message(id)` decodes to
#[allow(dead_code)]
pub fn expected_message(id: i64) -> Message {
    Message {
        id,
        author_display: "Mitchell Admin <admin@example.com>".to_string(),
        author: Some(IdNamePair::new(3, "Mitchell Admin")),
        date: "2024-04-13 09:30:15".to_string(),
        target: RecordRef {
            model: "mail.channel".to_string(),
            res_id: 1,
        },
        needaction: false,
        active: true,
        subject: None,
        partner_ids: vec![7, 8],
        parent: None,
        body: "<p>Hello</p>".to_string(),
        record_name: Some("general".to_string()),
        email_from: "admin@example.com".to_string(),
        display_name: "general".to_string(),
        delete_uid: false,
        author_avatar: None,
        starred: true,
        attachment_ids: vec![41],
        ref_partner_ids: vec![],
        subtype_ids: vec![Some(1), None],
    }
}
