//! Scripted transport and wire-record fixtures for the orchestrator tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use odoorpc_client::{HttpMethod, RpcTransport, TransportError};
use serde_json::{json, Value};

/// One call the fake transport received
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedCall {
    pub endpoint: String,
    pub method: HttpMethod,
    pub params: Value,
}

/// Transport that replays scripted responses in order and records every call
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(self, body: Value) -> Self {
        self.respond(Ok(serde_json::to_vec(&body).unwrap()))
    }

    pub fn respond_raw(self, body: &[u8]) -> Self {
        self.respond(Ok(body.to_vec()))
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.respond(Err(err))
    }

    fn respond(self, response: Result<Vec<u8>, TransportError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RpcTransport for ScriptedTransport {
    async fn send(
        &self,
        endpoint: &str,
        method: HttpMethod,
        params: &Value,
    ) -> Result<Vec<u8>, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint: endpoint.to_string(),
            method,
            params: params.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network {
                    message: "no scripted response left".to_string(),
                })
            })
    }
}

/// Projected record as returned for the channel intents
#[allow(dead_code)]
pub fn channel_record(id: i64) -> Value {
    json!({
        "id": id,
        "body": format!("<p>message {}</p>", id),
        "author_display": "Marc Demo",
        "attachment_ids": []
    })
}

/// Full message record as returned by `web_search_read`
#[allow(dead_code)]
pub fn full_message(id: i64) -> Value {
    json!({
        "id": id,
        "author_display": "Marc Demo",
        "author_id": [3, "Marc Demo"],
        "date": "2024-04-13 09:30:15",
        "res_id": 1,
        "needaction": false,
        "active": true,
        "subject": false,
        "partner_ids": [],
        "parent_id": false,
        "body": "<p>invoice attached</p>",
        "record_name": "general",
        "email_from": "marc@example.com",
        "display_name": "general",
        "delete_uid": false,
        "model": "mail.channel",
        "author_avatar": false,
        "starred": false,
        "attachment_ids": [12],
        "ref_partner_ids": [],
        "subtype_id": [1]
    })
}
