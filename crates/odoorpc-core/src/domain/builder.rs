//! Domain/filter builder
//!
//! Pure and total: every [`QueryIntent`] maps to exactly one parameter set,
//! with clauses in a fixed order.
//!
//! Channel clauses shared by every channel fetch, in order:
//!
//! ```text
//! ["model", "=", <container model>]
//! ["res_id", "=", target_id]
//! ["message_type", "in", ["email", "comment"]]
//! ["message_type", "!=", "notification"]
//! ```

use super::clause::{Domain, FilterClause, Operator};
use super::intent::{Direction, MessageSearch, QueryIntent};
use super::params::{CallKwParams, RequestParams, SearchKwargs};
use crate::model::RequestContext;

/// Model holding the messages
pub const MESSAGE_MODEL: &str = "mail.message";

/// Model of the records messages are posted on
pub const CHANNEL_MODEL: &str = "mail.channel";

/// Method used for free-form searches through `call_kw`
pub const SEARCH_METHOD: &str = "web_search_read";

const INITIAL_FIELDS: [&str; 4] = ["id", "attachment_ids", "author_display", "body"];
const INCREMENTAL_FIELDS: [&str; 4] = ["id", "body", "attachment_ids", "author_display"];
const SELECTIVE_FIELDS: [&str; 2] = ["id", "attachment_ids"];

const THREAD_MESSAGE_TYPES: [&str; 2] = ["email", "comment"];
const NOTIFICATION_TYPE: &str = "notification";

fn projection(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

/// Builds request parameters for a given message model and container model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainBuilder {
    message_model: String,
    container_model: String,
}

impl Default for DomainBuilder {
    fn default() -> Self {
        Self::new(MESSAGE_MODEL, CHANNEL_MODEL)
    }
}

impl DomainBuilder {
    pub fn new(message_model: impl Into<String>, container_model: impl Into<String>) -> Self {
        Self {
            message_model: message_model.into(),
            container_model: container_model.into(),
        }
    }

    pub fn message_model(&self) -> &str {
        &self.message_model
    }

    pub fn container_model(&self) -> &str {
        &self.container_model
    }

    fn message_type_clauses() -> [FilterClause; 2] {
        [
            FilterClause::new("message_type", Operator::In, THREAD_MESSAGE_TYPES.to_vec()),
            FilterClause::new("message_type", Operator::Ne, NOTIFICATION_TYPE),
        ]
    }

    fn channel_domain(&self, target_id: i64) -> Domain {
        let mut domain = Domain::new()
            .and(FilterClause::new(
                "model",
                Operator::Eq,
                self.container_model.as_str(),
            ))
            .and(FilterClause::new("res_id", Operator::Eq, target_id));
        for clause in Self::message_type_clauses() {
            domain.push(clause);
        }
        domain
    }

    /// Build the `search_read` parameters for a channel fetch
    pub fn build(&self, intent: &QueryIntent, context: &RequestContext) -> RequestParams {
        let (limit, domain, fields) = match intent {
            QueryIntent::FetchInitial { target_id, limit } => (
                Some(*limit),
                self.channel_domain(*target_id),
                projection(&INITIAL_FIELDS),
            ),

            QueryIntent::FetchIncremental {
                target_id,
                limit,
                cursor_id,
                direction,
                excluded_author_id,
                is_live_chat,
            } => {
                let mut domain = self.channel_domain(*target_id);
                domain.push(FilterClause::new("id", direction.operator(), *cursor_id));

                // Only forward live-chat polls hide the user's own messages;
                // history loads and non-chat threads must show them.
                if *direction == Direction::After && *is_live_chat {
                    if let Some(author_id) = excluded_author_id {
                        domain.push(FilterClause::new("author_id", Operator::Ne, *author_id));
                    }
                }

                (Some(*limit), domain, projection(&INCREMENTAL_FIELDS))
            }

            QueryIntent::FetchSelective {
                target_id,
                explicit_ids,
            } => {
                let mut domain = Domain::new()
                    .and(FilterClause::new("id", Operator::In, explicit_ids.clone()))
                    .and(FilterClause::new("res_id", Operator::Eq, *target_id));
                for clause in Self::message_type_clauses() {
                    domain.push(clause);
                }
                (None, domain, projection(&SELECTIVE_FIELDS))
            }
        };

        RequestParams {
            model: self.message_model.clone(),
            limit,
            domain,
            fields,
            context: context.to_block(),
        }
    }

    /// Build `call_kw` parameters for a free-form message search
    pub fn build_search(&self, search: &MessageSearch, context: &RequestContext) -> CallKwParams {
        CallKwParams {
            model: self.message_model.clone(),
            method: SEARCH_METHOD.to_string(),
            args: Vec::new(),
            kwargs: SearchKwargs {
                domain: search.domain.clone(),
                fields: search.fields.clone(),
                limit: search.limit,
                offset: search.offset,
                order: search.order.clone(),
                context: context.to_block(),
            },
        }
    }
}

/// Build channel fetch parameters with the default models
pub fn build(intent: &QueryIntent, context: &RequestContext) -> RequestParams {
    DomainBuilder::default().build(intent, context)
}
