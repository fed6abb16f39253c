use super::clause::{Domain, Operator};

/// Direction of a cursor-bounded fetch relative to the cursor id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Records newer than the cursor (`id > cursor`)
    After,
    /// Records older than the cursor (`id < cursor`)
    Before,
}

impl Direction {
    pub fn operator(&self) -> Operator {
        match self {
            Direction::After => Operator::Gt,
            Direction::Before => Operator::Lt,
        }
    }
}

/// Why a channel fetch is made
///
/// Each variant carries only the parameters that query needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    /// First page of a channel's messages
    FetchInitial { target_id: i64, limit: u32 },

    /// Messages on one side of a cursor, for polling or history loads
    FetchIncremental {
        target_id: i64,
        limit: u32,
        cursor_id: i64,
        direction: Direction,
        /// Author to hide on forward live-chat polls (normally the acting user's partner)
        excluded_author_id: Option<i64>,
        is_live_chat: bool,
    },

    /// Specific messages of a channel, by id
    FetchSelective { target_id: i64, explicit_ids: Vec<i64> },
}

impl QueryIntent {
    /// Stable name for logs
    pub fn name(&self) -> &'static str {
        match self {
            QueryIntent::FetchInitial { .. } => "fetch_initial",
            QueryIntent::FetchIncremental { .. } => "fetch_incremental",
            QueryIntent::FetchSelective { .. } => "fetch_selective",
        }
    }

    pub fn target_id(&self) -> i64 {
        match self {
            QueryIntent::FetchInitial { target_id, .. }
            | QueryIntent::FetchIncremental { target_id, .. }
            | QueryIntent::FetchSelective { target_id, .. } => *target_id,
        }
    }

    /// Endpoint every channel fetch is dispatched to
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::SearchRead
    }
}

/// Backend endpoint families the access layer talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/web/dataset/search_read`, answers search-style or call-style envelopes
    SearchRead,
    /// `/web/dataset/call_kw/<model>/<method>`, answers call-style envelopes
    CallKw,
}

/// Free-form message search, executed through `web_search_read`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSearch {
    pub domain: Domain,
    pub fields: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Backend order spec, e.g. `"id desc"`
    pub order: Option<String>,
}

impl MessageSearch {
    pub fn new(domain: Domain, fields: &[&str]) -> Self {
        Self {
            domain,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            limit: None,
            offset: None,
            order: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}
