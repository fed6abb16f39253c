//! Query construction
//!
//! Turns a [`QueryIntent`] plus a [`crate::model::RequestContext`] into the
//! exact parameter structure the backend expects. Everything here is pure
//! and deterministic, so it can be shared freely between concurrent calls.

pub mod builder;
pub mod clause;
pub mod intent;
pub mod params;

pub use builder::{build, DomainBuilder, CHANNEL_MODEL, MESSAGE_MODEL, SEARCH_METHOD};
pub use clause::{Domain, FilterClause, FilterValue, Operator, Scalar};
pub use intent::{Direction, Endpoint, MessageSearch, QueryIntent};
pub use params::{CallKwParams, RequestParams, SearchKwargs, CONTEXT_KEY};
