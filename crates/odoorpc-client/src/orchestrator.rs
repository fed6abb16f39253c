//! Query orchestration
//!
//! One fetch walks a fixed sequence of phases:
//!
//! ```text
//! Built ──▶ Sent ──▶ Decoded
//!             │  └──▶ DecodeFailed     (envelope unusable)
//!             └─────▶ TransportFailed
//! ```
//!
//! There are no retries. Records that fail to decode do not fail the fetch;
//! they are reported by index in the returned [`DecodedBatch`].

use std::time::Instant;

use odoorpc_core::decode::{decode_envelope, DecodedBatch, WireRecord};
use odoorpc_core::domain::{DomainBuilder, Endpoint, MessageSearch, QueryIntent};
use odoorpc_core::{log_op_end, log_op_error, log_op_start};
use odoorpc_core::{ChannelMessage, FilterConstructionError, Message, RequestContext};
use odoorpc_core_types::Correlation;
use serde::Serialize;
use serde_json::Value;

use crate::config::{ClientConfig, DEFAULT_CALL_KW_PATH, DEFAULT_SEARCH_READ_PATH};
use crate::errors::OrchestratorError;
use crate::transport::{HttpMethod, RpcTransport};

/// Lifecycle phase of a single fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Built,
    Sent,
    Decoded,
    TransportFailed,
    DecodeFailed,
}

impl RequestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPhase::Built => "built",
            RequestPhase::Sent => "sent",
            RequestPhase::Decoded => "decoded",
            RequestPhase::TransportFailed => "transport_failed",
            RequestPhase::DecodeFailed => "decode_failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestPhase::Decoded | RequestPhase::TransportFailed | RequestPhase::DecodeFailed
        )
    }
}

fn log_phase(op: &str, phase: RequestPhase, correlation: &Correlation) {
    tracing::debug!(
        component = module_path!(),
        op = op,
        event = odoorpc_core_types::schema::EVENT_PHASE,
        phase = phase.as_str(),
        request_id = correlation.request_id.as_str(),
        trace_id = correlation.trace_str(),
    );
}

fn to_params<P: Serialize>(params: &P) -> Result<Value, OrchestratorError> {
    serde_json::to_value(params).map_err(|e| {
        tracing::error!(error = %e, "request parameters failed to serialize");
        OrchestratorError::FilterConstruction(FilterConstructionError::Unserializable {
            message: e.to_string(),
        })
    })
}

/// Runs fetches against one backend through an [`RpcTransport`]
pub struct QueryOrchestrator<T> {
    transport: T,
    builder: DomainBuilder,
    search_read_path: String,
    call_kw_path: String,
}

impl<T: RpcTransport> QueryOrchestrator<T> {
    /// Orchestrator with the default models and endpoint paths
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            builder: DomainBuilder::default(),
            search_read_path: DEFAULT_SEARCH_READ_PATH.to_string(),
            call_kw_path: DEFAULT_CALL_KW_PATH.to_string(),
        }
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            builder: config.domain_builder(),
            search_read_path: config.search_read_path.clone(),
            call_kw_path: config.call_kw_path.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn builder(&self) -> &DomainBuilder {
        &self.builder
    }

    /// Path a call to `endpoint` is sent to
    pub fn endpoint_path(&self, endpoint: Endpoint) -> String {
        match endpoint {
            Endpoint::SearchRead => self.search_read_path.clone(),
            Endpoint::CallKw => format!(
                "{}/{}/{}",
                self.call_kw_path,
                self.builder.message_model(),
                odoorpc_core::domain::SEARCH_METHOD
            ),
        }
    }

    /// Fetch and decode the records an intent selects
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Transport`] unchanged when the transport
    /// fails, [`OrchestratorError::EnvelopeShape`] when the response carries no
    /// records sequence, and [`OrchestratorError::FilterConstruction`] when the
    /// built parameters violate their invariants.
    pub async fn fetch_records<R: WireRecord>(
        &self,
        intent: &QueryIntent,
        context: &RequestContext,
    ) -> Result<DecodedBatch<R>, OrchestratorError> {
        self.fetch_records_correlated(intent, context, &Correlation::new())
            .await
    }

    /// [`QueryOrchestrator::fetch_records`] under a caller-supplied correlation
    ///
    /// # Errors
    ///
    /// See [`QueryOrchestrator::fetch_records`].
    pub async fn fetch_records_correlated<R: WireRecord>(
        &self,
        intent: &QueryIntent,
        context: &RequestContext,
        correlation: &Correlation,
    ) -> Result<DecodedBatch<R>, OrchestratorError> {
        let op = intent.name();
        log_op_start!(
            op,
            request_id = correlation.request_id.as_str(),
            trace_id = correlation.trace_str(),
            target_id = intent.target_id(),
            record_kind = R::KIND,
        );
        let start = Instant::now();

        let result = self.run_intent::<R>(intent, context, correlation).await;

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(batch) => log_op_end!(
                op,
                duration_ms = elapsed,
                record_count = batch.records.len(),
                failed_count = batch.failures.len(),
            ),
            Err(e) => {
                let rpc_err = e.clone().into_rpc_error(correlation);
                log_op_error!(op, rpc_err, duration_ms = elapsed);
            }
        }
        result
    }

    /// Fetch channel messages in the projection the channel intents request
    ///
    /// # Errors
    ///
    /// See [`QueryOrchestrator::fetch_records`].
    pub async fn fetch_channel_messages(
        &self,
        intent: &QueryIntent,
        context: &RequestContext,
    ) -> Result<DecodedBatch<ChannelMessage>, OrchestratorError> {
        self.fetch_records(intent, context).await
    }

    /// Fetch records, failing if any of them did not decode
    ///
    /// # Errors
    ///
    /// As [`QueryOrchestrator::fetch_records`], plus
    /// [`OrchestratorError::Decode`] listing every failed index.
    pub async fn fetch_all<R: WireRecord>(
        &self,
        intent: &QueryIntent,
        context: &RequestContext,
    ) -> Result<Vec<R>, OrchestratorError> {
        self.fetch_records(intent, context)
            .await?
            .into_complete()
            .map_err(|failures| OrchestratorError::Decode { failures })
    }

    /// Run a free-form message search through `call_kw`
    ///
    /// # Errors
    ///
    /// Same classification as [`QueryOrchestrator::fetch_records`]. An empty
    /// projection is rejected before anything is sent.
    pub async fn search_messages(
        &self,
        search: &MessageSearch,
        context: &RequestContext,
    ) -> Result<DecodedBatch<Message>, OrchestratorError> {
        let op = "search_messages";
        let correlation = Correlation::new();
        log_op_start!(
            op,
            request_id = correlation.request_id.as_str(),
            clause_count = search.domain.len(),
        );
        let start = Instant::now();

        let result = self.run_search(search, context, &correlation).await;

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(batch) => log_op_end!(
                op,
                duration_ms = elapsed,
                record_count = batch.records.len(),
                failed_count = batch.failures.len(),
            ),
            Err(e) => {
                let rpc_err = e.clone().into_rpc_error(&correlation);
                log_op_error!(op, rpc_err, duration_ms = elapsed);
            }
        }
        result
    }

    async fn run_intent<R: WireRecord>(
        &self,
        intent: &QueryIntent,
        context: &RequestContext,
        correlation: &Correlation,
    ) -> Result<DecodedBatch<R>, OrchestratorError> {
        let op = intent.name();
        let params = self.builder.build(intent, context);
        params.validate()?;
        tracing::debug!(
            op = op,
            model = params.model.as_str(),
            clause_count = params.domain.len(),
            "built search_read parameters"
        );
        let params = to_params(&params)?;
        log_phase(op, RequestPhase::Built, correlation);

        let endpoint = self.endpoint_path(intent.endpoint());
        self.dispatch::<R>(op, &endpoint, &params, correlation).await
    }

    async fn run_search(
        &self,
        search: &MessageSearch,
        context: &RequestContext,
        correlation: &Correlation,
    ) -> Result<DecodedBatch<Message>, OrchestratorError> {
        let op = "search_messages";
        let params = self.builder.build_search(search, context);
        params.validate()?;
        let params = to_params(&params)?;
        log_phase(op, RequestPhase::Built, correlation);

        let endpoint = self.endpoint_path(Endpoint::CallKw);
        self.dispatch::<Message>(op, &endpoint, &params, correlation)
            .await
    }

    async fn dispatch<R: WireRecord>(
        &self,
        op: &str,
        endpoint: &str,
        params: &Value,
        correlation: &Correlation,
    ) -> Result<DecodedBatch<R>, OrchestratorError> {
        let body = match self.transport.send(endpoint, HttpMethod::Post, params).await {
            Ok(body) => body,
            Err(e) => {
                log_phase(op, RequestPhase::TransportFailed, correlation);
                return Err(e.into());
            }
        };
        log_phase(op, RequestPhase::Sent, correlation);

        let envelope = match decode_envelope(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                log_phase(op, RequestPhase::DecodeFailed, correlation);
                return Err(e.into());
            }
        };

        let batch = envelope.decode_records::<R>();
        for failure in &batch.failures {
            tracing::warn!(
                op = op,
                request_id = correlation.request_id.as_str(),
                record_index = failure.index,
                field = failure.error.field().unwrap_or("-"),
                error = %failure.error,
                "skipping undecodable record"
            );
        }
        log_phase(op, RequestPhase::Decoded, correlation);

        Ok(batch)
    }
}
