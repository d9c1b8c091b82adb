//! Tool registration and dispatch
//!
//! The external dispatch shell lists tools with [`ToolRegistry::list_tools`]
//! and invokes them by name with JSON arguments. Arguments are validated
//! against the schema table and decoded into typed requests before the
//! operation runs. Operation failures come back as error results, not `Err`.

mod requests;
mod schema;

pub use requests::{AuditPageRequest, PerplexityStatusRequest, SubmitUrlsRequest};
pub use schema::{
    ParamKind, ParamSpec, ToolDefinition, ToolSpec, AUDIT_PAGE_FOR_GEO, CHECK_PERPLEXITY_STATUS,
    SUBMIT_URL_INDEXNOW, TOOL_SPECS,
};

use crate::audit::Auditor;
use crate::config::Config;
use crate::fetch::build_http_client;
use crate::indexnow::IndexNowClient;
use crate::perplexity::PerplexityClient;
use crate::SignalError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Text result of one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallResult {
    pub text: String,
    pub is_error: bool,
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Services backing the tools; cheap to clone, safe to share across tasks
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    auditor: Auditor,
    indexnow: IndexNowClient,
    perplexity: PerplexityClient,
}

impl ToolRegistry {
    pub fn new(auditor: Auditor, indexnow: IndexNowClient, perplexity: PerplexityClient) -> Self {
        Self {
            auditor,
            indexnow,
            perplexity,
        }
    }

    /// Builds every service from configuration around one pooled HTTP client
    pub fn from_config(config: &Config) -> Result<Self, SignalError> {
        let client = build_http_client(&config.http)
            .map_err(|e| SignalError::Unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(
            Auditor::new(client.clone()),
            IndexNowClient::new(client.clone(), config.indexnow.clone()),
            PerplexityClient::new(client, config.perplexity.clone()),
        ))
    }

    pub fn list_tools() -> Vec<ToolDefinition> {
        TOOL_SPECS.iter().map(ToolSpec::definition).collect()
    }

    /// Invokes a tool by name
    ///
    /// Never fails: an unknown name, rejected arguments and operation
    /// failures all come back with `is_error` set and the message as text.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        let Some(tool) = ToolSpec::find(name) else {
            tracing::warn!("Unknown tool requested: {}", name);
            return ToolCallResult::error(format!("Unknown tool: {}", name));
        };
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        if let Err(message) = tool.validate(&args) {
            tracing::warn!("Rejected {} call: {}", name, message);
            return ToolCallResult::error(message);
        }

        let result = match tool.name {
            SUBMIT_URL_INDEXNOW => self.submit_url_indexnow(args).await,
            CHECK_PERPLEXITY_STATUS => self.check_perplexity_status(args).await,
            AUDIT_PAGE_FOR_GEO => self.audit_page_for_geo(args).await,
            _ => Err(SignalError::Unexpected(format!("No handler for tool {}", name))),
        };

        match result {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                tracing::error!("{} tool error: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
        }
    }

    async fn submit_url_indexnow(&self, args: Value) -> Result<String, SignalError> {
        let request: SubmitUrlsRequest = decode(args)?;
        self.indexnow
            .submit(
                &request.urls,
                request.host.as_deref(),
                request.api_key.as_deref(),
                request.key_location.as_deref(),
            )
            .await
    }

    async fn check_perplexity_status(&self, args: Value) -> Result<String, SignalError> {
        let request: PerplexityStatusRequest = decode(args)?;
        self.perplexity
            .check(&request.url, request.api_key.as_deref(), request.model.as_deref())
            .await
    }

    async fn audit_page_for_geo(&self, args: Value) -> Result<String, SignalError> {
        let request: AuditPageRequest = decode(args)?;
        let report = self.auditor.audit(&request.url, request.check_robots()).await;
        Ok(report.to_markdown())
    }
}

fn decode<T: DeserializeOwned>(args: Value) -> Result<T, SignalError> {
    serde_json::from_value(args).map_err(|e| SignalError::InvalidInput(e.to_string()))
}
