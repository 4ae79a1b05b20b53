//! Shared plumbing for one prompt-to-JSON exchange with the provider.

use std::time::Duration;

use postforge_core::extract::extract_json;
use postforge_provider::{GenerationRequest, TextGenerator};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PipelineError;

/// Run one generation call under the configured timeout.
pub(crate) async fn call_with_timeout(
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
    stage: &'static str,
    timeout: Duration,
) -> Result<String, PipelineError> {
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(result) => result.map_err(|source| PipelineError::Provider { stage, source }),
        Err(_) => Err(PipelineError::Timeout {
            stage,
            timeout_secs: timeout.as_secs(),
        }),
    }
}

/// Pull the first JSON object out of a model response and deserialize it.
/// Tolerates markdown fences and prose around the payload.
pub(crate) fn parse_json_payload<T: DeserializeOwned>(
    stage: &'static str,
    text: &str,
) -> Result<T, PipelineError> {
    let json = extract_json(text).ok_or_else(|| PipelineError::Parse {
        stage,
        detail: "no JSON object found in response".to_string(),
    })?;
    serde_json::from_str(json).map_err(|e| PipelineError::Parse {
        stage,
        detail: e.to_string(),
    })
}

/// Pretty-print a value for embedding into a prompt.
pub(crate) fn pretty_json(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).expect("prompt payload is always serialisable")
}
