//! Connectivity pre-flight.
//!
//! One authenticated read-only request against the feeds API proves the
//! resolved key works before the caller starts issuing real queries. This is
//! a pre-flight check, not the query path: no retry loop here, since retries
//! for actual query traffic belong to the SDK.

use std::time::Duration;

use carver_skill_core::credentials::CredentialSet;
use carver_skill_core::outcome::BootstrapError;

/// The cheapest authenticated read the API offers: top-level topic listing.
const TOPICS_PATH: &str = "/api/v1/topics";

/// Result of a successful pre-flight.
#[derive(Debug)]
pub struct ProbeReport {
    /// Topic count when the response body parsed; a 2xx with an unexpected
    /// body shape still counts as verified connectivity.
    pub topic_count: Option<usize>,
}

fn make_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_read(Duration::from_secs(30))
        .build()
}

/// Classify a non-2xx status. 401/403 mean the key itself was refused, which
/// needs different user remediation than an unreachable or erroring service.
fn classify_status(status: u16) -> BootstrapError {
    match status {
        401 | 403 => BootstrapError::AuthRejected { status },
        _ => BootstrapError::Transport {
            detail: format!("service returned HTTP {}", status),
        },
    }
}

/// Count topics in whichever of the two documented response shapes arrived
/// (bare array, or object with a `topics` array).
fn topic_count(body: &serde_json::Value) -> Option<usize> {
    body.as_array()
        .map(Vec::len)
        .or_else(|| body.get("topics").and_then(|t| t.as_array()).map(Vec::len))
}

/// Perform the single authenticated call.
pub fn preflight(credentials: &CredentialSet) -> Result<ProbeReport, BootstrapError> {
    let url = format!("{}{}", credentials.base_url, TOPICS_PATH);
    tracing::debug!(url = %url, "Running connectivity pre-flight");

    let response = make_agent()
        .get(&url)
        .set("Authorization", &format!("Bearer {}", credentials.api_key))
        .set("Accept", "application/json")
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(code, _) => classify_status(code),
            ureq::Error::Transport(t) => BootstrapError::Transport {
                detail: t.to_string(),
            },
        })?;

    let count = response
        .into_json::<serde_json::Value>()
        .ok()
        .as_ref()
        .and_then(topic_count);
    match count {
        Some(n) => tracing::info!(topics = n, "Connectivity verified"),
        None => tracing::info!("Connectivity verified"),
    }
    Ok(ProbeReport { topic_count: count })
}
