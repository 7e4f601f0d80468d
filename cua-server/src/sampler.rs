//! Sampling through the MCP client that issued the request.

use crate::convert::{sampled_text, sampling_params};
use async_trait::async_trait;
use cua_core::{CuaError, Result, Sampler, SamplingRequest};
use rmcp::service::{Peer, RoleServer};

/// Forwards [`SamplingRequest`]s to the client as `sampling/createMessage`.
pub struct PeerSampler {
    peer: Peer<RoleServer>,
}

impl PeerSampler {
    pub fn new(peer: Peer<RoleServer>) -> Self {
        Self { peer }
    }

    /// `None` when the client explicitly did not advertise sampling.
    pub fn for_peer(peer: &Peer<RoleServer>) -> Option<Self> {
        let advertised = match peer.peer_info() {
            Some(info) => serde_json::to_value(info)
                .is_ok_and(|info| !info["capabilities"]["sampling"].is_null()),
            None => true,
        };
        advertised.then(|| Self::new(peer.clone()))
    }
}

#[async_trait]
impl Sampler for PeerSampler {
    async fn sample(&self, request: SamplingRequest) -> Result<String> {
        let params = serde_json::from_value(sampling_params(
            &request.prompt,
            request.model_hint.as_deref(),
            request.system_prompt.as_deref(),
            request.max_tokens,
        ))
        .map_err(|e| CuaError::Sampling(format!("Invalid sampling request: {e}")))?;

        let result = self
            .peer
            .create_message(params)
            .await
            .map_err(|e| CuaError::Sampling(format!("Sampling request failed: {e}")))?;

        let result = serde_json::to_value(&result)?;
        sampled_text(&result)
            .ok_or_else(|| CuaError::Sampling("No text response from model".to_string()))
    }
}
