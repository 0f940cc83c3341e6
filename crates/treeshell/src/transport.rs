//! How the shell reaches the tree service

use anyhow::{Context, Result};
use log::trace;
use tree_service::{MemoryBackend, Request, Response, TreeBackend, TreeService};

/// Carries requests to a tree service and brings back its responses
///
/// An `Err` means the exchange itself failed; a service-side failure arrives
/// as `Ok(Response::Error { .. })`.
pub trait Transport {
    fn send(&mut self, request: &Request) -> Result<Response>;
}

/// Talks to a service owned by this process, through the JSON wire format
pub struct LocalTransport<B: TreeBackend = MemoryBackend> {
    service: TreeService<B>,
}

impl<B: TreeBackend> LocalTransport<B> {
    pub fn new(service: TreeService<B>) -> Self {
        Self { service }
    }

    /// The service on the other end
    #[cfg(test)]
    pub fn service(&self) -> &TreeService<B> {
        &self.service
    }
}

impl<B: TreeBackend> Transport for LocalTransport<B> {
    fn send(&mut self, request: &Request) -> Result<Response> {
        let text = serde_json::to_string(request).context("Failed to encode request")?;
        trace!("-> {}", text);

        let reply = self.service.handle_json(&text);
        trace!("<- {}", reply);

        serde_json::from_str(&reply)
            .with_context(|| format!("Failed to decode {} response", request.op()))
    }
}
