use crate::interface_adapters::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    // One pooled client shared by every proxy handler.
    pub upstream: UpstreamClient,
}
