//! Shared state handed to every axum handler.

use std::sync::Arc;

use crate::queue_handle::PublishQueueHandle;
use crate::storage::Storage;

/// Everything a handler needs: storage, an HTTP client for upstream
/// proxying, the registry's own base URL (for tarball URL rewriting), an
/// optional upstream registry to fall through to, and a handle into the
/// publish queue for the internal control endpoints.
#[derive(Clone)]
pub struct AppState {
    /// The packument/tarball storage engine.
    pub storage: Arc<Storage>,
    /// Shared client for upstream packument/tarball proxying.
    pub http_client: reqwest::Client,
    /// This registry's own `http://<loopback>:<port>` base, used to rewrite
    /// `dist.tarball` URLs so repeated fetches stay local.
    pub registry_base_url: String,
    /// Upstream registry to proxy to for names pkglab never published, or
    /// to merge with for names it did. `None` disables all upstream
    /// behavior (bad_gateway for every proxy-eligible request).
    pub upstream_url: Option<String>,
    /// Handle into the publish queue, for the internal publish endpoints.
    pub queue: Arc<dyn PublishQueueHandle>,
}
