//! Shared application state for the `RouteCloak` server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It owns the codec, the route registry built on
//! top of it, and the screen table the router dispatches through.

use std::sync::Arc;

use routecloak_core::{CodecError, RouteRegistry, ScreenTable, SegmentCodec};

use crate::config::ServerConfig;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Segment codec, used directly for decoding incoming paths.
    pub codec: Arc<SegmentCodec>,
    /// Token cache for link building.
    pub registry: RouteRegistry,
    /// `(master, module)` to screen dispatch table.
    pub screens: ScreenTable,
    /// Title shown on rendered pages.
    pub app_title: String,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if key derivation fails.
    pub fn from_config(config: &ServerConfig) -> Result<Self, CodecError> {
        let codec = Arc::new(SegmentCodec::new(&config.route_secret)?);
        Ok(Self {
            registry: RouteRegistry::new(Arc::clone(&codec)),
            codec,
            screens: ScreenTable::admin_panel(),
            app_title: config.app_title.clone(),
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
