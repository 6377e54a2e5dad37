//! Server configuration for `RouteCloak`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `ROUTECLOAK_*` environment variables.

use std::fmt;
use std::net::SocketAddr;

use routecloak_core::DEFAULT_ROUTE_SECRET;

const DEFAULT_PORT: u16 = 8300;

/// Server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Passphrase the segment codec derives its keys from.
    ///
    /// Not a managed secret: every client holding it can decode tokens.
    pub route_secret: String,
    /// Title shown on the dashboard and screen pages.
    pub app_title: String,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("route_secret", &"[REDACTED]")
            .field("app_title", &self.app_title)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            log_level: "info".to_owned(),
            route_secret: DEFAULT_ROUTE_SECRET.to_owned(),
            app_title: "Admin Panel".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `ROUTECLOAK_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8300`)
    /// - `ROUTECLOAK_LOG_LEVEL` — log filter (default: `info`)
    /// - `ROUTECLOAK_ROUTE_SECRET` — codec passphrase (default: the compiled-in secret)
    /// - `ROUTECLOAK_APP_TITLE` — dashboard title (default: `Admin Panel`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Priority: ROUTECLOAK_BIND_ADDR > PORT > default 127.0.0.1:8300
        let bind_addr = if let Some(addr) = lookup("ROUTECLOAK_BIND_ADDR") {
            addr.parse().unwrap_or(defaults.bind_addr)
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            defaults.bind_addr
        };

        let log_level = lookup("ROUTECLOAK_LOG_LEVEL").unwrap_or(defaults.log_level);

        let route_secret = lookup("ROUTECLOAK_ROUTE_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.route_secret);

        let app_title = lookup("ROUTECLOAK_APP_TITLE").unwrap_or(defaults.app_title);

        Self {
            bind_addr,
            log_level,
            route_secret,
            app_title,
        }
    }

    /// Whether the compiled-in route secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.route_secret == DEFAULT_ROUTE_SECRET
    }
}
