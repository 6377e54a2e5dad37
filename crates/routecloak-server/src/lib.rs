//! `RouteCloak` HTTP server.
//!
//! Stands in for the admin panel's client-side router: decodes obfuscated
//! paths and either renders the matching screen or redirects to `/`, serves
//! the navigation menu, and exposes the route registry as JSON for
//! link-building clients.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
