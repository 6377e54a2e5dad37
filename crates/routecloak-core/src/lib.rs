//! Core library for `RouteCloak`.
//!
//! Contains the keyed route-segment codec, the closed route vocabulary, the
//! process-wide route registry used for link building, and the path
//! resolution logic the router relies on. Everything here is synchronous and
//! CPU-only; nothing performs I/O.
//!
//! The codec obscures module names in URLs. It is not a security boundary:
//! the secret ships with the client and anyone holding it can decode tokens.

pub mod crypto;
pub mod error;
pub mod path;
pub mod registry;
pub mod resolve;
pub mod screens;
pub mod vocabulary;

pub use crypto::{DEFAULT_ROUTE_SECRET, SegmentCodec};
pub use error::{CodecError, RouteError};
pub use path::{RoutePath, ViewMode};
pub use registry::{RouteRegistry, RouteTokenMap};
pub use resolve::{Resolution, ResolvedRoute, resolve};
pub use screens::{ScreenFamily, ScreenTable};
pub use vocabulary::{Namespace, RouteKey};
