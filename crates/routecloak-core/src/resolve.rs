//! Decode-or-redirect resolution of incoming paths.
//!
//! Each token is decoded independently through the codec. If the path shape
//! is wrong, either token fails to decode, or the decoded pair has no screen,
//! the caller is sent back to the application root. Nothing is surfaced to
//! the user.

use serde::Serialize;
use tracing::debug;

use crate::crypto::SegmentCodec;
use crate::path::{RoutePath, ViewMode};
use crate::screens::ScreenTable;

/// Where unresolvable paths are sent.
pub const ROOT_PATH: &str = "/";

/// Plain names recovered from a path, before any screen lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedPath {
    pub admin: bool,
    pub master: String,
    pub module: String,
    #[serde(flatten)]
    pub mode: ViewMode,
}

impl DecodedPath {
    /// Parse and decode a raw path. `None` on a bad shape or either token
    /// failing to decode.
    pub fn decode(codec: &SegmentCodec, raw_path: &str) -> Option<Self> {
        let path = RoutePath::parse(raw_path)?;
        let master = codec.decrypt_segment(&path.enc_master)?;
        let module = codec.decrypt_segment(&path.enc_module)?;
        Some(Self {
            admin: path.admin,
            master,
            module,
            mode: path.mode,
        })
    }
}

/// A path that resolved to a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    #[serde(flatten)]
    pub path: DecodedPath,
    /// Component name, e.g. `ContinentList`.
    pub screen: String,
    pub title: &'static str,
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Screen(ResolvedRoute),
    Redirect { to: &'static str },
}

impl Resolution {
    fn to_root() -> Self {
        Self::Redirect { to: ROOT_PATH }
    }
}

/// Resolve a raw request path to a screen, or to a redirect to the root.
pub fn resolve(codec: &SegmentCodec, table: &ScreenTable, raw_path: &str) -> Resolution {
    let Some(decoded) = DecodedPath::decode(codec, raw_path) else {
        debug!("path did not decode, redirecting to root");
        return Resolution::to_root();
    };

    let Some(family) = table.lookup(&decoded.master, &decoded.module) else {
        debug!(
            master = %decoded.master,
            module = %decoded.module,
            "no screen for decoded pair, redirecting to root"
        );
        return Resolution::to_root();
    };

    let screen = family.screen_for(&decoded.mode);
    Resolution::Screen(ResolvedRoute {
        path: decoded,
        screen,
        title: family.title,
    })
}
