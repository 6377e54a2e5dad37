//! Parsing of obfuscated admin-panel paths.
//!
//! Accepted shapes, each optionally prefixed with a literal `admin` segment:
//!
//! ```text
//! /<encMaster>/<encModule>
//! /<encMaster>/<encModule>/new
//! /<encMaster>/<encModule>/<id>/edit
//! ```
//!
//! Parsing is purely structural. The two tokens are not decoded here.

use serde::Serialize;

/// Literal prefix segment some admin links carry.
pub const ADMIN_PREFIX: &str = "admin";

const NEW_SEGMENT: &str = "new";
const EDIT_SEGMENT: &str = "edit";

/// Which variant of a screen a path asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewMode {
    List,
    New,
    Edit { id: String },
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::New => "new",
            Self::Edit { .. } => "edit",
        }
    }

    /// The record identifier, present only in edit mode.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Edit { id } => Some(id),
            Self::List | Self::New => None,
        }
    }
}

/// A structurally valid admin-panel path with its tokens still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    /// Whether the path carried the `admin` prefix.
    pub admin: bool,
    /// Encoded top-level module token.
    pub enc_master: String,
    /// Encoded sub-module token.
    pub enc_module: String,
    pub mode: ViewMode,
}

impl RoutePath {
    /// Parse a request path. Query strings and fragments are ignored, as are
    /// empty segments from doubled or trailing slashes.
    ///
    /// The record id and the tokens are taken exactly as they appear.
    pub fn parse(raw: &str) -> Option<Self> {
        let path = raw.split(['?', '#']).next().unwrap_or_default();
        // Longest valid shape is 5 segments; anything past that is rejected
        // without collecting the rest.
        let mut segments: Vec<&str> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .take(6)
            .collect();

        let admin = segments.first() == Some(&ADMIN_PREFIX);
        if admin {
            segments.remove(0);
        }

        let (enc_master, enc_module, mode) = match segments.as_slice() {
            [master, module] => (*master, *module, ViewMode::List),
            [master, module, NEW_SEGMENT] => (*master, *module, ViewMode::New),
            [master, module, id, EDIT_SEGMENT] => (
                *master,
                *module,
                ViewMode::Edit {
                    id: (*id).to_owned(),
                },
            ),
            _ => return None,
        };

        Some(Self {
            admin,
            enc_master: enc_master.to_owned(),
            enc_module: enc_module.to_owned(),
            mode,
        })
    }

    /// Render back into a path. The record id is written verbatim.
    pub fn to_path(&self) -> String {
        let mut path = String::new();
        if self.admin {
            path.push('/');
            path.push_str(ADMIN_PREFIX);
        }
        path.push('/');
        path.push_str(&self.enc_master);
        path.push('/');
        path.push_str(&self.enc_module);
        match &self.mode {
            ViewMode::List => {}
            ViewMode::New => {
                path.push('/');
                path.push_str(NEW_SEGMENT);
            }
            ViewMode::Edit { id } => {
                path.push('/');
                path.push_str(id);
                path.push('/');
                path.push_str(EDIT_SEGMENT);
            }
        }
        path
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_path() {
        let p = RoutePath::parse("/tokA/tokB").unwrap();
        assert!(!p.admin);
        assert_eq!(p.enc_master, "tokA");
        assert_eq!(p.enc_module, "tokB");
        assert_eq!(p.mode, ViewMode::List);
    }

    #[test]
    fn parses_new_path() {
        let p = RoutePath::parse("/tokA/tokB/new").unwrap();
        assert_eq!(p.mode, ViewMode::New);
    }

    #[test]
    fn parses_edit_path_with_verbatim_id() {
        let p = RoutePath::parse("/tokA/tokB/abc123/edit").unwrap();
        assert_eq!(
            p.mode,
            ViewMode::Edit {
                id: "abc123".to_owned()
            }
        );
        assert_eq!(p.mode.id(), Some("abc123"));
    }

    #[test]
    fn parses_admin_prefix() {
        let p = RoutePath::parse("/admin/tokA/tokB/new").unwrap();
        assert!(p.admin);
        assert_eq!(p.enc_master, "tokA");
        assert_eq!(p.mode, ViewMode::New);
    }

    #[test]
    fn tolerates_trailing_slash_and_query() {
        let p = RoutePath::parse("/tokA/tokB/?page=2#top").unwrap();
        assert_eq!(p.mode, ViewMode::List);
        assert_eq!(p.enc_module, "tokB");
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in [
            "/",
            "",
            "/tokA",
            "/admin/tokA",
            "/tokA/tokB/abc123",
            "/tokA/tokB/new/edit/x",
            "/tokA/tokB/abc/edit/extra",
            "/a/b/c/d/e/f/g/h",
        ] {
            assert!(RoutePath::parse(raw).is_none(), "parsed {raw:?}");
        }
    }

    #[test]
    fn edit_id_passes_through_unchanged() {
        let p = RoutePath::parse("/tokA/tokB/a%20b/edit").unwrap();
        assert_eq!(p.mode.id(), Some("a%20b"));

        let p = RoutePath::parse("/tokA/tokB/%FF/edit").unwrap();
        assert_eq!(p.mode.id(), Some("%FF"));
    }

    #[test]
    fn to_path_reverses_parse() {
        for raw in [
            "/tokA/tokB",
            "/tokA/tokB/new",
            "/admin/tokA/tokB/abc123/edit",
            "/tokA/tokB/a%2Fb/edit",
            "/tokA/tokB/%FF/edit",
        ] {
            assert_eq!(RoutePath::parse(raw).unwrap().to_path(), raw);
        }
    }
}
