//! Process-wide cache of route tokens for link building.
//!
//! The registry encodes the whole vocabulary once, on first access, and hands
//! the same map to every menu, list page, and form that needs to build a
//! link. It is write-path infrastructure only: incoming paths are decoded
//! through the [`SegmentCodec`] directly, so deep links resolve whether or not
//! the registry has been filled.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::debug;

use crate::crypto::SegmentCodec;
use crate::error::RouteError;
use crate::path::{RoutePath, ViewMode};
use crate::vocabulary::{Namespace, RouteKey};

/// Symbolic name -> token, e.g. `encContinents -> "Xk3..."`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTokenMap {
    tokens: BTreeMap<&'static str, String>,
}

impl RouteTokenMap {
    fn build(codec: &SegmentCodec) -> Result<Self, RouteError> {
        let mut tokens = BTreeMap::new();
        for key in RouteKey::ALL {
            tokens.insert(key.symbol(), codec.encrypt_segment(key.plain())?);
        }
        Ok(Self { tokens })
    }

    /// Token for a route key.
    pub fn token(&self, key: RouteKey) -> Option<&str> {
        self.get(key.symbol())
    }

    /// Token for a symbolic name such as `encContinents`.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.tokens.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.tokens.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Lazily-filled registry bound to one codec.
///
/// Construct once at startup and share it (by reference or `Arc`). Concurrent
/// first calls may each encode the vocabulary; only one result is kept, and
/// both are identical.
#[derive(Debug)]
pub struct RouteRegistry {
    codec: Arc<SegmentCodec>,
    cache: OnceLock<RouteTokenMap>,
}

impl RouteRegistry {
    pub fn new(codec: Arc<SegmentCodec>) -> Self {
        Self {
            codec,
            cache: OnceLock::new(),
        }
    }

    /// The codec this registry encodes with.
    pub fn codec(&self) -> &Arc<SegmentCodec> {
        &self.codec
    }

    /// Return the token map, filling it on first call.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Codec`] if a vocabulary entry fails to encode.
    pub fn get_encrypted_route(&self) -> Result<&RouteTokenMap, RouteError> {
        if let Some(map) = self.cache.get() {
            return Ok(map);
        }
        let map = RouteTokenMap::build(&self.codec)?;
        debug!(entries = map.len(), "route registry populated");
        Ok(self.cache.get_or_init(|| map))
    }

    /// Whether the cache has been filled.
    pub fn is_populated(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Drop the cached map. The next access re-encodes the vocabulary.
    pub fn reset(&mut self) {
        if self.cache.take().is_some() {
            debug!("route registry reset");
        }
    }

    /// Build `/<encMaster>/<encModule>[/new | /<id>/edit]`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotAModule`] / [`RouteError::NotASubModule`] if
    /// the keys are in the wrong positions, [`RouteError::InvalidRecordId`]
    /// if an edit id is not a single path segment, or a codec error while
    /// filling the cache.
    pub fn link(
        &self,
        master: RouteKey,
        module: RouteKey,
        mode: &ViewMode,
    ) -> Result<String, RouteError> {
        self.route_path(false, master, module, mode)
            .map(|p| p.to_path())
    }

    /// Same as [`link`](Self::link) with the `/admin` prefix.
    ///
    /// # Errors
    ///
    /// See [`link`](Self::link).
    pub fn admin_link(
        &self,
        master: RouteKey,
        module: RouteKey,
        mode: &ViewMode,
    ) -> Result<String, RouteError> {
        self.route_path(true, master, module, mode)
            .map(|p| p.to_path())
    }

    fn route_path(
        &self,
        admin: bool,
        master: RouteKey,
        module: RouteKey,
        mode: &ViewMode,
    ) -> Result<RoutePath, RouteError> {
        if master.namespace() != Namespace::Module {
            return Err(RouteError::NotAModule {
                symbol: master.symbol(),
            });
        }
        if module.namespace() != Namespace::SubModule {
            return Err(RouteError::NotASubModule {
                symbol: module.symbol(),
            });
        }
        if let Some(id) = mode.id() {
            if id.is_empty() || id.contains(['/', '?', '#']) {
                return Err(RouteError::InvalidRecordId { id: id.to_owned() });
            }
        }

        let map = self.get_encrypted_route()?;
        let token = |key: RouteKey| {
            map.token(key)
                .map(str::to_owned)
                .ok_or(RouteError::MissingToken {
                    symbol: key.symbol(),
                })
        };

        Ok(RoutePath {
            admin,
            enc_master: token(master)?,
            enc_module: token(module)?,
            mode: mode.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn registry() -> RouteRegistry {
        RouteRegistry::new(Arc::new(SegmentCodec::new("registry-test").unwrap()))
    }

    #[test]
    fn fills_lazily() {
        let reg = registry();
        assert!(!reg.is_populated());
        let map = reg.get_encrypted_route().unwrap();
        assert_eq!(map.len(), RouteKey::ALL.len());
        assert!(reg.is_populated());
    }

    #[test]
    fn repeated_calls_return_the_same_map() {
        let reg = registry();
        let first = reg.get_encrypted_route().unwrap();
        let second = reg.get_encrypted_route().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn entry_matches_direct_encoding() {
        let reg = registry();
        let map = reg.get_encrypted_route().unwrap();
        let direct = reg.codec().encrypt_segment("continents").unwrap();
        assert_eq!(map.get("encContinents"), Some(direct.as_str()));
        assert_eq!(map.token(RouteKey::Continents), Some(direct.as_str()));
    }

    #[test]
    fn reset_rebuilds_identical_map() {
        let mut reg = registry();
        let before = reg.get_encrypted_route().unwrap().clone();
        reg.reset();
        assert!(!reg.is_populated());
        let after = reg.get_encrypted_route().unwrap();
        assert_eq!(&before, after);
    }

    #[test]
    fn independent_registries_agree() {
        let a = registry();
        let b = registry();
        assert_eq!(a.get_encrypted_route().unwrap(), b.get_encrypted_route().unwrap());
    }

    #[test]
    fn different_secrets_give_different_tokens() {
        let a = registry();
        let b = RouteRegistry::new(Arc::new(SegmentCodec::new("other").unwrap()));
        assert_ne!(
            a.get_encrypted_route().unwrap().token(RouteKey::Masters),
            b.get_encrypted_route().unwrap().token(RouteKey::Masters)
        );
    }

    #[test]
    fn serializes_as_flat_object() {
        let reg = registry();
        let json = serde_json::to_value(reg.get_encrypted_route().unwrap()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), RouteKey::ALL.len());
        assert!(obj.get("encEmMasters").unwrap().is_string());
    }

    #[test]
    fn builds_links_for_each_mode() {
        let reg = registry();
        let map = reg.get_encrypted_route().unwrap();
        let m = map.token(RouteKey::Masters).unwrap();
        let c = map.token(RouteKey::Continents).unwrap();

        assert_eq!(
            reg.link(RouteKey::Masters, RouteKey::Continents, &ViewMode::List)
                .unwrap(),
            format!("/{m}/{c}")
        );
        assert_eq!(
            reg.link(RouteKey::Masters, RouteKey::Continents, &ViewMode::New)
                .unwrap(),
            format!("/{m}/{c}/new")
        );
        assert_eq!(
            reg.admin_link(
                RouteKey::Masters,
                RouteKey::Continents,
                &ViewMode::Edit {
                    id: "abc123".to_owned()
                }
            )
            .unwrap(),
            format!("/admin/{m}/{c}/abc123/edit")
        );
    }

    #[test]
    fn edit_link_keeps_id_verbatim() {
        let reg = registry();
        let link = reg
            .link(
                RouteKey::Admins,
                RouteKey::Users,
                &ViewMode::Edit {
                    id: "a%20b".to_owned(),
                },
            )
            .unwrap();
        assert!(link.ends_with("/a%20b/edit"), "{link}");
    }

    #[test]
    fn edit_link_rejects_ids_that_split_the_path() {
        let reg = registry();
        for id in ["", "a/b", "a?b", "a#b"] {
            let result = reg.link(
                RouteKey::Admins,
                RouteKey::Users,
                &ViewMode::Edit { id: id.to_owned() },
            );
            assert!(
                matches!(result, Err(RouteError::InvalidRecordId { .. })),
                "accepted {id:?}"
            );
        }
    }

    #[test]
    fn link_rejects_swapped_keys() {
        let reg = registry();
        assert!(matches!(
            reg.link(RouteKey::Continents, RouteKey::Masters, &ViewMode::List),
            Err(RouteError::NotAModule {
                symbol: "encContinents"
            })
        ));
        assert!(matches!(
            reg.link(RouteKey::Masters, RouteKey::Admins, &ViewMode::List),
            Err(RouteError::NotASubModule { symbol: "encAdmins" })
        ));
    }
}
