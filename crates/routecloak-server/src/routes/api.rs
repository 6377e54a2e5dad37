//! JSON endpoints for link-building clients.
//!
//! - `GET /api/routes` — the full symbolic-name to token map
//! - `GET /api/resolve?path=...` — decode-or-redirect result for a path
//! - `POST /api/links` — build a path from symbolic names and a view mode

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use routecloak_core::{Resolution, RouteKey, RouteTokenMap, ViewMode, resolve};

use crate::error::AppError;
use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/routes", get(route_tokens))
        .route("/resolve", get(resolve_path))
        .route("/links", post(build_link))
}

async fn route_tokens(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RouteTokenMap>, AppError> {
    Ok(Json(state.registry.get_encrypted_route()?.clone()))
}

#[derive(Debug, Deserialize)]
struct ResolveParams {
    path: String,
}

async fn resolve_path(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveParams>,
) -> Json<serde_json::Value> {
    let body = match resolve(&state.codec, &state.screens, &params.path) {
        Resolution::Screen(route) => serde_json::json!({ "resolved": true, "route": route }),
        Resolution::Redirect { to } => serde_json::json!({ "resolved": false, "redirect": to }),
    };
    Json(body)
}

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize)]
struct LinkRequest {
    /// Symbolic name of the top-level module, e.g. `encMasters`.
    master: String,
    /// Symbolic name of the sub-module, e.g. `encContinents`.
    module: String,
    /// `list` (default), `new`, or `edit`.
    #[serde(default)]
    mode: Option<String>,
    /// Record id, required for `edit`.
    #[serde(default)]
    id: Option<String>,
    /// Prefix the path with `/admin`.
    #[serde(default)]
    admin: bool,
}

#[derive(Debug, Serialize)]
struct LinkResponse {
    path: String,
}

async fn build_link(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let master = symbol(&req.master)?;
    let module = symbol(&req.module)?;
    let mode = match (req.mode.as_deref().unwrap_or("list"), req.id) {
        ("list", _) => ViewMode::List,
        ("new", _) => ViewMode::New,
        ("edit", Some(id)) if !id.is_empty() => ViewMode::Edit { id },
        ("edit", _) => {
            return Err(AppError::BadRequest("edit links require an id".to_owned()));
        }
        (other, _) => {
            return Err(AppError::BadRequest(format!("unknown view mode '{other}'")));
        }
    };

    let path = if req.admin {
        state.registry.admin_link(master, module, &mode)?
    } else {
        state.registry.link(master, module, &mode)?
    };
    Ok(Json(LinkResponse { path }))
}

fn symbol(name: &str) -> Result<RouteKey, AppError> {
    RouteKey::from_symbol(name)
        .ok_or_else(|| AppError::BadRequest(format!("unknown route symbol '{name}'")))
}
