//! Dashboard and screen pages.
//!
//! The dashboard at `/` lists every screen, with links built from the route
//! registry. Any other path is decoded as an obfuscated screen path; paths
//! that do not resolve redirect to the dashboard without an error page.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;

use routecloak_core::{Resolution, ResolvedRoute, RouteKey, ViewMode, resolve};

use crate::error::AppError;
use crate::state::AppState;

/// Build the UI router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(dashboard))
}

/// Navigation menu grouped by top-level module.
async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let mut menu = String::new();
    let mut current: Option<RouteKey> = None;

    for entry in state.screens.entries() {
        if current != Some(entry.master) {
            if current.is_some() {
                menu.push_str("</ul></section>\n");
            }
            menu.push_str(&format!(
                "<section><h2>{}</h2><ul>",
                escape(&module_heading(entry.master))
            ));
            current = Some(entry.master);
        }
        let list = state
            .registry
            .link(entry.master, entry.module, &ViewMode::List)?;
        let new = state
            .registry
            .link(entry.master, entry.module, &ViewMode::New)?;
        menu.push_str(&format!(
            "<li><a href=\"{list}\">{title}</a> <a class=\"new\" href=\"{new}\">+</a></li>",
            title = escape(entry.family.title),
        ));
    }
    if current.is_some() {
        menu.push_str("</ul></section>\n");
    }

    Ok(Html(page(&state.app_title, "Dashboard", &menu)))
}

/// Fallback for every unmatched path: render the screen or go home.
///
/// Screens are read-only pages, so anything but `GET`/`HEAD` gets a 405.
pub async fn screen_or_redirect(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    match resolve(&state.codec, &state.screens, uri.path()) {
        Resolution::Screen(route) => Html(screen_page(&state.app_title, &route)).into_response(),
        Resolution::Redirect { to } => Redirect::to(to).into_response(),
    }
}

fn screen_page(app_title: &str, route: &ResolvedRoute) -> String {
    let id_attr = route
        .path
        .mode
        .id()
        .map(|id| format!(" data-id=\"{}\"", escape(id)))
        .unwrap_or_default();
    let body = format!(
        "<main data-screen=\"{screen}\" data-mode=\"{mode}\"{id_attr}><h2>{title}</h2></main>\n\
         <p><a href=\"/\">Back to dashboard</a></p>\n",
        screen = escape(&route.screen),
        mode = route.path.mode.as_str(),
        title = escape(route.title),
    );
    page(app_title, route.title, &body)
}

fn module_heading(master: RouteKey) -> String {
    master
        .plain()
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn page(app_title: &str, heading: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{heading} · {app}</title>\n</head>\n<body>\n<header><h1>{app}</h1></header>\n\
         {body}</body>\n</html>\n",
        heading = escape(heading),
        app = escape(app_title),
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
