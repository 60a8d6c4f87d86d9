use anyhow::{Context, Result};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info};
use warp::http::StatusCode;
use warp::path::FullPath;
use warp::{Filter, Rejection, Reply};

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::documents::context_index;
use crate::render::{render_route, RenderOptions};
use crate::resolver::Route;

/// Cookie holding the last selected document context index.
pub const CONTEXT_COOKIE: &str = "documentManagementContext";
const CONTEXT_COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

const SITE_CSS: &str = include_str!("../../assets/site.css");
const SITE_JS: &str = include_str!("../../assets/site.js");

pub struct AppState {
    pub catalog: Catalog,
    pub options: RenderOptions,
}

pub async fn run_server(config: SiteConfig, catalog: Catalog) -> Result<()> {
    let addr = config.addr();
    let state = Arc::new(AppState {
        catalog,
        options: config.render_options(),
    });

    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutting down");
            }
        })
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server running on http://{bound}");
    server.await;

    Ok(())
}

pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let css_route = warp::path!("assets" / "site.css")
        .and(warp::get())
        .map(|| warp::reply::with_header(SITE_CSS, "content-type", "text/css; charset=utf-8"));

    let js_route = warp::path!("assets" / "site.js").and(warp::get()).map(|| {
        warp::reply::with_header(SITE_JS, "content-type", "text/javascript; charset=utf-8")
    });

    let health_route = warp::path!("health")
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    // Every document context expanded into its endpoints.
    let catalog_route = warp::path!("catalog.json")
        .and(warp::get())
        .and(with_state(state.clone()))
        .map(|state: Arc<AppState>| warp::reply::json(&state.catalog.expanded()));

    let page_route = warp::get()
        .or(warp::head())
        .unify()
        .and(warp::path::full())
        .and(warp::query::<HashMap<String, String>>())
        .and(warp::cookie::optional(CONTEXT_COOKIE))
        .and(with_state(state))
        .and_then(render_page);

    css_route
        .or(js_route)
        .or(health_route)
        .or(catalog_route)
        .or(page_route)
        .with(warp::cors().allow_any_origin())
        .with(warp::trace::request())
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

async fn render_page(
    path: FullPath,
    query: HashMap<String, String>,
    saved_context: Option<String>,
    state: Arc<AppState>,
) -> Result<Box<dyn Reply>, Rejection> {
    let Some(route) = Route::parse(path.as_str()) else {
        return Err(warp::reject::not_found());
    };

    let selection = select_context(
        &state.catalog,
        &route,
        query.get("context").map(String::as_str),
        saved_context.as_deref(),
    );
    let page = render_route(&state.catalog, &route, selection.index, &state.options);
    let status = if page.found {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    let reply = warp::reply::with_status(warp::reply::html(page.into_string()), status);
    if selection.persist {
        let cookie = format!(
            "{CONTEXT_COOKIE}={}; Path=/; Max-Age={CONTEXT_COOKIE_MAX_AGE}; SameSite=Lax",
            selection.index
        );
        return Ok(Box::new(warp::reply::with_header(reply, "set-cookie", cookie)));
    }
    Ok(Box::new(reply))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContextSelection {
    index: usize,
    /// Set when `?context=` named a context and the choice should be saved.
    persist: bool,
}

/// `?context=<id>` wins over the saved cookie. Routes outside context
/// sections always use index 0.
fn select_context(
    catalog: &Catalog,
    route: &Route,
    requested: Option<&str>,
    saved: Option<&str>,
) -> ContextSelection {
    let section = route
        .section_id()
        .and_then(|id| catalog.section(id))
        .filter(|section| section.has_contexts());
    let Some(section) = section else {
        return ContextSelection {
            index: 0,
            persist: false,
        };
    };

    if let Some(requested) = requested {
        match section.context(requested) {
            Some((index, _)) => {
                return ContextSelection {
                    index,
                    persist: true,
                };
            }
            None => debug!(context = requested, "ignoring unknown document context"),
        }
    }

    ContextSelection {
        index: context_index(saved, section.contexts.len()),
        persist: false,
    }
}
