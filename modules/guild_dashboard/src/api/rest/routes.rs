//! Route registration following the route loader's mount plan

use super::{
    error::Problem,
    extract::{CurrentUser, MaybeUser},
    handlers::{self, AppState},
};
use crate::domain::RouteModule;
use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, HeaderName, Method},
    response::{Html, Redirect, Response},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the router for the given mount plan.
///
/// Modules are merged in plan order; the catch-all becomes the router
/// fallback so it only sees paths no other module matched.
pub fn register_routes(plan: &[RouteModule], state: Arc<AppState>, log_requests: bool) -> Router {
    let mut router = Router::new();

    for module in plan {
        router = match module_router(*module) {
            Some(routes) => {
                tracing::debug!(module = ?module, path = ?module.mount_path(), "Mounting route module");
                router.merge(routes)
            }
            None => router.fallback(not_found_handler),
        };
    }

    let mut router = router.layer(Extension(state)).layer(cors_layer());
    if log_requests {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// Routes of a path-mounted module; `None` for the catch-all
fn module_router(module: RouteModule) -> Option<Router> {
    let routes = match module {
        RouteModule::Home => Router::new().route("/", get(home_handler)),
        RouteModule::Commands => Router::new().route("/commands", get(commands_handler)),
        RouteModule::Auth => Router::new()
            .route("/auth/login", get(login_handler))
            .route("/auth/logout", get(handlers::logout)),
        RouteModule::Manage => Router::new()
            .route("/manage", get(handlers::manage_index))
            .route("/manage/", get(handlers::manage_index))
            .route(
                "/manage/{guild_id}",
                get(manage_guild_handler).post(update_guild_handler),
            ),
        RouteModule::Selector => Router::new().route("/selector", get(selector_handler)),
        RouteModule::CatchAll => return None,
    };
    Some(routes)
}

/// Any origin, no credentials
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([HeaderName::from_static("x-requested-with"), header::CONTENT_TYPE])
}

// ===== Handler wrappers that extract state from Extension =====

async fn home_handler(
    Extension(state): Extension<Arc<AppState>>,
    user: MaybeUser,
) -> Result<Html<String>, Problem> {
    handlers::home(state, user).await
}

async fn commands_handler(
    Extension(state): Extension<Arc<AppState>>,
    user: MaybeUser,
) -> Result<Html<String>, Problem> {
    handlers::commands(state, user).await
}

async fn login_handler(Extension(state): Extension<Arc<AppState>>) -> Redirect {
    handlers::login(state).await
}

async fn selector_handler(
    Extension(state): Extension<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Html<String>, Problem> {
    handlers::selector(state, user).await
}

async fn manage_guild_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<String>,
    user: CurrentUser,
) -> Result<Response, Problem> {
    handlers::manage_guild(state, path, user).await
}

async fn update_guild_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Path<String>,
    user: CurrentUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Problem> {
    handlers::update_guild(state, path, user, headers, body).await
}

async fn not_found_handler(Extension(state): Extension<Arc<AppState>>, user: MaybeUser) -> Response {
    handlers::not_found(state, user).await
}
