//! HTTP request handlers - thin layer over the guild config controller

use super::{
    dto::*,
    error::{map_domain_error, Problem},
    extract::{CurrentUser, MaybeUser},
};
use crate::contract::{DashboardError, GuildId, SessionUser};
use crate::domain::{
    Access, FormSubmission, GuildConfigController, GuildContext, SectionKey,
};
use crate::infra::TemplateRenderer;
use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;

/// Guild selector path; every rejected guild request lands here
pub const SELECTOR_PATH: &str = "/selector";

const DEFAULT_BOT_NAME: &str = "Dashboard";

/// Shared request state
#[derive(Debug)]
pub struct AppState {
    pub controller: GuildConfigController,
    pub renderer: TemplateRenderer,
    /// Whether the auth module is mounted
    pub login_enabled: bool,
}

impl AppState {
    fn layout(&self, user: Option<SessionUser>) -> LayoutDto {
        let config = self.controller.dashboard().config();
        let name = config
            .details
            .name
            .clone()
            .or_else(|| self.controller.directory().bot_name())
            .unwrap_or_else(|| DEFAULT_BOT_NAME.to_string());

        LayoutDto {
            bot: BotDto {
                name,
                description: config.details.description.clone(),
                server_url: config.details.server_url.clone(),
                invite_url: config.details.invite_url.clone(),
            },
            is_logged: user.is_some(),
            user,
            login_enabled: self.login_enabled,
            inject_css: config.inject_css.clone(),
        }
    }

    /// Render `section` with the theme override if there is one
    fn render<T: Serialize>(
        &self,
        section: SectionKey,
        user: Option<SessionUser>,
        body: T,
    ) -> Result<Html<String>, Problem> {
        let template = self.controller.dashboard().theme().resolve(section);
        let page = Page {
            layout: self.layout(user),
            body,
        };
        self.renderer
            .render(&template, &page)
            .map(Html)
            .map_err(map_domain_error)
    }

    async fn render_guild(
        &self,
        ctx: &GuildContext,
        user: SessionUser,
        alert: Option<String>,
        has_errors: bool,
    ) -> Result<Html<String>, Problem> {
        let settings = self
            .controller
            .snapshot(ctx)
            .await
            .into_iter()
            .map(Into::into)
            .collect();

        let body = GuildBody {
            guild: ctx.guild().clone().into(),
            alert,
            has_errors,
            settings,
        };
        self.render(SectionKey::Guild, Some(user), body)
    }

    async fn authorize(&self, guild_id: &GuildId, user: &SessionUser) -> Result<Access, Problem> {
        self.controller
            .authorize(guild_id, &user.id)
            .await
            .map_err(|e| map_domain_error(DashboardError::from(e)))
    }
}

// ===== Home / commands =====

pub async fn home(state: Arc<AppState>, MaybeUser(user): MaybeUser) -> Result<Html<String>, Problem> {
    state.render(SectionKey::Home, user, EmptyBody::default())
}

pub async fn commands(
    state: Arc<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Html<String>, Problem> {
    let body = CommandsBody {
        commands: state.controller.dashboard().commands().to_vec(),
    };
    state.render(SectionKey::Commands, user, body)
}

// ===== Auth =====

/// Hand off to the external OAuth flow
pub async fn login(state: Arc<AppState>) -> Redirect {
    Redirect::to(&state.controller.dashboard().config().login_url)
}

pub async fn logout() -> Redirect {
    Redirect::to("/")
}

// ===== Selector =====

pub async fn selector(
    state: Arc<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, Problem> {
    let guilds = state
        .controller
        .manageable_guilds(&user.id)
        .await
        .map_err(|e| map_domain_error(e.into()))?;

    let body = SelectorBody {
        guilds: guilds.into_iter().map(Into::into).collect(),
    };
    state.render(SectionKey::Selector, Some(user), body)
}

// ===== Guild management =====

pub async fn manage_index() -> Redirect {
    Redirect::to(SELECTOR_PATH)
}

/// Settings page with current values
pub async fn manage_guild(
    state: Arc<AppState>,
    Path(guild_id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, Problem> {
    let guild_id = GuildId::new(guild_id);
    let ctx = match state.authorize(&guild_id, &user).await? {
        Access::Granted(ctx) => ctx,
        Access::Rejected(_) => return Ok(Redirect::to(SELECTOR_PATH).into_response()),
    };

    let html = state.render_guild(&ctx, user, None, false).await?;
    Ok(html.into_response())
}

/// Apply submitted settings and re-render with the outcome
pub async fn update_guild(
    state: Arc<AppState>,
    Path(guild_id): Path<String>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Problem> {
    let guild_id = GuildId::new(guild_id);
    let ctx = match state.authorize(&guild_id, &user).await? {
        Access::Granted(ctx) => ctx,
        Access::Rejected(_) => return Ok(Redirect::to(SELECTOR_PATH).into_response()),
    };

    let form = decode_submission(&headers, &body)?;
    let outcome = state.controller.apply(&ctx, &form).await;

    let html = state
        .render_guild(&ctx, user, Some(outcome.alert()), outcome.has_errors())
        .await?;
    Ok(html.into_response())
}

/// Decode the settings form by content type; urlencoded and JSON bodies are accepted
fn decode_submission(headers: &HeaderMap, body: &[u8]) -> Result<FormSubmission, Problem> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "application/x-www-form-urlencoded" => Ok(FormSubmission::from_urlencoded(body)),
        "application/json" => FormSubmission::from_json(body).map_err(map_domain_error),
        _ => {
            tracing::debug!(content_type, "Unsupported settings submission content type");
            Err(Problem::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Settings must be submitted as application/x-www-form-urlencoded or application/json",
            ))
        }
    }
}

// ===== Fallback =====

pub async fn not_found(state: Arc<AppState>, MaybeUser(user): MaybeUser) -> Response {
    match state.render(SectionKey::NotFound, user, EmptyBody::default()) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(problem) => problem.into_response(),
    }
}
