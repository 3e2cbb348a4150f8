//! End-to-end tests through the axum router

mod common;

use async_trait::async_trait;
use axum::{body::Body, Router};
use common::*;
use guild_dashboard::{
    Config, Dashboard, DirectoryError, Guild, GuildDirectory, GuildId, Member, SessionUser, UserId,
};
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use std::io::Write;
use std::sync::Arc;
use tower::ServiceExt;

fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(id) = user {
        builder = builder.extension(SessionUser::new(id, format!("user{id}")));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, user: &str, form: &'static str) -> Request<Body> {
    post_as(uri, user, "application/x-www-form-urlencoded", form)
}

fn post_as(uri: &str, user: &str, content_type: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .extension(SessionUser::new(user, format!("user{user}")))
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, location, String::from_utf8(body.to_vec()).unwrap())
}

fn router(config: Config, store: &SettingStore) -> Router {
    build(config, store).router()
}

#[tokio::test]
async fn test_public_pages_render() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    let (status, _, body) = send(&router, get("/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Helper"));
    assert!(body.contains("/auth/login"));

    let (status, _, body) = send(&router, get("/commands", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("!ping"));
}

#[tokio::test]
async fn test_login_and_logout_redirect() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    let (status, location, _) = send(&router, get("/auth/login", None)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("https://discord.example/oauth2/authorize"));

    let (_, location, _) = send(&router, get("/auth/logout", Some(MANAGER))).await;
    assert_eq!(location.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_anonymous_users_are_sent_to_login() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    for uri in ["/selector", "/manage/100"] {
        let (status, location, _) = send(&router, get(uri, None)).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location.as_deref(), Some("/auth/login"), "{uri}");
    }
}

#[tokio::test]
async fn test_selector_lists_manageable_guilds() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    let (status, _, body) = send(&router, get("/selector", Some(ADMIN))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/manage/200"));
    assert!(!body.contains("/manage/100"));
}

#[tokio::test]
async fn test_rejected_guild_requests_redirect_to_selector() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    let cases = [
        get("/manage/999", Some(MANAGER)),
        get("/manage/100", Some(STRANGER)),
        get("/manage/100", Some(MEMBER)),
        post_form("/manage/100", MEMBER, "motd=hijack"),
    ];
    for request in cases {
        let (status, location, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/selector"));
    }
    assert!(store.writes().is_empty());

    let (_, location, _) = send(&router, get("/manage", Some(MANAGER))).await;
    assert_eq!(location.as_deref(), Some("/selector"));
}

#[tokio::test]
async fn test_guild_page_shows_current_values() {
    let store = SettingStore::new();
    store.seed(ALPHA, "prefix", "?");
    store.seed(ALPHA, "log_channel", "100-logs");
    let router = router(config_with_secret(), &store);

    let (status, _, body) = send(&router, get("/manage/100", Some(MANAGER))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"name="prefix" value="?""#));
    assert!(body.contains(r#"<option value="100-logs" selected>"#));
    assert!(body.contains("Edit appearance"));
    assert!(!body.contains(r#"class="alert"#));
}

#[tokio::test]
async fn test_submission_renders_outcome() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    let (status, _, body) =
        send(&router, post_form("/manage/100", MANAGER, "prefix=%3F&welcome=off&welcome=on")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your settings have been saved."));
    assert!(!body.contains("alert error"));
    assert_eq!(store.value(ALPHA, "prefix").as_deref(), Some("?"));
    assert_eq!(store.value(ALPHA, "welcome").as_deref(), Some("true"));

    let (status, _, body) =
        send(&router, post_form("/manage/100", MANAGER, "prefix=toolong&motd=hi")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("alert error"));
    assert!(body.contains("The following items are invalid and have not been saved: prefix."));
    assert_eq!(store.value(ALPHA, "prefix").as_deref(), Some("?"));
    assert_eq!(store.value(ALPHA, "motd").as_deref(), Some("hi"));
}

#[tokio::test]
async fn test_json_submission_is_applied() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    let (status, _, body) = send(
        &router,
        post_as(
            "/manage/100",
            MANAGER,
            "application/json; charset=utf-8",
            r#"{"motd":"hello","welcome":["off","on"],"prefix":"toolong"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The following items are invalid and have not been saved: prefix."));
    assert_eq!(store.written_names(), vec!["motd", "welcome"]);
    assert_eq!(store.value(ALPHA, "motd").as_deref(), Some("hello"));
    assert_eq!(store.value(ALPHA, "welcome").as_deref(), Some("true"));
}

#[tokio::test]
async fn test_unreadable_submissions_are_not_reported_as_saved() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    let (status, _, body) =
        send(&router, post_as("/manage/100", MANAGER, "text/plain", "motd=hello")).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(!body.contains("Your settings have been saved."));

    let (status, _, _) =
        send(&router, post_as("/manage/100", MANAGER, "application/json", "{\"motd\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) =
        send(&router, post_as("/manage/100", MANAGER, "application/json", "[\"motd\"]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_without_secret_only_public_modules_are_mounted() {
    let store = SettingStore::new();
    let router = router(Config::default(), &store);

    let (status, _, body) = send(&router, get("/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("/auth/login"));

    for uri in ["/manage/100", "/selector", "/auth/login"] {
        let (status, _, body) = send(&router, get(uri, Some(MANAGER))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body.contains("This page does not exist."), "{uri}");
    }
}

#[tokio::test]
async fn test_unknown_path_renders_not_found() {
    let store = SettingStore::new();
    let router = router(config_with_secret(), &store);

    let (status, _, body) = send(&router, get("/nope/nothing", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404"));
}

#[tokio::test]
async fn test_partial_theme_falls_back_to_bundled_views() {
    let mut home = tempfile::NamedTempFile::new().unwrap();
    write!(home, "<p>themed home for {{{{bot.name}}}}</p>").unwrap();

    let mut config = config_with_secret();
    config.theme.insert("home".to_string(), home.path().to_path_buf());
    let store = SettingStore::new();
    let router = router(config, &store);

    let (status, _, body) = send(&router, get("/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<p>themed home for Helper</p>");

    let (status, _, body) = send(&router, get("/manage/100", Some(MANAGER))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form"));
}

#[tokio::test]
async fn test_render_failure_is_internal_error() {
    let mut commands = tempfile::NamedTempFile::new().unwrap();
    write!(commands, "{{{{> no_such_partial}}}}").unwrap();

    let mut config = config_with_secret();
    config
        .theme
        .insert("commands".to_string(), commands.path().to_path_buf());
    let store = SettingStore::new();
    let router = router(config, &store);

    let (status, _, body) = send(&router, get("/commands", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.is_empty());
}

#[tokio::test]
async fn test_missing_theme_file_fails_startup() {
    let mut config = config_with_secret();
    config
        .theme
        .insert("guild".to_string(), "/definitely/not/here.hbs".into());

    let mut dashboard = Dashboard::new(config, Arc::new(directory()));
    register_settings(&mut dashboard, &SettingStore::new());
    let err = dashboard.build().unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_duplicate_setting_fails_startup() {
    let store = SettingStore::new();
    let mut dashboard = Dashboard::new(config_with_secret(), Arc::new(directory()));
    register_settings(&mut dashboard, &store);
    guild_dashboard::AddFields::add_text_input(
        &mut dashboard,
        "motd",
        "Duplicate",
        None,
        store.text("motd"),
    );

    let err = dashboard.build().unwrap_err();
    assert!(matches!(err, guild_dashboard::DashboardError::DuplicateSetting { ref name, .. } if name == "motd"));
}

struct UnreachableDirectory;

#[async_trait]
impl GuildDirectory for UnreachableDirectory {
    async fn guild(&self, _guild_id: &GuildId) -> Result<Option<Guild>, DirectoryError> {
        Err(DirectoryError::Unavailable("gateway down".to_string()))
    }

    async fn fetch_member(
        &self,
        _guild: &Guild,
        _user_id: &UserId,
    ) -> Result<Option<Member>, DirectoryError> {
        Err(DirectoryError::Unavailable("gateway down".to_string()))
    }

    async fn guilds(&self) -> Result<Vec<Guild>, DirectoryError> {
        Err(DirectoryError::Unavailable("gateway down".to_string()))
    }
}

#[tokio::test]
async fn test_directory_failure_fails_only_the_request() {
    let store = SettingStore::new();
    let mut dashboard = Dashboard::new(config_with_secret(), Arc::new(UnreachableDirectory));
    register_settings(&mut dashboard, &store);
    let router = dashboard.build().unwrap().router();

    let (status, _, _) = send(&router, get("/manage/100", Some(MANAGER))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _, _) = send(&router, get("/", None)).await;
    assert_eq!(status, StatusCode::OK);
}
