//! Configuration for the guild dashboard

use crate::contract::{DashboardError, Permissions};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Public base URL, used to build the OAuth callback URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Leave the port out of the callback URL (reverse proxy setups)
    #[serde(default)]
    pub no_port_in_callback_url: bool,

    /// OAuth client secret. Without it the login, selector and guild
    /// management pages are not mounted.
    #[serde(default)]
    pub secret: Option<String>,

    /// Where `/auth/login` sends the user to start the external OAuth flow
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Emit a tracing span per HTTP request
    #[serde(default)]
    pub log_requests: bool,

    /// Extra CSS injected into every page
    #[serde(default)]
    pub inject_css: Option<String>,

    /// Permissions a member needs to manage a guild
    #[serde(default)]
    pub permissions: Permissions,

    /// Section key -> template file overrides
    #[serde(default)]
    pub theme: BTreeMap<String, PathBuf>,

    /// Texts shown on the pages
    #[serde(default)]
    pub details: Details,
}

/// Bot details displayed by the templates
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Details {
    /// Display name; falls back to the bot user's name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Support server invite
    #[serde(default)]
    pub server_url: Option<String>,

    /// Bot invite URL
    #[serde(default)]
    pub invite_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            port: default_port(),
            no_port_in_callback_url: false,
            secret: None,
            login_url: default_login_url(),
            log_requests: false,
            inject_css: None,
            permissions: Permissions::default(),
            theme: BTreeMap::new(),
            details: Details::default(),
        }
    }
}

impl Config {
    /// Load from an optional YAML file, then `DASHBOARD__*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("DASHBOARD__").split("__"))
            .extract()
            .map_err(|e| DashboardError::Configuration(e.to_string()))
    }

    pub fn has_secret(&self) -> bool {
        self.secret.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// OAuth redirect target handed to the external login flow
    pub fn callback_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.no_port_in_callback_url {
            format!("{base}/auth/callback")
        } else {
            format!("{base}:{}/auth/callback", self.port)
        }
    }
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_login_url() -> String {
    "/".to_string()
}
