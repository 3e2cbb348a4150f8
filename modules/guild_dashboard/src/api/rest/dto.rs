//! Template view models
//!
//! Every page is rendered from a [`Page`]: the layout fields shared by all
//! views flattened together with a page-specific body.

use crate::contract::{CommandDescriptor, SessionUser};
use serde::Serialize;

/// Bot details shown in the navigation bar and on the home page
#[derive(Debug, Clone, Serialize)]
pub struct BotDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_url: Option<String>,
}

/// Fields every template receives
#[derive(Debug, Clone, Serialize)]
pub struct LayoutDto {
    pub bot: BotDto,
    pub user: Option<SessionUser>,
    pub is_logged: bool,
    /// Whether `/auth/login` is mounted
    pub login_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inject_css: Option<String>,
}

/// A rendered page: layout plus body
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    #[serde(flatten)]
    pub layout: LayoutDto,
    #[serde(flatten)]
    pub body: T,
}

/// Body for pages without their own data
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyBody {}

#[derive(Debug, Clone, Serialize)]
pub struct CommandsBody {
    pub commands: Vec<CommandDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuildDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorBody {
    pub guilds: Vec<GuildDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuildBody {
    pub guild: GuildDto,
    pub alert: Option<String>,
    #[serde(rename = "hasErrors")]
    pub has_errors: bool,
    pub settings: Vec<SettingDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorEntryDto {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModalDto {
    pub title: String,
    pub open_button_label: String,
    pub close_button_label: String,
    pub save_button_label: String,
}

/// One entry of the settings form.
///
/// Modals carry their labels in `modal` and their fields in `settings`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingDto {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<SelectorEntryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<ModalDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<SettingDto>,
}
