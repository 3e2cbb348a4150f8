//! Contract models for the guild dashboard
//!
//! These models describe guilds, members and the identities the dashboard
//! works with. They are transport-agnostic; templates receive their own view
//! structs from `api::rest::dto`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Guild identifier as issued by the chat platform (snowflake string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(pub String);

/// User identifier as issued by the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl GuildId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags! {
    /// Guild permission bitset, bit positions follow the Discord API
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE = 1 << 0;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const VIEW_AUDIT_LOG = 1 << 7;
        const SEND_MESSAGES = 1 << 11;
        const MANAGE_MESSAGES = 1 << 13;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::MANAGE_GUILD
    }
}

/// A guild known to the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    /// Icon URL, if the guild has one
    pub icon_url: Option<String>,
}

impl Guild {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: GuildId::new(id),
            name: name.into(),
            icon_url: None,
        }
    }
}

/// A user's membership in one guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub permissions: Permissions,
}

impl Member {
    /// Whether the member holds every permission in `required`.
    ///
    /// `ADMINISTRATOR` satisfies any requirement.
    pub fn has_permissions(&self, required: Permissions) -> bool {
        self.permissions.contains(Permissions::ADMINISTRATOR) || self.permissions.contains(required)
    }
}

/// Identity placed in the request by the external auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
    pub avatar_url: Option<String>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            username: username.into(),
            avatar_url: None,
        }
    }
}

/// One `(id, label)` option of a selector setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorEntry {
    pub id: String,
    pub label: String,
}

impl SelectorEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Bot command shown on the commands page. Display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub usage: String,
}
