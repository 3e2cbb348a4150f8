//! Shared fixtures: a small guild directory and setting bindings that record
//! every write.

#![allow(dead_code)]

use guild_dashboard::{
    AddFields, Config, Dashboard, DashboardModule, FnBinding, FnSelectorSource, Guild, GuildId,
    InMemoryGuildDirectory, ModalBuilder, Permissions, SelectorEntry, TextValidator, UserId,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub const ALPHA: &str = "100";
pub const BETA: &str = "200";

/// Holds MANAGE_GUILD in Alpha and Beta
pub const MANAGER: &str = "1";
/// Plain member of Alpha
pub const MEMBER: &str = "2";
/// ADMINISTRATOR in Beta only
pub const ADMIN: &str = "3";
/// Not in any guild
pub const STRANGER: &str = "4";

/// Per-guild setting values plus an ordered log of setter calls
#[derive(Clone, Default)]
pub struct SettingStore {
    values: Arc<RwLock<HashMap<(GuildId, String), String>>>,
    writes: Arc<RwLock<Vec<(GuildId, String, String)>>>,
}

impl SettingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, guild_id: &str, name: &str, value: &str) {
        self.values
            .write()
            .insert((GuildId::new(guild_id), name.to_string()), value.to_string());
    }

    pub fn value(&self, guild_id: &str, name: &str) -> Option<String> {
        self.values
            .read()
            .get(&(GuildId::new(guild_id), name.to_string()))
            .cloned()
    }

    /// Setter calls as (guild id, setting name, value)
    pub fn writes(&self) -> Vec<(String, String, String)> {
        self.writes
            .read()
            .iter()
            .map(|(guild, name, value)| (guild.to_string(), name.clone(), value.clone()))
            .collect()
    }

    pub fn written_names(&self) -> Vec<String> {
        self.writes.read().iter().map(|(_, name, _)| name.clone()).collect()
    }

    fn get(&self, guild: &Guild, name: &str) -> String {
        self.value(guild.id.as_str(), name).unwrap_or_default()
    }

    fn set(&self, guild: &Guild, name: &str, value: String) {
        self.values
            .write()
            .insert((guild.id.clone(), name.to_string()), value.clone());
        self.writes
            .write()
            .push((guild.id.clone(), name.to_string(), value));
    }

    pub fn text(
        &self,
        name: &'static str,
    ) -> FnBinding<impl Fn(&Guild) -> String, impl Fn(&Guild, String)> {
        let reader = self.clone();
        let writer = self.clone();
        FnBinding::new(
            move |guild: &Guild| reader.get(guild, name),
            move |guild: &Guild, value: String| writer.set(guild, name, value),
        )
    }

    pub fn flag(&self, name: &'static str) -> FnBinding<impl Fn(&Guild) -> bool, impl Fn(&Guild, bool)> {
        let reader = self.clone();
        let writer = self.clone();
        FnBinding::new(
            move |guild: &Guild| reader.get(guild, name) == "true",
            move |guild: &Guild, value: bool| writer.set(guild, name, value.to_string()),
        )
    }
}

pub fn directory() -> InMemoryGuildDirectory {
    let directory = InMemoryGuildDirectory::new().with_bot_name("Helper");
    directory.add_guild(Guild::new(ALPHA, "Alpha"));
    directory.add_guild(Guild::new(BETA, "Beta"));

    let (alpha, beta) = (GuildId::new(ALPHA), GuildId::new(BETA));
    directory.add_member(&alpha, &UserId::new(MANAGER), Permissions::MANAGE_GUILD);
    directory.add_member(&beta, &UserId::new(MANAGER), Permissions::MANAGE_GUILD);
    directory.add_member(&alpha, &UserId::new(MEMBER), Permissions::SEND_MESSAGES);
    directory.add_member(&beta, &UserId::new(ADMIN), Permissions::ADMINISTRATOR);
    directory
}

pub fn config_with_secret() -> Config {
    Config {
        secret: Some("client-secret".to_string()),
        login_url: "https://discord.example/oauth2/authorize".to_string(),
        ..Config::default()
    }
}

/// At most three characters, not empty
pub fn short_prefix() -> TextValidator {
    Arc::new(|value: &str| !value.is_empty() && value.chars().count() <= 3)
}

/// Registers `prefix` (validated text), `welcome` (boolean), `motd`
/// (free text) and an `Appearance` modal holding `embed_color` and `log_channel`.
pub fn register_settings(dashboard: &mut Dashboard, store: &SettingStore) {
    dashboard
        .add_text_input("prefix", "Command prefix", Some(short_prefix()), store.text("prefix"))
        .add_boolean_input("welcome", "Greet new members", store.flag("welcome"))
        .add_text_input("motd", "Message of the day", None, store.text("motd"));

    let mut modal = ModalBuilder::titled("Appearance").open_button_label("Edit appearance");
    modal
        .add_color_input("embed_color", "Embed color", store.text("embed_color"))
        .add_selector(
            "log_channel",
            "Log channel",
            FnSelectorSource(|guild: &Guild| {
                vec![
                    SelectorEntry::new(format!("{}-general", guild.id), "#general"),
                    SelectorEntry::new(format!("{}-logs", guild.id), "#logs"),
                ]
            }),
            store.text("log_channel"),
        );
    dashboard.add_modal(modal.finalize());
}

pub fn build(config: Config, store: &SettingStore) -> DashboardModule {
    build_with(config, store, directory())
}

pub fn build_with(
    config: Config,
    store: &SettingStore,
    directory: InMemoryGuildDirectory,
) -> DashboardModule {
    let mut dashboard = Dashboard::new(config, Arc::new(directory));
    dashboard.register_command("ping", "Check the bot is alive", "!ping");
    register_settings(&mut dashboard, store);
    dashboard.build().expect("dashboard should build")
}
