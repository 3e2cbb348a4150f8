//! Collaborator traits the dashboard consumes
//!
//! The dashboard never stores setting values or guild data itself. The bot
//! supplies a [`GuildDirectory`] and one [`SettingBinding`] per setting.

use super::{
    error::DirectoryError,
    model::{Guild, GuildId, Member, SelectorEntry, UserId},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Lookup surface over the guilds and members known to the bot
#[async_trait]
pub trait GuildDirectory: Send + Sync {
    /// Find a guild by id. `Ok(None)` when the bot is not in that guild.
    async fn guild(&self, guild_id: &GuildId) -> Result<Option<Guild>, DirectoryError>;

    /// Fetch the membership of `user_id` in `guild`. `Ok(None)` when the user is not a member.
    async fn fetch_member(
        &self,
        guild: &Guild,
        user_id: &UserId,
    ) -> Result<Option<Member>, DirectoryError>;

    /// All guilds the bot is in, in display order
    async fn guilds(&self) -> Result<Vec<Guild>, DirectoryError>;

    /// Display name of the bot user, used when no dashboard name is configured
    fn bot_name(&self) -> Option<String> {
        None
    }
}

/// Get/set capability for one setting value, scoped to a guild.
///
/// Implementations must only read and write state belonging to `guild`.
#[async_trait]
pub trait SettingBinding<T>: Send + Sync {
    async fn get(&self, guild: &Guild) -> T;

    async fn set(&self, guild: &Guild, value: T);
}

/// Source of the options shown by a selector setting
#[async_trait]
pub trait SelectorSource: Send + Sync {
    async fn entries(&self, guild: &Guild) -> Vec<SelectorEntry>;
}

/// Validator for text inputs. Returns `true` when the value may be saved.
pub type TextValidator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// [`SettingBinding`] built from two synchronous closures
pub struct FnBinding<G, S> {
    getter: G,
    setter: S,
}

impl<G, S> FnBinding<G, S> {
    pub fn new(getter: G, setter: S) -> Self {
        Self { getter, setter }
    }
}

#[async_trait]
impl<T, G, S> SettingBinding<T> for FnBinding<G, S>
where
    T: Send + 'static,
    G: Fn(&Guild) -> T + Send + Sync,
    S: Fn(&Guild, T) + Send + Sync,
{
    async fn get(&self, guild: &Guild) -> T {
        (self.getter)(guild)
    }

    async fn set(&self, guild: &Guild, value: T) {
        (self.setter)(guild, value);
    }
}

/// [`SelectorSource`] built from a synchronous closure
pub struct FnSelectorSource<F>(pub F);

#[async_trait]
impl<F> SelectorSource for FnSelectorSource<F>
where
    F: Fn(&Guild) -> Vec<SelectorEntry> + Send + Sync,
{
    async fn entries(&self, guild: &Guild) -> Vec<SelectorEntry> {
        (self.0)(guild)
    }
}

/// Fixed list of selector options, identical for every guild
#[async_trait]
impl SelectorSource for Vec<SelectorEntry> {
    async fn entries(&self, _guild: &Guild) -> Vec<SelectorEntry> {
        self.clone()
    }
}
