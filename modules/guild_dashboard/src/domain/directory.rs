//! In-memory guild directory
//!
//! Useful for tests and for bots that keep their own guild cache and want to
//! mirror it into the dashboard.

use crate::contract::{
    DirectoryError, Guild, GuildDirectory, GuildId, Member, Permissions, UserId,
};
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Guild directory backed by in-process maps
#[derive(Clone, Default)]
pub struct InMemoryGuildDirectory {
    /// Guilds in insertion order
    guilds: Arc<RwLock<IndexMap<GuildId, Guild>>>,
    /// (guild, user) -> member permissions
    members: Arc<RwLock<HashMap<(GuildId, UserId), Permissions>>>,
    bot_name: Option<String>,
}

impl InMemoryGuildDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = Some(name.into());
        self
    }

    pub fn add_guild(&self, guild: Guild) {
        self.guilds.write().insert(guild.id.clone(), guild);
    }

    /// Add or replace a membership
    pub fn add_member(&self, guild_id: &GuildId, user_id: &UserId, permissions: Permissions) {
        self.members
            .write()
            .insert((guild_id.clone(), user_id.clone()), permissions);
    }

    pub fn remove_member(&self, guild_id: &GuildId, user_id: &UserId) {
        self.members
            .write()
            .remove(&(guild_id.clone(), user_id.clone()));
    }
}

#[async_trait]
impl GuildDirectory for InMemoryGuildDirectory {
    async fn guild(&self, guild_id: &GuildId) -> Result<Option<Guild>, DirectoryError> {
        Ok(self.guilds.read().get(guild_id).cloned())
    }

    async fn fetch_member(
        &self,
        guild: &Guild,
        user_id: &UserId,
    ) -> Result<Option<Member>, DirectoryError> {
        let permissions = self
            .members
            .read()
            .get(&(guild.id.clone(), user_id.clone()))
            .copied();

        Ok(permissions.map(|permissions| Member {
            guild_id: guild.id.clone(),
            user_id: user_id.clone(),
            permissions,
        }))
    }

    async fn guilds(&self) -> Result<Vec<Guild>, DirectoryError> {
        Ok(self.guilds.read().values().cloned().collect())
    }

    fn bot_name(&self) -> Option<String> {
        self.bot_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guild_and_member_lookup() {
        let directory = InMemoryGuildDirectory::new().with_bot_name("Helper");
        let guild = Guild::new("100", "Rustaceans");
        let user = UserId::new("7");
        directory.add_guild(guild.clone());
        directory.add_member(&guild.id, &user, Permissions::MANAGE_GUILD);

        assert_eq!(directory.guild(&guild.id).await, Ok(Some(guild.clone())));
        assert_eq!(directory.guild(&GuildId::new("404")).await, Ok(None));

        let member = directory.fetch_member(&guild, &user).await.expect("lookup");
        assert_eq!(member.map(|m| m.permissions), Some(Permissions::MANAGE_GUILD));

        directory.remove_member(&guild.id, &user);
        assert_eq!(directory.fetch_member(&guild, &user).await, Ok(None));
        assert_eq!(directory.bot_name().as_deref(), Some("Helper"));
    }

    #[tokio::test]
    async fn test_guilds_keep_insertion_order() {
        let directory = InMemoryGuildDirectory::new();
        directory.add_guild(Guild::new("2", "Second"));
        directory.add_guild(Guild::new("1", "First"));

        let names: Vec<_> = directory
            .guilds()
            .await
            .expect("list")
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }
}
