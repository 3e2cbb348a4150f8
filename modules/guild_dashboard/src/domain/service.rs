//! Guild configuration controller - authorization and setting application

use super::dashboard::DashboardConfig;
use super::descriptor::{FieldDescriptor, FieldKind, ModalOptions, SettingDescriptor, SettingRef};
use super::submission::FormSubmission;
use crate::contract::{
    DirectoryError, Guild, GuildDirectory, GuildId, Member, SelectorEntry, UserId,
};
use std::sync::Arc;

/// Alert shown after a save without invalid fields
pub const SAVED_ALERT: &str = "Your settings have been saved.";

/// A guild the current user may manage.
///
/// Only produced by [`GuildConfigController::authorize`], so holding one
/// proves the permission check passed.
#[derive(Debug, Clone)]
pub struct GuildContext {
    guild: Guild,
    member: Member,
}

impl GuildContext {
    pub fn guild(&self) -> &Guild {
        &self.guild
    }

    pub fn member(&self) -> &Member {
        &self.member
    }
}

/// Why access to a guild page was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    GuildNotFound,
    NotMember,
    MissingPermissions,
}

/// Outcome of the guild/member/permission checks
#[derive(Debug, Clone)]
pub enum Access {
    Granted(GuildContext),
    Rejected(RejectReason),
}

/// Current value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Boolean(bool),
    Color(String),
    Selector {
        selected: String,
        entries: Vec<SelectorEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub name: String,
    pub description: String,
    pub value: FieldValue,
}

/// Current values of one registry entry, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSnapshot {
    Field(FieldSnapshot),
    Modal {
        options: ModalOptions,
        settings: Vec<FieldSnapshot>,
    },
}

/// Result of applying a form submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Fields whose setter was called, in submission order
    pub applied: Vec<String>,
    /// Fields rejected by their validator, in submission order
    pub invalid: Vec<String>,
}

impl ApplyOutcome {
    pub fn has_errors(&self) -> bool {
        !self.invalid.is_empty()
    }

    /// Single user-facing message summarising the save
    pub fn alert(&self) -> String {
        if self.has_errors() {
            format!(
                "The following items are invalid and have not been saved: {}.",
                self.invalid.join(", ")
            )
        } else {
            SAVED_ALERT.to_string()
        }
    }
}

/// Orchestrates guild lookup, permission checks and setting reads/writes
pub struct GuildConfigController {
    dashboard: Arc<DashboardConfig>,
    directory: Arc<dyn GuildDirectory>,
}

impl std::fmt::Debug for GuildConfigController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuildConfigController")
            .field("dashboard", &self.dashboard)
            .finish_non_exhaustive()
    }
}

impl GuildConfigController {
    pub fn new(dashboard: Arc<DashboardConfig>, directory: Arc<dyn GuildDirectory>) -> Self {
        Self {
            dashboard,
            directory,
        }
    }

    pub fn dashboard(&self) -> &DashboardConfig {
        &self.dashboard
    }

    pub fn directory(&self) -> &dyn GuildDirectory {
        self.directory.as_ref()
    }

    /// Guild lookup, member lookup, then permission check
    pub async fn authorize(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
    ) -> Result<Access, DirectoryError> {
        let Some(guild) = self.directory.guild(guild_id).await? else {
            tracing::debug!(guild_id = %guild_id, "Guild not found");
            return Ok(Access::Rejected(RejectReason::GuildNotFound));
        };

        let Some(member) = self.directory.fetch_member(&guild, user_id).await? else {
            tracing::debug!(guild_id = %guild_id, user_id = %user_id, "User is not a guild member");
            return Ok(Access::Rejected(RejectReason::NotMember));
        };

        if !member.has_permissions(self.dashboard.required_permissions()) {
            tracing::debug!(
                guild_id = %guild_id,
                user_id = %user_id,
                "Member lacks the required permissions"
            );
            return Ok(Access::Rejected(RejectReason::MissingPermissions));
        }

        Ok(Access::Granted(GuildContext { guild, member }))
    }

    /// Guilds the user is allowed to manage, in directory order
    pub async fn manageable_guilds(&self, user_id: &UserId) -> Result<Vec<Guild>, DirectoryError> {
        let required = self.dashboard.required_permissions();
        let mut manageable = Vec::new();
        for guild in self.directory.guilds().await? {
            let member = self.directory.fetch_member(&guild, user_id).await?;
            if member.is_some_and(|m| m.has_permissions(required)) {
                manageable.push(guild);
            }
        }
        Ok(manageable)
    }

    /// Read the current value of every registered setting
    pub async fn snapshot(&self, ctx: &GuildContext) -> Vec<SettingSnapshot> {
        let mut snapshots = Vec::with_capacity(self.dashboard.settings().len());
        for entry in self.dashboard.settings().all() {
            let snapshot = match entry {
                SettingDescriptor::Field(field) => {
                    SettingSnapshot::Field(read_field(field, &ctx.guild).await)
                }
                SettingDescriptor::Modal(modal) => {
                    let mut settings = Vec::with_capacity(modal.settings().len());
                    for field in modal.settings() {
                        settings.push(read_field(field, &ctx.guild).await);
                    }
                    SettingSnapshot::Modal {
                        options: modal.options.clone(),
                        settings,
                    }
                }
            };
            snapshots.push(snapshot);
        }
        snapshots
    }

    /// Apply a submission field by field.
    ///
    /// Unknown names are skipped. Invalid text values are collected and not
    /// saved; processing continues with the remaining fields, so valid fields
    /// are committed even when others fail.
    pub async fn apply(&self, ctx: &GuildContext, form: &FormSubmission) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();

        for (name, value) in form.iter() {
            let field = match self.dashboard.settings().lookup(name) {
                Some(SettingRef::Field(field)) => field,
                Some(SettingRef::Modal(_)) | None => {
                    tracing::debug!(field = name, "Ignoring submitted value without a setting");
                    continue;
                }
            };

            match &field.kind {
                FieldKind::Text { validator, binding } => {
                    let text = value.last();
                    if validator.as_ref().is_some_and(|valid| !valid(text)) {
                        outcome.invalid.push(name.to_string());
                        continue;
                    }
                    binding.set(&ctx.guild, text.to_string()).await;
                }
                FieldKind::Boolean { binding } => {
                    binding.set(&ctx.guild, value.as_bool()).await;
                }
                FieldKind::Color { binding } | FieldKind::Selector { binding, .. } => {
                    binding.set(&ctx.guild, value.last().to_string()).await;
                }
            }
            outcome.applied.push(name.to_string());
        }

        tracing::info!(
            guild_id = %ctx.guild.id,
            user_id = %ctx.member.user_id,
            applied = outcome.applied.len(),
            invalid = outcome.invalid.len(),
            "Guild settings submitted"
        );
        outcome
    }
}

async fn read_field(field: &FieldDescriptor, guild: &Guild) -> FieldSnapshot {
    let value = match &field.kind {
        FieldKind::Text { binding, .. } => FieldValue::Text(binding.get(guild).await),
        FieldKind::Boolean { binding } => FieldValue::Boolean(binding.get(guild).await),
        FieldKind::Color { binding } => FieldValue::Color(binding.get(guild).await),
        FieldKind::Selector { entries, binding } => FieldValue::Selector {
            selected: binding.get(guild).await,
            entries: entries.entries(guild).await,
        },
    };

    FieldSnapshot {
        name: field.name.clone(),
        description: field.description.clone(),
        value,
    }
}
