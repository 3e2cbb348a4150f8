//! Immutable dashboard aggregate shared by all request handlers

use super::registry::SettingRegistry;
use super::routes::RouteLoader;
use super::theme::ThemeResolver;
use crate::config::Config;
use crate::contract::{CommandDescriptor, DashboardError, Permissions};

/// Everything the handlers need that is fixed at startup.
///
/// Built once by [`crate::Dashboard`], then shared behind an `Arc`. There is
/// no way to register settings or commands after construction.
#[derive(Debug)]
pub struct DashboardConfig {
    config: Config,
    settings: SettingRegistry,
    commands: Vec<CommandDescriptor>,
    theme: ThemeResolver,
}

impl DashboardConfig {
    /// Assemble the aggregate, rejecting duplicate setting names
    pub fn new(
        config: Config,
        settings: SettingRegistry,
        commands: Vec<CommandDescriptor>,
    ) -> Result<Self, DashboardError> {
        settings.validate()?;
        let theme = ThemeResolver::new(config.theme.iter().map(|(k, v)| (k.as_str(), v.clone())));
        Ok(Self {
            config,
            settings,
            commands,
            theme,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &SettingRegistry {
        &self.settings
    }

    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    pub fn theme(&self) -> &ThemeResolver {
        &self.theme
    }

    pub fn required_permissions(&self) -> Permissions {
        self.config.permissions
    }

    pub fn route_loader(&self) -> RouteLoader {
        RouteLoader::new(self.config.has_secret())
    }
}
