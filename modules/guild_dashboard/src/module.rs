//! Dashboard declaration and lifecycle
//!
//! [`Dashboard`] collects commands and settings at startup. [`Dashboard::build`]
//! freezes them, runs the startup checks and yields a [`DashboardModule`]
//! that serves the pages.

use crate::api::rest::{handlers::AppState, routes::register_routes};
use crate::config::Config;
use crate::contract::{CommandDescriptor, DashboardError, GuildDirectory};
use crate::domain::{
    AddFields, DashboardConfig, FieldDescriptor, GuildConfigController, ModalDescriptor,
    RouteModule, SectionKey, SettingRegistry,
};
use crate::infra::TemplateRenderer;
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Startup-time builder for the dashboard
pub struct Dashboard {
    config: Config,
    directory: Arc<dyn GuildDirectory>,
    settings: SettingRegistry,
    commands: Vec<CommandDescriptor>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("config", &self.config)
            .field("settings", &self.settings.len())
            .field("commands", &self.commands.len())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(config: Config, directory: Arc<dyn GuildDirectory>) -> Self {
        Self {
            config,
            directory,
            settings: SettingRegistry::new(),
            commands: Vec::new(),
        }
    }

    /// Add a command to the commands page
    pub fn register_command(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        usage: impl Into<String>,
    ) -> &mut Self {
        self.commands.push(CommandDescriptor {
            name: name.into(),
            description: description.into(),
            usage: usage.into(),
        });
        self
    }

    /// Add a finalized modal to the settings page
    pub fn add_modal(&mut self, modal: ModalDescriptor) -> &mut Self {
        self.settings.add_modal(modal);
        self
    }

    /// Freeze the registrations and run the startup checks.
    ///
    /// Fails on duplicate setting names and unreadable theme files. Missing
    /// theme keys only produce warnings; the bundled views are used instead.
    pub fn build(self) -> Result<DashboardModule, DashboardError> {
        if !self.config.has_secret() {
            tracing::warn!(
                "No client secret configured; login, server selection and guild settings are disabled"
            );
        }

        let dashboard = Arc::new(DashboardConfig::new(self.config, self.settings, self.commands)?);
        let loader = dashboard.route_loader();
        let plan = loader.plan();

        let theme = dashboard.theme();
        let report = ThemeReport {
            missing_sections: theme.missing_sections(loader.themed_sections()),
            unknown_keys: theme.unknown_keys().to_vec(),
        };
        for key in &report.unknown_keys {
            tracing::warn!(key = %key, "Theme key does not match any page, ignoring it");
        }
        for section in &report.missing_sections {
            tracing::warn!(
                key = %section,
                "No key found in the theme for this page, falling back to the default one"
            );
        }

        let renderer = TemplateRenderer::new(theme)?;
        let controller = GuildConfigController::new(dashboard.clone(), self.directory);

        tracing::info!(
            settings = dashboard.settings().len(),
            commands = dashboard.commands().len(),
            modules = plan.len(),
            "Guild dashboard initialized"
        );

        Ok(DashboardModule {
            state: Arc::new(AppState {
                controller,
                renderer,
                login_enabled: plan.contains(&RouteModule::Auth),
            }),
            plan,
            theme_report: report,
        })
    }
}

impl AddFields for Dashboard {
    fn push_field(&mut self, field: FieldDescriptor) {
        self.settings.push_field(field);
    }
}

/// Theme keys warned about at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeReport {
    /// Mounted sections rendered with the bundled view, `404` first
    pub missing_sections: Vec<SectionKey>,
    /// Mapping keys that name no section
    pub unknown_keys: Vec<String>,
}

/// A built dashboard, ready to serve
#[derive(Debug, Clone)]
pub struct DashboardModule {
    state: Arc<AppState>,
    plan: Vec<RouteModule>,
    theme_report: ThemeReport,
}

impl DashboardModule {
    /// Mounted route modules, in mount order
    pub fn mounted(&self) -> &[RouteModule] {
        &self.plan
    }

    /// Theme coverage found by the startup checks
    pub fn theme_report(&self) -> &ThemeReport {
        &self.theme_report
    }

    pub fn controller(&self) -> &GuildConfigController {
        &self.state.controller
    }

    /// Router with every mounted module; the host adds its session layer on top
    pub fn router(&self) -> axum::Router {
        let log_requests = self.state.controller.dashboard().config().log_requests;
        register_routes(&self.plan, self.state.clone(), log_requests)
    }

    /// Serve the dashboard on `listener` until the server stops
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(%addr, "Guild dashboard listening");
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
