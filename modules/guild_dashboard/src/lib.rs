//! Guild Dashboard Module
//!
//! Declarative per-guild settings panel for chat bots. The bot registers
//! text, boolean, color and selector settings (optionally grouped in modals)
//! together with the bindings that read and write them; the dashboard renders
//! and applies them for members holding the required permissions.

// Public exports
pub mod contract;
pub use contract::{
    CommandDescriptor, DashboardError, DirectoryError, FnBinding, FnSelectorSource, Guild,
    GuildDirectory, GuildId, Member, Permissions, SelectorEntry, SelectorSource, SessionUser,
    SettingBinding, TextValidator, UserId,
};

pub mod config;
pub use config::{Config, Details};

pub mod module;
pub use module::{Dashboard, DashboardModule, ThemeReport};

pub mod domain;
pub use domain::{AddFields, InMemoryGuildDirectory, ModalBuilder, ModalOptions};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod infra;
