//! Contract layer - public types and collaborator traits
//!
//! This layer contains transport-agnostic models, errors and the traits the
//! bot implements (guild directory, setting bindings).

pub mod client;
pub mod error;
pub mod model;

pub use client::{
    FnBinding, FnSelectorSource, GuildDirectory, SelectorSource, SettingBinding, TextValidator,
};
pub use error::{DashboardError, DirectoryError};
pub use model::{
    CommandDescriptor, Guild, GuildId, Member, Permissions, SelectorEntry, SessionUser, UserId,
};
