//! Domain layer - setting schema, access control and page resolution

pub mod dashboard;
pub mod descriptor;
pub mod directory;
pub mod modal;
pub mod registry;
pub mod routes;
pub mod service;
pub mod submission;
pub mod theme;

pub use dashboard::DashboardConfig;
pub use descriptor::{
    AddFields, FieldDescriptor, FieldKind, ModalDescriptor, ModalOptions, SettingDescriptor,
    SettingRef,
};
pub use directory::InMemoryGuildDirectory;
pub use modal::ModalBuilder;
pub use registry::SettingRegistry;
pub use routes::{RouteLoader, RouteModule};
pub use service::{
    Access, ApplyOutcome, FieldSnapshot, FieldValue, GuildConfigController, GuildContext,
    RejectReason, SettingSnapshot,
};
pub use submission::{FormSubmission, SubmittedValue};
pub use theme::{SectionKey, TemplateRef, ThemeResolver};
