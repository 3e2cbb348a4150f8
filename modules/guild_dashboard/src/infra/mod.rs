//! Infrastructure layer - template rendering

pub mod templates;

pub use templates::TemplateRenderer;
