//! Page rendering with Handlebars
//!
//! Bundled views are compiled into the crate and registered as
//! `default/<section>`. Theme overrides are read from disk once at startup and
//! registered as `theme/<section>`.

use crate::contract::DashboardError;
use crate::domain::{SectionKey, TemplateRef, ThemeResolver};
use handlebars::Handlebars;
use serde::Serialize;

const PARTIALS: [(&str, &str); 3] = [
    ("header", include_str!("views/header.hbs")),
    ("footer", include_str!("views/footer.hbs")),
    ("field", include_str!("views/field.hbs")),
];

fn bundled_source(section: SectionKey) -> &'static str {
    match section {
        SectionKey::Home => include_str!("views/home.hbs"),
        SectionKey::Guild => include_str!("views/guild.hbs"),
        SectionKey::Selector => include_str!("views/selector.hbs"),
        SectionKey::Commands => include_str!("views/commands.hbs"),
        SectionKey::NotFound => include_str!("views/404.hbs"),
    }
}

/// Renders dashboard pages
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("templates", &self.handlebars.get_templates().len())
            .finish()
    }
}

impl TemplateRenderer {
    /// Register bundled views and every theme override.
    ///
    /// An override file that cannot be read or parsed is a configuration error.
    pub fn new(theme: &ThemeResolver) -> Result<Self, DashboardError> {
        let mut handlebars = Handlebars::new();

        for (name, source) in PARTIALS {
            handlebars
                .register_partial(name, source)
                .map_err(|e| DashboardError::Configuration(format!("Invalid partial '{name}': {e}")))?;
        }

        for section in SectionKey::ALL {
            let name = TemplateRef::Bundled(section).template_name();
            handlebars
                .register_template_string(&name, bundled_source(section))
                .map_err(|e| DashboardError::Configuration(format!("Invalid template '{name}': {e}")))?;
        }

        for (section, path) in theme.overrides() {
            let source = std::fs::read_to_string(path).map_err(|source| DashboardError::ThemeFile {
                key: section.to_string(),
                path: path.clone(),
                source,
            })?;
            let name = TemplateRef::Override(section).template_name();
            handlebars
                .register_template_string(&name, source)
                .map_err(|e| {
                    DashboardError::Configuration(format!(
                        "Invalid theme template for '{section}' ({}): {e}",
                        path.display()
                    ))
                })?;
            tracing::debug!(section = %section, path = %path.display(), "Registered theme template");
        }

        Ok(Self { handlebars })
    }

    pub fn render<T: Serialize>(&self, template: &TemplateRef, data: &T) -> Result<String, DashboardError> {
        self.handlebars
            .render(&template.template_name(), data)
            .map_err(|e| DashboardError::Render(e.to_string()))
    }
}
