//! Setting descriptors
//!
//! A setting is either a single field or a modal grouping fields. Modal
//! children are [`FieldDescriptor`]s, which have no modal variant, so a modal
//! can never nest another modal.

use crate::contract::{SelectorSource, SettingBinding, TextValidator};
use std::fmt;
use std::sync::Arc;

/// Kind-specific part of a field: its value type, binding and extras
#[derive(Clone)]
pub enum FieldKind {
    Text {
        validator: Option<TextValidator>,
        binding: Arc<dyn SettingBinding<String>>,
    },
    Boolean {
        binding: Arc<dyn SettingBinding<bool>>,
    },
    Color {
        binding: Arc<dyn SettingBinding<String>>,
    },
    Selector {
        entries: Arc<dyn SelectorSource>,
        binding: Arc<dyn SettingBinding<String>>,
    },
}

impl FieldKind {
    /// Type tag used by templates
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Boolean { .. } => "boolean",
            Self::Color { .. } => "color",
            Self::Selector { .. } => "selector",
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { validator, .. } => f
                .debug_struct("Text")
                .field("validated", &validator.is_some())
                .finish_non_exhaustive(),
            other => f.write_str(other.type_name()),
        }
    }
}

/// A single editable setting
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub description: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }
}

/// Title and button labels of a modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalOptions {
    pub title: String,
    pub open_button_label: String,
    pub close_button_label: String,
    pub save_button_label: String,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            title: "Modal".to_string(),
            open_button_label: "Open Modal".to_string(),
            close_button_label: "Close".to_string(),
            save_button_label: "Save".to_string(),
        }
    }
}

/// A finalized group of fields presented as a sub-form
#[derive(Debug, Clone)]
pub struct ModalDescriptor {
    pub options: ModalOptions,
    pub(crate) settings: Vec<FieldDescriptor>,
}

impl ModalDescriptor {
    /// Registry name of the modal (its title)
    pub fn name(&self) -> &str {
        &self.options.title
    }

    /// Child fields in display order
    pub fn settings(&self) -> &[FieldDescriptor] {
        &self.settings
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&FieldDescriptor> {
        self.settings.iter().find(|s| s.name == name)
    }
}

/// Top-level registry entry
#[derive(Debug, Clone)]
pub enum SettingDescriptor {
    Field(FieldDescriptor),
    Modal(ModalDescriptor),
}

impl SettingDescriptor {
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => &field.name,
            Self::Modal(modal) => modal.name(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Field(field) => field.kind.type_name(),
            Self::Modal(_) => "modal",
        }
    }

    pub fn borrowed(&self) -> SettingRef<'_> {
        match self {
            Self::Field(field) => SettingRef::Field(field),
            Self::Modal(modal) => SettingRef::Modal(modal),
        }
    }
}

impl From<FieldDescriptor> for SettingDescriptor {
    fn from(field: FieldDescriptor) -> Self {
        Self::Field(field)
    }
}

impl From<ModalDescriptor> for SettingDescriptor {
    fn from(modal: ModalDescriptor) -> Self {
        Self::Modal(modal)
    }
}

/// Borrowed result of a registry lookup
#[derive(Debug, Clone, Copy)]
pub enum SettingRef<'a> {
    Field(&'a FieldDescriptor),
    Modal(&'a ModalDescriptor),
}

impl<'a> SettingRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Field(field) => &field.name,
            Self::Modal(modal) => modal.name(),
        }
    }

    pub fn as_field(&self) -> Option<&'a FieldDescriptor> {
        match self {
            Self::Field(field) => Some(field),
            Self::Modal(_) => None,
        }
    }
}

/// The four field-adding operations shared by the registry and modal builder
pub trait AddFields {
    /// Append a prepared field
    fn push_field(&mut self, field: FieldDescriptor);

    /// Text input, optionally validated before its setter runs
    fn add_text_input<B>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        validator: Option<TextValidator>,
        binding: B,
    ) -> &mut Self
    where
        Self: Sized,
        B: SettingBinding<String> + 'static,
    {
        self.push_field(FieldDescriptor::new(
            name,
            description,
            FieldKind::Text {
                validator,
                binding: Arc::new(binding),
            },
        ));
        self
    }

    fn add_boolean_input<B>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        binding: B,
    ) -> &mut Self
    where
        Self: Sized,
        B: SettingBinding<bool> + 'static,
    {
        self.push_field(FieldDescriptor::new(
            name,
            description,
            FieldKind::Boolean {
                binding: Arc::new(binding),
            },
        ));
        self
    }

    fn add_color_input<B>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        binding: B,
    ) -> &mut Self
    where
        Self: Sized,
        B: SettingBinding<String> + 'static,
    {
        self.push_field(FieldDescriptor::new(
            name,
            description,
            FieldKind::Color {
                binding: Arc::new(binding),
            },
        ));
        self
    }

    fn add_selector<E, B>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        entries: E,
        binding: B,
    ) -> &mut Self
    where
        Self: Sized,
        E: SelectorSource + 'static,
        B: SettingBinding<String> + 'static,
    {
        self.push_field(FieldDescriptor::new(
            name,
            description,
            FieldKind::Selector {
                entries: Arc::new(entries),
                binding: Arc::new(binding),
            },
        ));
        self
    }
}
