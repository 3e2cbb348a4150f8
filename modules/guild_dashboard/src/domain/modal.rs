//! Incremental builder for modal sub-forms

use super::descriptor::{AddFields, FieldDescriptor, ModalDescriptor, ModalOptions};

/// Collects the fields of one modal.
///
/// The builder only accepts [`FieldDescriptor`]s, so modals cannot be nested.
#[derive(Debug, Default)]
pub struct ModalBuilder {
    options: ModalOptions,
    settings: Vec<FieldDescriptor>,
}

impl ModalBuilder {
    pub fn new(options: ModalOptions) -> Self {
        Self {
            options,
            settings: Vec::new(),
        }
    }

    /// Builder with the given title and default button labels
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new(ModalOptions {
            title: title.into(),
            ..ModalOptions::default()
        })
    }

    pub fn open_button_label(mut self, label: impl Into<String>) -> Self {
        self.options.open_button_label = label.into();
        self
    }

    pub fn close_button_label(mut self, label: impl Into<String>) -> Self {
        self.options.close_button_label = label.into();
        self
    }

    pub fn save_button_label(mut self, label: impl Into<String>) -> Self {
        self.options.save_button_label = label.into();
        self
    }

    /// Freeze the modal for registration
    pub fn finalize(self) -> ModalDescriptor {
        ModalDescriptor {
            options: self.options,
            settings: self.settings,
        }
    }
}

impl AddFields for ModalBuilder {
    fn push_field(&mut self, field: FieldDescriptor) {
        self.settings.push(field);
    }
}
