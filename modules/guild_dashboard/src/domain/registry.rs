//! Ordered store of setting descriptors

use super::descriptor::{AddFields, FieldDescriptor, ModalDescriptor, SettingDescriptor, SettingRef};
use crate::contract::DashboardError;
use std::collections::HashSet;

/// Settings shown on the guild page, in registration order
#[derive(Debug, Default, Clone)]
pub struct SettingRegistry {
    entries: Vec<SettingDescriptor>,
}

impl SettingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor; insertion order is display order
    pub fn register(&mut self, descriptor: impl Into<SettingDescriptor>) -> &mut Self {
        self.entries.push(descriptor.into());
        self
    }

    /// Register a finalized modal as a single entry
    pub fn add_modal(&mut self, modal: ModalDescriptor) -> &mut Self {
        self.register(modal)
    }

    pub fn all(&self) -> &[SettingDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a setting name.
    ///
    /// Top-level entries are searched first, then the children of each modal
    /// in registration order. The first match wins.
    pub fn lookup(&self, name: &str) -> Option<SettingRef<'_>> {
        if let Some(entry) = self.entries.iter().find(|e| e.name() == name) {
            return Some(entry.borrowed());
        }

        self.modals()
            .find_map(|modal| modal.child(name))
            .map(SettingRef::Field)
    }

    /// Every editable field, modal children included, in display order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.entries.iter().flat_map(|entry| match entry {
            SettingDescriptor::Field(field) => std::slice::from_ref(field).iter(),
            SettingDescriptor::Modal(modal) => modal.settings().iter(),
        })
    }

    fn modals(&self) -> impl Iterator<Item = &ModalDescriptor> {
        self.entries.iter().filter_map(|entry| match entry {
            SettingDescriptor::Modal(modal) => Some(modal),
            SettingDescriptor::Field(_) => None,
        })
    }

    /// Check that names are unique within each scope
    pub fn validate(&self) -> Result<(), DashboardError> {
        ensure_unique(self.entries.iter().map(SettingDescriptor::name), "top-level settings")?;

        for modal in self.modals() {
            ensure_unique(
                modal.settings().iter().map(|s| s.name.as_str()),
                &format!("modal '{}'", modal.name()),
            )?;
        }

        Ok(())
    }
}

impl AddFields for SettingRegistry {
    fn push_field(&mut self, field: FieldDescriptor) {
        self.entries.push(SettingDescriptor::Field(field));
    }
}

fn ensure_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    scope: &str,
) -> Result<(), DashboardError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(DashboardError::DuplicateSetting {
                name: name.to_string(),
                scope: scope.to_string(),
            });
        }
    }
    Ok(())
}
