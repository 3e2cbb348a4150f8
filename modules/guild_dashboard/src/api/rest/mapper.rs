//! Conversions from domain snapshots to template view models

use super::dto::*;
use crate::contract::Guild;
use crate::domain::{FieldSnapshot, FieldValue, ModalOptions, SettingSnapshot};
use serde_json::Value;

impl From<Guild> for GuildDto {
    fn from(guild: Guild) -> Self {
        Self {
            id: guild.id.0,
            name: guild.name,
            icon_url: guild.icon_url,
        }
    }
}

impl From<ModalOptions> for ModalDto {
    fn from(options: ModalOptions) -> Self {
        Self {
            title: options.title,
            open_button_label: options.open_button_label,
            close_button_label: options.close_button_label,
            save_button_label: options.save_button_label,
        }
    }
}

impl From<FieldSnapshot> for SettingDto {
    fn from(field: FieldSnapshot) -> Self {
        let (kind, value, entries) = match field.value {
            FieldValue::Text(text) => ("text", Value::String(text), Vec::new()),
            FieldValue::Boolean(flag) => ("boolean", Value::Bool(flag), Vec::new()),
            FieldValue::Color(color) => ("color", Value::String(color), Vec::new()),
            FieldValue::Selector { selected, entries } => {
                let entries = entries
                    .into_iter()
                    .map(|entry| SelectorEntryDto {
                        selected: entry.id == selected,
                        id: entry.id,
                        label: entry.label,
                    })
                    .collect();
                ("selector", Value::String(selected), entries)
            }
        };

        Self {
            name: field.name,
            description: field.description,
            kind,
            value,
            entries,
            modal: None,
            settings: Vec::new(),
        }
    }
}

impl From<SettingSnapshot> for SettingDto {
    fn from(snapshot: SettingSnapshot) -> Self {
        match snapshot {
            SettingSnapshot::Field(field) => field.into(),
            SettingSnapshot::Modal { options, settings } => Self {
                name: options.title.clone(),
                description: String::new(),
                kind: "modal",
                value: Value::Null,
                entries: Vec::new(),
                modal: Some(options.into()),
                settings: settings.into_iter().map(Into::into).collect(),
            },
        }
    }
}
