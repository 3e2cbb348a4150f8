//! Submitted form values

use crate::contract::DashboardError;
use indexmap::IndexMap;
use serde_json::Value;

/// Value(s) posted under one field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedValue {
    Single(String),
    Multiple(Vec<String>),
}

impl SubmittedValue {
    fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                *self = Self::Multiple(vec![std::mem::take(first), value]);
            }
            Self::Multiple(values) => values.push(value),
        }
    }

    /// Presence-based boolean coercion.
    ///
    /// A checkbox rendered next to a hidden input of the same name submits two
    /// values when ticked and one when not. Only a multi-valued submission is
    /// `true`; any single value, `"on"` included, is `false`.
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Scalar view: the last submitted value
    pub fn last(&self) -> &str {
        match self {
            Self::Single(value) => value,
            Self::Multiple(values) => values.last().map(String::as_str).unwrap_or_default(),
        }
    }
}

/// Form body keyed by field name, in first-submission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    fields: IndexMap<String, SubmittedValue>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` body, keeping repeated keys
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut submission = Self::new();
        for (name, value) in url::form_urlencoded::parse(body) {
            submission.insert(name.into_owned(), value.into_owned());
        }
        submission
    }

    /// Decode a JSON object body.
    ///
    /// Arrays become multi-valued entries, so `["off", "on"]` reads like a
    /// ticked checkbox. Numbers and booleans keep their JSON text; `null` is
    /// skipped.
    pub fn from_json(body: &[u8]) -> Result<Self, DashboardError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| DashboardError::InvalidSubmission(e.to_string()))?;
        let Value::Object(object) = value else {
            return Err(DashboardError::InvalidSubmission(
                "expected a JSON object of setting names".to_string(),
            ));
        };

        let mut submission = Self::new();
        for (name, value) in object {
            match value {
                Value::Array(values) => {
                    for item in values {
                        if let Some(text) = json_scalar(item) {
                            submission.insert(name.clone(), text);
                        }
                    }
                }
                other => {
                    if let Some(text) = json_scalar(other) {
                        submission.insert(name, text);
                    }
                }
            }
        }
        Ok(submission)
    }

    /// Record one value; a repeated name turns the entry multi-valued
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.fields.entry(name.into()) {
            indexmap::map::Entry::Occupied(mut entry) => entry.get_mut().push(value),
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(SubmittedValue::Single(value));
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&SubmittedValue> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubmittedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormSubmission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut submission = Self::new();
        for (name, value) in iter {
            submission.insert(name, value);
        }
        submission
    }
}

fn json_scalar(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
