//! Section keys and theme override resolution

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Canonical page sections a theme can override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Home,
    Guild,
    Selector,
    Commands,
    NotFound,
}

impl SectionKey {
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Home,
        SectionKey::Guild,
        SectionKey::Selector,
        SectionKey::Commands,
        SectionKey::NotFound,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Guild => "guild",
            Self::Selector => "selector",
            Self::Commands => "commands",
            Self::NotFound => "404",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == key)
    }

    /// Section key for a mount path.
    ///
    /// `/` maps to `home`, `/manage` to `guild`, any other `/x` to `x`.
    /// Returns `None` when the derived key is not a known section.
    pub fn from_mount_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Home),
            "/manage" => Some(Self::Guild),
            other => {
                let segment = other.trim_start_matches('/').split('/').next()?;
                Self::parse(segment).filter(|s| !matches!(s, Self::Home | Self::Guild))
            }
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Template chosen for a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateRef {
    /// Caller-supplied template registered from the theme mapping
    Override(SectionKey),
    /// Template bundled with the crate
    Bundled(SectionKey),
}

impl TemplateRef {
    /// Name the template is registered under in the renderer
    pub fn template_name(&self) -> String {
        match self {
            Self::Override(section) => format!("theme/{section}"),
            Self::Bundled(section) => format!("default/{section}"),
        }
    }
}

/// Resolves sections against the caller's theme mapping
#[derive(Debug, Clone, Default)]
pub struct ThemeResolver {
    overrides: BTreeMap<SectionKey, PathBuf>,
    unknown_keys: Vec<String>,
}

impl ThemeResolver {
    /// Build from the raw `key -> template path` mapping.
    ///
    /// Keys that name no section are kept aside and reported by
    /// [`unknown_keys`](Self::unknown_keys).
    pub fn new<I, K, P>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        let mut resolver = Self::default();
        for (key, path) in mapping {
            match SectionKey::parse(key.as_ref()) {
                Some(section) => {
                    resolver.overrides.insert(section, path.into());
                }
                None => resolver.unknown_keys.push(key.as_ref().to_string()),
            }
        }
        resolver
    }

    pub fn has_override(&self, section: SectionKey) -> bool {
        self.overrides.contains_key(&section)
    }

    /// Override template files keyed by section
    pub fn overrides(&self) -> impl Iterator<Item = (SectionKey, &PathBuf)> {
        self.overrides.iter().map(|(section, path)| (*section, path))
    }

    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown_keys
    }

    /// Template to render for `section`; falls back to the bundled one
    pub fn resolve(&self, section: SectionKey) -> TemplateRef {
        if self.has_override(section) {
            TemplateRef::Override(section)
        } else {
            TemplateRef::Bundled(section)
        }
    }

    /// Sections among `mounted` that have no override, plus `404` when missing
    pub fn missing_sections(&self, mounted: impl IntoIterator<Item = SectionKey>) -> Vec<SectionKey> {
        std::iter::once(SectionKey::NotFound)
            .chain(mounted.into_iter().filter(|s| *s != SectionKey::NotFound))
            .filter(|section| !self.has_override(*section))
            .collect()
    }
}
