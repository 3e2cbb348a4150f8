//! Route module discovery and mount planning

use super::theme::SectionKey;

/// Route modules shipped with the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteModule {
    Home,
    Commands,
    Auth,
    Manage,
    Selector,
    /// Fallback for unmatched paths
    CatchAll,
}

impl RouteModule {
    /// Every available module, in discovery order
    pub const AVAILABLE: [RouteModule; 6] = [
        RouteModule::Auth,
        RouteModule::Commands,
        RouteModule::CatchAll,
        RouteModule::Home,
        RouteModule::Manage,
        RouteModule::Selector,
    ];

    /// Path prefix the module is mounted under. The catch-all has none.
    pub fn mount_path(self) -> Option<&'static str> {
        match self {
            Self::Home => Some("/"),
            Self::Commands => Some("/commands"),
            Self::Auth => Some("/auth"),
            Self::Manage => Some("/manage"),
            Self::Selector => Some("/selector"),
            Self::CatchAll => None,
        }
    }

    /// Modules that only work with an OAuth client secret configured
    pub fn requires_secret(self) -> bool {
        matches!(self, Self::Auth | Self::Manage | Self::Selector)
    }

    /// Theme section rendered by the module, if any
    pub fn section(self) -> Option<SectionKey> {
        match self {
            Self::CatchAll => Some(SectionKey::NotFound),
            Self::Auth => None,
            other => other.mount_path().and_then(SectionKey::from_mount_path),
        }
    }
}

/// Decides which modules get mounted and in what order
#[derive(Debug, Clone, Copy)]
pub struct RouteLoader {
    has_secret: bool,
}

impl RouteLoader {
    pub fn new(has_secret: bool) -> Self {
        Self { has_secret }
    }

    /// Mount order: every eligible module in discovery order, then the catch-all.
    ///
    /// Earlier modules take precedence for overlapping prefixes, so the
    /// catch-all is always last.
    pub fn plan(&self) -> Vec<RouteModule> {
        RouteModule::AVAILABLE
            .into_iter()
            .filter(|module| *module != RouteModule::CatchAll)
            .filter(|module| self.has_secret || !module.requires_secret())
            .chain(std::iter::once(RouteModule::CatchAll))
            .collect()
    }

    /// Sections whose theme keys are checked at startup
    pub fn themed_sections(&self) -> Vec<SectionKey> {
        self.plan()
            .into_iter()
            .filter(|module| *module != RouteModule::CatchAll)
            .filter_map(RouteModule::section)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_without_secret_skips_protected_modules() {
        let plan = RouteLoader::new(false).plan();
        assert_eq!(
            plan,
            vec![RouteModule::Commands, RouteModule::Home, RouteModule::CatchAll]
        );
    }

    #[test]
    fn test_plan_with_secret_mounts_everything_catch_all_last() {
        let plan = RouteLoader::new(true).plan();
        assert_eq!(plan.len(), RouteModule::AVAILABLE.len());
        assert_eq!(plan.last(), Some(&RouteModule::CatchAll));
        assert_eq!(
            plan.iter().filter(|m| **m == RouteModule::CatchAll).count(),
            1
        );
    }

    #[test]
    fn test_sections() {
        assert_eq!(RouteModule::Home.section(), Some(SectionKey::Home));
        assert_eq!(RouteModule::Manage.section(), Some(SectionKey::Guild));
        assert_eq!(RouteModule::Selector.section(), Some(SectionKey::Selector));
        assert_eq!(RouteModule::Commands.section(), Some(SectionKey::Commands));
        assert_eq!(RouteModule::CatchAll.section(), Some(SectionKey::NotFound));
        assert_eq!(RouteModule::Auth.section(), None);
    }

    #[test]
    fn test_themed_sections_exclude_auth_and_catch_all() {
        let sections = RouteLoader::new(true).themed_sections();
        assert_eq!(
            sections,
            vec![
                SectionKey::Commands,
                SectionKey::Home,
                SectionKey::Guild,
                SectionKey::Selector
            ]
        );
    }
}
