use crate::error::StorageError;
use crate::log::{log_event, LogLevel};

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Catalog key of the accessible label for the toggle control.
    pub fn toggle_label_key(self) -> &'static str {
        match self.toggled() {
            Self::Light => "nav.theme.light",
            Self::Dark => "nav.theme.dark",
        }
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

/// Local key-value persistence for the single theme flag.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Whatever the theme is painted onto; the document root in the browser.
pub trait ThemeSurface {
    fn apply(&self, theme: Theme, animate: bool);
}

/// Persisted value first, then the OS signal, then light. An unreadable or
/// unknown stored value counts as absent.
pub fn resolve_theme(stored: Option<&str>, system_prefers_dark: impl FnOnce() -> bool) -> Theme {
    stored.and_then(Theme::from_str).unwrap_or_else(|| {
        if system_prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    })
}

pub struct ThemeController<S, P> {
    theme: Theme,
    store: S,
    surface: P,
}

impl<S: PreferenceStore, P: ThemeSurface> ThemeController<S, P> {
    /// Resolves the starting theme and paints it without a transition.
    pub fn new(store: S, surface: P, system_prefers_dark: impl FnOnce() -> bool) -> Self {
        let stored = store.load(THEME_KEY);
        let theme = resolve_theme(stored.as_deref(), system_prefers_dark);
        surface.apply(theme, false);
        log_event(
            LogLevel::Info,
            "theme_resolved",
            serde_json::json!({ "theme": theme.as_str(), "from_storage": stored.is_some() }),
        );

        Self {
            theme,
            store,
            surface,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        if let Err(err) = self.store.save(THEME_KEY, next.as_str()) {
            log_event(
                LogLevel::Warn,
                "theme_persist_failed",
                serde_json::json!({ "theme": next.as_str(), "error": err.to_string() }),
            );
        }
        self.surface.apply(next, true);
        self.theme = next;
        log_event(LogLevel::Info, "theme_toggled", serde_json::json!({ "theme": next.as_str() }));
        next
    }
}
