use std::path::{Path, PathBuf};
use std::sync::Mutex;

type ThemeCallback = Box<dyn Fn(Theme) + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// The one shared theming service: a single persisted preference with
/// change subscriptions, instead of every surface re-deriving the mode from
/// storage on its own. The listing pipeline neither reads nor writes it.
pub struct ThemeService {
    path: PathBuf,
    current: Mutex<Theme>,
    subscribers: Mutex<Vec<ThemeCallback>>,
}

impl ThemeService {
    /// Loads the stored preference, defaulting to light when absent or
    /// unreadable.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join("theme");
        let current = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_default();
        Self {
            path,
            current: Mutex::new(current),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn theme(&self) -> Theme {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Persists the preference and notifies subscribers.
    pub fn set_theme(&self, theme: Theme) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create preference directory: {e}"))?;
        }
        std::fs::write(&self.path, theme.as_str())
            .map_err(|e| format!("failed to persist theme preference: {e}"))?;
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = theme;
        for callback in self
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
        {
            callback(theme);
        }
        Ok(())
    }

    pub fn on_theme_change(&self, callback: impl Fn(Theme) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(callback));
    }
}
