//! Persisted light/dark theme setting.

use std::sync::Arc;

use focusboard_model::THEME_KEY;
use focusboard_model::theme::ThemePreference;

use crate::storage::Storage;

/// The theme preference plus the storage it is saved to.
pub struct ThemeSetting {
    storage: Arc<dyn Storage>,
    current: ThemePreference,
}

impl ThemeSetting {
    /// Reads the saved preference; nothing saved means light.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let current = storage
            .get(THEME_KEY)
            .map(|value| ThemePreference::from_stored(value.trim()))
            .unwrap_or_default();
        Self { storage, current }
    }

    /// The active preference.
    #[must_use]
    pub const fn current(&self) -> ThemePreference {
        self.current
    }

    /// Switches to `preference` and saves it.
    pub fn set(&mut self, preference: ThemePreference) {
        self.current = preference;
        if let Err(e) = self.storage.set(THEME_KEY, preference.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme preference");
        }
        tracing::debug!(theme = %preference, "theme changed");
    }

    /// Flips between light and dark, saves, and returns the new value.
    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.current.toggled();
        self.set(next);
        next
    }
}
