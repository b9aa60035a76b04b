use serde::{Deserialize, Serialize};

use crate::text::{is_repository_valid, to_initials, transliteration};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub about: String,
    pub repository: String,
    pub rating: i32,
    pub respect: i32,
}

impl Profile {
    /// Latin handle derived from the full name, e.g. `John_Doe`.
    pub fn nickname(&self) -> String {
        transliteration(&format!("{} {}", self.first_name, self.last_name), "_")
    }

    pub fn initials(&self) -> Option<String> {
        to_initials(Some(&self.first_name), Some(&self.last_name))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

/// State behind the profile screen.
///
/// Storage is the caller's concern: seed it from whatever was saved and read
/// `profile()`/`theme()` back after edits.
#[derive(Clone, Debug, Default)]
pub struct ProfileState {
    profile: Profile,
    theme: Theme,
    repository_invalid: bool,
    repository_error_enabled: bool,
}

impl ProfileState {
    pub fn new(profile: Profile, theme: Theme) -> Self {
        Self {
            profile,
            theme,
            repository_invalid: false,
            repository_error_enabled: false,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn save_profile(&mut self, profile: Profile) {
        tracing::debug!(nickname = %profile.nickname(), "profile saved");
        self.profile = profile;
    }

    pub fn switch_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    /// Re-validate the repository field as the user types.
    pub fn on_repository_changed(&mut self, repository: &str) {
        self.repository_invalid = !is_repository_valid(repository);
    }

    /// Whether the error hint is currently displayed, reported by the view.
    pub fn after_repository_changed(&mut self, is_error: bool) {
        self.repository_error_enabled = is_error;
    }

    pub fn is_repository_invalid(&self) -> bool {
        self.repository_invalid
    }

    pub fn is_repository_error_enabled(&self) -> bool {
        self.repository_error_enabled
    }
}
