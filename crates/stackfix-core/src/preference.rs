//! Theme and locale preferences.
//!
//! This is the in-memory model only. Persisting it across sessions is
//! left to the embedding application (it is `serde`-serializable for
//! that purpose).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Color scheme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    /// Follow the platform's `prefers-color-scheme`.
    #[default]
    System,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
}

impl ThemeMode {
    /// Next mode in the System → Light → Dark cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Languages the interface can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Simplified Chinese.
    #[serde(rename = "zh-CN")]
    SimplifiedChinese,
    /// Japanese.
    #[serde(rename = "ja-JP")]
    Japanese,
}

impl Locale {
    /// Every selectable locale, in menu order.
    pub const ALL: [Self; 2] = [Self::SimplifiedChinese, Self::Japanese];

    /// Locale used when nothing else matches.
    pub const FALLBACK: Self = Self::SimplifiedChinese;

    /// BCP 47 tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SimplifiedChinese => "zh-CN",
            Self::Japanese => "ja-JP",
        }
    }

    /// Name of the language in that language.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::SimplifiedChinese => "简体中文",
            Self::Japanese => "日本語",
        }
    }

    /// Match a bare language code (`"zh"`, `"ja"`) or a full tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "zh" | "zh-CN" => Some(Self::SimplifiedChinese),
            "ja" | "ja-JP" => Some(Self::Japanese),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// User preferences that outlive a single session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Selected color scheme.
    pub theme_mode: ThemeMode,

    /// Explicitly selected locale; `None` follows the browser.
    pub locale: Option<Locale>,
}

impl Preferences {
    /// Advance the theme mode: System → Light → Dark → System.
    pub const fn cycle_theme_mode(&mut self) {
        self.theme_mode = self.theme_mode.next();
    }

    /// Whether the dark theme is in effect.
    #[must_use]
    pub const fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self.theme_mode {
            ThemeMode::Dark => true,
            ThemeMode::Light => false,
            ThemeMode::System => system_prefers_dark,
        }
    }

    /// Select `locale`, or clear the selection if it is already selected.
    pub fn toggle_locale(&mut self, locale: Locale) {
        if self.locale == Some(locale) {
            self.locale = None;
        } else {
            self.locale = Some(locale);
        }
    }

    /// The locale to display, given the browser's preferred languages.
    #[must_use]
    pub fn effective_locale<S: AsRef<str>>(&self, browser_locales: &[S]) -> Locale {
        self.locale
            .unwrap_or_else(|| browser_locale(browser_locales))
    }
}

/// Pick a supported locale from the browser's preferred languages.
///
/// Language prefixes are tried first (`"ja-JP"` and `"ja"` both match
/// Japanese), then exact tags, then [`Locale::FALLBACK`].
#[must_use]
pub fn browser_locale<S: AsRef<str>>(browser_locales: &[S]) -> Locale {
    let prefix_match = browser_locales.iter().find_map(|tag| {
        let lang = tag.as_ref().split('-').next().unwrap_or_default();
        Locale::from_tag(lang)
    });
    prefix_match
        .or_else(|| {
            browser_locales
                .iter()
                .find_map(|tag| Locale::from_tag(tag.as_ref()))
        })
        .unwrap_or(Locale::FALLBACK)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycles_through_all_modes() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.theme_mode, ThemeMode::System);
        prefs.cycle_theme_mode();
        assert_eq!(prefs.theme_mode, ThemeMode::Light);
        prefs.cycle_theme_mode();
        assert_eq!(prefs.theme_mode, ThemeMode::Dark);
        prefs.cycle_theme_mode();
        assert_eq!(prefs.theme_mode, ThemeMode::System);
    }

    #[test]
    fn dark_resolution() {
        let mut prefs = Preferences::default();
        assert!(prefs.is_dark(true));
        assert!(!prefs.is_dark(false));
        prefs.theme_mode = ThemeMode::Light;
        assert!(!prefs.is_dark(true));
        prefs.theme_mode = ThemeMode::Dark;
        assert!(prefs.is_dark(false));
    }

    #[test]
    fn toggling_selected_locale_clears_it() {
        let mut prefs = Preferences::default();
        prefs.toggle_locale(Locale::Japanese);
        assert_eq!(prefs.locale, Some(Locale::Japanese));
        prefs.toggle_locale(Locale::SimplifiedChinese);
        assert_eq!(prefs.locale, Some(Locale::SimplifiedChinese));
        prefs.toggle_locale(Locale::SimplifiedChinese);
        assert_eq!(prefs.locale, None);
    }

    #[test]
    fn browser_locale_matching() {
        assert_eq!(browser_locale(&["en-US", "ja-JP"]), Locale::Japanese);
        assert_eq!(browser_locale(&["zh-TW"]), Locale::SimplifiedChinese);
        assert_eq!(browser_locale(&["ja"]), Locale::Japanese);
        assert_eq!(browser_locale(&["en-US", "fr"]), Locale::FALLBACK);
        assert_eq!(browser_locale::<&str>(&[]), Locale::FALLBACK);
    }

    #[test]
    fn explicit_locale_wins() {
        let prefs = Preferences {
            locale: Some(Locale::Japanese),
            ..Preferences::default()
        };
        assert_eq!(prefs.effective_locale(&["zh-CN"]), Locale::Japanese);
        assert_eq!(
            Preferences::default().effective_locale(&["ja-JP"]),
            Locale::Japanese
        );
    }

    #[test]
    fn preferences_serialize_with_locale_tags() {
        let prefs = Preferences {
            theme_mode: ThemeMode::Dark,
            locale: Some(Locale::SimplifiedChinese),
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("\"zh-CN\""), "unexpected json: {json}");
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }
}
