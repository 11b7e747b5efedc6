//! Configuration for the sulog commands
//!
//! Options live under the `sulog` namespace with the camelCase names used by
//! the settings files (`consolePrefix`, `mergeMultiVariables`, ...). Every
//! command resolves a fresh [`Configuration`] from its [`SettingsStore`], so a
//! settings change applies to the next invocation without any invalidation.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_SHORTCUT: &str = "cmd+shift+l";
pub const DEFAULT_PREFIX: &str = "sulog";
pub const DEFAULT_TEXT_COLOR: &str = "#fff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ff4e20";
pub const DEFAULT_FONT_SIZE: &str = "14px";
pub const DEFAULT_FONT_WEIGHT: &str = "bold";
pub const DEFAULT_MERGE_MULTI_VARIABLES: bool = true;

/// Settings as stored: every option may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_shortcut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_multi_variables: Option<bool>,
}

/// Layout of a settings file: options sit in a `[sulog]` table
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    sulog: RawSettings,
}

impl RawSettings {
    /// Parse the `[sulog]` table out of a TOML document
    ///
    /// Keys outside the table, and unknown keys inside it, are ignored.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(content)?;
        Ok(file.sulog)
    }

    /// Overlay `other` on top of `self`; options set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            console_shortcut: other.console_shortcut.or(self.console_shortcut),
            console_prefix: other.console_prefix.or(self.console_prefix),
            console_text_color: other.console_text_color.or(self.console_text_color),
            console_background_color: other
                .console_background_color
                .or(self.console_background_color),
            console_font_size: other.console_font_size.or(self.console_font_size),
            console_font_weight: other.console_font_weight.or(self.console_font_weight),
            merge_multi_variables: other.merge_multi_variables.or(self.merge_multi_variables),
        }
    }
}

/// Source of persistent settings, read once per command invocation
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<RawSettings>;
}

/// In-memory settings store
///
/// Used by tests and by callers that already hold their settings.
#[derive(Debug, Default)]
pub struct MemorySettings {
    settings: RwLock<RawSettings>,
}

impl MemorySettings {
    pub fn new(settings: RawSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Replace the stored settings
    pub fn set(&self, settings: RawSettings) {
        if let Ok(mut guard) = self.settings.write() {
            *guard = settings;
        }
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self) -> Result<RawSettings> {
        Ok(self
            .settings
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default())
    }
}

/// Resolved configuration for one command invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Informational only; the CLI never binds it
    #[serde(rename = "consoleShortcut")]
    pub shortcut: String,
    #[serde(rename = "consolePrefix")]
    pub prefix: String,
    #[serde(rename = "consoleTextColor")]
    pub text_color: String,
    #[serde(rename = "consoleBackgroundColor")]
    pub background_color: String,
    #[serde(rename = "consoleFontSize")]
    pub font_size: String,
    #[serde(rename = "consoleFontWeight")]
    pub font_weight: String,
    pub merge_multi_variables: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::from_raw(RawSettings::default())
    }
}

impl Configuration {
    /// Apply defaults to every absent option
    ///
    /// Explicitly empty strings are kept as-is: they switch the matching
    /// style declaration off.
    pub fn from_raw(raw: RawSettings) -> Self {
        Self {
            shortcut: raw
                .console_shortcut
                .unwrap_or_else(|| DEFAULT_SHORTCUT.to_string()),
            prefix: raw
                .console_prefix
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            text_color: raw
                .console_text_color
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            background_color: raw
                .console_background_color
                .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
            font_size: raw
                .console_font_size
                .unwrap_or_else(|| DEFAULT_FONT_SIZE.to_string()),
            font_weight: raw
                .console_font_weight
                .unwrap_or_else(|| DEFAULT_FONT_WEIGHT.to_string()),
            merge_multi_variables: raw
                .merge_multi_variables
                .unwrap_or(DEFAULT_MERGE_MULTI_VARIABLES),
        }
    }

    /// Read the store and resolve
    pub fn resolve(store: &dyn SettingsStore) -> Result<Self> {
        store.load().map(Self::from_raw)
    }

    /// Log the full option set
    pub fn log_summary(&self) {
        tracing::info!("Current Sulog configuration:");
        tracing::info!("  consoleShortcut = {}", self.shortcut);
        tracing::info!("  consolePrefix = {}", self.prefix);
        tracing::info!("  consoleTextColor = {}", self.text_color);
        tracing::info!("  consoleBackgroundColor = {}", self.background_color);
        tracing::info!("  consoleFontSize = {}", self.font_size);
        tracing::info!("  consoleFontWeight = {}", self.font_weight);
        tracing::info!("  mergeMultiVariables = {}", self.merge_multi_variables);
    }
}
