//! Where raw settings come from.
//!
//! Application settings start from compiled-in defaults and may be
//! overridden by a JSON file. Backend connection values come from the
//! environment only; the URL and API key have no defaults.
//!
//! ```json
//! {
//!   "maxContributorsPerSession": 12,
//!   "proAffiliations": ["ASCAP", "BMI", "SESAC", "GMR", "SOCAN", "Other"],
//!   "storageKeyNames": { "deviceId": "ss_device" }
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{fields, ApplicationSettings};
use crate::error::{ConfigError, ConfigErrorReason, ConfigResult};
use crate::validation::{MAX_OWNERSHIP_PERCENT, MIN_CONTRIBUTORS};

/// Backend endpoint URL.
pub const ENV_BACKEND_URL: &str = "BACKEND_URL";
/// Backend public API key.
pub const ENV_BACKEND_API_KEY: &str = "BACKEND_API_KEY";
/// Debug logging flag.
pub const ENV_DEBUG: &str = "DEBUG";

// =============================================================================
// Raw inputs
// =============================================================================

/// Unvalidated backend values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendInput {
    pub endpoint_url: Option<String>,
    pub public_api_key: Option<String>,
    pub debug_logging_enabled: Option<bool>,
}

impl BackendInput {
    /// Read backend values from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read backend values through a lookup function.
    ///
    /// Values are trimmed and blank values count as absent. An
    /// unrecognized `DEBUG` value is reported and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let debug_logging_enabled = non_blank(ENV_DEBUG).and_then(|raw| {
            let parsed = parse_flag(&raw);
            if parsed.is_none() {
                tracing::warn!(
                    variable = ENV_DEBUG,
                    value = %raw,
                    "unrecognized boolean, debug logging stays disabled"
                );
            }
            parsed
        });

        Self {
            endpoint_url: non_blank(ENV_BACKEND_URL),
            public_api_key: non_blank(ENV_BACKEND_API_KEY),
            debug_logging_enabled,
        }
    }
}

/// Parse a boolean flag as commonly written in environment variables.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Everything [`super::load`] validates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsInput {
    pub backend: BackendInput,
    pub app: ApplicationSettings,
}

impl SettingsInput {
    /// Compiled-in application defaults, no backend values.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Defaults, then the overrides file (if any), then the environment.
    pub fn from_env_and_file(overrides: Option<&Path>) -> ConfigResult<Self> {
        Self::from_env_and_file_with(overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`SettingsInput::from_env_and_file`], reading variables
    /// through `lookup`.
    pub fn from_env_and_file_with<F>(overrides: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut input = Self::defaults();
        if let Some(path) = overrides {
            read_overrides(path)?.apply(&mut input.app)?;
            tracing::debug!(path = %path.display(), "applied settings overrides");
        }
        input.backend = BackendInput::from_lookup(lookup);
        Ok(input)
    }
}

// =============================================================================
// Overrides file
// =============================================================================

/// Partial storage key names; absent keys keep their current name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StorageKeyOverrides {
    pub device_id: Option<String>,
    pub active_session: Option<String>,
    pub pending_changes: Option<String>,
}

/// Partial [`ApplicationSettings`] read from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApplicationOverrides {
    pub version: Option<String>,
    pub cache_namespace: Option<String>,
    /// Signed so negative values reach the range check
    pub max_contributors_per_session: Option<i64>,
    pub default_creator_ownership_percent: Option<i64>,
    pub contributor_roles: Option<Vec<String>>,
    pub rights_types: Option<Vec<String>>,
    pub pro_affiliations: Option<Vec<String>>,
    pub storage_key_names: Option<StorageKeyOverrides>,
}

impl ApplicationOverrides {
    /// Parse overrides from JSON text.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            ConfigError::new(
                fields::SETTINGS_FILE,
                ConfigErrorReason::Malformed(e.to_string()),
            )
        })
    }

    /// Overwrite every field present in the overrides.
    ///
    /// Numbers that do not fit their field fail with the field's own name;
    /// everything else is left to [`super::load`].
    pub fn apply(self, app: &mut ApplicationSettings) -> ConfigResult<()> {
        if let Some(v) = self.version {
            app.version = v;
        }
        if let Some(v) = self.cache_namespace {
            app.cache_namespace = v;
        }
        if let Some(v) = self.max_contributors_per_session {
            app.max_contributors_per_session = contributor_limit(v)?;
        }
        if let Some(v) = self.default_creator_ownership_percent {
            app.default_creator_ownership_percent = ownership_percent(v)?;
        }
        if let Some(v) = self.contributor_roles {
            app.contributor_roles = v;
        }
        if let Some(v) = self.rights_types {
            app.rights_types = v;
        }
        if let Some(v) = self.pro_affiliations {
            app.pro_affiliations = v;
        }
        if let Some(keys) = self.storage_key_names {
            let names = &mut app.storage_key_names;
            if let Some(v) = keys.device_id {
                names.device_id = v;
            }
            if let Some(v) = keys.active_session {
                names.active_session = v;
            }
            if let Some(v) = keys.pending_changes {
                names.pending_changes = v;
            }
        }
        Ok(())
    }
}

fn contributor_limit(value: i64) -> ConfigResult<u32> {
    let min = i64::from(MIN_CONTRIBUTORS);
    if value < min {
        return Err(ConfigError::new(
            fields::MAX_CONTRIBUTORS_PER_SESSION,
            ConfigErrorReason::BelowMinimum { value, min },
        ));
    }
    u32::try_from(value).map_err(|_| {
        ConfigError::new(
            fields::MAX_CONTRIBUTORS_PER_SESSION,
            ConfigErrorReason::OutOfRange {
                value,
                min,
                max: i64::from(u32::MAX),
            },
        )
    })
}

fn ownership_percent(value: i64) -> ConfigResult<u32> {
    let max = i64::from(MAX_OWNERSHIP_PERCENT);
    if !(0..=max).contains(&value) {
        return Err(ConfigError::new(
            fields::DEFAULT_CREATOR_OWNERSHIP_PERCENT,
            ConfigErrorReason::OutOfRange { value, min: 0, max },
        ));
    }
    // In range, so it fits.
    Ok(value as u32)
}

/// Read an overrides file.
pub fn read_overrides(path: &Path) -> ConfigResult<ApplicationOverrides> {
    let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::new(
            fields::SETTINGS_FILE,
            ConfigErrorReason::Unreadable(format!("{}: {}", path.display(), e)),
        )
    })?;
    ApplicationOverrides::from_json(&content)
}
