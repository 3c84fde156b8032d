//! Settings records for SongSplit.
//!
//! Two immutable records are produced at startup:
//!
//! - [`BackendConnectionSettings`] - How to reach the hosted backend
//! - [`ApplicationSettings`] - Vocabulary, limits and storage key names
//!
//! They are only handed out as part of a validated [`Settings`] value built
//! by [`load`]. See [`SettingsProvider`] for the single-shot startup
//! wrapper.

mod provider;
mod sources;

pub use provider::{load, SettingsProvider};
pub use sources::{
    parse_flag, read_overrides, ApplicationOverrides, BackendInput, SettingsInput,
    StorageKeyOverrides, ENV_BACKEND_API_KEY, ENV_BACKEND_URL, ENV_DEBUG,
};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use url::Url;

use crate::models::{ContributorRole, ProAffiliation, RightsType, StorageKey};

// =============================================================================
// Field names
// =============================================================================

/// Field names used in error reports and settings files.
pub mod fields {
    pub const ENDPOINT_URL: &str = "endpointUrl";
    pub const PUBLIC_API_KEY: &str = "publicApiKey";
    pub const DEBUG_LOGGING_ENABLED: &str = "debugLoggingEnabled";
    pub const VERSION: &str = "version";
    pub const CACHE_NAMESPACE: &str = "cacheNamespace";
    pub const MAX_CONTRIBUTORS_PER_SESSION: &str = "maxContributorsPerSession";
    pub const DEFAULT_CREATOR_OWNERSHIP_PERCENT: &str = "defaultCreatorOwnershipPercent";
    pub const CONTRIBUTOR_ROLES: &str = "contributorRoles";
    pub const RIGHTS_TYPES: &str = "rightsTypes";
    pub const PRO_AFFILIATIONS: &str = "proAffiliations";
    pub const STORAGE_KEY_NAMES: &str = "storageKeyNames";
    pub const SETTINGS_FILE: &str = "settingsFile";
}

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_VERSION: &str = "1.0.0";

/// Cache namespace used by the offline cache.
pub const DEFAULT_CACHE_NAMESPACE: &str = "splitsheet-v1";

pub const DEFAULT_MAX_CONTRIBUTORS: u32 = 10;

/// Share given to the session creator before any edits.
pub const DEFAULT_CREATOR_OWNERSHIP_PERCENT: u32 = 50;

pub const DEFAULT_DEVICE_ID_KEY: &str = "splitsheet_device_id";
pub const DEFAULT_ACTIVE_SESSION_KEY: &str = "splitsheet_active_session";
pub const DEFAULT_PENDING_CHANGES_KEY: &str = "splitsheet_pending_changes";

// =============================================================================
// API Key
// =============================================================================

/// Bearer token for the backend.
///
/// Formatting and serialization always mask the value. Use
/// [`ApiKey::expose`] where the raw token is needed (request headers).
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw token.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form safe for logs: the first four characters, then `****`.
    /// Short keys are masked entirely.
    pub fn masked(&self) -> String {
        if self.0.chars().count() <= 8 {
            return "****".to_string();
        }
        let visible: String = self.0.chars().take(4).collect();
        format!("{}****", visible)
    }

    /// `role` claim of the key, if it is a JWT carrying one.
    ///
    /// Hosted backends issue public "anon" keys and privileged
    /// "service_role" keys in this format. The signature is not verified.
    pub fn jwt_role(&self) -> Option<String> {
        let mut parts = self.0.split('.');
        let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        claims.get("role")?.as_str().map(str::to_string)
    }

    /// True for privileged keys that must never ship to clients.
    pub fn is_service_role(&self) -> bool {
        self.jwt_role().as_deref() == Some("service_role")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.masked())
    }
}

// =============================================================================
// Backend Connection Settings
// =============================================================================

/// Connection parameters for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConnectionSettings {
    endpoint_url: String,
    #[serde(skip)]
    endpoint: Url,
    public_api_key: ApiKey,
    debug_logging_enabled: bool,
}

impl BackendConnectionSettings {
    /// Assemble from already validated parts.
    pub(crate) fn new(
        endpoint_url: String,
        endpoint: Url,
        public_api_key: ApiKey,
        debug_logging_enabled: bool,
    ) -> Self {
        Self {
            endpoint_url,
            endpoint,
            public_api_key,
            debug_logging_enabled,
        }
    }

    /// Endpoint URL exactly as configured.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Parsed endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn public_api_key(&self) -> &ApiKey {
        &self.public_api_key
    }

    pub fn debug_logging_enabled(&self) -> bool {
        self.debug_logging_enabled
    }
}

// =============================================================================
// Storage Key Names
// =============================================================================

/// Underlying local-storage key name for each [`StorageKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StorageKeyNames {
    pub device_id: String,
    pub active_session: String,
    pub pending_changes: String,
}

impl StorageKeyNames {
    /// Key name for a logical key.
    pub fn get(&self, key: StorageKey) -> &str {
        match key {
            StorageKey::DeviceId => &self.device_id,
            StorageKey::ActiveSession => &self.active_session,
            StorageKey::PendingChanges => &self.pending_changes,
        }
    }

    /// `(logical key, key name)` pairs in [`StorageKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (StorageKey, &str)> + '_ {
        StorageKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

impl Default for StorageKeyNames {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID_KEY.to_string(),
            active_session: DEFAULT_ACTIVE_SESSION_KEY.to_string(),
            pending_changes: DEFAULT_PENDING_CHANGES_KEY.to_string(),
        }
    }
}

// =============================================================================
// Application Settings
// =============================================================================

/// Application-wide constants and enumerations.
///
/// Enumerations are ordered: insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApplicationSettings {
    /// Semantic version of the app
    pub version: String,
    /// Namespace used by the offline cache
    pub cache_namespace: String,
    /// Upper bound on contributors in one split sheet session
    pub max_contributors_per_session: u32,
    /// Initial share of the session creator (0-100)
    pub default_creator_ownership_percent: u32,
    pub contributor_roles: Vec<String>,
    pub rights_types: Vec<String>,
    pub pro_affiliations: Vec<String>,
    pub storage_key_names: StorageKeyNames,
}

impl ApplicationSettings {
    pub fn has_contributor_role(&self, role: &str) -> bool {
        self.contributor_roles.iter().any(|r| r == role)
    }

    pub fn has_rights_type(&self, rights: &str) -> bool {
        self.rights_types.iter().any(|r| r == rights)
    }

    pub fn has_pro_affiliation(&self, pro: &str) -> bool {
        self.pro_affiliations.iter().any(|p| p == pro)
    }

    /// Underlying storage key name for a logical key.
    pub fn storage_key(&self, key: StorageKey) -> &str {
        self.storage_key_names.get(key)
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            cache_namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            max_contributors_per_session: DEFAULT_MAX_CONTRIBUTORS,
            default_creator_ownership_percent: DEFAULT_CREATOR_OWNERSHIP_PERCENT,
            contributor_roles: ContributorRole::ALL
                .iter()
                .map(|r| r.label().to_string())
                .collect(),
            rights_types: RightsType::ALL
                .iter()
                .map(|r| r.label().to_string())
                .collect(),
            pro_affiliations: ProAffiliation::ALL
                .iter()
                .map(|p| p.label().to_string())
                .collect(),
            storage_key_names: StorageKeyNames::default(),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Validated settings: both records, as produced by [`load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    backend: BackendConnectionSettings,
    app: ApplicationSettings,
}

impl Settings {
    pub(crate) fn new(backend: BackendConnectionSettings, app: ApplicationSettings) -> Self {
        Self { backend, app }
    }

    pub fn backend(&self) -> &BackendConnectionSettings {
        &self.backend
    }

    pub fn app(&self) -> &ApplicationSettings {
        &self.app
    }

    /// Split into the two records.
    pub fn into_parts(self) -> (BackendConnectionSettings, ApplicationSettings) {
        (self.backend, self.app)
    }
}
