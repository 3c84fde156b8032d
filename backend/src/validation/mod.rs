//! Validation rules for settings values.
//!
//! Each rule checks one value and returns a [`ConfigErrorReason`] on
//! failure; [`validate_backend`] and [`validate_application`] attach field
//! names and run the rules in field declaration order, stopping at the
//! first violation.
//!
//! # Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | `endpointUrl` | required, absolute `http`/`https` URL with a host, no surrounding whitespace |
//! | `publicApiKey` | required, not blank, no surrounding whitespace |
//! | `version` | semantic version |
//! | `cacheNamespace` | not blank, no whitespace |
//! | `maxContributorsPerSession` | `>= 1` |
//! | `defaultCreatorOwnershipPercent` | `0..=100` |
//! | `contributorRoles`, `rightsTypes`, `proAffiliations` | non-empty, no blank or duplicate entries |
//! | `storageKeyNames` | no blank names, no two keys share a name |

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use url::Url;

use crate::error::{ConfigError, ConfigErrorReason, ConfigResult};
use crate::settings::{
    fields, ApiKey, ApplicationSettings, BackendConnectionSettings, BackendInput, StorageKeyNames,
};

/// Semantic version, per semver.org.
static SEMVER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-((?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("valid semver regex")
});

pub const MIN_CONTRIBUTORS: u32 = 1;
pub const MAX_OWNERSHIP_PERCENT: u32 = 100;

// =============================================================================
// Single-value rules
// =============================================================================

/// Parse an absolute `http`/`https` URL with a host.
///
/// Surrounding whitespace is rejected: the configured string is handed to
/// clients verbatim.
pub fn check_endpoint_url(raw: &str) -> Result<Url, ConfigErrorReason> {
    check_not_padded(raw)?;

    let url = Url::parse(raw).map_err(|e| ConfigErrorReason::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigErrorReason::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigErrorReason::InvalidUrl("missing host".to_string()));
    }

    Ok(url)
}

pub fn check_not_blank(value: &str) -> Result<(), ConfigErrorReason> {
    if value.trim().is_empty() {
        Err(ConfigErrorReason::Empty)
    } else {
        Ok(())
    }
}

pub fn check_version(value: &str) -> Result<(), ConfigErrorReason> {
    if SEMVER_RE.is_match(value) {
        Ok(())
    } else {
        Err(ConfigErrorReason::InvalidVersion(value.to_string()))
    }
}

/// Non-blank value without leading or trailing whitespace.
pub fn check_not_padded(value: &str) -> Result<(), ConfigErrorReason> {
    check_not_blank(value)?;
    if value.trim() != value {
        return Err(ConfigErrorReason::Whitespace);
    }
    Ok(())
}

/// Non-blank identifier without whitespace.
pub fn check_identifier(value: &str) -> Result<(), ConfigErrorReason> {
    check_not_blank(value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigErrorReason::Whitespace);
    }
    Ok(())
}

/// Inclusive range check.
pub fn check_range(value: u32, min: u32, max: u32) -> Result<(), ConfigErrorReason> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigErrorReason::OutOfRange {
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        })
    }
}

/// Lower-bound check for values with no meaningful upper bound.
pub fn check_minimum(value: u32, min: u32) -> Result<(), ConfigErrorReason> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigErrorReason::BelowMinimum {
            value: i64::from(value),
            min: i64::from(min),
        })
    }
}

/// Non-empty list without blank or duplicate entries.
///
/// Entries compare exactly: `"Artist"` and `"artist"` are distinct.
pub fn check_unique_entries(entries: &[String]) -> Result<(), ConfigErrorReason> {
    if entries.is_empty() {
        return Err(ConfigErrorReason::Empty);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(ConfigErrorReason::BlankEntry(i));
        }
        if !seen.insert(entry.as_str()) {
            return Err(ConfigErrorReason::Duplicate(entry.clone()));
        }
    }
    Ok(())
}

/// Every key name is non-blank and no two logical keys share one.
pub fn check_storage_keys(names: &StorageKeyNames) -> Result<(), ConfigErrorReason> {
    let pairs: Vec<_> = names.iter().collect();

    for (_, name) in &pairs {
        check_not_blank(name)?;
    }

    for (i, (first, name)) in pairs.iter().enumerate() {
        if let Some((second, _)) = pairs[i + 1..].iter().find(|(_, other)| other == name) {
            return Err(ConfigErrorReason::Collision {
                first: first.logical_name().to_string(),
                second: second.logical_name().to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Record validation
// =============================================================================

fn field<T>(name: &str, result: Result<T, ConfigErrorReason>) -> ConfigResult<T> {
    result.map_err(|reason| ConfigError::new(name, reason))
}

/// Validate raw backend values into [`BackendConnectionSettings`].
///
/// URL and API key are required; the debug flag defaults to `false`.
pub fn validate_backend(input: &BackendInput) -> ConfigResult<BackendConnectionSettings> {
    let endpoint_url = input
        .endpoint_url
        .as_deref()
        .ok_or_else(|| ConfigError::missing(fields::ENDPOINT_URL))?;
    let endpoint = field(fields::ENDPOINT_URL, check_endpoint_url(endpoint_url))?;

    let api_key = input
        .public_api_key
        .as_deref()
        .ok_or_else(|| ConfigError::missing(fields::PUBLIC_API_KEY))?;
    field(fields::PUBLIC_API_KEY, check_not_padded(api_key))?;

    Ok(BackendConnectionSettings::new(
        endpoint_url.to_string(),
        endpoint,
        ApiKey::new(api_key),
        input.debug_logging_enabled.unwrap_or(false),
    ))
}

/// Check every [`ApplicationSettings`] invariant.
pub fn validate_application(app: &ApplicationSettings) -> ConfigResult<()> {
    field(fields::VERSION, check_version(&app.version))?;
    field(fields::CACHE_NAMESPACE, check_identifier(&app.cache_namespace))?;
    field(
        fields::MAX_CONTRIBUTORS_PER_SESSION,
        check_minimum(app.max_contributors_per_session, MIN_CONTRIBUTORS),
    )?;
    field(
        fields::DEFAULT_CREATOR_OWNERSHIP_PERCENT,
        check_range(app.default_creator_ownership_percent, 0, MAX_OWNERSHIP_PERCENT),
    )?;
    field(fields::CONTRIBUTOR_ROLES, check_unique_entries(&app.contributor_roles))?;
    field(fields::RIGHTS_TYPES, check_unique_entries(&app.rights_types))?;
    field(fields::PRO_AFFILIATIONS, check_unique_entries(&app.pro_affiliations))?;
    field(fields::STORAGE_KEY_NAMES, check_storage_keys(&app.storage_key_names))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_endpoint_url_accepts_https() {
        let url = check_endpoint_url("https://lbdauutduonffyaxuime.supabase.co").unwrap();
        assert_eq!(url.host_str(), Some("lbdauutduonffyaxuime.supabase.co"));
    }

    #[test]
    fn test_endpoint_url_rejects_relative() {
        assert!(matches!(
            check_endpoint_url("/rest/v1"),
            Err(ConfigErrorReason::InvalidUrl(_))
        ));
        assert!(matches!(
            check_endpoint_url("supabase.co"),
            Err(ConfigErrorReason::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_url_rejects_other_schemes() {
        assert_eq!(
            check_endpoint_url("ftp://files.example.com"),
            Err(ConfigErrorReason::UnsupportedScheme("ftp".into()))
        );
    }

    #[test]
    fn test_endpoint_url_empty() {
        assert_eq!(check_endpoint_url(""), Err(ConfigErrorReason::Empty));
    }

    #[test]
    fn test_endpoint_url_rejects_padding() {
        assert_eq!(
            check_endpoint_url("  https://x.supabase.co \n"),
            Err(ConfigErrorReason::Whitespace)
        );
    }

    #[test]
    fn test_minimum() {
        assert!(check_minimum(1, 1).is_ok());
        assert_eq!(
            check_minimum(0, 1),
            Err(ConfigErrorReason::BelowMinimum { value: 0, min: 1 })
        );
    }

    #[test]
    fn test_backend_padded_key_is_rejected() {
        let input = BackendInput {
            endpoint_url: Some("https://demo.supabase.co".into()),
            public_api_key: Some("anon-key\n".into()),
            debug_logging_enabled: None,
        };
        let err = validate_backend(&input).unwrap_err();
        assert_eq!(err.field, fields::PUBLIC_API_KEY);
        assert_eq!(err.reason, ConfigErrorReason::Whitespace);
    }

    #[test]
    fn test_versions() {
        assert!(check_version("1.0.0").is_ok());
        assert!(check_version("2.10.3-beta.1+build.5").is_ok());
        assert!(check_version("1.0").is_err());
        assert!(check_version("01.0.0").is_err());
        assert!(check_version("v1.0.0").is_err());
    }

    #[test]
    fn test_identifier() {
        assert!(check_identifier("splitsheet-v1").is_ok());
        assert_eq!(check_identifier("split sheet"), Err(ConfigErrorReason::Whitespace));
        assert_eq!(check_identifier(" "), Err(ConfigErrorReason::Empty));
    }

    #[test]
    fn test_range_is_inclusive() {
        assert!(check_range(0, 0, 100).is_ok());
        assert!(check_range(100, 0, 100).is_ok());
        assert_eq!(
            check_range(150, 0, 100),
            Err(ConfigErrorReason::OutOfRange {
                value: 150,
                min: 0,
                max: 100
            })
        );
    }

    #[test]
    fn test_unique_entries() {
        assert!(check_unique_entries(&strings(&["Master", "Publishing"])).is_ok());
        assert_eq!(
            check_unique_entries(&strings(&["Artist", "Artist"])),
            Err(ConfigErrorReason::Duplicate("Artist".into()))
        );
        assert_eq!(check_unique_entries(&[]), Err(ConfigErrorReason::Empty));
        assert_eq!(
            check_unique_entries(&strings(&["BMI", ""])),
            Err(ConfigErrorReason::BlankEntry(1))
        );
    }

    #[test]
    fn test_storage_key_collision_names_both_keys() {
        let names = StorageKeyNames {
            device_id: "x".into(),
            active_session: "y".into(),
            pending_changes: "x".into(),
        };
        assert_eq!(
            check_storage_keys(&names),
            Err(ConfigErrorReason::Collision {
                first: "deviceId".into(),
                second: "pendingChanges".into(),
                name: "x".into(),
            })
        );
    }

    #[test]
    fn test_backend_debug_defaults_to_false() {
        let input = BackendInput {
            endpoint_url: Some("https://demo.supabase.co".into()),
            public_api_key: Some("anon".into()),
            debug_logging_enabled: None,
        };
        let backend = validate_backend(&input).unwrap();
        assert!(!backend.debug_logging_enabled());
        assert_eq!(backend.endpoint_url(), "https://demo.supabase.co");
    }

    #[test]
    fn test_backend_missing_key() {
        let input = BackendInput {
            endpoint_url: Some("https://demo.supabase.co".into()),
            ..Default::default()
        };
        let err = validate_backend(&input).unwrap_err();
        assert_eq!(err.field, fields::PUBLIC_API_KEY);
        assert_eq!(err.reason, ConfigErrorReason::Missing);
    }

    #[test]
    fn test_default_application_is_valid() {
        assert!(validate_application(&ApplicationSettings::default()).is_ok());
    }
}
