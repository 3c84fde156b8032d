//! Settings assembly and the single-shot provider.

use once_cell::sync::OnceCell;
use std::path::Path;

use super::{Settings, SettingsInput};
use crate::error::{ConfigError, ConfigResult};
use crate::validation::{validate_application, validate_backend};

/// Validate raw input into [`Settings`].
///
/// Pure: no I/O, and identical input always yields value-equal settings.
/// Fails with the first [`ConfigError`] found, backend fields first.
pub fn load(input: &SettingsInput) -> ConfigResult<Settings> {
    let backend = validate_backend(&input.backend)?;
    validate_application(&input.app)?;

    let key = backend.public_api_key();
    if key.is_service_role() {
        tracing::warn!(
            key = %key,
            "backend key carries the service_role claim; it must not be shipped to clients"
        );
    }

    tracing::debug!(
        endpoint = %backend.endpoint_url(),
        version = %input.app.version,
        debug_logging = backend.debug_logging_enabled(),
        "settings loaded"
    );

    Ok(Settings::new(backend, input.app.clone()))
}

/// Loads settings once and hands out the same instance afterwards.
///
/// The first call to [`SettingsProvider::get`] runs [`load`]; its outcome,
/// success or error, is kept and returned by every later call. Build one
/// provider in the startup routine and share it (by reference or `Arc`)
/// with the components that need settings.
#[derive(Debug)]
pub struct SettingsProvider {
    input: SettingsInput,
    loaded: OnceCell<ConfigResult<Settings>>,
}

impl SettingsProvider {
    pub fn new(input: SettingsInput) -> Self {
        Self {
            input,
            loaded: OnceCell::new(),
        }
    }

    /// Provider over defaults, an optional overrides file and the
    /// process environment.
    pub fn from_env(overrides: Option<&Path>) -> ConfigResult<Self> {
        Ok(Self::new(SettingsInput::from_env_and_file(overrides)?))
    }

    /// Raw input the provider validates.
    pub fn input(&self) -> &SettingsInput {
        &self.input
    }

    /// Validated settings, loading them on first access.
    pub fn get(&self) -> Result<&Settings, ConfigError> {
        self.loaded
            .get_or_init(|| load(&self.input))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// True once [`SettingsProvider::get`] has run.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{fields, BackendInput};
    use std::sync::Arc;
    use std::thread;

    fn valid_input() -> SettingsInput {
        SettingsInput {
            backend: BackendInput {
                endpoint_url: Some("https://demo.supabase.co".into()),
                public_api_key: Some("public-anon-key".into()),
                debug_logging_enabled: Some(true),
            },
            ..SettingsInput::defaults()
        }
    }

    #[test]
    fn test_get_returns_same_instance() {
        let provider = SettingsProvider::new(valid_input());
        assert!(!provider.is_loaded());

        let first = provider.get().unwrap();
        let second = provider.get().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(provider.is_loaded());
    }

    #[test]
    fn test_get_repeats_first_error() {
        let provider = SettingsProvider::new(SettingsInput::defaults());
        let first = provider.get().unwrap_err();
        let second = provider.get().unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.field, fields::ENDPOINT_URL);
    }

    #[test]
    fn test_shared_across_threads() {
        let provider = Arc::new(SettingsProvider::new(valid_input()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = Arc::clone(&provider);
                thread::spawn(move || provider.get().map(|s| s.app().max_contributors_per_session))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(10));
        }
    }

    #[test]
    fn test_load_is_idempotent() {
        let input = valid_input();
        assert_eq!(load(&input).unwrap(), load(&input).unwrap());
    }
}
