//! # SongSplit - settings for the split sheet engine
//!
//! SongSplit records who owns what share of a song. Every part of the
//! application (backend client, session forms, offline persistence) reads
//! the same startup settings, which this crate assembles and validates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Defaults   │────▶│  Overrides  │────▶│ Environment │────▶│  Validated  │
//! │ (compiled)  │     │   (JSON)    │     │ (.env/vars) │     │  Settings   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use songsplit::SettingsProvider;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = SettingsProvider::from_env(None)?;
//!     let settings = provider.get()?;
//!     println!("Backend: {}", settings.backend().endpoint_url());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Configuration error type
//! - [`models`] - Typed vocabulary (roles, rights, PROs, storage keys)
//! - [`settings`] - Settings records, sources and provider
//! - [`validation`] - Invariant checks
//! - [`logging`] - Tracing setup for the binary

// Core modules
pub mod error;
pub mod models;

// Settings
pub mod settings;
pub mod validation;

// Logging
pub mod logging;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, ConfigErrorReason, ConfigResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ContributorRole, ProAffiliation, RightsType, StorageKey};

// =============================================================================
// Re-exports - Settings
// =============================================================================

pub use settings::{
    load, ApiKey, ApplicationOverrides, ApplicationSettings, BackendConnectionSettings,
    BackendInput, Settings, SettingsInput, SettingsProvider, StorageKeyNames,
};
