//! Shared configuration loader for the banner toolchain.
//!
//! `defaults/banner.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`BannerConfig`].
//!
//! Access tokens deliberately have no place here: they come from a CLI flag
//! or the environment, never from a file that might get committed.

use banner_core::StoreOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/banner.default.toml");

/// Top-level configuration consumed by banner applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BannerConfig {
    pub service: ServiceConfig,
    pub message: MessageConfig,
}

/// Where the settings store lives and how to address it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_version: String,
}

impl ServiceConfig {
    /// Combine the configured endpoint with a token into client options.
    pub fn store_options(&self, access_token: String) -> StoreOptions {
        StoreOptions {
            base_url: self.base_url.clone(),
            access_token,
            api_version: self.api_version.clone(),
        }
    }
}

/// Limits applied to banner messages before they are saved.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageConfig {
    pub max_words: usize,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BannerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BannerConfig, ConfigError> {
    Loader::new().build()
}
