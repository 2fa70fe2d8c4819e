//! File and environment backed settings.
//!
//! Settings are read from TOML and then overlaid with environment variables
//! prefixed with `URL_SIGNER__`, e.g. `URL_SIGNER__DEFAULT_EXPIRATION=15` or
//! `URL_SIGNER__PARAMETERS__SIGNATURE=sig`.

use std::fs;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::UrlSignerError;

pub const ENVIRONMENT_PREFIX: &str = "URL_SIGNER";

/// Default lifetime of a signed URL, in minutes.
pub const DEFAULT_EXPIRATION_MINUTES: u32 = 60;
pub const DEFAULT_EXPIRES_PARAMETER: &str = "expires";
pub const DEFAULT_SIGNATURE_PARAMETER: &str = "signature";

/// Query parameter names used in signed URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[validate(schema(function = "validate_distinct_parameters"))]
pub struct Parameters {
    #[validate(length(min = 1))]
    pub expires: String,
    #[validate(length(min = 1))]
    pub signature: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            expires: DEFAULT_EXPIRES_PARAMETER.to_string(),
            signature: DEFAULT_SIGNATURE_PARAMETER.to_string(),
        }
    }
}

fn validate_distinct_parameters(parameters: &Parameters) -> Result<(), ValidationError> {
    if parameters.expires == parameters.signature {
        return Err(ValidationError::new("distinct_parameters")
            .with_message("expires and signature parameter names must differ".into()));
    }
    Ok(())
}

#[derive(Clone, Deserialize, Validate)]
pub struct Settings {
    /// PEM private key. Only needed by deployments that mint URLs.
    #[serde(default)]
    pub private_key: Option<String>,
    #[validate(length(min = 1))]
    pub public_key: String,
    #[serde(default = "default_expiration")]
    #[validate(range(min = 1))]
    pub default_expiration: u32,
    #[serde(default)]
    #[validate(nested)]
    pub parameters: Parameters,
}

fn default_expiration() -> u32 {
    DEFAULT_EXPIRATION_MINUTES
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("public_key", &self.public_key)
            .field("default_expiration", &self.default_expiration)
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl Settings {
    /// Parses settings from a TOML string, applies environment overrides and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if the TOML is malformed, a
    /// required field is missing, or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<UrlSignerError>> {
        let environment = Environment::default()
            .prefix(ENVIRONMENT_PREFIX)
            .separator("__");

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(UrlSignerError::Configuration {
                message: "Failed to build configuration".into(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(UrlSignerError::Configuration {
                    message: "Failed to deserialize settings".into(),
                })?;

        settings
            .validate()
            .change_context(UrlSignerError::Configuration {
                message: "Settings validation failed".into(),
            })?;

        Ok(settings)
    }

    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if the file cannot be read or
    /// its contents are invalid.
    pub fn from_file(path: &Path) -> Result<Self, Report<UrlSignerError>> {
        let toml_str = fs::read_to_string(path).change_context(UrlSignerError::Configuration {
            message: format!("Failed to read settings file '{}'", path.display()),
        })?;

        log::debug!("Loading settings from '{}'", path.display());
        Self::from_toml(&toml_str).attach(format!("while loading '{}'", path.display()))
    }

    /// Whether these settings can mint new URLs, not just validate them.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.private_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}
