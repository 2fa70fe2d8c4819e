//! Validated, immutable configuration for [`crate::signer::UrlSigner`] and
//! [`crate::verifier::UrlVerifier`].

use std::fmt;

use error_stack::Report;

use crate::error::UrlSignerError;
use crate::settings::{Settings, DEFAULT_EXPIRES_PARAMETER, DEFAULT_SIGNATURE_PARAMETER};

/// Names of the two query parameters a signed URL carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterNames {
    expires: String,
    signature: String,
}

impl ParameterNames {
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if either name is empty or
    /// both names are the same.
    pub fn new(
        expires: impl Into<String>,
        signature: impl Into<String>,
    ) -> Result<Self, Report<UrlSignerError>> {
        let expires = expires.into();
        let signature = signature.into();

        for (argument, value) in [("expires", &expires), ("signature", &signature)] {
            if value.is_empty() {
                return Err(Report::new(UrlSignerError::Configuration {
                    message: format!("Invalid argument for {} parameter supplied", argument),
                }));
            }
        }

        if expires == signature {
            return Err(Report::new(UrlSignerError::Configuration {
                message: format!(
                    "Expires and signature parameters must differ (both are '{}')",
                    expires
                ),
            }));
        }

        Ok(Self { expires, signature })
    }

    #[must_use]
    pub fn expires(&self) -> &str {
        &self.expires
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl Default for ParameterNames {
    fn default() -> Self {
        Self {
            expires: DEFAULT_EXPIRES_PARAMETER.to_string(),
            signature: DEFAULT_SIGNATURE_PARAMETER.to_string(),
        }
    }
}

/// Everything needed to mint and check signed URLs.
#[derive(Clone)]
pub struct SignerConfig {
    private_key: String,
    public_key: String,
    default_expiration_minutes: u32,
    parameters: ParameterNames,
}

impl SignerConfig {
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if a key is empty or the
    /// default expiration is zero.
    pub fn new(
        private_key: impl Into<String>,
        public_key: impl Into<String>,
        default_expiration_minutes: u32,
        parameters: ParameterNames,
    ) -> Result<Self, Report<UrlSignerError>> {
        let private_key = private_key.into();
        let public_key = public_key.into();

        for (argument, value) in [("privateKey", &private_key), ("publicKey", &public_key)] {
            if value.trim().is_empty() {
                return Err(Report::new(UrlSignerError::Configuration {
                    message: format!("Invalid argument for {} parameter supplied", argument),
                }));
            }
        }

        if default_expiration_minutes == 0 {
            return Err(Report::new(UrlSignerError::Configuration {
                message: "The default expiration time must be a positive number of minutes"
                    .into(),
            }));
        }

        Ok(Self {
            private_key,
            public_key,
            default_expiration_minutes,
            parameters,
        })
    }

    #[must_use]
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    #[must_use]
    pub fn default_expiration_minutes(&self) -> u32 {
        self.default_expiration_minutes
    }

    #[must_use]
    pub fn parameters(&self) -> &ParameterNames {
        &self.parameters
    }

    /// The verification half of this configuration.
    #[must_use]
    pub fn verifier_config(&self) -> VerifierConfig {
        VerifierConfig {
            public_key: self.public_key.clone(),
            parameters: self.parameters.clone(),
        }
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field(
                "default_expiration_minutes",
                &self.default_expiration_minutes,
            )
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl TryFrom<&Settings> for SignerConfig {
    type Error = Report<UrlSignerError>;

    fn try_from(settings: &Settings) -> Result<Self, Self::Error> {
        let private_key = settings.private_key.clone().ok_or_else(|| {
            Report::new(UrlSignerError::Configuration {
                message: "Signing requires a private_key in the settings".into(),
            })
        })?;

        Self::new(
            private_key,
            settings.public_key.clone(),
            settings.default_expiration,
            ParameterNames::new(
                settings.parameters.expires.clone(),
                settings.parameters.signature.clone(),
            )?,
        )
    }
}

/// Public-key-only configuration for recipients that validate but never sign.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    public_key: String,
    parameters: ParameterNames,
}

impl VerifierConfig {
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if the public key is empty.
    pub fn new(
        public_key: impl Into<String>,
        parameters: ParameterNames,
    ) -> Result<Self, Report<UrlSignerError>> {
        let public_key = public_key.into();
        if public_key.trim().is_empty() {
            return Err(Report::new(UrlSignerError::Configuration {
                message: "Invalid argument for publicKey parameter supplied".into(),
            }));
        }

        Ok(Self {
            public_key,
            parameters,
        })
    }

    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    #[must_use]
    pub fn parameters(&self) -> &ParameterNames {
        &self.parameters
    }
}

impl TryFrom<&Settings> for VerifierConfig {
    type Error = Report<UrlSignerError>;

    fn try_from(settings: &Settings) -> Result<Self, Self::Error> {
        Self::new(
            settings.public_key.clone(),
            ParameterNames::new(
                settings.parameters.expires.clone(),
                settings.parameters.signature.clone(),
            )?,
        )
    }
}
