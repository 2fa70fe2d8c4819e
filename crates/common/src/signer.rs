//! Minting signed URLs.
//!
//! A signed URL is the input URL with two query parameters appended:
//! the expiration as Unix seconds, and an RSASSA-PKCS1-v1_5 / SHA-256
//! signature over `"<url>::<expires>"` in URL-safe base64.

use std::fmt;
use std::sync::Arc;

use chrono::TimeDelta;
use error_stack::Report;
use rand::rngs::OsRng;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use sha2::Sha256;

use crate::clock::{SystemTimeSource, TimeSource};
use crate::codec;
use crate::error::UrlSignerError;
use crate::expiration::Expiration;
use crate::keys::{parse_private_key, parse_public_key};
use crate::payload::build_payload;
use crate::query::SignableUrl;
use crate::signer_config::SignerConfig;
use crate::verifier::{UrlVerifier, ValidateSignedUrl};

/// Signs URLs with the private key and validates them with the matching
/// public key.
pub struct UrlSigner {
    signing_key: SigningKey<Sha256>,
    default_expiration: TimeDelta,
    verifier: UrlVerifier,
}

impl UrlSigner {
    /// Creates a signer that reads the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if either key cannot be
    /// parsed or the public key does not belong to the private key.
    pub fn new(config: &SignerConfig) -> Result<Self, Report<UrlSignerError>> {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    /// Creates a signer with an explicit notion of "now".
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if either key cannot be
    /// parsed or the public key does not belong to the private key.
    pub fn with_time_source(
        config: &SignerConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, Report<UrlSignerError>> {
        let private_key = parse_private_key(config.private_key())?;
        let public_key = parse_public_key(config.public_key())?;

        if private_key.to_public_key() != public_key {
            return Err(Report::new(UrlSignerError::Configuration {
                message: "Public key does not belong to the configured private key".into(),
            }));
        }

        Ok(Self {
            signing_key: SigningKey::new(private_key),
            default_expiration: TimeDelta::minutes(i64::from(config.default_expiration_minutes())),
            verifier: UrlVerifier::from_parts(
                public_key,
                config.parameters().clone(),
                time_source,
            ),
        })
    }

    /// Signs `url`, valid until `expiration` (or the configured default).
    ///
    /// Any `expires`/`signature` parameters already on `url` are replaced.
    ///
    /// # Errors
    ///
    /// - [`UrlSignerError::InvalidUrl`] if `url` is not an absolute URL
    /// - [`UrlSignerError::InvalidExpiration`] if the expiration is not in the future
    /// - [`UrlSignerError::Signing`] if the RSA operation fails
    pub fn sign(
        &self,
        url: &str,
        expiration: Option<Expiration>,
    ) -> Result<String, Report<UrlSignerError>> {
        let expiration = expiration.unwrap_or(Expiration::In(self.default_expiration));
        let expires = expiration.resolve(self.verifier.time_source.now())?;

        let parameters = self.verifier.parameters();
        let url = SignableUrl::parse(url)?
            .without_params(&[parameters.expires(), parameters.signature()]);

        let payload = build_payload(url.as_str(), expires);
        // Blinded; PKCS#1 v1.5 output is still deterministic.
        let signature = self
            .signing_key
            .try_sign_with_rng(&mut OsRng, &payload)
            .map_err(|e| {
                Report::new(UrlSignerError::Signing {
                    message: format!("RSA-SHA256 signing failed: {}", e),
                })
            })?;

        let signed = url
            .with_param(parameters.expires(), &expires.to_string())
            .with_param(parameters.signature(), &codec::encode(&signature.to_vec()));

        log::debug!("Signed URL valid until {}", expires);
        Ok(signed.to_string())
    }

    /// Same as [`UrlVerifier::validate`] with this signer's public key.
    #[must_use]
    pub fn validate(&self, url: &str) -> bool {
        self.verifier.validate(url)
    }

    #[must_use]
    pub fn verifier(&self) -> &UrlVerifier {
        &self.verifier
    }
}

impl ValidateSignedUrl for UrlSigner {
    fn validate(&self, url: &str) -> bool {
        UrlSigner::validate(self, url)
    }
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner")
            .field("default_expiration", &self.default_expiration)
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}
