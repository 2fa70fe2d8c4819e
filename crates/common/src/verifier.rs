//! Verification of signed URLs.
//!
//! [`UrlVerifier::validate`] answers with a plain `bool`. Malformed input,
//! expired links and forged signatures are all `false`; the reason is logged
//! at `debug` level.

use std::fmt;
use std::sync::Arc;

use derive_more::Display;
use error_stack::Report;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha2::Sha256;

use crate::clock::{SystemTimeSource, TimeSource};
use crate::codec;
use crate::error::UrlSignerError;
use crate::expiration::is_expired;
use crate::keys::parse_public_key;
use crate::payload::build_payload;
use crate::query::SignableUrl;
use crate::signer_config::{ParameterNames, VerifierConfig};

/// Anything that can answer "is this signed URL acceptable right now?".
pub trait ValidateSignedUrl: Send + Sync {
    fn validate(&self, url: &str) -> bool;
}

/// Why a URL was rejected. Only used for logging.
#[derive(Debug, Display)]
enum Rejection {
    #[display("URL could not be parsed")]
    MalformedUrl,
    #[display("missing '{_0}' parameter")]
    MissingParameter(String),
    #[display("'{_0}' parameter given more than once")]
    DuplicateParameter(String),
    #[display("expiration '{_0}' is not a canonical Unix timestamp")]
    MalformedExpiration(String),
    #[display("expired at {_0}")]
    Expired(i64),
    #[display("signature is not valid URL-safe base64")]
    MalformedSignature,
    #[display("signature does not match")]
    SignatureMismatch,
}

/// Checks signed URLs using only the public key.
pub struct UrlVerifier {
    verifying_key: VerifyingKey<Sha256>,
    parameters: ParameterNames,
    pub(crate) time_source: Arc<dyn TimeSource>,
}

impl UrlVerifier {
    /// Creates a verifier that reads the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if the public key cannot be parsed.
    pub fn new(config: &VerifierConfig) -> Result<Self, Report<UrlSignerError>> {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    /// Creates a verifier with an explicit notion of "now".
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignerError::Configuration`] if the public key cannot be parsed.
    pub fn with_time_source(
        config: &VerifierConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, Report<UrlSignerError>> {
        let public_key = parse_public_key(config.public_key())?;
        Ok(Self::from_parts(
            public_key,
            config.parameters().clone(),
            time_source,
        ))
    }

    pub(crate) fn from_parts(
        public_key: RsaPublicKey,
        parameters: ParameterNames,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            verifying_key: VerifyingKey::new(public_key),
            parameters,
            time_source,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &ParameterNames {
        &self.parameters
    }

    /// Returns `true` only for an unexpired URL whose signature matches.
    #[must_use]
    pub fn validate(&self, url: &str) -> bool {
        match self.check(url) {
            Ok(()) => true,
            Err(rejection) => {
                log::debug!("Rejected signed URL: {}", rejection);
                false
            }
        }
    }

    fn check(&self, url: &str) -> Result<(), Rejection> {
        let url = SignableUrl::parse(url).map_err(|_| Rejection::MalformedUrl)?;

        let expires_name = self.parameters.expires();
        let signature_name = self.parameters.signature();

        for name in [expires_name, signature_name] {
            match url.param_count(name) {
                0 => return Err(Rejection::MissingParameter(name.to_string())),
                1 => {}
                _ => return Err(Rejection::DuplicateParameter(name.to_string())),
            }
        }

        let raw_expires = url
            .param(expires_name)
            .ok_or_else(|| Rejection::MissingParameter(expires_name.to_string()))?;
        let raw_signature = url
            .param(signature_name)
            .ok_or_else(|| Rejection::MissingParameter(signature_name.to_string()))?;

        let expires =
            parse_timestamp(&raw_expires).ok_or(Rejection::MalformedExpiration(raw_expires))?;
        if is_expired(expires, self.time_source.now()) {
            return Err(Rejection::Expired(expires));
        }

        let intended = url.without_params(&[expires_name, signature_name]);
        let payload = build_payload(intended.as_str(), expires);

        let signature_bytes =
            codec::decode(&raw_signature).map_err(|_| Rejection::MalformedSignature)?;
        let signature = Signature::try_from(signature_bytes.as_slice())
            .map_err(|_| Rejection::MalformedSignature)?;

        self.verifying_key
            .verify(&payload, &signature)
            .map_err(|_| Rejection::SignatureMismatch)
    }
}

impl ValidateSignedUrl for UrlVerifier {
    fn validate(&self, url: &str) -> bool {
        UrlVerifier::validate(self, url)
    }
}

impl fmt::Debug for UrlVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlVerifier")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Accepts only the form the signer writes: ASCII digits, no sign, no
/// leading zeros.
fn parse_timestamp(raw: &str) -> Option<i64> {
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    if !canonical {
        return None;
    }
    raw.parse().ok()
}
