//! `sign` and `validate` commands.

use std::path::Path;

use chrono::{DateTime, Utc};
use url_signer_common::{Expiration, SignerConfig, UrlSigner, UrlVerifier, VerifierConfig};

use crate::config::load_settings;
use crate::error::CliError;

/// Picks the expiration requested on the command line. An absolute time wins
/// over a relative one; neither means the configured default.
pub(crate) fn expiration(minutes: Option<u32>, at: Option<DateTime<Utc>>) -> Option<Expiration> {
    match (at, minutes) {
        (Some(at), _) => Some(Expiration::At(at)),
        (None, Some(minutes)) => Some(Expiration::minutes(minutes)),
        (None, None) => None,
    }
}

/// Signs `url` with the private key from the configuration file.
pub fn sign(file: &Path, url: &str, expiration: Option<Expiration>) -> Result<String, CliError> {
    let settings = load_settings(file)?;
    let signer = UrlSigner::new(&SignerConfig::try_from(&settings)?)?;

    Ok(signer.sign(url, expiration)?)
}

/// Checks `url` against the public key from the configuration file.
pub fn validate(file: &Path, url: &str) -> Result<bool, CliError> {
    let settings = load_settings(file)?;
    let verifier = UrlVerifier::new(&VerifierConfig::try_from(&settings)?)?;

    Ok(verifier.validate(url))
}

/// Parses an RFC 3339 timestamp such as `2030-01-01T00:00:00Z`.
pub(crate) fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}
