//! PEM parsing for RSA key material.
//!
//! PKCS#8 (`BEGIN PRIVATE KEY`) and SPKI (`BEGIN PUBLIC KEY`) are the expected
//! formats. The older PKCS#1 forms (`BEGIN RSA PRIVATE KEY`,
//! `BEGIN RSA PUBLIC KEY`) are accepted as a fallback.

use error_stack::Report;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::UrlSignerError;

/// Parses a PEM-encoded RSA private key.
///
/// # Errors
///
/// Returns [`UrlSignerError::Configuration`] if the PEM is empty or neither a
/// PKCS#8 nor a PKCS#1 RSA private key.
pub fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, Report<UrlSignerError>> {
    let pem = pem.trim();
    if pem.is_empty() {
        return Err(Report::new(UrlSignerError::Configuration {
            message: "Private key must not be empty".into(),
        }));
    }

    match RsaPrivateKey::from_pkcs8_pem(pem) {
        Ok(key) => Ok(key),
        Err(pkcs8_err) => {
            let key = RsaPrivateKey::from_pkcs1_pem(pem).map_err(|_| {
                Report::new(UrlSignerError::Configuration {
                    message: format!("Failed to parse RSA private key: {}", pkcs8_err),
                })
            })?;
            log::warn!("RSA private key is PKCS#1 encoded; PKCS#8 is preferred");
            Ok(key)
        }
    }
}

/// Parses a PEM-encoded RSA public key.
///
/// # Errors
///
/// Returns [`UrlSignerError::Configuration`] if the PEM is empty or neither an
/// SPKI nor a PKCS#1 RSA public key.
pub fn parse_public_key(pem: &str) -> Result<RsaPublicKey, Report<UrlSignerError>> {
    let pem = pem.trim();
    if pem.is_empty() {
        return Err(Report::new(UrlSignerError::Configuration {
            message: "Public key must not be empty".into(),
        }));
    }

    match RsaPublicKey::from_public_key_pem(pem) {
        Ok(key) => Ok(key),
        Err(spki_err) => {
            let key = RsaPublicKey::from_pkcs1_pem(pem).map_err(|_| {
                Report::new(UrlSignerError::Configuration {
                    message: format!("Failed to parse RSA public key: {}", spki_err),
                })
            })?;
            log::warn!("RSA public key is PKCS#1 encoded; SPKI is preferred");
            Ok(key)
        }
    }
}
