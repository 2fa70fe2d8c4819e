//! Configuration commands.
//!
//! Configuration is loaded from TOML files and merged with environment variables
//! prefixed with `URL_SIGNER__`. For example, `URL_SIGNER__DEFAULT_EXPIRATION=15`
//! will override `default_expiration` in the TOML file.

use std::path::Path;

use url_signer_common::settings::Settings;
use url_signer_common::{SignerConfig, UrlSigner, UrlVerifier, VerifierConfig};

use crate::error::CliError;

/// What a validated configuration file can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    SignAndValidate,
    ValidateOnly,
}

/// Load, merge and validate settings from a TOML file.
pub(crate) fn load_settings(file: &Path) -> Result<Settings, CliError> {
    log::debug!("Loading config from: {}", file.display());
    log::debug!("Environment variables with URL_SIGNER__ prefix will be merged");

    Ok(Settings::from_file(file)?)
}

/// Checks the settings and that their keys parse, returning what the
/// configuration is able to do.
pub(crate) fn check(settings: &Settings) -> Result<Capability, CliError> {
    UrlVerifier::new(&VerifierConfig::try_from(settings)?)?;

    if !settings.can_sign() {
        return Ok(Capability::ValidateOnly);
    }

    UrlSigner::new(&SignerConfig::try_from(settings)?)?;
    Ok(Capability::SignAndValidate)
}

/// Validate configuration file.
///
/// Validates TOML syntax, required fields and the key material after merging
/// environment variables.
pub fn validate(file: &Path) -> Result<Capability, CliError> {
    let settings = load_settings(file)?;
    let capability = check(&settings)?;

    println!("Configuration is valid");
    println!("  File: {}", file.display());
    println!("  Default expiration: {} minutes", settings.default_expiration);
    println!(
        "  Parameters: {}, {}",
        settings.parameters.expires, settings.parameters.signature
    );
    match capability {
        Capability::SignAndValidate => println!("  Capabilities: sign, validate"),
        Capability::ValidateOnly => println!("  Capabilities: validate"),
    }

    Ok(capability)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub(crate) const PRIVATE_KEY: &str =
        include_str!("../../common/tests/fixtures/private_key_a.pem");
    pub(crate) const PUBLIC_KEY: &str =
        include_str!("../../common/tests/fixtures/public_key_a.pem");
    const OTHER_PUBLIC_KEY: &str = include_str!("../../common/tests/fixtures/public_key_b.pem");

    pub(crate) fn write_config(dir: &TempDir, private_key: Option<&str>, public_key: &str) -> PathBuf {
        let config_path = dir.path().join("url-signer.toml");
        let private_key = private_key
            .map(|key| format!("private_key = '''{}'''", key))
            .unwrap_or_default();
        fs::write(
            &config_path,
            format!(
                r#"
{}
public_key = '''{}'''
default_expiration = 30

[parameters]
expires = "expires"
signature = "signature"
"#,
                private_key, public_key
            ),
        )
        .unwrap();
        config_path
    }

    #[test]
    fn test_validate_signing_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, Some(PRIVATE_KEY), PUBLIC_KEY);

        let capability = validate(&config_path).unwrap();
        assert_eq!(capability, Capability::SignAndValidate);
    }

    #[test]
    fn test_validate_public_key_only() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, None, PUBLIC_KEY);

        let capability = validate(&config_path).unwrap();
        assert_eq!(capability, Capability::ValidateOnly);
    }

    #[test]
    fn test_validate_mismatched_keys() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, Some(PRIVATE_KEY), OTHER_PUBLIC_KEY);

        let result = validate(&config_path);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_garbage_key() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, None, "not a key");

        assert!(validate(&config_path).is_err());
    }

    #[test]
    fn test_validate_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("invalid.toml");
        fs::write(&config_path, "invalid { toml").unwrap();

        assert!(validate(&config_path).is_err());
    }

    #[test]
    fn test_validate_missing_public_key() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("incomplete.toml");
        fs::write(&config_path, "default_expiration = 10\n").unwrap();

        assert!(validate(&config_path).is_err());
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        assert!(matches!(validate(&config_path), Err(CliError::Config(_))));
    }
}
