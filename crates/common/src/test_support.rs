#[cfg(test)]
pub mod tests {
    use std::sync::Arc;

    use crate::clock::FixedTimeSource;
    use crate::signer::UrlSigner;
    use crate::signer_config::{ParameterNames, SignerConfig, VerifierConfig};
    use crate::verifier::UrlVerifier;

    pub const PRIVATE_KEY_A: &str = include_str!("../tests/fixtures/private_key_a.pem");
    pub const PRIVATE_KEY_A_PKCS1: &str = include_str!("../tests/fixtures/private_key_a_pkcs1.pem");
    pub const PUBLIC_KEY_A: &str = include_str!("../tests/fixtures/public_key_a.pem");
    pub const PUBLIC_KEY_B: &str = include_str!("../tests/fixtures/public_key_b.pem");

    /// 2023-11-14T22:13:20Z
    pub const NOW: i64 = 1_700_000_000;

    pub fn crate_test_settings_str() -> String {
        format!(
            r#"
            private_key = '''{}'''
            public_key = '''{}'''
            default_expiration = 60

            [parameters]
            expires = "expires"
            signature = "signature"
            "#,
            PRIVATE_KEY_A, PUBLIC_KEY_A
        )
    }

    /// Key pair A, default parameter names, 60 minute default expiration.
    pub fn signer_at(timestamp: i64) -> (UrlSigner, Arc<FixedTimeSource>) {
        let clock = Arc::new(FixedTimeSource::at(timestamp));
        let config = SignerConfig::new(PRIVATE_KEY_A, PUBLIC_KEY_A, 60, ParameterNames::default())
            .expect("should build signer config");
        let signer =
            UrlSigner::with_time_source(&config, clock.clone()).expect("should build signer");
        (signer, clock)
    }

    /// Public key A only.
    pub fn verifier_at(timestamp: i64) -> (UrlVerifier, Arc<FixedTimeSource>) {
        let clock = Arc::new(FixedTimeSource::at(timestamp));
        let config = VerifierConfig::new(PUBLIC_KEY_A, ParameterNames::default())
            .expect("should build verifier config");
        let verifier =
            UrlVerifier::with_time_source(&config, clock.clone()).expect("should build verifier");
        (verifier, clock)
    }
}
