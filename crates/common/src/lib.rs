//! Expiring, tamper-evident URLs signed with RSA.
//!
//! A [`signer::UrlSigner`] appends an expiration timestamp and an
//! RSA-SHA256 signature to a URL; anyone holding only the public key can check
//! it with a [`verifier::UrlVerifier`]. No state is kept between calls.
//!
//! # Modules
//!
//! - [`clock`]: Injectable current-time source
//! - [`codec`]: URL-safe base64 for signature bytes
//! - [`error`]: Error types
//! - [`expiration`]: Absolute and relative expirations and the expiry boundary
//! - [`guard`]: `http` request guard answering 403 for invalid signed URLs
//! - [`keys`]: PEM parsing for RSA keys
//! - [`payload`]: The exact bytes that get signed
//! - [`query`]: Byte-preserving query-parameter editing
//! - [`settings`]: TOML and environment configuration
//! - [`signer`]: Minting signed URLs
//! - [`signer_config`]: Validated signer/verifier configuration
//! - [`test_support`]: Testing utilities
//! - [`verifier`]: Checking signed URLs

pub mod clock;
pub mod codec;
pub mod error;
pub mod expiration;
pub mod guard;
pub mod keys;
pub mod payload;
pub mod query;
pub mod settings;
pub mod signer;
pub mod signer_config;
pub mod test_support;
pub mod verifier;

pub use clock::{FixedTimeSource, SystemTimeSource, TimeSource};
pub use error::UrlSignerError;
pub use expiration::Expiration;
pub use settings::Settings;
pub use signer::UrlSigner;
pub use signer_config::{ParameterNames, SignerConfig, VerifierConfig};
pub use verifier::{UrlVerifier, ValidateSignedUrl};
