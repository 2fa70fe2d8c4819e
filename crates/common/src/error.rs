//! Error types for URL signing and verification.
//!
//! Every fallible operation in this crate returns
//! `Result<T, error_stack::Report<UrlSignerError>>`. Verification is the
//! exception: [`crate::verifier::UrlVerifier::validate`] folds all of these
//! into `false`.

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum UrlSignerError {
    /// Constructor input was missing, empty or malformed. No instance is created.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// The requested expiration does not resolve to a point strictly in the future.
    #[display("Invalid expiration: {message}")]
    InvalidExpiration { message: String },

    /// The underlying RSA signing operation failed.
    #[display("Signing error: {message}")]
    Signing { message: String },

    /// A URL-safe base64 string could not be decoded.
    #[display("Decoding error: {message}")]
    Decoding { message: String },

    /// The input could not be parsed as an absolute URL.
    #[display("Invalid URL: {message}")]
    InvalidUrl { message: String },
}
