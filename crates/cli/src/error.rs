//! CLI error types.

use std::fmt;

use error_stack::Report;
use url_signer_common::UrlSignerError;

#[derive(Debug)]
pub enum CliError {
    /// Settings or key material error
    Config(String),
    /// Signing failed for the given URL or expiration
    Sign(String),
    /// IO error
    Io(std::io::Error),
    /// Logger could not be installed
    Logging(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Sign(msg) => write!(f, "Signing error: {}", msg),
            CliError::Io(err) => write!(f, "IO error: {}", err),
            CliError::Logging(msg) => write!(f, "Logging error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<Report<UrlSignerError>> for CliError {
    fn from(report: Report<UrlSignerError>) -> Self {
        log::debug!("{:?}", report);
        match report.current_context() {
            UrlSignerError::Configuration { message } => CliError::Config(message.clone()),
            other => CliError::Sign(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_cli_error_display() {
        assert_eq!(
            format!("{}", CliError::Config("test".into())),
            "Configuration error: test"
        );
        assert_eq!(
            format!("{}", CliError::Sign("test".into())),
            "Signing error: test"
        );
        assert_eq!(
            format!("{}", CliError::Logging("test".into())),
            "Logging error: test"
        );
    }

    #[test]
    fn test_cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn test_cli_error_from_report() {
        let config: CliError = Report::new(UrlSignerError::Configuration {
            message: "missing key".into(),
        })
        .into();
        assert_eq!(config.to_string(), "Configuration error: missing key");

        let expiration: CliError = Report::new(UrlSignerError::InvalidExpiration {
            message: "in the past".into(),
        })
        .into();
        assert!(matches!(expiration, CliError::Sign(_)));
        assert!(expiration.to_string().contains("in the past"));
    }

    #[test]
    fn test_cli_error_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.source().is_some());

        let config_err = CliError::Config("test".into());
        assert!(config_err.source().is_none());
    }
}
