//! Expiration resolution and the shared "is it expired" boundary.
//!
//! A signed URL is usable while `expires > now`, compared in whole Unix
//! seconds. The same rule applies when signing (the resolved expiration must
//! be usable) and when validating.

use chrono::{DateTime, TimeDelta, Utc};
use error_stack::Report;

use crate::error::UrlSignerError;

/// When a signed URL stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// An absolute point in time.
    At(DateTime<Utc>),
    /// A duration added to the current time at signing.
    In(TimeDelta),
}

impl Expiration {
    /// Relative expiration `minutes` from the time of signing.
    #[must_use]
    pub fn minutes(minutes: u32) -> Self {
        Self::In(TimeDelta::minutes(i64::from(minutes)))
    }

    /// Resolves to a Unix timestamp (seconds) relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignerError::InvalidExpiration`] if the timestamp is not
    /// strictly after `now` or cannot be represented.
    pub fn resolve(self, now: DateTime<Utc>) -> Result<i64, Report<UrlSignerError>> {
        let at = match self {
            Self::At(at) => at,
            Self::In(delta) => now.checked_add_signed(delta).ok_or_else(|| {
                Report::new(UrlSignerError::InvalidExpiration {
                    message: format!("Expiration {} from now is out of range", delta),
                })
            })?,
        };

        let timestamp = at.timestamp();
        if is_expired(timestamp, now) {
            return Err(Report::new(UrlSignerError::InvalidExpiration {
                message: format!(
                    "Expiration date must be in the future (expires {}, now {})",
                    timestamp,
                    now.timestamp()
                ),
            }));
        }

        Ok(timestamp)
    }
}

impl From<DateTime<Utc>> for Expiration {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

impl From<TimeDelta> for Expiration {
    fn from(delta: TimeDelta) -> Self {
        Self::In(delta)
    }
}

/// True once `now` has reached `expires`.
#[must_use]
pub fn is_expired(expires: i64, now: DateTime<Utc>) -> bool {
    expires <= now.timestamp()
}
