//! Query-parameter editing that leaves untouched parameters byte-identical.
//!
//! [`url::Url::query_pairs_mut`] re-serialises every pair it touches, which
//! would change `%20` into `+` and break signatures computed over the original
//! bytes. [`SignableUrl`] instead keeps the query as the raw `&`-separated
//! segments it was parsed from and only decodes keys for comparison.

use std::borrow::Cow;
use std::fmt;

use error_stack::Report;
use url::{form_urlencoded, Url};

use crate::error::UrlSignerError;

/// An absolute URL whose query parameters can be added, overwritten and
/// removed without re-encoding the rest of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableUrl {
    url: Url,
}

impl SignableUrl {
    /// Parses an absolute URL.
    ///
    /// A dangling `?` with nothing after it is dropped so that signing and
    /// verification serialise the same string.
    ///
    /// # Errors
    ///
    /// Returns [`UrlSignerError::InvalidUrl`] if the input is not an absolute URL.
    pub fn parse(input: &str) -> Result<Self, Report<UrlSignerError>> {
        let mut url = Url::parse(input).map_err(|e| {
            Report::new(UrlSignerError::InvalidUrl {
                message: format!("Failed to parse URL: {}", e),
            })
        })?;

        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(Self { url })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the decoded value of the first parameter called `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<String> {
        self.raw_segments()
            .filter_map(decode_segment)
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Counts how many times `name` occurs in the query.
    #[must_use]
    pub fn param_count(&self, name: &str) -> usize {
        self.raw_segments()
            .filter_map(decode_segment)
            .filter(|(key, _)| key == name)
            .count()
    }

    /// Sets `name` to `value`, dropping every earlier occurrence of `name` and
    /// appending the new pair at the end of the query.
    #[must_use]
    pub fn with_param(self, name: &str, value: &str) -> Self {
        let mut segments = self.retained_segments(&[name]);
        segments.push(encode_pair(name, value));
        self.with_segments(&segments)
    }

    /// Removes every occurrence of each of `names`. All other segments keep
    /// their order and exact encoding.
    #[must_use]
    pub fn without_params(self, names: &[&str]) -> Self {
        let segments = self.retained_segments(names);
        self.with_segments(&segments)
    }

    fn raw_segments(&self) -> impl Iterator<Item = &str> {
        self.url.query().into_iter().flat_map(|query| query.split('&'))
    }

    fn retained_segments(&self, names: &[&str]) -> Vec<String> {
        self.raw_segments()
            .filter(|segment| {
                decode_segment(segment).map_or(true, |(key, _)| !names.iter().any(|n| *n == key))
            })
            .map(str::to_string)
            .collect()
    }

    fn with_segments(mut self, segments: &[String]) -> Self {
        if segments.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(&segments.join("&")));
        }
        self
    }
}

impl fmt::Display for SignableUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn decode_segment(segment: &str) -> Option<(Cow<'_, str>, Cow<'_, str>)> {
    form_urlencoded::parse(segment.as_bytes()).next()
}

fn encode_pair(name: &str, value: &str) -> String {
    let name: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
    let value: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    format!("{}={}", name, value)
}
