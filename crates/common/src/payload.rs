//! The exact bytes that get signed.

/// Separator between the URL and the expiration timestamp.
pub const PAYLOAD_SEPARATOR: &str = "::";

/// Builds the signed payload `"<url>::<expires>"`.
///
/// No normalisation happens here: signer and verifier must hand in the same
/// URL string, byte for byte.
#[must_use]
pub fn build_payload(url: &str, expires: i64) -> Vec<u8> {
    format!("{}{}{}", url, PAYLOAD_SEPARATOR, expires).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_payload_format() {
        assert_eq!(
            build_payload("https://example.com/resource?id=42", 1_700_003_600),
            b"https://example.com/resource?id=42::1700003600".to_vec()
        );
    }

    #[test]
    fn test_build_payload_is_deterministic() {
        let url = "https://example.com/a?b=c";
        assert_eq!(build_payload(url, 42), build_payload(url, 42));
        assert_ne!(build_payload(url, 42), build_payload(url, 43));
    }

    #[test]
    fn test_build_payload_does_not_normalise() {
        assert_ne!(
            build_payload("https://example.com/a?x=1&y=2", 1),
            build_payload("https://example.com/a?y=2&x=1", 1)
        );
        assert_ne!(
            build_payload("https://example.com/a/", 1),
            build_payload("https://example.com/a", 1)
        );
    }
}
