//! URL-safe base64 transport encoding for raw signature bytes.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use error_stack::Report;

use crate::error::UrlSignerError;

/// `-`/`_` alphabet, no padding on output, padding tolerated on input.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes raw bytes so they can sit in a query string without escaping.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(bytes)
}

/// Decodes a string produced by [`encode`].
///
/// # Errors
///
/// Returns [`UrlSignerError::Decoding`] if the input contains characters
/// outside the URL-safe alphabet or has an impossible length.
pub fn decode(encoded: &str) -> Result<Vec<u8>, Report<UrlSignerError>> {
    URL_SAFE_LENIENT.decode(encoded).map_err(|e| {
        Report::new(UrlSignerError::Decoding {
            message: format!("Invalid URL-safe base64: {}", e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_url_safe_alphabet_without_padding() {
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"a"), "YQ");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn test_decode_inverts_encode() {
        let samples: [&[u8]; 5] = [
            b"",
            b"\x00",
            b"\xfb\xff\xfe",
            b"these pretzels are making me thirsty",
            &[0u8; 256],
        ];
        for bytes in samples {
            assert_eq!(decode(&encode(bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_decode_tolerates_padding() {
        assert_eq!(decode("YQ==").unwrap(), b"a");
        assert_eq!(decode("YQ").unwrap(), b"a");
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        let result = decode("+/8");
        assert!(result.is_err(), "standard alphabet is not URL-safe");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not-valid-base64!!!").is_err());
        assert!(decode("a b").is_err());
        assert!(decode("%2F").is_err());
    }

    #[test]
    fn test_decode_rejects_impossible_length() {
        let err = decode("A").unwrap_err();
        assert!(matches!(
            err.current_context(),
            UrlSignerError::Decoding { .. }
        ));
    }
}
