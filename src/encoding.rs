//! Certificate payload normalization

use base64::{engine::general_purpose::STANDARD, Engine};

/// Base64 encode `data` unless it already is standard base64
///
/// Certificates can be given either raw (PEM) or already encoded; the remote API only
/// accepts the encoded form.
pub fn base64_encode_if_not(data: &str) -> String {
    if STANDARD.decode(data).is_ok() {
        data.to_owned()
    } else {
        STANDARD.encode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn raw_payload_is_encoded() {
        assert_eq!(base64_encode_if_not("hello world"), "aGVsbG8gd29ybGQ=");
    }

    #[test]
    fn encoded_payload_is_kept() {
        assert_eq!(base64_encode_if_not("aGVsbG8gd29ybGQ="), "aGVsbG8gd29ybGQ=");
    }

    #[test]
    fn pem_is_encoded() {
        let pem = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";
        let encoded = base64_encode_if_not(pem);
        assert_ne!(encoded, pem);
        assert_eq!(STANDARD.decode(&encoded).unwrap(), pem.as_bytes());
    }

    proptest! {
        #[test]
        fn encoding_is_idempotent(input in ".*") {
            let once = base64_encode_if_not(&input);
            prop_assert_eq!(base64_encode_if_not(&once), once);
        }

        #[test]
        fn encoded_output_always_decodes(input in "[ -~]{0,64}") {
            let encoded = base64_encode_if_not(&input);
            prop_assert!(STANDARD.decode(&encoded).is_ok());
        }
    }
}
