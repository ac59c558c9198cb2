//! Token secret fingerprinting for operational visibility.
//!
//! Operators compare the logged fingerprint across replicas to confirm they
//! share a secret without the secret itself reaching the logs.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the secret's SHA-256 digest as lowercase hex.
///
/// # Examples
///
/// ```rust
/// use bloodbank::inbound::http::token_config::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(b"0123456789abcdef0123456789abcdef");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fingerprint_is_deterministic() {
        assert_eq!(secret_fingerprint(&[b'a'; 32]), secret_fingerprint(&[b'a'; 32]));
    }

    #[rstest]
    fn fingerprint_is_short_lowercase_hex() {
        let fp = secret_fingerprint(&[b'a'; 32]);
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert_eq!(fp, fp.to_lowercase());
    }

    #[rstest]
    fn different_secrets_differ() {
        assert_ne!(
            secret_fingerprint(&[b'a'; 32]),
            secret_fingerprint(&[b'b'; 32])
        );
    }

    #[rstest]
    fn known_vector() {
        // sha256("") = e3b0c442 98fc1c14 ...
        assert_eq!(secret_fingerprint(b""), "e3b0c44298fc1c14");
    }
}
