//! Short content digests for manifest change detection.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Number of leading SHA-256 bytes kept in a digest (16 hex characters).
pub const DIGEST_BYTES: usize = 8;

/// Compute the manifest digest for `content`.
///
/// SHA-256, truncated to [`DIGEST_BYTES`] bytes and rendered as lowercase hex.
/// Used for change detection only, never for integrity against tampering.
///
/// ```rust
/// use cathedral_core::digest::content_digest;
///
/// let a = content_digest(b"# Title");
/// assert_eq!(a.len(), 16);
/// assert_eq!(a, content_digest(b"# Title"));
/// ```
#[must_use]
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    result
        .iter()
        .take(DIGEST_BYTES)
        .fold(String::with_capacity(DIGEST_BYTES * 2), |mut acc, b| {
            // write! to String is infallible
            let _ = write!(acc, "{b:02x}");
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_prefix() {
        // sha256("") = e3b0c44298fc1c149afbf4c8996fb924...
        assert_eq!(content_digest(b""), "e3b0c44298fc1c14");
    }

    #[test]
    fn test_distinct_content_distinct_digest() {
        assert_ne!(content_digest(b"ambient"), content_digest(b"cymatic"));
    }

    proptest! {
        #[test]
        fn digest_is_sixteen_lowercase_hex(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let digest = content_digest(&bytes);
            prop_assert_eq!(digest.len(), 16);
            prop_assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            prop_assert_eq!(digest, content_digest(&bytes));
        }
    }
}
