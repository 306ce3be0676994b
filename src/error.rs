// Error Types
// Typed failures for the crypto core and the key/message file layer

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the crypto core. Prime-search retries and the rare
/// gcd(e, phi) != 1 draw are handled internally and never appear here.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key size is odd or too small to pick a prime range from
    #[error("invalid key size {0}: must be an even number of bits, at least 16")]
    InvalidKeySize(u32),

    /// Encoded message at or above the modulus bit length cannot round-trip
    #[error("message encodes to {bits} bits, which does not fit under a {key_size}-bit key")]
    OversizedMessage { bits: u64, key_size: u32 },

    /// Ciphertext decrypted to a value that is not base64 text
    #[error("ciphertext payload is not valid base64: {0}")]
    MalformedCiphertext(#[from] base64::DecodeError),
}

/// Failures of the on-disk key/message format.
/// Io keeps the underlying ErrorKind reachable so a caller can tell a
/// missing file from a permission problem and decide to retry or abort.
#[derive(Debug, Error)]
pub enum KeyFileError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File exists but does not carry the expected banner structure
    #[error("{} is not a valid {expected} file", path.display())]
    MissingBanner { path: PathBuf, expected: &'static str },

    /// Payload line between the banners is not base64
    #[error("malformed base64 payload in {}: {source}", path.display())]
    Base64 {
        path: PathBuf,
        #[source]
        source: base64::DecodeError,
    },
}

impl KeyFileError {
    /// True when the underlying cause is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            KeyFileError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }

    /// True when the underlying cause is a permission problem
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            KeyFileError::Io { source, .. } if source.kind() == io::ErrorKind::PermissionDenied
        )
    }
}
