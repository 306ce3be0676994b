// Text <-> Integer Codec
// Maps arbitrary text into the RSA plaintext domain and back. Text is
// UTF-8 encoded, wrapped in url-safe base64 to keep trailing zero bytes
// unambiguous, and the base64 string's bytes are read as a little-endian
// unsigned integer.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::CryptoError;

/// Encode text as an integer.
/// Empty text encodes to zero.
pub fn encode(text: &str) -> BigUint {
    let wrapped = URL_SAFE.encode(text.as_bytes());
    bytes_to_int(wrapped.as_bytes())
}

/// Decode an integer back to text.
/// The base64 layer can fail on a corrupted value and surfaces as
/// MalformedCiphertext; invalid UTF-8 inside a well-formed payload is
/// substituted with replacement characters instead, so a wrong-key
/// decryption shows up as garbled text rather than an error.
pub fn decode(value: &BigUint) -> Result<String, CryptoError> {
    let wrapped = int_to_bytes(value);
    let bytes = URL_SAFE.decode(&wrapped)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render an integer as url-safe base64 over its little-endian bytes.
/// This is the on-disk representation of every persisted integer: key
/// components and ciphertexts alike.
pub fn int_to_base64(value: &BigUint) -> String {
    URL_SAFE.encode(int_to_bytes(value))
}

/// Parse an integer from its url-safe base64 representation
pub fn base64_to_int(encoded: &str) -> Result<BigUint, base64::DecodeError> {
    let bytes = URL_SAFE.decode(encoded.trim())?;
    Ok(bytes_to_int(&bytes))
}

/// Minimal little-endian byte representation; zero maps to no bytes,
/// matching an empty message's round trip
fn int_to_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_le()
    }
}

fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}
