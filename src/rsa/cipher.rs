// RSA Encryption/Decryption Pipeline
// Raw modular exponentiation over the codec's integer form of the text.
// No padding scheme: every encryption generates a fresh key pair and the
// message must fit under the modulus in a single block.

use num_bigint::BigUint;

use super::bigint::pow_mod;
use super::codec;
use super::keygen::KeyPair;
use crate::error::CryptoError;

/// Result of an encryption: the ciphertext together with the key pair
/// that produced it, since the caller needs n and d to decrypt later.
#[derive(Debug, Clone)]
pub struct Sealed {
    pub ciphertext: BigUint,
    pub key_pair: KeyPair,
}

/// Encrypt text under a freshly generated key pair of the given size.
///
/// The encoded message must be strictly shorter than the key size in
/// bits; at or above that bound the value cannot round-trip through the
/// modulus, so the message is rejected rather than truncated.
pub fn encrypt(text: &str, key_size: u32) -> Result<Sealed, CryptoError> {
    let key_pair = KeyPair::generate(key_size)?;
    let m = codec::encode(text);

    if m.bits() >= u64::from(key_size) {
        return Err(CryptoError::OversizedMessage {
            bits: m.bits(),
            key_size,
        });
    }

    let ciphertext = pow_mod(&m, &key_pair.e, &key_pair.n);
    Ok(Sealed {
        ciphertext,
        key_pair,
    })
}

/// Decrypt a ciphertext with the matching key pair.
/// A corrupted ciphertext surfaces as MalformedCiphertext from the codec;
/// decryption itself cannot fail.
pub fn decrypt(ciphertext: &BigUint, key_pair: &KeyPair) -> Result<String, CryptoError> {
    let m = pow_mod(ciphertext, &key_pair.d, &key_pair.n);
    codec::decode(&m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_hello_world() {
        let sealed = encrypt("Hello, World!", 1024).unwrap();
        let text = decrypt(&sealed.ciphertext, &sealed.key_pair).unwrap();
        assert_eq!(text, "Hello, World!");
    }

    #[test]
    fn test_round_trip_empty_message() {
        let sealed = encrypt("", 1024).unwrap();
        // "" encodes to zero, so the ciphertext is zero as well
        assert_eq!(sealed.ciphertext, BigUint::from(0u8));
        let text = decrypt(&sealed.ciphertext, &sealed.key_pair).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_oversized_message_rejected() {
        // ~130 bytes of text becomes ~174 base64 chars, far past 1024 bits
        let long_text = "x".repeat(130);
        match encrypt(&long_text, 1024) {
            Err(CryptoError::OversizedMessage { bits, key_size }) => {
                assert!(bits >= 1024);
                assert_eq!(key_size, 1024);
            }
            other => panic!("expected OversizedMessage, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_boundary_is_inclusive() {
        // The reject threshold is bits >= key_size, not strictly above.
        // 95 text bytes -> 128 base64 chars -> a 1017..=1024-bit integer,
        // which sits at the boundary when the top byte is large.
        let text = "z".repeat(95);
        let m = codec::encode(&text);
        let result = encrypt(&text, 1024);
        if m.bits() >= 1024 {
            assert!(matches!(result, Err(CryptoError::OversizedMessage { .. })));
        } else {
            assert!(result.is_ok());
        }
    }

    #[test]
    fn test_round_trip_unicode_2048() {
        let text = "Curiouser and curiouser! — said Alice… ¿qué? 数学 🧮";
        let sealed = encrypt(text, 2048).unwrap();
        let back = decrypt(&sealed.ciphertext, &sealed.key_pair).unwrap();
        assert_eq!(back, text);
    }

    #[test]
    fn test_tampered_ciphertext_never_crashes() {
        let original = "attack at dawn";
        let sealed = encrypt(original, 1024).unwrap();

        // Flip one character in the base64 payload, as a transit error would
        let payload = codec::int_to_base64(&sealed.ciphertext);
        let mut chars: Vec<char> = payload.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered_payload: String = chars.into_iter().collect();

        let tampered = codec::base64_to_int(&tampered_payload).unwrap();
        let result = decrypt(&tampered, &sealed.key_pair);

        // Either the garbled plaintext fails the base64 layer, or it
        // decodes to text that is not the original. Never a panic.
        match result {
            Err(CryptoError::MalformedCiphertext(_)) => {}
            Ok(text) => assert_ne!(text, original),
            Err(other) => panic!("unexpected error kind: {:?}", other),
        }
    }

    #[test]
    fn test_fresh_keys_per_encryption() {
        let a = encrypt("same message", 1024).unwrap();
        let b = encrypt("same message", 1024).unwrap();
        assert_ne!(a.key_pair.n, b.key_pair.n);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_invalid_key_size_propagates() {
        assert!(matches!(
            encrypt("hi", 15),
            Err(CryptoError::InvalidKeySize(15))
        ));
    }
}
