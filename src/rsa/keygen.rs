// RSA Key Generation
// Assembles a key pair from two fresh primes: n = p*q, e fixed, d = e^-1 mod phi

use num_bigint::BigUint;

use super::bigint::{from_u64, mod_inverse};
use super::prime::generate_distinct_primes;
use crate::error::CryptoError;

/// Public exponent shared by every generated key, by RSA convention
pub const PUBLIC_EXPONENT: u32 = 65537;

/// RSA key pair: modulus, public exponent, private exponent.
/// Immutable once generated; the primes and the totient are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPair {
    pub key_size: u32,
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
}

impl KeyPair {
    /// Generate a key pair with modulus of `key_size` bits.
    ///
    /// Draws two distinct primes of half the key size, then derives the
    /// private exponent as e^-1 mod (p-1)(q-1), normalized into [0, phi).
    /// On the rare draw where gcd(e, phi) != 1 the primes are discarded
    /// and generation restarts; that case never reaches the caller.
    pub fn generate(key_size: u32) -> Result<KeyPair, CryptoError> {
        if key_size < 16 || key_size % 2 != 0 {
            return Err(CryptoError::InvalidKeySize(key_size));
        }

        let e = from_u64(u64::from(PUBLIC_EXPONENT));

        loop {
            let (p, q) = generate_distinct_primes(key_size);
            let n = &p * &q;
            let phi = (&p - 1u8) * (&q - 1u8);

            if let Some(d) = mod_inverse(&e, &phi) {
                return Ok(KeyPair {
                    key_size,
                    n,
                    e,
                    d,
                });
            }
            // gcd(e, phi) != 1: unusable primes, draw again
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::pow_mod;
    use crate::rsa::prime::is_prime;
    use num_bigint::RandBigInt;
    use rand::rngs::OsRng;

    #[test]
    fn test_generate_rejects_bad_sizes() {
        assert!(matches!(
            KeyPair::generate(15),
            Err(CryptoError::InvalidKeySize(15))
        ));
        assert!(matches!(
            KeyPair::generate(8),
            Err(CryptoError::InvalidKeySize(8))
        ));
        assert!(matches!(
            KeyPair::generate(1025),
            Err(CryptoError::InvalidKeySize(1025))
        ));
    }

    #[test]
    fn test_generate_modulus_size() {
        // n must land within one bit of the requested size
        let keypair = KeyPair::generate(128).unwrap();
        let bits = keypair.n.bits();
        assert!(bits == 128 || bits == 127, "modulus is {} bits", bits);
        assert_eq!(keypair.e, from_u64(65537));
        assert!(keypair.d > from_u64(0));
    }

    #[test]
    fn test_generate_exponents_invert() {
        // (m^e)^d mod n == m for random m < n
        let keypair = KeyPair::generate(128).unwrap();
        let mut rng = OsRng;

        for _ in 0..8 {
            let m = rng.gen_biguint_below(&keypair.n);
            let c = pow_mod(&m, &keypair.e, &keypair.n);
            let back = pow_mod(&c, &keypair.d, &keypair.n);
            assert_eq!(back, m);
        }
    }

    #[test]
    fn test_generate_1024() {
        let keypair = KeyPair::generate(1024).unwrap();
        let bits = keypair.n.bits();
        assert!(bits == 1024 || bits == 1023, "modulus is {} bits", bits);

        let m = from_u64(123_456_789);
        let c = pow_mod(&m, &keypair.e, &keypair.n);
        assert_eq!(pow_mod(&c, &keypair.d, &keypair.n), m);
    }

    #[test]
    fn test_generated_primes_are_prime() {
        // Both factors must individually survive an independent
        // Miller-Rabin run
        let (p, q) = crate::rsa::prime::generate_distinct_primes(128);
        assert!(is_prime(&p, 30));
        assert!(is_prime(&q, 30));
        assert_ne!(p, q);
    }
}
