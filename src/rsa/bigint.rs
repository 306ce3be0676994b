// RSA Big Integer Operations
// Exponentiation (plain and modular) and the extended Euclidean algorithm

use num_bigint::{BigInt, BigUint, ToBigInt};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Create a big integer from u64
pub fn from_u64(n: u64) -> BigUint {
    BigUint::from(n)
}

/// Plain exponentiation: base^exp
/// Square-and-multiply over the binary expansion of the exponent
pub fn pow(base: &BigUint, exp: u64) -> BigUint {
    let mut result = BigUint::one();
    let mut square = base.clone();
    let mut remaining = exp;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result *= &square;
        }
        square = &square * &square;
        remaining >>= 1;
    }

    result
}

/// Modular exponentiation: base^exp mod modulus
/// Same square-and-multiply, reducing after each step to bound intermediates
pub fn pow_mod(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b).
/// Iterative so large inputs never risk the call stack; the coefficients
/// match the textbook recursive decomposition.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = r;
        r = next_r;

        let next_x = &old_x - &q * &x;
        old_x = x;
        x = next_x;

        let next_y = &old_y - &q * &y;
        old_y = y;
        y = next_y;
    }

    (old_r, old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if gcd(a, m) != 1, i.e. the inverse doesn't exist.
/// The result is the Bezout coefficient of a, normalized into [0, m).
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let a_signed = a.to_bigint()?;
    let m_signed = m.to_bigint()?;

    let (gcd, x, _) = extended_gcd(&a_signed, &m_signed);
    if !gcd.is_one() {
        return None;
    }

    let inverse = if x.is_negative() { x + &m_signed } else { x };
    inverse.to_biguint()
}
