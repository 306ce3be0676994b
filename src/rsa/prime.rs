// Probabilistic Prime Generation
// Draws random odd candidates in a key-size-derived range and filters
// them through Miller-Rabin until primes of the required length are found

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::rngs::OsRng;

use super::bigint::{from_u64, pow, pow_mod};

/// Candidate range [floor, ceiling) for primes of half the key size.
/// ceiling = 2^(key_size/2); floor = 1.5 * 2^(key_size/2 - 1) + 1, so the
/// product of two candidates always reaches the full key bit length and
/// never lands one bit short. The +1 also makes the floor odd.
pub fn candidate_range(key_size: u32) -> (BigUint, BigUint) {
    let half = u64::from(key_size / 2);
    let two = from_u64(2);

    let ceiling = pow(&two, half);
    // 1.5 * 2^(half-1) computed exactly as 3 * 2^(half-2)
    let floor = from_u64(3) * pow(&two, half - 2) + 1u8;

    (floor, ceiling)
}

/// Number of Miller-Rabin rounds by key size.
/// The named sizes get the round counts needed for a 2^-128 error bound;
/// anything else falls back to a more conservative default.
pub fn miller_rabin_rounds(key_size: u32) -> u32 {
    match key_size {
        1024 => 40,
        2048 => 56,
        _ => 64,
    }
}

/// Miller-Rabin primality test
/// Returns true if the candidate survives `rounds` independent witnesses.
/// A surviving candidate is probably prime, not provably so.
pub fn is_prime(candidate: &BigUint, rounds: u32) -> bool {
    let two = from_u64(2);
    let three = from_u64(3);

    if candidate < &two || candidate.is_even() {
        return false;
    }
    if candidate == &three {
        return true;
    }

    // Write candidate - 1 as 2^s * d with d odd
    let mut d = candidate - 1u8;
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let mut rng = OsRng;
    let n_minus_one = candidate - 1u8;

    for _ in 0..rounds {
        // Random witness a in [2, candidate - 2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        if !miller_rabin_round(candidate, &d, s, &a) {
            // One failed witness is a proof of compositeness
            return false;
        }
    }

    true
}

/// One Miller-Rabin round for a single witness.
/// The candidate passes if a^d == 1, or a^(2^r * d) == candidate - 1 for
/// some r < s. Hitting 1 by squaring before candidate - 1 exposes a
/// nontrivial square root of 1, which proves the candidate composite.
fn miller_rabin_round(candidate: &BigUint, d: &BigUint, s: u32, a: &BigUint) -> bool {
    let n_minus_one = candidate - 1u8;

    let mut x = pow_mod(a, d, candidate);
    if x.is_one() || x == n_minus_one {
        return true;
    }

    for _ in 1..s {
        x = (&x * &x) % candidate;
        if x == n_minus_one {
            return true;
        }
        if x.is_one() {
            return false;
        }
    }

    false
}

/// Generate one probable prime for the given key size
pub fn generate_prime(key_size: u32) -> BigUint {
    let rounds = miller_rabin_rounds(key_size);
    let (floor, ceiling) = candidate_range(key_size);

    loop {
        let candidate = random_odd_in_range(&floor, &ceiling);
        if is_prime(&candidate, rounds) {
            return candidate;
        }
    }
}

/// Generate two distinct probable primes for the given key size.
/// The second search rejects any candidate equal to the first prime, so
/// the modulus is never a square.
pub fn generate_distinct_primes(key_size: u32) -> (BigUint, BigUint) {
    let rounds = miller_rabin_rounds(key_size);
    let (floor, ceiling) = candidate_range(key_size);

    let p = loop {
        let candidate = random_odd_in_range(&floor, &ceiling);
        if is_prime(&candidate, rounds) {
            break candidate;
        }
    };

    let q = loop {
        let candidate = random_odd_in_range(&floor, &ceiling);
        if candidate != p && is_prime(&candidate, rounds) {
            break candidate;
        }
    };

    (p, q)
}

/// Uniform random odd integer in [floor, ceiling), stepping by two from
/// the odd floor. OsRng is the system entropy source, safe for any caller.
fn random_odd_in_range(floor: &BigUint, ceiling: &BigUint) -> BigUint {
    let mut rng = OsRng;
    // Count of odd values in range, given an odd floor
    let steps = (ceiling - floor) >> 1;
    let k = rng.gen_biguint_below(&steps);
    floor + (k << 1)
}
