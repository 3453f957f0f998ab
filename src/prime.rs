//! Probabilistic primality testing and prime search.

use lazy_static::lazy_static;
use num_bigint::Sign::Plus;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::math::jacobi;
use crate::random::{fill, random_below};

/// Number of Solovay–Strassen rounds used for key material.
///
/// A composite survives all rounds with probability at most `2^-128`.
pub const PRIME_ROUNDS: usize = 128;

/// Small odd primes used to discard candidates before running the
/// probabilistic test. The list stops where the product would overflow a u64.
const SMALL_PRIMES: [u8; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

lazy_static! {
    /// Product of [`SMALL_PRIMES`].
    static ref SMALL_PRIMES_PRODUCT: BigUint = BigUint::from(16_294_579_238_595_022_365u64);
    static ref BIG_2: BigUint = BigUint::from(2u32);
}

/// Reports whether `p` is probably prime using `rounds` rounds of the
/// Solovay–Strassen test.
///
/// A prime is always reported as prime. A composite is reported as prime
/// with probability at most `2^-rounds`; every round draws a fresh witness
/// uniformly from `[2, p)`.
pub fn is_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    p: &BigUint,
    rounds: usize,
) -> Result<bool> {
    if p <= &BigUint::one() {
        return Ok(false);
    }
    if p.is_even() {
        return Ok(p == &*BIG_2);
    }

    let p_minus_one = p - BigUint::one();
    let exp = &p_minus_one >> 1;
    let witnesses = p - &*BIG_2;

    for _ in 0..rounds {
        let a = random_below(rng, &witnesses)? + &*BIG_2;

        let j = jacobi(&BigInt::from_biguint(Plus, a.clone()), p);
        if j == 0 {
            return Ok(false);
        }

        let euler = a.modpow(&exp, p);
        let matches = if j == 1 {
            euler.is_one()
        } else {
            euler == p_minus_one
        };
        if !matches {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Returns true if `candidate` is divisible by one of [`SMALL_PRIMES`]
/// other than itself.
fn has_small_factor(candidate: &BigUint) -> bool {
    let rem = match (candidate % &*SMALL_PRIMES_PRODUCT).to_u64() {
        Some(rem) => rem,
        None => return false,
    };

    SMALL_PRIMES.iter().any(|&prime| {
        let prime = u64::from(prime);
        rem % prime == 0 && candidate != &BigUint::from(prime)
    })
}

fn is_candidate_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    candidate: &BigUint,
    rounds: usize,
) -> Result<bool> {
    if has_small_factor(candidate) {
        return Ok(false);
    }
    is_prime(rng, candidate, rounds)
}

/// Returns a random probable prime with exactly `bits` bits.
pub fn find<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize, rounds: usize) -> Result<BigUint> {
    if bits < 2 {
        return Err(Error::InvalidArguments);
    }

    let mut b = bits % 8;
    if b == 0 {
        b = 8;
    }

    let mut bytes = Zeroizing::new(vec![0u8; (bits + 7) / 8]);
    let last = bytes.len() - 1;

    loop {
        fill(rng, &mut bytes)?;
        // clear everything above `bits`, then set the top bit and make it odd
        bytes[0] &= (0xffu16 >> (8 - b)) as u8;
        bytes[0] |= 1 << (b - 1);
        bytes[last] |= 1;

        let p = find_next(rng, &BigUint::from_bytes_be(&bytes), rounds)?;
        if p.bits() == bits {
            return Ok(p);
        }
        log::trace!("prime search ran past {} bits, drawing a new start", bits);
    }
}

/// Returns the smallest probable prime that is `>= start`.
pub fn find_next<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    start: &BigUint,
    rounds: usize,
) -> Result<BigUint> {
    if start <= &*BIG_2 {
        return Ok(BIG_2.clone());
    }

    let mut candidate = start.clone();
    if candidate.is_even() {
        candidate += BigUint::one();
    }

    while !is_candidate_prime(rng, &candidate, rounds)? {
        candidate += &*BIG_2;
    }
    Ok(candidate)
}

/// Returns the largest probable prime that is `<= start`.
///
/// Fails with [`Error::InvalidArguments`] when `start < 2`.
pub fn find_previous<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    start: &BigUint,
    rounds: usize,
) -> Result<BigUint> {
    if start < &*BIG_2 {
        return Err(Error::InvalidArguments);
    }
    if start == &*BIG_2 {
        return Ok(BIG_2.clone());
    }

    let mut candidate = start.clone();
    if candidate.is_even() {
        candidate -= BigUint::one();
    }

    // 3 is prime, so the walk stops before leaving the odd numbers
    while !is_candidate_prime(rng, &candidate, rounds)? {
        candidate -= &*BIG_2;
    }
    Ok(candidate)
}
