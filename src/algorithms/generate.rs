//! Generate prime components for the RSA Private Key

use core::cmp::Ordering;

use num_bigint::BigUint;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::{
    algorithms::rsa::compute_private_exponent_carmichael,
    errors::{Error, Result},
    math::div_ceil,
    prime::{find, find_next, find_previous, PRIME_ROUNDS},
    random::random_below,
};

/// Smallest modulus size accepted by key generation.
pub const MIN_KEY_BITS: usize = 64;

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub p: BigUint,
    pub q: BigUint,
}

/// Generates a two prime RSA key of exactly `bit_size` bits with public
/// exponent `exp`.
///
/// `p` is one bit longer than half the modulus. `q` is searched for inside
/// the interval of values that put `p * q` in `[2^(bit_size-1), 2^bit_size)`:
/// first forward from a uniformly drawn start, then backward from the same
/// start if the forward search left the interval. If both searches leave the
/// interval it holds no prime and a new `p` is drawn.
pub(crate) fn generate_key_with_exp<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
) -> Result<RsaPrivateKeyComponents> {
    if bit_size < MIN_KEY_BITS {
        return Err(Error::InvalidKeySize { bits: bit_size });
    }

    let attempt = loop {
        let p = find(rng, bit_size / 2 + 1, PRIME_ROUNDS)?;

        let (q, n) = match find_q(rng, &p, bit_size)? {
            Some(found) => found,
            None => {
                log::debug!("no prime q left in range for this p, drawing a new p");
                continue;
            }
        };

        if p == q {
            log::debug!("p and q are equal, drawing a new pair");
            continue;
        }

        match compute_private_exponent_carmichael(&p, &q, exp) {
            Ok(d) => break RsaPrivateKeyComponents {
                n,
                e: exp.clone(),
                d,
                p,
                q,
            },
            Err(_) => {
                log::debug!("public exponent is not invertible modulo lambda, drawing a new pair");
                continue;
            }
        }
    };

    log::debug!("generated a {} bit key", attempt.n.bits());
    Ok(attempt)
}

/// Searches a prime `q` such that `p * q` has exactly `bit_size` bits.
///
/// Returns `None` when no prime exists in the admissible interval.
fn find_q<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    p: &BigUint,
    bit_size: usize,
) -> Result<Option<(BigUint, BigUint)>> {
    let one = BigUint::one();
    let lower = &one << (bit_size - 1);
    let upper = (&one << bit_size) - &one;

    // q_min * p >= 2^(bit_size-1) and q_max * p <= 2^bit_size - 1
    let q_min = div_ceil(&lower, p);
    let q_max = &upper / p;
    if q_min > q_max {
        return Ok(None);
    }

    let width = &q_max - &q_min + &one;
    let start = random_below(rng, &width)? + &q_min;

    let q = find_next(rng, &start, PRIME_ROUNDS)?;
    let n = p * &q;
    match n.bits().cmp(&bit_size) {
        Ordering::Equal => return Ok(Some((q, n))),
        Ordering::Less => {
            // q >= start >= q_min, so the product cannot come out short
            log::error!("modulus came out shorter than {} bits", bit_size);
            return Err(Error::Internal);
        }
        Ordering::Greater => {
            log::debug!("forward search for q overshot, searching backward");
        }
    }

    let q = match find_previous(rng, &start, PRIME_ROUNDS) {
        Ok(q) => q,
        Err(Error::InvalidArguments) => return Ok(None),
        Err(err) => return Err(err),
    };
    if q < q_min {
        return Ok(None);
    }

    let n = p * &q;
    if n.bits() != bit_size {
        log::error!("modulus is {} bits, expected {}", n.bits(), bit_size);
        return Err(Error::Internal);
    }

    Ok(Some((q, n)))
}
