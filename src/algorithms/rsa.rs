//! Generic RSA implementation

use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Error, Result};
use crate::math::lcm;
use crate::random::random_below;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// Fails with [`Error::MessageTooLarge`] if `m` is not below the modulus.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts + ?Sized>(key: &K, m: &BigUint) -> Result<BigUint> {
    if m >= key.n() {
        return Err(Error::MessageTooLarge);
    }
    Ok(m.modpow(key.e(), key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding or error checking.
///
/// The ciphertext is always blinded with a fresh factor drawn from `rng`
/// and the private operation runs over the CRT values of the key.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt<R: CryptoRngCore + ?Sized, K: PrivateKeyParts + ?Sized>(
    rng: &mut R,
    priv_key: &K,
    c: &BigUint,
) -> Result<BigUint> {
    if priv_key.n().is_zero() || c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    let (blinded, unblinder) = blind(rng, priv_key, c)?;
    let blinded = Zeroizing::new(blinded);
    let unblinder = Zeroizing::new(unblinder);

    let p = priv_key.p();
    let q = priv_key.q();

    let m1 = Zeroizing::new(blinded.modpow(priv_key.dp(), p));
    let m2 = Zeroizing::new(blinded.modpow(priv_key.dq(), q));

    // h = qinv * (m1 - m2) mod p, kept non-negative by adding p first
    let mut h = &*m1 + p;
    h -= &*m2 % p;
    h *= priv_key.qinv();
    h %= p;

    let mut m = &h * q;
    m += &*m2;
    h.zeroize();

    let res = unblind(priv_key, &m, &unblinder);
    m.zeroize();

    Ok(res)
}

/// ⚠️ Performs raw RSA decryption with no padding.
///
/// Like [`rsa_decrypt`], but the result is re-encrypted and compared with
/// `c` to catch faults in the CRT computation.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt_and_check<R: CryptoRngCore + ?Sized, K: PrivateKeyParts + ?Sized>(
    rng: &mut R,
    priv_key: &K,
    c: &BigUint,
) -> Result<BigUint> {
    let m = rsa_decrypt(rng, priv_key, c)?;

    // In order to defend against errors in the CRT computation, m^e is
    // calculated, which should match the original ciphertext.
    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore + ?Sized, K: PublicKeyParts + ?Sized>(
    rng: &mut R,
    key: &K,
    c: &BigUint,
) -> Result<(BigUint, BigUint)> {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.

    let mut r: BigUint;
    let unblinder;
    loop {
        r = random_below(rng, key.n())?;
        if r.is_zero() {
            continue;
        }
        if let Some(ub) = r.clone().mod_inverse(key.n()).and_then(|ir| ir.into_biguint()) {
            unblinder = ub;
            break;
        }
        r.zeroize();
    }

    let c = {
        let mut rpowe = r.modpow(key.e(), key.n()); // N != 0
        let mut c = c * &rpowe;
        c %= key.n();

        rpowe.zeroize();
        r.zeroize();

        c
    };

    Ok((c, unblinder))
}

/// Given an m and and unblinding factor, unblind the m.
fn unblind<K: PublicKeyParts + ?Sized>(key: &K, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % key.n()
}

/// The CRT values of a two prime key.
pub(crate) struct CrtValues {
    /// D mod (P-1)
    pub dp: BigUint,
    /// D mod (Q-1)
    pub dq: BigUint,
    /// Q^-1 mod P
    pub qinv: BigUint,
}

/// Computes `dp`, `dq` and `qinv` for the given private exponent and primes.
///
/// Fails with [`Error::InvalidCoefficient`] if `q` is not invertible modulo `p`.
pub(crate) fn compute_crt_values(d: &BigUint, p: &BigUint, q: &BigUint) -> Result<CrtValues> {
    let one = BigUint::one();
    let dp = d % (p - &one);
    let dq = d % (q - &one);
    let qinv = q
        .clone()
        .mod_inverse(p)
        .and_then(|qinv| qinv.into_biguint())
        .ok_or(Error::InvalidCoefficient)?;

    Ok(CrtValues { dp, dq, qinv })
}

/// Computes `d = e^-1 mod lcm(p - 1, q - 1)`.
///
/// Fails with [`Error::InvalidExponent`] if `e` shares a factor with the
/// Carmichael totient.
pub(crate) fn compute_private_exponent_carmichael(
    p: &BigUint,
    q: &BigUint,
    e: &BigUint,
) -> Result<BigUint> {
    let one = BigUint::one();
    let lambda = lcm(&(p - &one), &(q - &one));

    if !e.gcd(&lambda).is_one() {
        return Err(Error::InvalidExponent);
    }

    e.clone()
        .mod_inverse(&lambda)
        .and_then(|d| d.into_biguint())
        .ok_or(Error::InvalidExponent)
}
