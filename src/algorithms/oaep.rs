//! The OAEP block codec from [PKCS#1 OAEP], without the RSA step.
//!
//! The encoded block is `maskedSeed || maskedDB`, where
//! `DB = lHash || PS || 0x01 || M` and `PS` is a run of zero bytes.
//!
//! [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
use alloc::vec::Vec;

use digest::DynDigest;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};
use crate::random::fill;

/// Returns `hash(label)`, leaving the digest reset.
#[inline]
fn label_hash(digest: &mut dyn DynDigest, label: &[u8]) -> Box<[u8]> {
    digest.reset();
    digest.update(label);
    digest.finalize_reset()
}

/// Encodes `msg` into a block of exactly `k` bytes.
///
/// Fails with [`Error::Encoding`] when `msg` is longer than `k - 2 * hLen - 1`.
pub fn oaep_encode<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    digest: &mut dyn DynDigest,
    msg: &[u8],
    label: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let h_size = digest.output_size();
    if msg.len() + 2 * h_size + 1 > k {
        return Err(Error::Encoding);
    }

    let p_hash = label_hash(digest, label);

    let mut em = Zeroizing::new(vec![0u8; k]);
    let (seed, db) = em.split_at_mut(h_size);
    fill(rng, seed)?;

    // Data block DB = pHash || PS || 01 || M
    let db_len = db.len();
    db[0..h_size].copy_from_slice(&p_hash);
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    mgf1_xor(db, digest, seed);
    mgf1_xor(seed, digest, db);

    Ok(em)
}

/// Decodes an OAEP block, returning the embedded message.
///
/// Every malformed block yields the same [`Error::Decoding`]; the scan over
/// the data block runs in constant time with respect to its contents.
pub fn oaep_decode(digest: &mut dyn DynDigest, em: &[u8], label: &[u8]) -> Result<Vec<u8>> {
    let h_size = digest.output_size();
    if em.len() < 2 * h_size + 1 {
        return Err(Error::Decoding);
    }

    let expected_p_hash = label_hash(digest, label);

    let mut em = Zeroizing::new(em.to_vec());
    let (seed, db) = em.split_at_mut(h_size);

    mgf1_xor(seed, digest, db);
    mgf1_xor(db, digest, seed);

    let hash_are_equal = db[0..h_size].ct_eq(&expected_p_hash);

    // The remainder of the data block must be zero or more 0x00, followed
    // by 0x01, followed by the message.
    //   looking_for_index: 1 if we are still looking for the 0x01
    //   index: the offset of the first 0x01 byte
    //   nonzero_before_one: 1 if we saw a non-zero byte before the 1
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_size).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = hash_are_equal & !nonzero_before_one & !looking_for_index;
    if !bool::from(valid) {
        return Err(Error::Decoding);
    }

    Ok(db[h_size + index as usize + 1..].to_vec())
}
