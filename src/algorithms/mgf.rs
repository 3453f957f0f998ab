//! Mask generation function MGF1, as used by OAEP.

use alloc::vec::Vec;

use digest::DynDigest;

/// Largest mask MGF1 can produce: 2^32 blocks.
const MAX_LEN: u64 = core::u32::MAX as u64 + 1;

/// Returns `len` bytes of `H(seed || C0) || H(seed || C1) || ...`, where
/// `Ci` is the 32-bit big-endian counter `i`.
///
/// Panics if `len` is larger than 2**32. This is in accordance with RFC 8017 - PKCS #1 B.2.1
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
pub fn mgf1(digest: &mut dyn DynDigest, seed: &[u8], len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    mgf1_xor(&mut out, digest, seed);
    out
}

/// XORs `out` with the MGF1 mask of the same length derived from `seed`.
///
/// Panics if out is larger than 2**32. This is in accordance with RFC 8017 - PKCS #1 B.2.1
pub fn mgf1_xor(out: &mut [u8], digest: &mut dyn DynDigest, seed: &[u8]) {
    assert!(out.len() as u64 <= MAX_LEN);

    digest.reset();

    let mut counter = [0u8; 4];
    let mut i = 0;

    while i < out.len() {
        digest.update(seed);
        digest.update(&counter);

        let digest_output = &*digest.finalize_reset();
        for byte in digest_output.iter() {
            if i >= out.len() {
                break;
            }
            out[i] ^= byte;
            i += 1;
        }
        inc_counter(&mut counter);
    }
}

fn inc_counter(counter: &mut [u8; 4]) {
    for i in (0..4).rev() {
        counter[i] = counter[i].wrapping_add(1);
        if counter[i] != 0 {
            // No overflow
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest::Digest;
    use hex_literal::hex;
    use sha1::Sha1;
    use sha2::Sha256;

    #[test]
    fn test_mgf1_blocks() {
        let seed = b"mask seed";
        let mask = mgf1(&mut Sha256::new(), seed, 80);

        let mut expected = Vec::new();
        for counter in 0u32..3 {
            let mut h = Sha256::new();
            Digest::update(&mut h, seed);
            Digest::update(&mut h, counter.to_be_bytes());
            expected.extend_from_slice(&Digest::finalize(h));
        }
        expected.truncate(80);

        assert_eq!(mask, expected);
    }

    #[test]
    fn test_mgf1_vector() {
        // MGF1-SHA1("foo", 3) and MGF1-SHA1("bar", 5)
        assert_eq!(mgf1(&mut Sha1::new(), b"foo", 3), hex!("1ac907"));
        assert_eq!(mgf1(&mut Sha1::new(), b"bar", 5), hex!("bc0c655e01"));
    }

    #[test]
    fn test_mgf1_ignores_pending_input() {
        let mut dirty = Sha256::new();
        Digest::update(&mut dirty, b"stale");
        assert_eq!(
            mgf1(&mut dirty, b"seed", 40),
            mgf1(&mut Sha256::new(), b"seed", 40)
        );
    }

    #[test]
    fn test_mgf1_xor_is_involution() {
        let mut data = *b"0123456789abcdef0123456789abcdef0123456789";
        let original = data;
        mgf1_xor(&mut data, &mut Sha256::new(), b"seed");
        assert_ne!(data, original);
        mgf1_xor(&mut data, &mut Sha256::new(), b"seed");
        assert_eq!(data, original);
    }

    #[test]
    fn test_inc_counter() {
        let mut counter = [0, 0, 0xff, 0xff];
        inc_counter(&mut counter);
        assert_eq!(counter, [0, 1, 0, 0]);
    }
}
