//! Property-based tests.

use num_bigint::{BigInt, BigUint, Sign};
use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use sha1::Sha1;
use ssrsa::{math::jacobi, prime, Error, Oaep, RsaPrivateKey, RsaPublicKey};

prop_compose! {
    // WARNING: do *NOT* copy and paste this code. It's insecure and optimized for test speed.
    fn private_key()(seed in any::<[u8; 32]>()) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed(seed);
        RsaPrivateKey::new(&mut rng, 512).unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn oaep_encrypt_roundtrip(
        private_key in private_key(),
        msg in proptest::collection::vec(any::<u8>(), 0..=22),
        label in proptest::collection::vec(any::<u8>(), 0..16),
        seed in any::<[u8; 32]>(),
    ) {
        let mut rng = ChaCha8Rng::from_seed(seed);
        let public_key = RsaPublicKey::from(&private_key);

        let ciphertext = public_key
            .encrypt(&mut rng, Oaep::new_with_label::<Sha1, _>(&label), &msg)
            .unwrap();
        prop_assert_eq!(ciphertext.len(), 64);

        let plaintext = private_key
            .decrypt_blinded(&mut rng, Oaep::new_with_label::<Sha1, _>(&label), &ciphertext)
            .unwrap();
        prop_assert_eq!(&plaintext, &msg);

        let mut wrong = label.clone();
        wrong.push(0);
        prop_assert_eq!(
            private_key.decrypt_blinded(&mut rng, Oaep::new_with_label::<Sha1, _>(&wrong), &ciphertext),
            Err(Error::Decryption)
        );
    }

    #[test]
    fn find_next_is_smallest_prime_above(start in 3u64..1_000_000, seed in any::<[u8; 32]>()) {
        let mut rng = ChaCha8Rng::from_seed(seed);
        let start = BigUint::from(start);

        let p = prime::find_next(&mut rng, &start, 40).unwrap();
        prop_assert!(p >= start);

        let mut n = start.clone();
        while n < p {
            prop_assert!(!prime::is_prime(&mut rng, &n, 40).unwrap());
            n += 1u32;
        }
    }
}

proptest! {
    #[test]
    fn jacobi_is_multiplicative(a in 0u64..1 << 32, b in 0u64..1 << 32, n in 0u64..1 << 31) {
        let n = BigUint::from(2 * n + 1);
        let ab = BigInt::from(a) * BigInt::from(b);

        prop_assert_eq!(
            jacobi(&ab, &n),
            jacobi(&BigInt::from(a), &n) * jacobi(&BigInt::from(b), &n)
        );
    }

    #[test]
    fn jacobi_depends_on_residue_only(a in -(1i64 << 40)..1 << 40, n in 0u64..1 << 20) {
        let n = BigUint::from(2 * n + 1);
        let modulus = BigInt::from_biguint(Sign::Plus, n.clone());
        let shifted = BigInt::from(a) + modulus * BigInt::from(12345);

        prop_assert_eq!(jacobi(&BigInt::from(a), &n), jacobi(&shifted, &n));
    }
}
