//! End-to-end OAEP encryption with generated keys.

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rand_core::RngCore;
use sha2::Sha256;
use ssrsa::{
    oaep::{self, DecryptingKey, EncryptingKey},
    traits::{Decryptor, EncryptingKeypair, PublicKeyParts, RandomizedEncryptor},
    Error, Oaep, RsaPrivateKey, RsaPublicKey,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn get_private_key(seed: u8, bits: usize) -> RsaPrivateKey {
    let mut rng = ChaCha8Rng::from_seed([seed; 32]);
    RsaPrivateKey::new(&mut rng, bits).unwrap()
}

#[test]
fn oaep_2048_bit_label_round_trip() {
    init();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let private_key = get_private_key(1, 2048);
    let public_key = RsaPublicKey::from(&private_key);
    assert_eq!(public_key.bits(), 2048);

    let mut msg = [0u8; 100];
    rng.fill_bytes(&mut msg);
    let label = *b"8 bytes!";

    let ciphertext = oaep::encrypt(&mut rng, &public_key, &mut Sha256::default(), &msg, &label)
        .unwrap();
    assert_eq!(ciphertext.len(), 256);

    let plaintext = oaep::decrypt(
        &mut rng,
        &private_key,
        &mut Sha256::default(),
        &ciphertext,
        &label,
    )
    .unwrap();
    assert_eq!(plaintext, msg);

    for i in 0..label.len() {
        let mut wrong = label;
        wrong[i] ^= 0x01;
        assert_eq!(
            oaep::decrypt(
                &mut rng,
                &private_key,
                &mut Sha256::default(),
                &ciphertext,
                &wrong
            ),
            Err(Error::Decryption)
        );
    }
}

#[test]
fn oaep_1024_bit_capacity() {
    init();
    let mut rng = ChaCha8Rng::from_seed([43; 32]);
    let public_key = get_private_key(6, 1024).to_public_key();
    let label = *b"8 bytes!";

    // 128 - 2 * 32 - 2 = 62 bytes under SHA-256
    assert_eq!(
        oaep::encrypt(&mut rng, &public_key, &mut Sha256::default(), &[0u8; 100], &label),
        Err(Error::MessageTooLarge)
    );
    let ciphertext =
        oaep::encrypt(&mut rng, &public_key, &mut Sha256::default(), &[0u8; 62], &label)
            .unwrap();
    assert_eq!(ciphertext.len(), 128);
}

#[test]
fn oaep_ciphertexts_are_randomized() {
    init();
    let mut rng = ChaCha8Rng::from_seed([3; 32]);
    let private_key = get_private_key(2, 1024);
    let public_key = private_key.to_public_key();

    let msg = b"same message, same label";
    let first = public_key
        .encrypt(&mut rng, Oaep::new_with_label::<Sha256, _>("x"), msg)
        .unwrap();
    let second = public_key
        .encrypt(&mut rng, Oaep::new_with_label::<Sha256, _>("x"), msg)
        .unwrap();
    assert_ne!(first, second);

    for ciphertext in [first, second] {
        let plaintext = private_key
            .decrypt_blinded(&mut rng, Oaep::new_with_label::<Sha256, _>("x"), &ciphertext)
            .unwrap();
        assert_eq!(&plaintext[..], &msg[..]);
    }
}

#[test]
fn oaep_rejects_oversized_messages() {
    init();
    let mut rng = ChaCha8Rng::from_seed([4; 32]);
    let public_key = get_private_key(3, 1024).to_public_key();

    // 128 - 2 * 32 - 2
    let max = 62;
    assert!(public_key
        .encrypt(&mut rng, Oaep::new::<Sha256>(), &[7u8; 62][..max])
        .is_ok());
    assert_eq!(
        public_key.encrypt(&mut rng, Oaep::new::<Sha256>(), &[7u8; 63]),
        Err(Error::MessageTooLarge)
    );
}

#[test]
fn oaep_wrong_ciphertext_length() {
    init();
    let private_key = get_private_key(4, 1024);
    assert_eq!(
        private_key.decrypt(Oaep::new::<Sha256>(), &[1u8; 127]),
        Err(Error::CipherTextWrongLength)
    );
    assert_eq!(
        private_key.decrypt(Oaep::new::<Sha256>(), &[1u8; 129]),
        Err(Error::CipherTextWrongLength)
    );
}

#[test]
fn oaep_typed_keys() {
    init();
    let mut rng = ChaCha8Rng::from_seed([5; 32]);
    let decrypting_key = DecryptingKey::<Sha256>::new_with_label(get_private_key(5, 1024), "typed");
    let encrypting_key: EncryptingKey<Sha256> = decrypting_key.encrypting_key();

    let ciphertext = encrypting_key.encrypt_with_rng(&mut rng, b"typed keys").unwrap();
    assert_eq!(ciphertext.len(), 128);
    assert_eq!(decrypting_key.decrypt(&ciphertext).unwrap(), b"typed keys");
}
