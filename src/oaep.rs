//! Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#oaep-encryption).

mod decrypting_key;
mod encrypting_key;

pub use self::{decrypting_key::DecryptingKey, encrypting_key::EncryptingKey};

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use digest::{Digest, DynDigest};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::algorithms::oaep::{oaep_decode, oaep_encode};
use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::key::{self, RsaPrivateKey, RsaPublicKey};
use crate::traits::{PaddingScheme, PrivateKeyParts, PublicKeyParts};

/// Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
///
/// - `digest` hashes the label and drives MGF1. The maximum possible
///   plaintext length is `m = k - 2 * h_len - 2`, where `k` is the size of
///   the RSA modulus in bytes.
/// - `label` is data bound to the ciphertext. Decryption only succeeds with
///   the exact label used for encryption.
pub struct Oaep {
    /// Digest type to use.
    pub digest: Box<dyn DynDigest + Send + Sync>,

    /// Label, empty by default.
    pub label: Box<[u8]>,
}

impl Oaep {
    /// Create a new OAEP `PaddingScheme` with an empty label, using `T` as
    /// the hash function.
    ///
    /// # Example
    /// ```
    /// use sha2::Sha256;
    /// use ssrsa::{BigUint, RsaPublicKey, Oaep, SystemRandom};
    ///
    /// let n = BigUint::parse_bytes(b"d397b84d98a4c26138ed1b695a8106ead91d553bf06041b62d3fdc50a041e222b8f4529689c1b82c5e71554f5dd69fa2f4b6158cf0dbeb57811a0fc327e1f28e74fe74d3bc166c1eabdc1b8b57b934ca8be5b00b4f29975bcc99acaf415b59bb28a6782bb41a2c3c2976b3c18dbadef62f00c6bb226640095096c0cc60d22fe7ef987d75c6a81b10d96bf292028af110dc7cc1bbc43d22adab379a0cd5d8078cc780ff5cd6209dea34c922cf784f7717e428d75b5aec8ff30e5f0141510766e2e0ab8d473c84e8710b2b98227c3db095337ad3452f19e2b9bfbccdd8148abf6776fa552775e6e75956e45229ae5a9c46949bab1e622f0e48f56524a84ed3483b", 16).unwrap();
    /// let e = BigUint::from(65537u32);
    ///
    /// let key = RsaPublicKey::new(n, e).unwrap();
    /// let padding = Oaep::new::<Sha256>();
    /// let encrypted_data = key.encrypt(&mut SystemRandom, padding, b"secret").unwrap();
    /// assert_eq!(encrypted_data.len(), 256);
    /// ```
    pub fn new<T: 'static + Digest + DynDigest + Send + Sync>() -> Self {
        Self {
            digest: Box::new(T::new()),
            label: Box::default(),
        }
    }

    /// Create a new OAEP `PaddingScheme` with an associated `label`, using
    /// `T` as the hash function.
    pub fn new_with_label<T: 'static + Digest + DynDigest + Send + Sync, S: AsRef<[u8]>>(
        label: S,
    ) -> Self {
        Self {
            digest: Box::new(T::new()),
            label: label.as_ref().into(),
        }
    }
}

impl PaddingScheme for Oaep {
    fn decrypt<Rng: CryptoRngCore + ?Sized>(
        mut self,
        rng: &mut Rng,
        priv_key: &RsaPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        decrypt(rng, priv_key, &mut *self.digest, ciphertext, &self.label)
    }

    fn encrypt<Rng: CryptoRngCore + ?Sized>(
        mut self,
        rng: &mut Rng,
        pub_key: &RsaPublicKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        encrypt(rng, pub_key, &mut *self.digest, msg, &self.label)
    }
}

impl fmt::Debug for Oaep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAEP")
            .field("digest", &"...")
            .field("label", &self.label)
            .finish()
    }
}

/// Encrypts the given message with RSA and the padding scheme from
/// [PKCS#1 OAEP].
///
/// The message must be no longer than the length of the public modulus minus
/// `2 + (2 * hash.size())`. The ciphertext is always exactly
/// [`PublicKeyParts::size`] bytes long.
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub fn encrypt<R: CryptoRngCore + ?Sized, K: PublicKeyParts + ?Sized>(
    rng: &mut R,
    pub_key: &K,
    digest: &mut dyn DynDigest,
    msg: &[u8],
    label: &[u8],
) -> Result<Vec<u8>> {
    key::check_public(pub_key)?;

    let k = pub_key.size();
    let h_size = digest.output_size();

    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::MessageTooLarge);
    }

    let em = oaep_encode(rng, digest, msg, label, k - 1)?;

    let m = BigUint::from_bytes_be(&em);
    let c = rsa_encrypt(pub_key, &m)?;
    uint_to_be_pad(c, k)
}

/// Decrypts a ciphertext using RSA and the padding scheme from [PKCS#1 OAEP].
///
/// The private key operation is blinded with randomness drawn from `rng`.
///
/// A failure of the private key operation or of any padding check is
/// reported as the same [`Error::Decryption`]; only a failing random source
/// and a ciphertext of the wrong length are told apart.
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub fn decrypt<R: CryptoRngCore + ?Sized, SK: PrivateKeyParts + ?Sized>(
    rng: &mut R,
    priv_key: &SK,
    digest: &mut dyn DynDigest,
    ciphertext: &[u8],
    label: &[u8],
) -> Result<Vec<u8>> {
    key::check_public(priv_key)?;

    let k = priv_key.size();
    if ciphertext.len() != k {
        return Err(Error::CipherTextWrongLength);
    }

    let c = BigUint::from_bytes_be(ciphertext);
    let m = rsa_decrypt_and_check(rng, priv_key, &c).map_err(|err| match err {
        Error::RandomSource { .. } => err,
        _ => Error::Decryption,
    })?;

    let em = uint_to_zeroizing_be_pad(m, k - 1).map_err(|_| Error::Decryption)?;
    oaep_decode(digest, &em, label).map_err(|_| Error::Decryption)
}
