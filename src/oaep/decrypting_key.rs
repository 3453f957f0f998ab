use super::{decrypt, EncryptingKey};
use crate::{
    random::SystemRandom,
    traits::{Decryptor, EncryptingKeypair, RandomizedDecryptor},
    Result, RsaPrivateKey,
};
use alloc::{boxed::Box, vec::Vec};
use core::{fmt, marker::PhantomData};
use digest::{Digest, DynDigest};
use rand_core::CryptoRngCore;
use zeroize::ZeroizeOnDrop;

/// Decryption key for OAEP decryption as described in [RFC8017 § 7.1].
///
/// Every decryption is blinded. [`Decryptor::decrypt`] draws the blinding
/// factor from [`SystemRandom`].
///
/// [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
pub struct DecryptingKey<D>
where
    D: Digest + DynDigest,
{
    inner: RsaPrivateKey,
    label: Box<[u8]>,
    phantom: PhantomData<D>,
}

impl<D> DecryptingKey<D>
where
    D: Digest + DynDigest,
{
    /// Create a new decrypting key from an RSA private key, with an empty label.
    pub fn new(key: RsaPrivateKey) -> Self {
        Self {
            inner: key,
            label: Box::default(),
            phantom: Default::default(),
        }
    }

    /// Create a new decrypting key from an RSA private key using provided label
    pub fn new_with_label<S: AsRef<[u8]>>(key: RsaPrivateKey, label: S) -> Self {
        Self {
            inner: key,
            label: label.as_ref().into(),
            phantom: Default::default(),
        }
    }
}

impl<D> Decryptor for DecryptingKey<D>
where
    D: Digest + DynDigest,
{
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        decrypt(
            &mut SystemRandom,
            &self.inner,
            &mut D::new(),
            ciphertext,
            &self.label,
        )
    }
}

impl<D> RandomizedDecryptor for DecryptingKey<D>
where
    D: Digest + DynDigest,
{
    fn decrypt_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        decrypt(rng, &self.inner, &mut D::new(), ciphertext, &self.label)
    }
}

impl<D> EncryptingKeypair for DecryptingKey<D>
where
    D: Digest + DynDigest,
{
    type EncryptingKey = EncryptingKey<D>;

    fn encrypting_key(&self) -> EncryptingKey<D> {
        EncryptingKey::new_with_label(self.inner.to_public_key(), &self.label)
    }
}

impl<D> Clone for DecryptingKey<D>
where
    D: Digest + DynDigest,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            label: self.label.clone(),
            phantom: Default::default(),
        }
    }
}

impl<D> fmt::Debug for DecryptingKey<D>
where
    D: Digest + DynDigest,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("inner", &self.inner)
            .field("label", &self.label)
            .finish()
    }
}

impl<D> ZeroizeOnDrop for DecryptingKey<D> where D: Digest + DynDigest {}

impl<D> PartialEq for DecryptingKey<D>
where
    D: Digest + DynDigest,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.label == other.label
    }
}
