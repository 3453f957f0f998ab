use super::encrypt;
use crate::{traits::RandomizedEncryptor, Result, RsaPublicKey};
use alloc::{boxed::Box, vec::Vec};
use core::{fmt, marker::PhantomData};
use digest::{Digest, DynDigest};
use rand_core::CryptoRngCore;

/// Encryption key for OAEP encryption as described in [RFC8017 § 7.1].
///
/// [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
pub struct EncryptingKey<D>
where
    D: Digest + DynDigest,
{
    inner: RsaPublicKey,
    label: Box<[u8]>,
    phantom: PhantomData<D>,
}

impl<D> EncryptingKey<D>
where
    D: Digest + DynDigest,
{
    /// Create a new encrypting key from an RSA public key, with an empty label.
    pub fn new(key: RsaPublicKey) -> Self {
        Self {
            inner: key,
            label: Box::default(),
            phantom: Default::default(),
        }
    }

    /// Create a new encrypting key from an RSA public key using provided label
    pub fn new_with_label<S: AsRef<[u8]>>(key: RsaPublicKey, label: S) -> Self {
        Self {
            inner: key,
            label: label.as_ref().into(),
            phantom: Default::default(),
        }
    }
}

impl<D> RandomizedEncryptor for EncryptingKey<D>
where
    D: Digest + DynDigest,
{
    fn encrypt_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        encrypt(rng, &self.inner, &mut D::new(), msg, &self.label)
    }
}

impl<D> Clone for EncryptingKey<D>
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

impl<D> fmt::Debug for EncryptingKey<D>
where
    D: Digest + DynDigest,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptingKey")
            .field("inner", &self.inner)
            .field("label", &self.label)
            .finish()
    }
}

impl<D> PartialEq for EncryptingKey<D>
where
    D: Digest + DynDigest,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.label == other.label
    }
}
