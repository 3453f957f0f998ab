use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::{generate_key_with_exp, RsaPrivateKeyComponents};
use crate::algorithms::rsa::compute_crt_values;
use crate::errors::{Error, Result};
use crate::random::SystemRandom;
use crate::traits::{PaddingScheme, PrivateKeyParts, PublicKeyParts};

/// Default exponent for RSA keys.
pub const E: u64 = 65537;

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    ///
    /// Typically 0x10001 (65537)
    e: BigUint,
    /// Nominal size of the modulus in bits.
    bits: usize,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: BigUint,
    /// First prime factor of `n`
    p: BigUint,
    /// Second prime factor of `n`
    q: BigUint,
    /// D mod (P-1)
    dp: BigUint,
    /// D mod (Q-1)
    dq: BigUint,
    /// Q^-1 mod P
    qinv: BigUint,
}

impl Eq for RsaPrivateKey {}
impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separator for RSA private keys
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.pubkey_components, state);
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("pubkey_components", &self.pubkey_components)
            .field("d", &"...")
            .field("p", &"...")
            .field("q", &"...")
            .finish()
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }

    fn bits(&self) -> usize {
        self.bits
    }
}

impl RsaPublicKey {
    /// Minimum value of the public exponent `e`.
    pub const MIN_PUB_EXPONENT: u64 = 2;

    /// Maximum value of the public exponent `e`.
    pub const MAX_PUB_EXPONENT: u64 = (1 << 33) - 1;

    /// Create a new public key from its components.
    ///
    /// The modulus must be odd and larger than one, the exponent must lie in
    /// `[MIN_PUB_EXPONENT, MAX_PUB_EXPONENT]`.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let bits = n.bits();
        let k = Self { n, e, bits };
        check_public(&k)?;
        Ok(k)
    }

    /// Encrypt the given message.
    pub fn encrypt<R: CryptoRngCore + ?Sized, P: PaddingScheme>(
        &self,
        rng: &mut R,
        padding: P,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        padding.encrypt(rng, self, msg)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }

    fn bits(&self) -> usize {
        self.pubkey_components.bits
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn p(&self) -> &BigUint {
        &self.p
    }

    fn q(&self) -> &BigUint {
        &self.q
    }

    fn dp(&self) -> &BigUint {
        &self.dp
    }

    fn dq(&self) -> &BigUint {
        &self.dq
    }

    fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair of the given bit size, drawing randomness
    /// from `rng`. The public exponent is [`E`].
    ///
    /// Fails with [`Error::InvalidKeySize`] below 64 bits.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<RsaPrivateKey> {
        let exp = BigUint::from(E);
        let RsaPrivateKeyComponents { n, e, d, p, q } =
            generate_key_with_exp(rng, bit_size, &exp)?;

        RsaPrivateKey::from_components(n, e, d, p, q)
    }

    /// Generate a new RSA key pair of the given bit size using the
    /// operating system entropy stream.
    pub fn generate(bit_size: usize) -> Result<RsaPrivateKey> {
        Self::new(&mut SystemRandom, bit_size)
    }

    /// Constructs an RSA key pair from its two primes and exponents.
    ///
    /// The CRT values are recomputed from `d`, `p` and `q`. The components
    /// are checked with [`RsaPrivateKey::validate`].
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<RsaPrivateKey> {
        if p <= BigUint::one() || q <= BigUint::one() || p == q {
            return Err(Error::InvalidPrime);
        }

        let crt = compute_crt_values(&d, &p, &q)?;
        let bits = n.bits();
        let key = RsaPrivateKey {
            pubkey_components: RsaPublicKey { n, e, bits },
            d,
            p,
            q,
            dp: crt.dp,
            dq: crt.dq,
            qinv: crt.qinv,
        };

        key.validate()?;
        Ok(key)
    }

    /// Get the public key from the private key, cloning `n`, `e` and the bit size.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        if self.p == self.q {
            return Err(Error::InvalidPrime);
        }

        // Check that p * q == n.
        if &self.p * &self.q != self.pubkey_components.n {
            return Err(Error::InvalidModulus);
        }

        // Check that de ≡ 1 mod p-1 and mod q-1.
        let de = self.e() * &self.d;
        for prime in [&self.p, &self.q] {
            let congruence: BigUint = &de % (prime - BigUint::one());
            if !congruence.is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        // qinv * q ≡ 1 mod p
        if !((&self.qinv * &self.q) % &self.p).is_one() {
            return Err(Error::InvalidCoefficient);
        }

        Ok(())
    }

    /// Decrypt the given message.
    ///
    /// The private operation is blinded with randomness from the operating
    /// system entropy stream.
    pub fn decrypt<P: PaddingScheme>(&self, padding: P, ciphertext: &[u8]) -> Result<Vec<u8>> {
        padding.decrypt(&mut SystemRandom, self, ciphertext)
    }

    /// Decrypt the given message, drawing the blinding factor from `rng`.
    pub fn decrypt_blinded<R: CryptoRngCore + ?Sized, P: PaddingScheme>(
        &self,
        rng: &mut R,
        padding: P,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        padding.decrypt(rng, self, ciphertext)
    }
}

/// Check that the public key is well formed and has an exponent within acceptable bounds.
#[inline]
pub fn check_public<K: PublicKeyParts + ?Sized>(public_key: &K) -> Result<()> {
    let n = public_key.n();
    if n <= &BigUint::one() || n.is_even() {
        return Err(Error::InvalidModulus);
    }

    let e = public_key
        .e()
        .to_u64()
        .ok_or(Error::PublicExponentTooLarge)?;

    if e < RsaPublicKey::MIN_PUB_EXPONENT {
        return Err(Error::PublicExponentTooSmall);
    }

    if e > RsaPublicKey::MAX_PUB_EXPONENT {
        return Err(Error::PublicExponentTooLarge);
    }

    Ok(())
}
