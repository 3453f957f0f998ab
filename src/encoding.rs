//! PKCS#1 encoding support.
//!
//! Private keys map onto the two prime `RSAPrivateKey` structure of
//! [RFC8017 Appendix A.1.2] field by field, in the order
//! `n, e, d, p, q, dP, dQ, qInv`. Public keys map onto `RSAPublicKey`.
//!
//! [RFC8017 Appendix A.1.2]: https://datatracker.ietf.org/doc/html/rfc8017#appendix-A.1.2

use num_bigint::BigUint;
use pkcs1::{
    der::{Document, SecretDocument},
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, UintRef,
};
use zeroize::Zeroizing;

use crate::{
    traits::{PrivateKeyParts, PublicKeyParts},
    RsaPrivateKey, RsaPublicKey,
};

fn uint_from_ref(uint: UintRef<'_>) -> BigUint {
    BigUint::from_bytes_be(uint.as_bytes())
}

impl TryFrom<pkcs1::RsaPrivateKey<'_>> for RsaPrivateKey {
    type Error = pkcs1::Error;

    fn try_from(pkcs1_key: pkcs1::RsaPrivateKey<'_>) -> pkcs1::Result<RsaPrivateKey> {
        // Multi-prime RSA keys not currently supported
        if pkcs1_key.version() != pkcs1::Version::TwoPrime {
            return Err(pkcs1::Error::Version);
        }

        let n = uint_from_ref(pkcs1_key.modulus);
        let e = uint_from_ref(pkcs1_key.public_exponent);
        let d = uint_from_ref(pkcs1_key.private_exponent);
        let p = uint_from_ref(pkcs1_key.prime1);
        let q = uint_from_ref(pkcs1_key.prime2);

        let key =
            RsaPrivateKey::from_components(n, e, d, p, q).map_err(|_| pkcs1::Error::Crypto)?;

        // The CRT values are recomputed; the stored ones must agree with them.
        if key.dp() != &uint_from_ref(pkcs1_key.exponent1)
            || key.dq() != &uint_from_ref(pkcs1_key.exponent2)
            || key.qinv() != &uint_from_ref(pkcs1_key.coefficient)
        {
            return Err(pkcs1::Error::Crypto);
        }

        Ok(key)
    }
}

impl TryFrom<pkcs1::RsaPublicKey<'_>> for RsaPublicKey {
    type Error = pkcs1::Error;

    fn try_from(pkcs1_key: pkcs1::RsaPublicKey<'_>) -> pkcs1::Result<RsaPublicKey> {
        let n = uint_from_ref(pkcs1_key.modulus);
        let e = uint_from_ref(pkcs1_key.public_exponent);
        RsaPublicKey::new(n, e).map_err(|_| pkcs1::Error::Crypto)
    }
}

impl DecodeRsaPrivateKey for RsaPrivateKey {
    fn from_pkcs1_der(bytes: &[u8]) -> pkcs1::Result<Self> {
        pkcs1::RsaPrivateKey::try_from(bytes)?.try_into()
    }
}

impl DecodeRsaPublicKey for RsaPublicKey {
    fn from_pkcs1_der(bytes: &[u8]) -> pkcs1::Result<Self> {
        pkcs1::RsaPublicKey::try_from(bytes)?.try_into()
    }
}

impl EncodeRsaPrivateKey for RsaPrivateKey {
    fn to_pkcs1_der(&self) -> pkcs1::Result<SecretDocument> {
        let modulus = self.n().to_bytes_be();
        let public_exponent = self.e().to_bytes_be();
        let private_exponent = Zeroizing::new(self.d().to_bytes_be());
        let prime1 = Zeroizing::new(self.p().to_bytes_be());
        let prime2 = Zeroizing::new(self.q().to_bytes_be());
        let exponent1 = Zeroizing::new(self.dp().to_bytes_be());
        let exponent2 = Zeroizing::new(self.dq().to_bytes_be());
        let coefficient = Zeroizing::new(self.qinv().to_bytes_be());

        let private_key = pkcs1::RsaPrivateKey {
            modulus: UintRef::new(&modulus)?,
            public_exponent: UintRef::new(&public_exponent)?,
            private_exponent: UintRef::new(&private_exponent)?,
            prime1: UintRef::new(&prime1)?,
            prime2: UintRef::new(&prime2)?,
            exponent1: UintRef::new(&exponent1)?,
            exponent2: UintRef::new(&exponent2)?,
            coefficient: UintRef::new(&coefficient)?,
            other_prime_infos: None,
        };

        SecretDocument::try_from(&private_key)
    }
}

impl EncodeRsaPublicKey for RsaPublicKey {
    fn to_pkcs1_der(&self) -> pkcs1::Result<Document> {
        let modulus = self.n().to_bytes_be();
        let public_exponent = self.e().to_bytes_be();

        let public_key = pkcs1::RsaPublicKey {
            modulus: UintRef::new(&modulus)?,
            public_exponent: UintRef::new(&public_exponent)?,
        };

        Document::try_from(&public_key)
    }
}
