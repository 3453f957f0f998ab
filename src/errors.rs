//! Error types

use alloc::string::String;

/// Alias for [`core::result::Result`] with the `ssrsa` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The entropy source could not be opened or read.
    #[error("random source failure: {reason}")]
    RandomSource {
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Plaintext does not fit into the OAEP capacity of the key.
    #[error("message too large")]
    MessageTooLarge,

    /// Ciphertext length differs from the modulus byte length.
    #[error("cipher text wrong length")]
    CipherTextWrongLength,

    /// OAEP encoding preconditions were violated.
    #[error("encoding failure")]
    Encoding,

    /// OAEP decoding failed.
    #[error("decoding failure")]
    Decoding,

    /// Decryption failed.
    #[error("decryption failure")]
    Decryption,

    /// Requested modulus size is below the supported minimum.
    #[error("invalid key size: {bits} bits, at least 64 required")]
    InvalidKeySize {
        /// Requested modulus size in bits.
        bits: usize,
    },

    /// Invalid arguments.
    #[error("invalid arguments")]
    InvalidArguments,

    /// Value does not fit into the requested padded length.
    #[error("invalid padding length")]
    InvalidPadLen,

    /// Invalid modulus.
    #[error("invalid modulus")]
    InvalidModulus,

    /// Invalid exponent.
    #[error("invalid exponent")]
    InvalidExponent,

    /// Public exponent too small.
    #[error("public exponent too small")]
    PublicExponentTooSmall,

    /// Public exponent too large.
    #[error("public exponent too large")]
    PublicExponentTooLarge,

    /// Invalid prime value.
    #[error("invalid prime value")]
    InvalidPrime,

    /// Invalid coefficient.
    #[error("invalid coefficient")]
    InvalidCoefficient,

    /// Internal error.
    #[error("internal error")]
    Internal,

    /// PKCS#1 error.
    #[error("PKCS#1 error: {0}")]
    Pkcs1(pkcs1::Error),
}

impl From<pkcs1::Error> for Error {
    fn from(err: pkcs1::Error) -> Error {
        Error::Pkcs1(err)
    }
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Error {
        Error::RandomSource {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_source_reason() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no entropy");
        let err = Error::from(rand_core::Error::new(io));
        match err {
            Error::RandomSource { ref reason } => assert!(reason.contains("no entropy")),
            ref other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().starts_with("random source failure"));
    }

    #[test]
    fn test_decryption_message_is_generic() {
        assert_eq!(Error::Decryption.to_string(), "decryption failure");
        assert_eq!(Error::Decoding.to_string(), "decoding failure");
    }
}
