#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Supported algorithms
//!
//! This crate implements the [OAEP encryption scheme](#oaep-encryption)
//! described in [RFC8017] on top of its own key generation, which finds
//! primes with the Solovay–Strassen test.
//!
//! # Usage
//!
//! ## OAEP encryption
//!
//! Note: requires `sha2` feature of `ssrsa` crate is enabled.
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use ssrsa::{RsaPrivateKey, RsaPublicKey, Oaep, SystemRandom, sha2::Sha256};
//!
//! let mut rng = SystemRandom;
//!
//! let bits = 1024;
//! let private_key = RsaPrivateKey::new(&mut rng, bits).expect("failed to generate a key");
//! let public_key = RsaPublicKey::from(&private_key);
//!
//! // Encrypt
//! let data = b"hello world";
//! let padding = Oaep::new_with_label::<Sha256, _>("greeting");
//! let enc_data = public_key.encrypt(&mut rng, padding, &data[..]).expect("failed to encrypt");
//! assert_eq!(enc_data.len(), 128);
//!
//! // Decrypt
//! let padding = Oaep::new_with_label::<Sha256, _>("greeting");
//! let dec_data = private_key.decrypt(padding, &enc_data).expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! ## Primality testing
//!
//! ```
//! use ssrsa::{prime, BigUint, SystemRandom, PRIME_ROUNDS};
//!
//! let mut rng = SystemRandom;
//!
//! let p = prime::find(&mut rng, 128, PRIME_ROUNDS).unwrap();
//! assert_eq!(p.bits(), 128);
//! assert!(prime::is_prime(&mut rng, &p, PRIME_ROUNDS).unwrap());
//!
//! let next = prime::find_next(&mut rng, &BigUint::from(90u32), PRIME_ROUNDS).unwrap();
//! assert_eq!(next, BigUint::from(97u32));
//! ```
//!
//! ## PKCS#1 RSA Key Encoding
//!
//! PKCS#1 supports a legacy format for encoding RSA keys as binary (DER) or
//! text (PEM) data. Private keys are written with their eight numeric fields
//! `n, e, d, p, q, dP, dQ, qInv` in that order, so they can be checked with
//! any other PKCS#1 implementation.
//!
//! The following traits can be used to decode/encode [`RsaPrivateKey`] and
//! [`RsaPublicKey`] as PKCS#1. Note that [`pkcs1`] is re-exported from the
//! toplevel of the `ssrsa` crate:
//!
//! - [`pkcs1::DecodeRsaPrivateKey`]: decode RSA private keys from PKCS#1
//! - [`pkcs1::EncodeRsaPrivateKey`]: encode RSA private keys to PKCS#1
//! - [`pkcs1::DecodeRsaPublicKey`]: decode RSA public keys from PKCS#1
//! - [`pkcs1::EncodeRsaPublicKey`]: encode RSA public keys to PKCS#1
//!
//! ### Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # #[cfg(feature = "pem")]
//! # {
//! use ssrsa::{RsaPublicKey, pkcs1::DecodeRsaPublicKey};
//!
//! let pem = "-----BEGIN RSA PUBLIC KEY-----
//! MIIBCgKCAQEAtsQsUV8QpqrygsY+2+JCQ6Fw8/omM71IM2N/R8pPbzbgOl0p78MZ
//! GsgPOQ2HSznjD0FPzsH8oO2B5Uftws04LHb2HJAYlz25+lN5cqfHAfa3fgmC38Ff
//! wBkn7l582UtPWZ/wcBOnyCgb3yLcvJrXyrt8QxHJgvWO23ITrUVYszImbXQ67YGS
//! 0YhMrbixRzmo2tpm3JcIBtnHrEUMsT0NfFdfsZhTT8YbxBvA8FdODgEwx7u/vf3J
//! 9qbi4+Kv8cvqyJuleIRSjVXPsIMnoejIn04APPKIjpMyQdnWlby7rNyQtE4+CV+j
//! cFjqJbE/Xilcvqxt6DirjFCvYeKYl1uHLwIDAQAB
//! -----END RSA PUBLIC KEY-----";
//!
//! let public_key = RsaPublicKey::from_pkcs1_pem(pem)?;
//! # }
//! # Ok(())
//! # }
//! ```
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod errors;
pub mod math;
pub mod oaep;
pub mod prime;
pub mod random;
pub mod traits;

mod encoding;
mod key;

pub use pkcs1;
#[cfg(feature = "sha2")]
pub use sha2;

pub use crate::{
    algorithms::generate::MIN_KEY_BITS,
    errors::{Error, Result},
    key::{check_public, RsaPrivateKey, RsaPublicKey, E},
    oaep::Oaep,
    prime::PRIME_ROUNDS,
    random::SystemRandom,
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
