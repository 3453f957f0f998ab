//! RSA-related trait definitions.

mod encryption;
pub(crate) mod keys;
mod padding;

pub use encryption::{Decryptor, EncryptingKeypair, RandomizedDecryptor, RandomizedEncryptor};
pub use keys::{PrivateKeyParts, PublicKeyParts};
pub use padding::PaddingScheme;
