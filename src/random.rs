//! Cryptographically secure randomness.
//!
//! Every operation in this crate that needs randomness is generic over
//! [`CryptoRngCore`], so any `rand_core` generator can be injected. The
//! default source is [`SystemRandom`], a handle to a single process-wide
//! `/dev/urandom` stream that is opened on first use and read under a lock.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::{impls, CryptoRng, CryptoRngCore, RngCore};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Path of the operating system entropy stream.
pub const URANDOM_PATH: &str = "/dev/urandom";

lazy_static! {
    static ref SYSTEM_STREAM: EntropyStream = EntropyStream::new(URANDOM_PATH);
}

/// A byte stream of operating system entropy.
///
/// The underlying file is opened lazily by the first read. Reads are
/// serialized: a caller holds the lock until its whole buffer is filled, so
/// concurrent readers never observe interleaved partial reads.
#[derive(Debug)]
pub struct EntropyStream {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl EntropyStream {
    /// Create a stream reading from `path`. Nothing is opened until the first read.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    /// Path this stream reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fill `buf` completely with bytes from the stream.
    pub fn read(&self, buf: &mut [u8]) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "entropy stream lock poisoned"))?;

        let file = match guard.take() {
            Some(file) => file,
            None => {
                log::trace!("opening entropy stream {}", self.path.display());
                File::open(&self.path)?
            }
        };

        guard.insert(file).read_exact(buf)
    }
}

impl RngCore for EntropyStream {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill_bytes(dest) {
            panic!("entropy stream failure: {}", err);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.read(dest).map_err(rand_core::Error::new)
    }
}

impl CryptoRng for EntropyStream {}

/// Handle to the process-wide [`URANDOM_PATH`] entropy stream.
///
/// All handles share one stream, so this type is free to copy around.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRandom;

impl SystemRandom {
    /// Fill `buf` with bytes from the system entropy stream.
    pub fn read(&self, buf: &mut [u8]) -> Result<()> {
        SYSTEM_STREAM.read(buf).map_err(|err| {
            log::error!("reading {} failed: {}", URANDOM_PATH, err);
            Error::RandomSource {
                reason: err.to_string(),
            }
        })
    }
}

impl RngCore for SystemRandom {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill_bytes(dest) {
            panic!("system entropy failure: {}", err);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        SYSTEM_STREAM.read(dest).map_err(rand_core::Error::new)
    }
}

impl CryptoRng for SystemRandom {}

/// Fill `buf` from `rng`, reporting failures as [`Error::RandomSource`].
pub fn fill<R: CryptoRngCore + ?Sized>(rng: &mut R, buf: &mut [u8]) -> Result<()> {
    rng.try_fill_bytes(buf).map_err(|err| {
        log::error!("random source failure: {}", err);
        Error::from(err)
    })
}

/// Returns an integer drawn uniformly from `[0, max)`.
///
/// Bits above the bit length of `max - 1` are cleared and candidates that
/// are still `>= max` are rejected, which keeps the result free of modulo bias.
///
/// # Panics
///
/// Panics if `max` is zero.
pub fn random_below<R: CryptoRngCore + ?Sized>(rng: &mut R, max: &BigUint) -> Result<BigUint> {
    assert!(!max.is_zero(), "random_below: max must be positive");

    let bit_len = (max - BigUint::one()).bits();
    let byte_len = (bit_len + 7) / 8;
    let excess = byte_len * 8 - bit_len;

    let mut buf = Zeroizing::new(vec![0u8; byte_len]);
    loop {
        fill(rng, &mut buf)?;
        if let Some(first) = buf.first_mut() {
            *first &= 0xff >> excess;
        }

        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < max {
            return Ok(candidate);
        }
    }
}
