//! Salted, iterated message digests
//!
//! Stored form is `base64(salt || digest)`, where the digest is `H(salt || password)`
//! re-hashed until `iterations` rounds have been applied. Passwords are NFC-normalised
//! before hashing. This is what Jasypt's basic and strong password encryptors do, so
//! their `ENC(...)` values verify here.

use super::PasswordEncryptor;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::warn;
use md5::Md5;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::marker::PhantomData;
use unicode_normalization::UnicodeNormalization;

pub const BASIC_SALT_SIZE: usize = 8;
pub const BASIC_ITERATIONS: u32 = 1_000;
pub const STRONG_SALT_SIZE: usize = 16;
pub const STRONG_ITERATIONS: u32 = 100_000;

/// Password encryptor over any fixed-output digest `D`.
pub struct DigestPasswordEncryptor<D> {
    name: &'static str,
    salt_size: usize,
    iterations: u32,
    _digest: PhantomData<fn() -> D>,
}

impl DigestPasswordEncryptor<Md5> {
    /// MD5, 8-byte salt, 1000 rounds.
    pub fn basic() -> Self {
        Self::new("basic", BASIC_SALT_SIZE, BASIC_ITERATIONS)
    }
}

impl DigestPasswordEncryptor<Sha256> {
    /// SHA-256, 16-byte salt, 100000 rounds.
    pub fn strong() -> Self {
        Self::new("strong", STRONG_SALT_SIZE, STRONG_ITERATIONS)
    }
}

impl<D: Digest> DigestPasswordEncryptor<D> {
    pub fn new(name: &'static str, salt_size: usize, iterations: u32) -> Self {
        Self {
            name,
            salt_size,
            iterations: iterations.max(1),
            _digest: PhantomData,
        }
    }

    fn digest(&self, salt: &[u8], password: &str) -> Vec<u8> {
        let password: String = password.nfc().collect();
        let mut hasher = D::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        let mut digest = hasher.finalize();
        for _ in 1..self.iterations {
            digest = D::digest(&digest);
        }
        digest.to_vec()
    }

    fn generate_salt(&self) -> Vec<u8> {
        let mut salt = vec![0u8; self.salt_size];
        rand::rng().fill_bytes(&mut salt);
        salt
    }

    pub fn encrypt_with_salt(&self, password: &str, salt: &[u8]) -> String {
        let mut stored = salt.to_vec();
        stored.extend_from_slice(&self.digest(salt, password));
        STANDARD.encode(stored)
    }
}

impl<D: Digest> PasswordEncryptor for DigestPasswordEncryptor<D> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn encrypt_password(&self, password: &str) -> String {
        let salt = self.generate_salt();
        self.encrypt_with_salt(password, &salt)
    }

    fn check_password(&self, password: &str, stored: &str) -> bool {
        let decoded = match STANDARD.decode(stored.trim()) {
            Ok(bytes) => bytes,
            Err(_) => {
                warn!("Stored secret is not a valid {} digest (bad base64)", self.name);
                return false;
            }
        };
        if decoded.len() <= self.salt_size {
            warn!("Stored secret is too short to be a {} digest", self.name);
            return false;
        }

        let (salt, expected) = decoded.split_at(self.salt_size);
        constant_time_eq(&self.digest(salt, password), expected)
    }
}

/// Compares two byte strings without short-circuiting on the first difference.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
