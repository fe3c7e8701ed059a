//! Hashes and module hashes
//!
//! Pact hashes are blake2b-256 digests displayed as unpadded base64url.
//! A [`ModuleHash`] is the hash of a module's source code and nothing else,
//! so identical code always hashes identically regardless of metadata.

use base64ct::{Base64UrlUnpadded, Encoding};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fixed hash length (32 bytes / 256 bits)
pub const HASH_LENGTH: usize = 32;

type Blake2b256 = Blake2b<U32>;

/// Errors decoding hash text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// Wrong number of bytes
    #[error("Hash must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Text was not valid base64url
    #[error("Invalid Base64URL encoding: {0}")]
    InvalidBase64(String),

    /// Text was not valid hex
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),
}

/// Pact hash - a 32 byte blake2b digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PactHash {
    bytes: [u8; HASH_LENGTH],
}

impl PactHash {
    /// Create a new hash from bytes
    pub fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        PactHash { bytes }
    }

    /// Hash arbitrary bytes with blake2b-256
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(data);
        PactHash::new(hasher.finalize().into())
    }

    /// Create from slice (validates length)
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        let bytes: [u8; HASH_LENGTH] = bytes.try_into().map_err(|_| HashError::InvalidLength {
            expected: HASH_LENGTH,
            actual: bytes.len(),
        })?;
        Ok(PactHash::new(bytes))
    }

    /// Get the raw bytes
    pub fn bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.bytes
    }

    /// Convert to Base64URL unpadded encoding
    pub fn to_base64url(&self) -> String {
        Base64UrlUnpadded::encode_string(&self.bytes)
    }

    /// Parse from Base64URL unpadded string
    pub fn from_base64url(s: &str) -> Result<Self, HashError> {
        let bytes = Base64UrlUnpadded::decode_vec(s)
            .map_err(|e| HashError::InvalidBase64(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let bytes = hex::decode(s).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for PactHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64url())
    }
}

impl FromStr for PactHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PactHash::from_base64url(s)
    }
}

impl AsRef<[u8]> for PactHash {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Serialize for PactHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64url())
    }
}

impl<'de> Deserialize<'de> for PactHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        PactHash::from_base64url(&text).map_err(de::Error::custom)
    }
}

/// Hash of a module's source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleHash(pub PactHash);

impl ModuleHash {
    /// Wrap an existing hash
    pub fn new(hash: PactHash) -> Self {
        ModuleHash(hash)
    }

    /// Hash module source text
    pub fn of_code(code: &str) -> Self {
        ModuleHash(PactHash::digest(code.as_bytes()))
    }
}

impl fmt::Display for ModuleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModuleHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PactHash::from_base64url(s).map(ModuleHash)
    }
}
