//! Hash helpers – abstracción para cambiar de algoritmo sin tocar el resto del core.
//!
//! `Digest` es siempre de 128 bits. MD5 es el algoritmo por defecto y el único
//! compatible con los digests ya almacenados; SHA-256 y BLAKE3 se truncan a
//! los primeros 16 bytes.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};

use crate::constants::{DIGEST_LEN, HEX_LEN, SHORT_LEN};
use crate::errors::HashError;

/// Digest de 128 bits producido por el motor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Centinela de ausencia (`Value::Null`).
    pub const NULL: Digest = Digest([0; DIGEST_LEN]);

    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self { Self(bytes) }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] { &self.0 }

    /// Hex en minúsculas, 32 caracteres.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(HEX_LEN);
        for b in self.0 {
            out.push(hex_char(b >> 4));
            out.push(hex_char(b & 0x0f));
        }
        out
    }

    /// Acepta mayúsculas o minúsculas; la longitud debe ser exactamente 32.
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        if s.len() != HEX_LEN {
            return Err(HashError::InvalidDigest(format!("expected {HEX_LEN} hex chars, got {}", s.len())));
        }
        let mut bytes = [0u8; DIGEST_LEN];
        for (i, pair) in s.as_bytes().chunks(2).enumerate() {
            let hi = hex_val(pair[0]).ok_or_else(|| HashError::InvalidDigest(s.to_string()))?;
            let lo = hex_val(pair[1]).ok_or_else(|| HashError::InvalidDigest(s.to_string()))?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }

    /// Prefijo corto para mostrar al usuario (no es único).
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(SHORT_LEN);
        hex
    }
}

fn hex_char(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).unwrap_or('0')
}

fn hex_val(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_hex()) }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Digest({})", self.to_hex()) }
}

impl FromStr for Digest {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_hex(s) }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Selector del algoritmo de digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }

    /// Estado incremental vacío para este algoritmo.
    pub fn start(&self) -> DigestState {
        match self {
            Self::Md5 => DigestState::Md5(Md5::new()),
            Self::Sha256 => DigestState::Sha256(Sha256::new()),
            Self::Blake3 => DigestState::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    pub fn digest(&self, bytes: &[u8]) -> Digest {
        let mut state = self.start();
        state.update(bytes);
        state.finalize()
    }
}

impl FromStr for DigestAlgorithm {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            other => Err(HashError::Config(format!("unknown digest algorithm '{other}'"))),
        }
    }
}

/// Hasher incremental; evita concatenar buffers al combinar sub-digests.
pub enum DigestState {
    Md5(Md5),
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    pub fn update(&mut self, bytes: &[u8]) {
        match self {
            Self::Md5(h) => h.update(bytes),
            Self::Sha256(h) => h.update(bytes),
            Self::Blake3(h) => {
                h.update(bytes);
            }
        }
    }

    pub fn finalize(self) -> Digest {
        let mut out = [0u8; DIGEST_LEN];
        match self {
            Self::Md5(h) => out.copy_from_slice(&h.finalize()[..DIGEST_LEN]),
            Self::Sha256(h) => out.copy_from_slice(&h.finalize()[..DIGEST_LEN]),
            Self::Blake3(h) => out.copy_from_slice(&h.finalize().as_bytes()[..DIGEST_LEN]),
        }
        Digest(out)
    }
}

/// Hashea un string con el algoritmo por defecto y devuelve hex.
pub fn hash_str(input: &str) -> String {
    DigestAlgorithm::default().digest(input.as_bytes()).to_hex()
}
