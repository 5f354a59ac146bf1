//! Configuración explícita de los hashers.
//!
//! No hay algoritmo global: cada `ValueHasher`/`RecordHasher` recibe su
//! `HasherConfig` al construirse.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_DEPTH;
use crate::errors::HashError;
use crate::hashing::DigestAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    pub algorithm: DigestAlgorithm,
    /// Niveles de anidamiento permitidos (sequence/tuple/mapping).
    pub max_depth: usize,
    /// Si es `true`, el digest de un array incluye su shape y dtype. Cambia
    /// todos los digests de arrays y tablas numéricas; desactivado por defecto.
    pub strict_arrays: bool,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self { algorithm: DigestAlgorithm::Md5, max_depth: DEFAULT_MAX_DEPTH, strict_arrays: false }
    }
}

impl HasherConfig {
    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict_arrays(mut self, strict: bool) -> Self {
        self.strict_arrays = strict;
        self
    }

    /// Construye la config leyendo claves con `lookup`; las ausentes toman
    /// el valor por defecto. Claves: `ALGORITHM`, `MAX_DEPTH`, `STRICT_ARRAYS`
    /// precedidas por `prefix`.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, HashError>
        where F: Fn(&str) -> Option<String>
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(&format!("{prefix}ALGORITHM")) {
            cfg.algorithm = v.parse()?;
        }
        if let Some(v) = lookup(&format!("{prefix}MAX_DEPTH")) {
            cfg.max_depth = v.trim()
                             .parse()
                             .map_err(|_| HashError::Config(format!("{prefix}MAX_DEPTH must be an unsigned integer, got '{v}'")))?;
        }
        if let Some(v) = lookup(&format!("{prefix}STRICT_ARRAYS")) {
            cfg.strict_arrays = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => return Err(HashError::Config(format!("{prefix}STRICT_ARRAYS must be a boolean, got '{other}'"))),
            };
        }
        Ok(cfg)
    }
}
