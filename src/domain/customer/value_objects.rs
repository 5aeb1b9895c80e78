use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Customer Value Objects
// ============================================================================

pub const CPF_LENGTH: usize = 11;

/// Normalized CPF: exactly 11 ASCII digits, no punctuation.
///
/// Only the validators in `cpf` build one, so holding a `Cpf` means the
/// structural check already passed. The checksum may or may not have been
/// verified; lookups skip it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    pub(super) fn from_normalized(digits: String) -> Self {
        debug_assert!(digits.len() == CPF_LENGTH && digits.bytes().all(|b| b.is_ascii_digit()));
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digits(&self) -> [u8; CPF_LENGTH] {
        let mut digits = [0u8; CPF_LENGTH];
        for (slot, byte) in digits.iter_mut().zip(self.0.bytes()) {
            *slot = byte - b'0';
        }
        digits
    }

    /// Log-safe form keeping only the last four digits.
    pub fn masked(&self) -> String {
        format!("***.***.*{}-{}", &self.0[7..9], &self.0[9..])
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer as submitted by a client, before any validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
}

/// Customer that passed every check and is ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub cpf: Cpf,
    pub birth_date: String,
}

/// Persisted customer row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCustomer {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
}
