use super::errors::{CustomerError, MALFORMED_CPF};
use super::value_objects::{Cpf, CPF_LENGTH};

// ============================================================================
// CPF Validation - Modulus 11 Check Digits
// ============================================================================
//
// Accepted shapes: `###.###.###-##` or 11 bare digits.
// Digits 9 and 10 (0-indexed) are check digits computed from the digits
// before them with descending weights.
//
// ============================================================================

const PUNCTUATED_LENGTH: usize = 14;
const MODULUS: u32 = 11;

/// Structural check for either accepted CPF shape.
pub fn matches_cpf_pattern(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    match bytes.len() {
        CPF_LENGTH => bytes.iter().all(u8::is_ascii_digit),
        PUNCTUATED_LENGTH => bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 7 => *b == b'.',
            11 => *b == b'-',
            _ => b.is_ascii_digit(),
        }),
        _ => false,
    }
}

/// Structural check plus normalization. Does not look at the check digits.
pub fn parse_cpf(raw: &str) -> Result<Cpf, CustomerError> {
    let raw = raw.trim();
    if !matches_cpf_pattern(raw) {
        return Err(CustomerError::MalformedInput(MALFORMED_CPF));
    }

    let normalized: String = raw.chars().filter(|c| *c != '.' && *c != '-').collect();
    Ok(Cpf::from_normalized(normalized))
}

/// Check digit for `digits`, weighting the first one with `first_weight`
/// and each following one with one less.
pub fn check_digit(digits: &[u8], first_weight: u32) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip((1..=first_weight).rev())
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum();

    match sum % MODULUS {
        remainder if remainder < 2 => 0,
        remainder => (MODULUS - remainder) as u8,
    }
}

/// Verify both check digits. The second is only computed when the first holds.
pub fn verify_checksum(cpf: &Cpf) -> Result<(), CustomerError> {
    let digits = cpf.digits();

    if check_digit(&digits[..9], 10) != digits[9] {
        return Err(CustomerError::InvalidChecksum);
    }
    if check_digit(&digits[..10], 11) != digits[10] {
        return Err(CustomerError::InvalidChecksum);
    }

    Ok(())
}

pub fn validate_cpf(raw: &str) -> Result<Cpf, CustomerError> {
    let cpf = parse_cpf(raw)?;
    verify_checksum(&cpf)?;
    Ok(cpf)
}
