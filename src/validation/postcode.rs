//! UK Postcode Validation
//!
//! Normalizes raw user input and checks it against the UK postcode grammar.
//! Length checks run before the regular expression.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Shortest accepted postcode once whitespace is removed (e.g. `M11AE`)
pub const MIN_POSTCODE_LENGTH: usize = 5;

/// Longest accepted postcode once whitespace is removed (e.g. `EC1A1BB`)
pub const MAX_POSTCODE_LENGTH: usize = 7;

pub const REQUIRED_MESSAGE: &str = "Postcode is required";
pub const TOO_SHORT_MESSAGE: &str = "Postcode should be at least 5 characters";
pub const TOO_LONG_MESSAGE: &str = "Postcode should be at most 7 characters";
pub const INVALID_FORMAT_MESSAGE: &str = "Enter a valid postcode";

// Outward code (A9, A99, AA9, AA99, A9A, AA9A) then inward code (9AA), plus GIR 0AA.
// Input is already upper-cased and stripped of whitespace.
static POSTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:GIR0AA|(?:[A-Z][0-9]{1,2}|[A-Z][A-HJ-Y][0-9]{1,2}|[A-Z][0-9][A-Z]|[A-Z][A-HJ-Y][0-9]?[A-Z])[0-9][A-Z]{2})$",
    )
    .unwrap()
});

// == Normalized Postcode ==
/// A postcode that passed validation: upper-case, no whitespace, 5 to 7
/// characters, matching the UK grammar.
///
/// Only [`validate`] can produce one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPostcode(String);

impl NormalizedPostcode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedPostcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPostcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// == Validation Result ==
/// Outcome of validating a raw postcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The postcode is well formed
    Valid(NormalizedPostcode),
    /// The postcode was rejected, with a user-facing reason
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// Converts into a `Result`, the error carrying the rejection reason.
    pub fn into_result(self) -> Result<NormalizedPostcode, String> {
        match self {
            ValidationResult::Valid(postcode) => Ok(postcode),
            ValidationResult::Invalid(reason) => Err(reason),
        }
    }
}

// == Normalize ==
/// Strips every whitespace character and upper-cases the rest.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

// == Validate ==
/// Validates a raw postcode.
///
/// # Checks (in order)
/// 1. Empty or all-whitespace input is rejected as required
/// 2. Normalized length must be at least 5
/// 3. Normalized length must be at most 7
/// 4. Normalized string must match the UK postcode grammar
pub fn validate(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::Invalid(REQUIRED_MESSAGE.to_string());
    }

    let normalized = normalize(raw);
    let length = normalized.chars().count();

    if length < MIN_POSTCODE_LENGTH {
        return ValidationResult::Invalid(TOO_SHORT_MESSAGE.to_string());
    }
    if length > MAX_POSTCODE_LENGTH {
        return ValidationResult::Invalid(TOO_LONG_MESSAGE.to_string());
    }

    if !POSTCODE_RE.is_match(&normalized) {
        return ValidationResult::Invalid(INVALID_FORMAT_MESSAGE.to_string());
    }

    ValidationResult::Valid(NormalizedPostcode(normalized))
}
