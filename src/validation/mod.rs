//! Validation Module
//!
//! Postcode normalization and UK grammar checks.

mod postcode;


pub use postcode::{
    normalize, validate, NormalizedPostcode, ValidationResult, INVALID_FORMAT_MESSAGE,
    MAX_POSTCODE_LENGTH, MIN_POSTCODE_LENGTH, REQUIRED_MESSAGE, TOO_LONG_MESSAGE,
    TOO_SHORT_MESSAGE,
};
