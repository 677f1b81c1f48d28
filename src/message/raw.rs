//! Raw character matrix detection and parsing.

use crate::board::CharacterMatrix;
use crate::constants::RAW_MATRIX_MIN_LEN;
use crate::options::ValidationError;

/// Returns `true` if `input` should be sent as a raw character matrix
/// rather than composed as template text.
///
/// The trimmed input must be at least [`RAW_MATRIX_MIN_LEN`] characters,
/// be bracket-delimited and parse as an array of integer arrays. Anything
/// else, including parse failures, is a negative result.
pub fn looks_like_raw_characters(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.len() < RAW_MATRIX_MIN_LEN {
        return false;
    }
    if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return false;
    }
    serde_json::from_str::<CharacterMatrix>(trimmed).is_ok()
}

/// Parses a raw character matrix, rejecting malformed JSON and empty arrays.
pub fn parse_characters(input: &str) -> Result<CharacterMatrix, ValidationError> {
    let characters: CharacterMatrix = serde_json::from_str(input.trim()).map_err(|e| {
        ValidationError::new(format!(
            "raw input must be a JSON array of arrays of integers: {e}"
        ))
    })?;
    if characters.is_empty() {
        return Err(ValidationError::new(
            "raw input must be a JSON array of arrays of integers: empty array",
        ));
    }
    Ok(characters)
}
