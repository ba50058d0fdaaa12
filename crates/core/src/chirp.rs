//! Chirp body rules: maximum length and the profanity filter.

use crate::error::CoreError;

/// Maximum number of characters in a chirp body.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Words replaced by [`CENSOR_MASK`] when they appear as a whole word.
pub const PROFANE_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];

/// Replacement text for a censored word.
pub const CENSOR_MASK: &str = "****";

/// Reject chirp bodies that are empty or longer than [`MAX_CHIRP_LENGTH`] characters.
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn validate_chirp_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Chirp body must not be empty".into()));
    }
    let len = body.chars().count();
    if len > MAX_CHIRP_LENGTH {
        return Err(CoreError::Validation(format!(
            "Chirp is too long ({len} > {MAX_CHIRP_LENGTH} characters)"
        )));
    }
    Ok(())
}

/// Replace profane words with [`CENSOR_MASK`].
///
/// Words are split on single spaces and compared case-insensitively. Words
/// with attached punctuation (e.g. `"Sharbert!"`) are left as-is.
pub fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                CENSOR_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
