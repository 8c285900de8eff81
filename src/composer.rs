use crate::charset::Selection;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use zeroize::Zeroizing;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validation failures for a password request, one variant per
/// user-facing message. Checked in declaration order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Please provide a password length")]
    EmptyLength,

    #[error("The password length must be a positive number")]
    InvalidLength,

    #[error("The password must be at least {min} characters long")]
    BelowMinimum { min: usize },

    #[error("The password length must be at most {MAX_PASSWORD_LENGTH} characters")]
    AboveMaximum,

    #[error("Please select at least one character class")]
    NoClassSelected,

    #[error("Password length must be at least as many as the selected character classes ({classes})")]
    FewerThanClasses { classes: usize },
}

/// A validated password request. Construction guarantees
/// `length >= max(8, selection.count())`, `length <= 128` and a
/// non-empty selection, so `compose` needs no further checks.
#[derive(Debug, Copy, Clone)]
pub struct PasswordRequest {
    selection: Selection,
    length: usize,
}

impl PasswordRequest {
    pub fn new(selection: Selection, length: usize) -> Result<Self, ComposeError> {
        let min = minimum_length(&selection);
        if length < min {
            return Err(ComposeError::BelowMinimum { min });
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(ComposeError::AboveMaximum);
        }
        if selection.is_empty() {
            return Err(ComposeError::NoClassSelected);
        }
        if length < selection.count() {
            return Err(ComposeError::FewerThanClasses {
                classes: selection.count(),
            });
        }
        Ok(Self { selection, length })
    }

    /// Validates raw user input for the length field. Kept separate from
    /// `new` so blank and non-numeric entries get their own messages.
    pub fn parse(raw_length: &str, selection: Selection) -> Result<Self, ComposeError> {
        let trimmed = raw_length.trim();
        if trimmed.is_empty() {
            return Err(ComposeError::EmptyLength);
        }
        // Digits only; a leading sign is not a valid length.
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ComposeError::InvalidLength);
        }
        let length = match trimmed.parse::<usize>() {
            Ok(0) => return Err(ComposeError::InvalidLength),
            Ok(n) => n,
            // All-digit input that overflows usize is far past the cap.
            Err(_) => return Err(ComposeError::AboveMaximum),
        };
        Self::new(selection, length)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Minimum acceptable length for a selection: 8, or the number of
/// selected classes if that is larger.
pub fn minimum_length(selection: &Selection) -> usize {
    MIN_PASSWORD_LENGTH.max(selection.count())
}

/// Composes one password. Every selected class contributes at least one
/// character; the remainder is drawn uniformly (with replacement) from
/// the combined pool; the final ordering is a uniform permutation so the
/// mandatory characters are not predictably placed up front.
///
/// Pure function of the request and the random source.
pub fn compose<R: Rng>(request: &PasswordRequest, rng: &mut R) -> Zeroizing<String> {
    let mut bytes = Zeroizing::new(Vec::with_capacity(request.length));

    for class in request.selection.classes() {
        // Alphabets are non-empty by construction, choose cannot fail.
        if let Some(&byte) = class.alphabet().choose(rng) {
            bytes.push(byte);
        }
    }

    let pool = request.selection.pool();
    while bytes.len() < request.length {
        if let Some(&byte) = pool.choose(rng) {
            bytes.push(byte);
        }
    }

    bytes.shuffle(rng);

    Zeroizing::new(bytes.iter().map(|&b| b as char).collect())
}
