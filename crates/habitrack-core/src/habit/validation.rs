//! Title validation for the create and edit forms.
//!
//! This is the only gate in front of [`HabitStore::create`] and
//! [`HabitStore::edit`]; the store runs it before touching the collection.
//!
//! [`HabitStore::create`]: super::HabitStore::create
//! [`HabitStore::edit`]: super::HabitStore::edit

use crate::error::ValidationError;

/// Form field name carried by title errors.
pub const TITLE_FIELD: &str = "title";

/// Longest accepted title, in characters, unless configured otherwise.
pub const DEFAULT_MAX_TITLE_LEN: usize = 120;

/// Validate a raw title with the default rules.
///
/// Returns the trimmed title.
///
/// # Errors
/// [`ValidationError::EmptyTitle`] when nothing is left after trimming,
/// [`ValidationError::TitleTooLong`] past [`DEFAULT_MAX_TITLE_LEN`].
pub fn validate_title(raw: &str) -> Result<String, ValidationError> {
    TitleValidator::default().validate(raw)
}

/// Title rules with a configurable length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleValidator {
    max_len: usize,
}

impl TitleValidator {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        let title = raw.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle { field: TITLE_FIELD });
        }
        let len = title.chars().count();
        if len > self.max_len {
            return Err(ValidationError::TitleTooLong {
                field: TITLE_FIELD,
                max: self.max_len,
                len,
            });
        }
        Ok(title.to_string())
    }
}

impl Default for TitleValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TITLE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_title("  Read a book \n").unwrap(), "Read a book");
    }

    #[test]
    fn rejects_empty_and_blank() {
        for raw in ["", " ", "\t\n  "] {
            assert_eq!(
                validate_title(raw),
                Err(ValidationError::EmptyTitle { field: "title" })
            );
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        let validator = TitleValidator::new(5);
        assert_eq!(validator.validate("Чтение").unwrap_err(), ValidationError::TitleTooLong {
            field: "title",
            max: 5,
            len: 6,
        });
        assert_eq!(validator.validate("Спать").unwrap(), "Спать");
    }

    #[test]
    fn length_limit_applies_after_trimming() {
        let validator = TitleValidator::new(4);
        assert_eq!(validator.validate("  Walk  ").unwrap(), "Walk");
    }
}
