//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog record persisted in the `books` table.
//! - Own the field-level validation rules every write path depends on.
//!
//! # Invariants
//! - `isbn` is the natural key: exactly 13 ASCII digits, never trimmed.
//! - Text fields are required (not blank) and bounded in Unicode chars.
//! - `validate()` reports the first failing field in declaration order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TITLE_MAX_CHARS: usize = 255;
pub const AUTHOR_MAX_CHARS: usize = 100;
pub const GENRE_MAX_CHARS: usize = 50;
pub const YEAR_PUBLISHED_MIN: i32 = 1700;
pub const YEAR_PUBLISHED_MAX: i32 = 2024;
pub const PRICE_MIN: f64 = 0.01;

static ISBN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{13}$").expect("valid isbn regex"));

/// Field-level reason a [`Book`] cannot be persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum BookValidationError {
    /// Text field is empty or whitespace only.
    MissingField(&'static str),
    /// Text field exceeds its character budget.
    FieldTooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
    /// ISBN is not exactly 13 ASCII digits.
    InvalidIsbn(String),
    YearOutOfRange(i32),
    NonPositivePages(i32),
    /// Price is below the minimum or not a finite number.
    InvalidPrice(f64),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::FieldTooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "{field} must be at most {max_chars} characters, got {actual_chars}"
            ),
            Self::InvalidIsbn(value) => {
                write!(f, "isbn `{value}` must be exactly 13 digits")
            }
            Self::YearOutOfRange(year) => write!(
                f,
                "year_published ({year}) must be between {YEAR_PUBLISHED_MIN} and {YEAR_PUBLISHED_MAX}"
            ),
            Self::NonPositivePages(pages) => write!(f, "pages ({pages}) must be positive"),
            Self::InvalidPrice(price) => {
                write!(f, "price ({price}) must be a finite value >= {PRICE_MIN}")
            }
        }
    }
}

impl Error for BookValidationError {}

/// Catalog record keyed by ISBN.
///
/// Fields are public so callers can build and mutate records freely;
/// persistence paths call [`Book::validate`] before touching storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BookRecord")]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Natural key. 13 digits, no separators.
    pub isbn: String,
    pub year_published: i32,
    pub genre: String,
    pub pages: i32,
    pub price: f64,
}

impl Book {
    /// Checks every field rule and returns the first violation.
    ///
    /// # Errors
    /// - Returns [`BookValidationError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_text("title", &self.title, TITLE_MAX_CHARS)?;
        validate_text("author", &self.author, AUTHOR_MAX_CHARS)?;

        if !is_valid_isbn(&self.isbn) {
            return Err(BookValidationError::InvalidIsbn(self.isbn.clone()));
        }

        if !(YEAR_PUBLISHED_MIN..=YEAR_PUBLISHED_MAX).contains(&self.year_published) {
            return Err(BookValidationError::YearOutOfRange(self.year_published));
        }

        validate_text("genre", &self.genre, GENRE_MAX_CHARS)?;

        if self.pages < 1 {
            return Err(BookValidationError::NonPositivePages(self.pages));
        }

        if !self.price.is_finite() || self.price < PRICE_MIN {
            return Err(BookValidationError::InvalidPrice(self.price));
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Returns whether `value` is a 13-digit ISBN with no surrounding whitespace.
pub fn is_valid_isbn(value: &str) -> bool {
    ISBN_RE.is_match(value)
}

fn validate_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), BookValidationError> {
    if value.trim().is_empty() {
        return Err(BookValidationError::MissingField(field));
    }

    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(BookValidationError::FieldTooLong {
            field,
            max_chars,
            actual_chars,
        });
    }

    Ok(())
}

#[derive(Deserialize)]
struct BookRecord {
    title: String,
    author: String,
    isbn: String,
    year_published: i32,
    genre: String,
    pages: i32,
    price: f64,
}

impl TryFrom<BookRecord> for Book {
    type Error = BookValidationError;

    fn try_from(value: BookRecord) -> Result<Self, Self::Error> {
        let book = Self {
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            year_published: value.year_published,
            genre: value.genre,
            pages: value.pages,
            price: value.price,
        };
        book.validate()?;
        Ok(book)
    }
}
