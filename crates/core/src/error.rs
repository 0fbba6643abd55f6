//! Error types for the lease calculators
//!
//! Two recoverable failure modes exist in this core:
//! - `Validation`: a caller supplied a nonsensical numeric input
//!   (negative rent, deposit or cost). The calculators reject these
//!   explicitly instead of propagating negative results.
//! - `DateParse`: a malformed notice date. The message echoes the
//!   offending input and the expected format so the calling layer can
//!   surface it directly to the end user.

use thiserror::Error;

/// Expected calendar date format for move-out calculations.
pub const DATE_FORMAT: &str = "YYYY-MM-DD";

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Invalid numeric input (negative amount, etc.)
    #[error("invalid value for {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Malformed date string. Recoverable; surfaced to the end user.
    #[error("could not parse date '{input}': expected format {format}")]
    DateParse { input: String, format: &'static str },

    /// The computed date falls outside the supported calendar range.
    /// Recoverable; surfaced to the end user like a parse failure.
    #[error("move-out date out of range: {notice_days} days from {input} exceeds the supported calendar")]
    DateOutOfRange { input: String, notice_days: u32 },
}

impl Error {
    /// Build a validation error for a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Build a date parse error echoing the offending input.
    pub fn date_parse(input: impl Into<String>) -> Self {
        Self::DateParse {
            input: input.into(),
            format: DATE_FORMAT,
        }
    }

    /// Build an out-of-range error for an overflowing date offset.
    pub fn date_out_of_range(input: impl Into<String>, notice_days: u32) -> Self {
        Self::DateOutOfRange {
            input: input.into(),
            notice_days,
        }
    }

    /// Whether the error should be shown to the end user as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::DateParse { .. } | Self::DateOutOfRange { .. })
    }

    /// Stable error code for structured results.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::DateParse { .. } => "date_parse",
            Self::DateOutOfRange { .. } => "date_out_of_range",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
