//! Error types for string conversion.
//!
//! Every failure is reported at the point of detection; there are no partial
//! results. Errors fall into three categories, see [`ErrorKind`]:
//!
//! - **Parse**: the text does not match the grammar (missing `:`, empty segment,
//!   dangling escape, wrong number of dependency segments)
//! - **Validation**: the text is well formed but semantically invalid (unknown
//!   key, duplicate key, missing required key, non-integer level)
//! - **Type**: a structured [`Value`](crate::Value) of the wrong shape was handed
//!   to [`Convert::from_value`](crate::Convert::from_value)
//!
//! ## Examples
//!
//! ```rust
//! use easyconfig_convert::{Convert, ErrorKind, Patch};
//!
//! let err = Patch::parse("fix.patch;bogus:1").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert!(err.to_string().contains("bogus"));
//! ```

use crate::value::Kind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while parsing, validating or
/// rebuilding a convertible value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Text does not decompose per the grammar
    #[error("Syntax error in {input:?}: {msg}")]
    Syntax { input: String, msg: String },

    /// Wrong number of separated segments
    #[error("{input:?} has {found} segment(s) separated by {separator:?}, expected at least {min} and at most {max}")]
    SegmentCount {
        input: String,
        separator: char,
        min: usize,
        max: usize,
        found: usize,
    },

    /// A version constraint could not be parsed by its parser
    #[error("Invalid version constraint {input:?}: {msg}")]
    Version { input: String, msg: String },

    /// Key outside the allowed-key set
    #[error("Unsupported key {key:?} in {input:?} (allowed: {allowed})")]
    UnknownKey {
        key: String,
        input: String,
        allowed: String,
    },

    /// Key supplied more than once (positionally and/or explicitly)
    #[error("Key {key:?} given more than once in {input:?}")]
    DuplicateKey { key: String, input: String },

    /// A required key is absent
    #[error("Missing required key {key:?} in {input:?}")]
    MissingKey { key: String, input: String },

    /// An integer field holds something else
    #[error("Value {value:?} for key {key:?} is not an integer")]
    InvalidInteger { key: String, value: String },

    /// A structured value has the wrong container shape
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    Validation,
    Type,
}

impl Error {
    /// Creates a syntax error for `input`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easyconfig_convert::{Error, ErrorKind};
    ///
    /// let err = Error::syntax("a;;b", "empty segment");
    /// assert_eq!(err.kind(), ErrorKind::Parse);
    /// assert!(err.to_string().contains("empty segment"));
    /// ```
    pub fn syntax(input: &str, msg: &str) -> Self {
        Error::Syntax {
            input: input.to_string(),
            msg: msg.to_string(),
        }
    }

    pub fn segment_count(input: &str, separator: char, min: usize, max: usize, found: usize) -> Self {
        Error::SegmentCount {
            input: input.to_string(),
            separator,
            min,
            max,
            found,
        }
    }

    /// Wraps the failure of an external version-constraint parser.
    pub fn version<T: fmt::Display>(input: &str, msg: T) -> Self {
        Error::Version {
            input: input.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unknown-key error, listing the allowed keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easyconfig_convert::Error;
    ///
    /// let err = Error::unknown_key("bogus", "a;bogus:1", &["filename", "level"]);
    /// assert!(err.to_string().contains("filename, level"));
    /// ```
    pub fn unknown_key(key: &str, input: &str, allowed: &[&str]) -> Self {
        Error::UnknownKey {
            key: key.to_string(),
            input: input.to_string(),
            allowed: allowed.join(", "),
        }
    }

    pub fn duplicate_key(key: &str, input: &str) -> Self {
        Error::DuplicateKey {
            key: key.to_string(),
            input: input.to_string(),
        }
    }

    pub fn missing_key(key: &str, input: &str) -> Self {
        Error::MissingKey {
            key: key.to_string(),
            input: input.to_string(),
        }
    }

    pub fn invalid_integer(key: &str, value: &str) -> Self {
        Error::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a type mismatch error for [`Convert::from_value`](crate::Convert::from_value).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easyconfig_convert::{Error, Kind};
    ///
    /// let err = Error::type_mismatch(Kind::Mapping, Kind::Sequence);
    /// assert!(err.to_string().contains("expected mapping"));
    /// ```
    pub fn type_mismatch(expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax { .. }
            | Error::SegmentCount { .. }
            | Error::Version { .. }
            | Error::Custom(_) => ErrorKind::Parse,
            Error::UnknownKey { .. }
            | Error::DuplicateKey { .. }
            | Error::MissingKey { .. }
            | Error::InvalidInteger { .. } => ErrorKind::Validation,
            Error::TypeMismatch { .. } => ErrorKind::Type,
        }
    }

    #[must_use]
    pub fn is_parse(&self) -> bool {
        self.kind() == ErrorKind::Parse
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    #[must_use]
    pub fn is_type(&self) -> bool {
        self.kind() == ErrorKind::Type
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(Error::syntax("x", "bad").is_parse());
        assert!(Error::segment_count("a;b;c", ';', 1, 2, 3).is_parse());
        assert!(Error::version("~1", "unknown operator").is_parse());
        assert!(Error::duplicate_key("filename", "a;filename:b").is_validation());
        assert!(Error::missing_key("filename", "level:1").is_validation());
        assert!(Error::invalid_integer("level", "one").is_validation());
        assert!(Error::type_mismatch(Kind::Mapping, Kind::Scalar).is_type());
    }

    #[test]
    fn test_segment_count_message() {
        let err = Error::segment_count("a;b;c", ';', 1, 2, 3);
        let msg = err.to_string();
        assert!(msg.contains("3 segment(s)"));
        assert!(msg.contains("at most 2"));
    }
}
