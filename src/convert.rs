//! The two-way conversion contract.
//!
//! A type implementing [`Convert`] has a canonical string form and a
//! structured form ([`Value`]). Both directions are validated: [`Convert::parse`]
//! checks the string grammar, [`Convert::from_value`] checks the container
//! shape declared by [`Convert::WRAPS`] before validating the contents.
//!
//! For every valid `x`, `T::parse(&x.serialize())` returns a value equal to `x`.

use crate::split::{escape, unescape};
use crate::{Error, Kind, Result, Separators, Value};

/// Bidirectional string ⇄ structured value conversion.
///
/// # Examples
///
/// ```rust
/// use easyconfig_convert::{Convert, Kind, Patch, Value};
///
/// assert_eq!(Patch::WRAPS, Kind::Mapping);
///
/// let patch = Patch::parse("fix.patch;level:1").unwrap();
/// assert_eq!(patch.serialize(), "fix.patch;level:1");
///
/// // Wrong container shape is a type error
/// let err = Patch::from_value(Value::from("fix.patch")).unwrap_err();
/// assert!(err.is_type());
/// ```
pub trait Convert: Sized {
    /// Container shape of [`Convert::to_value`].
    const WRAPS: Kind;

    /// Parses the canonical (or any equivalent) string form.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error when `text` does not match the grammar.
    fn parse(text: &str) -> Result<Self>;

    /// Produces the canonical string form.
    fn serialize(&self) -> String;

    /// Returns the structured form, whose kind is always [`Convert::WRAPS`].
    fn to_value(&self) -> Value;

    /// Builds `Self` from a value already known to have kind [`Convert::WRAPS`].
    ///
    /// # Errors
    ///
    /// Returns a validation error when the contents are invalid.
    fn from_wrapped(value: Value) -> Result<Self>;

    /// Builds `Self` from a structured value.
    ///
    /// # Errors
    ///
    /// Returns a type error if `value` does not have kind [`Convert::WRAPS`],
    /// otherwise whatever [`Convert::from_wrapped`] returns.
    fn from_value(value: Value) -> Result<Self> {
        if value.kind() != Self::WRAPS {
            tracing::debug!(expected = %Self::WRAPS, found = %value.kind(), "rejecting value of wrong shape");
            return Err(Error::type_mismatch(Self::WRAPS, value.kind()));
        }
        Self::from_wrapped(value)
    }
}

/// A plain, non-empty string. Escapes are resolved on parse and applied on
/// serialization, so any string survives a round trip.
impl Convert for String {
    const WRAPS: Kind = Kind::Scalar;

    fn parse(text: &str) -> Result<Self> {
        let value = unescape(crate::split::trim(text))?;
        if value.is_empty() {
            return Err(Error::syntax(text, "empty value"));
        }
        Ok(value)
    }

    fn serialize(&self) -> String {
        escape(self, &Separators::DEFAULT)
    }

    fn to_value(&self) -> Value {
        Value::Scalar(self.clone())
    }

    fn from_wrapped(value: Value) -> Result<Self> {
        let value = String::try_from(value)?;
        if value.is_empty() {
            return Err(Error::syntax(&value, "empty value"));
        }
        Ok(value)
    }
}
