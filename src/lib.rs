//! # easyconfig_convert
//!
//! Compact string encodings for structured easyconfig values.
//!
//! Build recipes keep some compound values as short, hand-written strings. This
//! crate parses those strings into typed, validated values and writes them
//! back in a canonical form that parses to an equal value.
//!
//! ## Grammar
//!
//! | Separator | Meaning |
//! |-----------|---------|
//! | `,` | between list elements |
//! | `;` | between the segments of a dict or dependency |
//! | `:` | between a key and its value (first one in a segment) |
//! | `\` | escapes the next character |
//!
//! ## Types
//!
//! - [`Patch`]: `fix.patch;level:1;dest:src`, filename given by position or as `filename:`
//! - [`Patches`]: `a.patch,b.patch;level:1`, applied in order
//! - [`Dependency`]: `>=1.2.3;GCC >=4.6`, version constraint plus optional toolchain constraint
//! - [`ListOfStrings<T>`]: comma-separated list of any [`Convert`] type
//! - [`DictOfStrings<S>`]: `key:value` dict driven by a declarative [`DictSpec`]
//!
//! ## Quick Start
//!
//! ```rust
//! use easyconfig_convert::{parse, to_string, Patch, Patches};
//!
//! let patches: Patches = parse("first.patch,second.patch;level:1;dest:src").unwrap();
//! assert_eq!(patches.as_slice()[0], Patch::new("first.patch"));
//! assert_eq!(
//!     patches.as_slice()[1],
//!     Patch::new("second.patch").with_level(1).with_dest("src")
//! );
//!
//! assert_eq!(to_string(&patches), "first.patch,second.patch;level:1;dest:src");
//! ```
//!
//! ### Inside configuration structs
//!
//! Every convertible type (de)serializes through serde as its string form:
//!
//! ```rust
//! use easyconfig_convert::{Dependency, Patches};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Recipe {
//!     patches: Patches,
//!     dependency: Dependency,
//! }
//!
//! let recipe: Recipe = serde_json::from_str(
//!     r#"{"patches": "a.patch;level:2", "dependency": "1.2.3;GCC"}"#,
//! )
//! .unwrap();
//! assert_eq!(recipe.patches.as_slice()[0].level, Some(2));
//! assert!(recipe.dependency.tc_versop.is_some());
//! ```
//!
//! ## Errors
//!
//! Parsing is all or nothing. Failures are classified by [`ErrorKind`]: parse
//! errors (text does not fit the grammar), validation errors (unknown, duplicate
//! or missing keys, non-integer levels) and type errors (structured input of the
//! wrong shape).
//!
//! ## Logging
//!
//! Parse entry points emit `tracing` events: `trace` with the input, `debug`
//! with the reason of every rejection.

#[macro_use]
mod macros;

pub mod convert;
pub mod dependency;
pub mod dict;
pub mod error;
pub mod list;
pub mod map;
pub mod options;
pub mod patch;
pub mod split;
pub mod value;
pub mod version;

pub use convert::Convert;
pub use dependency::Dependency;
pub use dict::{DictOfStrings, DictSchema, DictSpec, FieldSpec, FieldType};
pub use error::{Error, ErrorKind, Result};
pub use list::{ListElement, ListOfStrings};
pub use map::ConvertMap;
pub use options::Separators;
pub use patch::{Patch, Patches};
pub use value::{Kind, Value};
pub use version::{EasyVersion, Operator, ToolchainVersionOperator, VersionError, VersionOperator};

/// Parses `text` into any convertible type.
///
/// # Examples
///
/// ```rust
/// use easyconfig_convert::{parse, Patch};
///
/// let patch: Patch = parse("fix.patch;level:1").unwrap();
/// assert_eq!(patch.level, Some(1));
/// ```
///
/// # Errors
///
/// Returns an error if `text` does not match the grammar of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse<T: Convert>(text: &str) -> Result<T> {
    T::parse(text)
}

/// Returns the canonical string form of `value`.
#[must_use]
pub fn to_string<T: Convert>(value: &T) -> String {
    value.serialize()
}

/// Returns the structured form of `value`.
///
/// # Examples
///
/// ```rust
/// use easyconfig_convert::{to_value, Kind, Patch};
///
/// let value = to_value(&Patch::new("fix.patch"));
/// assert_eq!(value.kind(), Kind::Mapping);
/// ```
#[must_use]
pub fn to_value<T: Convert>(value: &T) -> Value {
    value.to_value()
}

/// Builds a convertible type from a structured value.
///
/// # Errors
///
/// Returns a type error if `value` has the wrong shape for `T`, or a
/// validation error if its contents are invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T: Convert>(value: Value) -> Result<T> {
    T::from_value(value)
}
