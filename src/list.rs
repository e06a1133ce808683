//! The comma-separated list grammar.
//!
//! [`ListOfStrings<T>`] splits its input on unescaped `,` and hands each element
//! to `T::parse`. Order is preserved, and the first failing element aborts the
//! whole parse.
//!
//! Elements are joined without another layer of escaping, so only
//! [`ListElement`] types can be listed: lists of lists are rejected at compile
//! time.
//!
//! ```compile_fail
//! use easyconfig_convert::{Convert, ListOfStrings};
//!
//! let nested = ListOfStrings::<ListOfStrings<String>>::parse("a,b");
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use easyconfig_convert::{Convert, ListOfStrings};
//!
//! let names = ListOfStrings::<String>::parse("zlib, bzip2 ,xz").unwrap();
//! assert_eq!(names.as_slice(), ["zlib", "bzip2", "xz"]);
//! assert_eq!(names.serialize(), "zlib,bzip2,xz");
//! ```

use crate::options::LIST;
use crate::split::split;
use crate::{Convert, Error, Kind, Result, Value};
use std::fmt;
use std::str::FromStr;

/// A [`Convert`] type that can be an element of a [`ListOfStrings`].
///
/// Implementors promise that [`Convert::serialize`] never returns an empty
/// string and never contains an unescaped [`LIST`] separator.
pub trait ListElement: Convert {}

impl ListElement for String {}

/// An ordered list of convertible elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOfStrings<T>(Vec<T>);

impl<T> ListOfStrings<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        ListOfStrings(items)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for ListOfStrings<T> {
    fn default() -> Self {
        ListOfStrings(Vec::new())
    }
}

impl<T: ListElement> Convert for ListOfStrings<T> {
    const WRAPS: Kind = Kind::Sequence;

    /// Empty or whitespace-only input is the empty list.
    fn parse(text: &str) -> Result<Self> {
        tracing::trace!(input = text, "parsing list");
        if text.trim().is_empty() {
            return Ok(ListOfStrings(Vec::new()));
        }

        let items = split(text, LIST, None)?
            .into_iter()
            .enumerate()
            .map(|(idx, element)| {
                T::parse(element).map_err(|err| {
                    tracing::debug!(input = text, index = idx, error = %err, "list element rejected");
                    err
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ListOfStrings(items))
    }

    fn serialize(&self) -> String {
        self.0
            .iter()
            .map(Convert::serialize)
            .collect::<Vec<_>>()
            .join(&LIST.to_string())
    }

    fn to_value(&self) -> Value {
        Value::Sequence(self.0.iter().map(Convert::to_value).collect())
    }

    fn from_wrapped(value: Value) -> Result<Self> {
        let Value::Sequence(items) = value else {
            return Err(Error::type_mismatch(Kind::Sequence, value.kind()));
        };
        items
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<_>>>()
            .map(ListOfStrings)
    }
}

impl<T> From<Vec<T>> for ListOfStrings<T> {
    fn from(items: Vec<T>) -> Self {
        ListOfStrings(items)
    }
}

impl<T> FromIterator<T> for ListOfStrings<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ListOfStrings(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for ListOfStrings<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListOfStrings<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: ListElement> fmt::Display for ListOfStrings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<T: ListElement> FromStr for ListOfStrings<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<T: ListElement> serde::Serialize for ListOfStrings<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&Convert::serialize(self))
    }
}

impl<'de, T: ListElement> serde::Deserialize<'de> for ListOfStrings<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
