//! Dependency descriptors.
//!
//! A dependency string holds a version constraint and, optionally, a toolchain
//! constraint, separated by `;`:
//!
//! ```text
//! 1.2.3
//! >=1.2.3;GCC >=4.6
//! ```
//!
//! Both parts are parsed by their own types (`V` and `T`), which only need
//! `FromStr` and `Display`. The defaults are [`VersionOperator`] and
//! [`ToolchainVersionOperator`].
//!
//! ## Examples
//!
//! ```rust
//! use easyconfig_convert::{Convert, Dependency};
//!
//! let dep = <Dependency>::parse("1.2.3;>=2020a").unwrap();
//! assert_eq!(dep.versop.to_string(), "1.2.3");
//! assert!(dep.tc_versop.is_some());
//!
//! assert!(<Dependency>::parse("a;b;c").is_err());
//! ```

use crate::split::{escape, split, unescape};
use crate::{
    Convert, ConvertMap, Error, Kind, ListElement, Result, Separators, ToolchainVersionOperator,
    Value, VersionOperator,
};
use std::fmt;
use std::str::FromStr;

const VERSOP: &str = "versop";
const TC_VERSOP: &str = "tc_versop";

/// A version constraint with an optional toolchain constraint.
///
/// `V` and `T` must display as non-empty text that their `FromStr` accepts
/// again. Values built in code from parts that display as `""` serialize to a
/// string that does not parse back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency<V = VersionOperator, T = ToolchainVersionOperator> {
    pub versop: V,
    pub tc_versop: Option<T>,
}

impl<V, T> Dependency<V, T> {
    #[must_use]
    pub fn new(versop: V) -> Self {
        Dependency {
            versop,
            tc_versop: None,
        }
    }

    #[must_use]
    pub fn with_toolchain(mut self, tc_versop: T) -> Self {
        self.tc_versop = Some(tc_versop);
        self
    }
}

fn parse_text<C>(text: &str) -> Result<C>
where
    C: FromStr,
    C::Err: fmt::Display,
{
    text.parse::<C>().map_err(|err| Error::version(text, err))
}

fn parse_constraint<C>(raw: &str) -> Result<C>
where
    C: FromStr,
    C::Err: fmt::Display,
{
    parse_text(&unescape(raw)?)
}

impl<V, T> Convert for Dependency<V, T>
where
    V: FromStr + fmt::Display,
    V::Err: fmt::Display,
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    const WRAPS: Kind = Kind::Mapping;

    fn parse(text: &str) -> Result<Self> {
        tracing::trace!(input = text, "parsing dependency");
        let sep = Separators::DEFAULT.dict;
        let segments = if text.trim().is_empty() {
            Vec::new()
        } else {
            split(text, sep, None)?
        };

        let (versop, tc_versop) = match segments.as_slice() {
            [versop] => (*versop, None),
            [versop, tc_versop] => (*versop, Some(*tc_versop)),
            _ => {
                tracing::debug!(input = text, segments = segments.len(), "dependency rejected");
                return Err(Error::segment_count(text, sep, 1, 2, segments.len()));
            }
        };
        if versop.is_empty() || tc_versop.map_or(false, str::is_empty) {
            return Err(Error::syntax(text, "empty segment"));
        }

        Ok(Dependency {
            versop: parse_constraint(versop)?,
            tc_versop: tc_versop.map(parse_constraint).transpose()?,
        })
    }

    fn serialize(&self) -> String {
        let seps = Separators::DEFAULT;
        let mut parts = vec![escape(&self.versop.to_string(), &seps)];
        if let Some(tc_versop) = &self.tc_versop {
            parts.push(escape(&tc_versop.to_string(), &seps));
        }
        parts.join(&seps.dict.to_string())
    }

    fn to_value(&self) -> Value {
        let mut map = ConvertMap::with_capacity(2);
        map.insert(VERSOP.to_string(), Value::Scalar(self.versop.to_string()));
        if let Some(tc_versop) = &self.tc_versop {
            map.insert(TC_VERSOP.to_string(), Value::Scalar(tc_versop.to_string()));
        }
        Value::Mapping(map)
    }

    fn from_wrapped(value: Value) -> Result<Self> {
        let Value::Mapping(map) = value else {
            return Err(Error::type_mismatch(Kind::Mapping, value.kind()));
        };
        let input = Value::Mapping(map.clone()).to_string();
        let mut versop = None;
        let mut tc_versop = None;

        for (key, value) in map {
            let text = String::try_from(value)?;
            match key.as_str() {
                VERSOP => versop = Some(parse_text(&text)?),
                TC_VERSOP => tc_versop = Some(parse_text(&text)?),
                other => return Err(Error::unknown_key(other, &input, &[VERSOP, TC_VERSOP])),
            }
        }

        Ok(Dependency {
            versop: versop.ok_or_else(|| Error::missing_key(VERSOP, &input))?,
            tc_versop,
        })
    }
}

impl<V, T> ListElement for Dependency<V, T> where Self: Convert {}

impl<V, T> fmt::Display for Dependency<V, T>
where
    Self: Convert,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Convert::serialize(self))
    }
}

impl<V, T> FromStr for Dependency<V, T>
where
    Self: Convert,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        <Self as Convert>::parse(s)
    }
}

impl<V, T> serde::Serialize for Dependency<V, T>
where
    Self: Convert,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&Convert::serialize(self))
    }
}

impl<'de, V, T> serde::Deserialize<'de> for Dependency<V, T>
where
    Self: Convert,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        <Self as Convert>::parse(&text).map_err(serde::de::Error::custom)
    }
}
