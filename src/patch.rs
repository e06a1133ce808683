//! Patch descriptors.
//!
//! A [`Patch`] names a patch file, the strip level to apply it with and an
//! optional destination directory:
//!
//! ```text
//! fix.patch
//! fix.patch;level:1
//! fix.patch;level:1;dest:src/lib
//! filename:fix.patch;level:1
//! ```
//!
//! [`Patches`] is an ordered, comma-separated list of them. Order matters: it is
//! the order in which the patches get applied.
//!
//! ## Examples
//!
//! ```rust
//! use easyconfig_convert::{Convert, Patch, Patches};
//!
//! let patches = Patches::parse("a.patch,b.patch;level:1").unwrap();
//! assert_eq!(patches.len(), 2);
//! assert_eq!(patches.as_slice()[1].level, Some(1));
//! ```

use crate::dict::{DictSchema, DictSpec, FieldSpec};
use crate::{Convert, ConvertMap, Error, Kind, ListElement, ListOfStrings, Result, Value};
use std::fmt;
use std::str::FromStr;

const FILENAME: &str = "filename";
const LEVEL: &str = "level";
const DEST: &str = "dest";

const PATCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FILENAME).keyless().required(),
    FieldSpec::integer(LEVEL),
    FieldSpec::string(DEST),
];

/// One patch application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub filename: String,
    /// Strip level (`patch -p<level>`).
    pub level: Option<i64>,
    pub dest: Option<String>,
}

/// Ordered list of patches.
pub type Patches = ListOfStrings<Patch>;

impl Patch {
    #[must_use]
    pub fn new(filename: impl Into<String>) -> Self {
        Patch {
            filename: filename.into(),
            level: None,
            dest: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    fn to_map(&self) -> ConvertMap {
        let mut map = ConvertMap::with_capacity(3);
        map.insert(FILENAME.to_string(), Value::from(self.filename.as_str()));
        if let Some(level) = self.level {
            map.insert(LEVEL.to_string(), Value::Integer(level));
        }
        if let Some(dest) = &self.dest {
            map.insert(DEST.to_string(), Value::from(dest.as_str()));
        }
        map
    }

    /// Builds a patch from a map already checked against [`Patch::SPEC`].
    fn from_map(mut map: ConvertMap) -> Result<Self> {
        let filename = match map.remove(FILENAME) {
            Some(value) => String::try_from(value)?,
            None => return Err(Error::missing_key(FILENAME, &Value::Mapping(map).to_string())),
        };
        let level = map.remove(LEVEL).map(i64::try_from).transpose()?;
        let dest = map.remove(DEST).map(String::try_from).transpose()?;

        Ok(Patch {
            filename,
            level,
            dest,
        })
    }
}

impl DictSchema for Patch {
    const SPEC: DictSpec = DictSpec::new(PATCH_FIELDS);
}

impl Convert for Patch {
    const WRAPS: Kind = Kind::Mapping;

    fn parse(text: &str) -> Result<Self> {
        Self::from_map(Self::SPEC.parse(text)?)
    }

    fn serialize(&self) -> String {
        Self::SPEC.serialize(&self.to_map())
    }

    fn to_value(&self) -> Value {
        Value::Mapping(self.to_map())
    }

    fn from_wrapped(value: Value) -> Result<Self> {
        let Value::Mapping(map) = value else {
            return Err(Error::type_mismatch(Kind::Mapping, value.kind()));
        };
        Self::from_map(Self::SPEC.validate(map)?)
    }
}

impl ListElement for Patch {}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Patch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

serde_via_str!(Patch);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand() {
        let patch = Patch::parse("foo.patch").unwrap();
        assert_eq!(patch, Patch::new("foo.patch"));
        assert_eq!(patch.serialize(), "foo.patch");
    }

    #[test]
    fn test_all_fields() {
        let patch = Patch::parse("foo.patch;level:1;dest:/some/path").unwrap();
        assert_eq!(
            patch,
            Patch::new("foo.patch").with_level(1).with_dest("/some/path")
        );
        assert_eq!(patch.serialize(), "foo.patch;level:1;dest:/some/path");
    }

    #[test]
    fn test_canonical_order() {
        let patch = Patch::parse("dest:src;level:2;filename:x.patch").unwrap();
        assert_eq!(patch.serialize(), "x.patch;level:2;dest:src");
    }

    #[test]
    fn test_negative_level_is_an_integer() {
        let patch = Patch::parse("x.patch;level:-1").unwrap();
        assert_eq!(patch.level, Some(-1));
    }

    #[test]
    fn test_non_integer_level() {
        let err = Patch::parse("x.patch;level:one").unwrap_err();
        assert!(matches!(err, Error::InvalidInteger { ref key, ref value } if key == "level" && value == "one"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_filename() {
        let err = Patch::parse("level:1").unwrap_err();
        assert!(matches!(err, Error::MissingKey { ref key, .. } if key == "filename"));
    }

    #[test]
    fn test_filename_with_colon() {
        // an unescaped colon turns the segment into key:value
        let err = Patch::parse("http://host/x.patch").unwrap_err();
        assert!(err.is_validation());

        let patch = Patch::new("http://host/x.patch");
        assert_eq!(patch.serialize(), r"http\://host/x.patch");
        assert_eq!(Patch::parse(&patch.serialize()).unwrap(), patch);

        let keyed = Patch::parse("filename:http://host/x.patch").unwrap();
        assert_eq!(keyed, patch);
    }

    #[test]
    fn test_from_value() {
        let mut map = ConvertMap::new();
        map.insert("filename".to_string(), Value::from("a.patch"));
        map.insert("level".to_string(), Value::from(0));
        let patch = Patch::from_value(Value::Mapping(map)).unwrap();
        assert_eq!(patch, Patch::new("a.patch").with_level(0));
        assert_eq!(patch.to_value().kind(), Kind::Mapping);

        let err = Patch::from_value(Value::Sequence(vec![])).unwrap_err();
        assert!(err.is_type());
    }
}
