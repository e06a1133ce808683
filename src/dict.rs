//! The `key:value` dict grammar.
//!
//! A dict string is a list of segments separated by `;`. Each segment is either
//! `key:value` or, for the leading segments only, a bare value assigned by
//! position to the declared keyless keys:
//!
//! ```text
//! fix.patch;level:1;dest:src      # filename given by position
//! filename:fix.patch;level:1      # same value, fully keyed
//! ```
//!
//! The grammar is driven by a declarative [`DictSpec`] table: one [`FieldSpec`]
//! per allowed key, each with a [`FieldType`] that parses, checks and renders its
//! value. [`DictOfStrings`] binds a table (through [`DictSchema`]) to a
//! [`Convert`] type.
//!
//! ## Examples
//!
//! ```rust
//! use easyconfig_convert::{Convert, DictOfStrings, DictSchema, DictSpec, FieldSpec};
//!
//! const MIRROR_FIELDS: &[FieldSpec] = &[
//!     FieldSpec::string("url").keyless().required(),
//!     FieldSpec::integer("priority"),
//! ];
//!
//! struct Mirror;
//!
//! impl DictSchema for Mirror {
//!     const SPEC: DictSpec = DictSpec::new(MIRROR_FIELDS);
//! }
//!
//! let mirror = DictOfStrings::<Mirror>::parse(r"https\://example.org;priority:2").unwrap();
//! assert_eq!(mirror.get_str("url"), Some("https://example.org"));
//! assert_eq!(mirror.get_i64("priority"), Some(2));
//! assert_eq!(mirror.serialize(), r"https\://example.org;priority:2");
//! ```

use crate::split::{escape, split, unescape};
use crate::{Convert, ConvertMap, Error, Kind, ListElement, Result, Separators, Value};
use std::fmt;
use std::marker::PhantomData;

/// How the value of one key is parsed, checked and rendered.
///
/// `parse` receives the unescaped text of the value, `coerce` validates a
/// structured value handed to [`Convert::from_value`], and `render` produces the
/// unescaped text again.
#[derive(Clone, Copy)]
pub struct FieldType {
    pub kind: Kind,
    pub parse: fn(key: &str, text: &str) -> Result<Value>,
    pub coerce: fn(key: &str, value: Value) -> Result<Value>,
    pub render: fn(value: &Value) -> String,
}

impl FieldType {
    /// Free-form string.
    pub const STRING: FieldType = FieldType {
        kind: Kind::Scalar,
        parse: parse_string,
        coerce: coerce_string,
        render: render_plain,
    };

    /// Decimal integer, stored as [`Value::Integer`].
    pub const INTEGER: FieldType = FieldType {
        kind: Kind::Integer,
        parse: parse_integer,
        coerce: coerce_integer,
        render: render_plain,
    };

    /// A nested convertible value, stored as its [`Convert::to_value`].
    #[must_use]
    pub const fn convert<T: Convert>() -> FieldType {
        FieldType {
            kind: T::WRAPS,
            parse: parse_convert::<T>,
            coerce: coerce_convert::<T>,
            render: render_convert::<T>,
        }
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldType").field("kind", &self.kind).finish_non_exhaustive()
    }
}

fn parse_string(_key: &str, text: &str) -> Result<Value> {
    Ok(Value::Scalar(text.to_string()))
}

fn coerce_string(_key: &str, value: Value) -> Result<Value> {
    match value {
        Value::Scalar(_) => Ok(value),
        other => Err(Error::type_mismatch(Kind::Scalar, other.kind())),
    }
}

fn parse_integer(key: &str, text: &str) -> Result<Value> {
    text.parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| Error::invalid_integer(key, text))
}

fn coerce_integer(key: &str, value: Value) -> Result<Value> {
    match value {
        Value::Integer(_) => Ok(value),
        Value::Scalar(text) => parse_integer(key, text.trim()),
        other => Err(Error::type_mismatch(Kind::Integer, other.kind())),
    }
}

fn parse_convert<T: Convert>(_key: &str, text: &str) -> Result<Value> {
    T::parse(text).map(|parsed| parsed.to_value())
}

fn coerce_convert<T: Convert>(_key: &str, value: Value) -> Result<Value> {
    T::from_value(value).map(|checked| checked.to_value())
}

fn render_plain(value: &Value) -> String {
    match value {
        Value::Scalar(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        other => other.to_string(),
    }
}

fn render_convert<T: Convert>(value: &Value) -> String {
    // maps built through DictSpec are always coerced first
    match T::from_value(value.clone()) {
        Ok(converted) => converted.serialize(),
        Err(err) => {
            tracing::debug!(value = %value, error = %err, "rendering unconverted field value");
            render_plain(value)
        }
    }
}

/// One allowed key of a dict grammar.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub keyless: bool,
    pub required: bool,
    pub ty: FieldType,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        FieldSpec {
            name,
            keyless: false,
            required: false,
            ty,
        }
    }

    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldType::STRING)
    }

    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldType::INTEGER)
    }

    /// Allows the value to be given by position, without `key:`.
    #[must_use]
    pub const fn keyless(mut self) -> Self {
        self.keyless = true;
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Declarative description of a dict grammar.
///
/// Keyless keys are assigned positionally in the order they appear in
/// `fields`.
#[derive(Clone, Copy, Debug)]
pub struct DictSpec {
    fields: &'static [FieldSpec],
    separators: Separators,
}

impl DictSpec {
    #[must_use]
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        DictSpec {
            fields,
            separators: Separators::DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    #[must_use]
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    #[must_use]
    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// All allowed keys, in declaration order.
    #[must_use]
    pub fn allowed_keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    /// Keys that may be given by position, in positional order.
    pub fn keyless_keys(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FieldSpec] = self.fields;
        fields
            .iter()
            .filter(|field| field.keyless)
            .map(|field| field.name)
    }

    /// Parses `text` into a validated map.
    ///
    /// # Errors
    ///
    /// - syntax error for an empty segment, a bare value that cannot be placed
    ///   positionally, or a dangling escape
    /// - validation error for an unknown, duplicate or missing key, or a value
    ///   rejected by its field type
    pub fn parse(&self, text: &str) -> Result<ConvertMap> {
        tracing::trace!(input = text, "parsing dict");
        self.parse_segments(text).map_err(|err| {
            tracing::debug!(input = text, error = %err, "dict rejected");
            err
        })
    }

    fn parse_segments(&self, text: &str) -> Result<ConvertMap> {
        let seps = &self.separators;
        let keyless: Vec<&FieldSpec> = self.fields.iter().filter(|f| f.keyless).collect();
        let mut map = ConvertMap::with_capacity(self.fields.len());
        let mut positional = true;

        for (idx, segment) in split(text, seps.dict, None)?.into_iter().enumerate() {
            if segment.is_empty() {
                return Err(Error::syntax(text, "empty segment"));
            }

            let mut parts = split(segment, seps.key_value, Some(1))?.into_iter();
            let first = parts.next().unwrap_or_default();
            let (field, raw) = match parts.next() {
                Some(raw) => {
                    positional = false;
                    let key = unescape(first)?;
                    let field = self
                        .field(&key)
                        .ok_or_else(|| Error::unknown_key(&key, text, &self.allowed_keys()))?;
                    (field, raw)
                }
                None => match keyless.get(idx) {
                    Some(field) if positional => (*field, first),
                    _ => {
                        let msg = format!(
                            "segment {:?} is not of the form key{}value",
                            first, seps.key_value
                        );
                        return Err(Error::syntax(text, &msg));
                    }
                },
            };

            if map.contains_key(field.name) {
                return Err(Error::duplicate_key(field.name, text));
            }
            let value = (field.ty.parse)(field.name, &unescape(raw)?)?;
            map.insert(field.name.to_string(), value);
        }

        self.check_required(&map, text)?;
        Ok(map)
    }

    /// Checks a structured map against the table, coercing each value through
    /// its field type.
    ///
    /// # Errors
    ///
    /// Validation error for unknown or missing keys, type error for values of
    /// the wrong shape, syntax error for an empty map (which has no string
    /// form).
    pub fn validate(&self, map: ConvertMap) -> Result<ConvertMap> {
        let input = Value::Mapping(map.clone()).to_string();
        if map.is_empty() {
            return Err(Error::syntax(&input, "empty dict"));
        }
        let mut checked = ConvertMap::with_capacity(map.len());

        for (key, value) in map {
            let field = self
                .field(&key)
                .ok_or_else(|| Error::unknown_key(&key, &input, &self.allowed_keys()))?;
            checked.insert(key, (field.ty.coerce)(field.name, value)?);
        }

        self.check_required(&checked, &input)?;
        Ok(checked)
    }

    fn check_required(&self, map: &ConvertMap, input: &str) -> Result<()> {
        match self
            .fields
            .iter()
            .find(|field| field.required && !map.contains_key(field.name))
        {
            Some(field) => Err(Error::missing_key(field.name, input)),
            None => Ok(()),
        }
    }

    /// Renders a validated map: keyless entries first, by position while
    /// possible, then every other entry as `key:value` in map order.
    #[must_use]
    pub fn serialize(&self, map: &ConvertMap) -> String {
        let seps = &self.separators;
        let mut segments = Vec::with_capacity(map.len());
        let mut positional = true;

        for field in self.fields.iter().filter(|f| f.keyless) {
            let Some(value) = map.get(field.name) else {
                positional = false;
                continue;
            };
            let rendered = escape(&(field.ty.render)(value), seps);
            if positional && !rendered.is_empty() {
                segments.push(rendered);
            } else {
                positional = false;
                segments.push(format!("{}{}{}", field.name, seps.key_value, rendered));
            }
        }

        for (key, value) in map.iter() {
            let field = self.field(key);
            if field.map_or(false, |f| f.keyless) {
                continue;
            }
            let rendered = match field {
                Some(field) => (field.ty.render)(value),
                None => render_plain(value),
            };
            segments.push(format!(
                "{}{}{}",
                escape(key, seps),
                seps.key_value,
                escape(&rendered, seps)
            ));
        }

        segments.join(&seps.dict.to_string())
    }
}

/// Binds a [`DictSpec`] table to a type.
pub trait DictSchema {
    const SPEC: DictSpec;
}

/// A validated dict value whose grammar is given by the schema `S`.
pub struct DictOfStrings<S: DictSchema> {
    entries: ConvertMap,
    schema: PhantomData<fn() -> S>,
}

impl<S: DictSchema> DictOfStrings<S> {
    /// Returns the raw value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    #[must_use]
    pub fn entries(&self) -> &ConvertMap {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> ConvertMap {
        self.entries
    }
}

impl<S: DictSchema> Convert for DictOfStrings<S> {
    const WRAPS: Kind = Kind::Mapping;

    fn parse(text: &str) -> Result<Self> {
        Ok(DictOfStrings {
            entries: S::SPEC.parse(text)?,
            schema: PhantomData,
        })
    }

    fn serialize(&self) -> String {
        S::SPEC.serialize(&self.entries)
    }

    fn to_value(&self) -> Value {
        Value::Mapping(self.entries.clone())
    }

    fn from_wrapped(value: Value) -> Result<Self> {
        let Value::Mapping(map) = value else {
            return Err(Error::type_mismatch(Kind::Mapping, value.kind()));
        };
        Ok(DictOfStrings {
            entries: S::SPEC.validate(map)?,
            schema: PhantomData,
        })
    }
}

impl<S: DictSchema> ListElement for DictOfStrings<S> {}

impl<S: DictSchema> Clone for DictOfStrings<S> {
    fn clone(&self) -> Self {
        DictOfStrings {
            entries: self.entries.clone(),
            schema: PhantomData,
        }
    }
}

impl<S: DictSchema> PartialEq for DictOfStrings<S> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<S: DictSchema> fmt::Debug for DictOfStrings<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DictOfStrings").field(&self.entries).finish()
    }
}

impl<S: DictSchema> fmt::Display for DictOfStrings<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
