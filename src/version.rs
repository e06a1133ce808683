//! Version constraints used by [`Dependency`](crate::Dependency).
//!
//! - [`EasyVersion`]: loosely ordered version (`1.2.3`, `2020a`, `4.6-rc1`)
//! - [`VersionOperator`]: comparison operator plus version, e.g. `>=2.3`; a
//!   bare version means `==`
//! - [`ToolchainVersionOperator`]: optional toolchain name plus optional
//!   version operator, e.g. `GCC >=4.6`, `foss`, `>=2020a`
//!
//! ## Examples
//!
//! ```rust
//! use easyconfig_convert::{ToolchainVersionOperator, VersionOperator};
//!
//! let versop: VersionOperator = ">=2.3".parse().unwrap();
//! assert!(versop.test("2.10"));
//! assert!(!versop.test("2.2.9"));
//!
//! let tc: ToolchainVersionOperator = "GCC >= 4.6".parse().unwrap();
//! assert_eq!(tc.to_string(), "GCC >=4.6");
//! assert!(tc.test("GCC", "4.8.2"));
//! assert!(!tc.test("intel", "4.8.2"));
//! ```

use crate::Separators;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure of a version-constraint parser. [`Dependency`](crate::Dependency)
/// reports it as [`Error::Version`](crate::Error::Version) together with the
/// offending text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct VersionError(String);

impl VersionError {
    fn new<T: fmt::Display>(msg: T) -> Self {
        VersionError(msg.to_string())
    }
}

/// Comparison operator of a [`VersionOperator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    #[default]
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Operator {
    // two-character operators first so `>=` is not read as `>`
    const ALL: [Operator; 6] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Ge,
        Operator::Le,
        Operator::Gt,
        Operator::Lt,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }

    /// Whether `ordering` (of the tested version against the constraint's
    /// version) satisfies this operator.
    #[must_use]
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
        }
    }

    fn split_prefix(text: &str) -> (Option<Operator>, &str) {
        Self::ALL
            .iter()
            .find_map(|op| text.strip_prefix(op.as_str()).map(|rest| (Some(*op), rest)))
            .unwrap_or((None, text))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Component {
    Number(u64),
    Word(String),
}

/// A version compared component-wise.
///
/// Runs of digits compare numerically, runs of letters lexically, numbers sort
/// before words, and a version sorts before any longer version it prefixes.
/// Any other character only separates components.
///
/// ```rust
/// use easyconfig_convert::EasyVersion;
///
/// assert!(EasyVersion::new("1.10") > EasyVersion::new("1.9"));
/// assert!(EasyVersion::new("2020b") > EasyVersion::new("2020a"));
/// assert!(EasyVersion::new("1.2") < EasyVersion::new("1.2.1"));
/// ```
#[derive(Debug, Clone)]
pub struct EasyVersion {
    text: String,
    components: Vec<Component>,
}

impl EasyVersion {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut components = Vec::new();
        let mut chars = text.chars().peekable();

        while let Some(&ch) = chars.peek() {
            if ch.is_ascii_digit() {
                let mut digits = String::new();
                while let Some(&d) = chars.peek().filter(|c| c.is_ascii_digit()) {
                    digits.push(d);
                    chars.next();
                }
                components.push(match digits.parse() {
                    Ok(n) => Component::Number(n),
                    Err(_) => Component::Word(digits),
                });
            } else if ch.is_alphabetic() {
                let mut word = String::new();
                while let Some(&c) = chars.peek().filter(|c| c.is_alphabetic()) {
                    word.push(c);
                    chars.next();
                }
                components.push(Component::Word(word));
            } else {
                chars.next();
            }
        }

        EasyVersion {
            text: text.to_string(),
            components,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for EasyVersion {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for EasyVersion {}

impl PartialOrd for EasyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EasyVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}

impl fmt::Display for EasyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A comparison operator applied to a version, e.g. `>=2.3` or `1.2.3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOperator {
    pub operator: Operator,
    pub version: EasyVersion,
}

impl VersionOperator {
    #[must_use]
    pub fn new(operator: Operator, version: &str) -> Self {
        VersionOperator {
            operator,
            version: EasyVersion::new(version),
        }
    }

    /// Returns `true` if `version` satisfies this constraint.
    #[must_use]
    pub fn test(&self, version: &str) -> bool {
        self.operator
            .accepts(EasyVersion::new(version).cmp(&self.version))
    }

    /// String form with the operator always written, `==` included.
    #[must_use]
    pub fn to_explicit_string(&self) -> String {
        format!("{}{}", self.operator, self.version)
    }
}

impl FromStr for VersionOperator {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, VersionError> {
        let text = s.trim();
        let (operator, rest) = Operator::split_prefix(text);
        let version = rest.trim_start();

        if version.is_empty() {
            return Err(VersionError::new("missing version"));
        }
        if let Some(bad) = version
            .chars()
            .find(|ch| ch.is_whitespace() || Separators::DEFAULT.is_special(*ch))
        {
            return Err(VersionError::new(format!("unexpected character {:?} in version", bad)));
        }
        if !version.chars().any(char::is_alphanumeric) {
            return Err(VersionError::new("version has no digits or letters"));
        }
        if Operator::split_prefix(version).0.is_some() || version.starts_with(['=', '!', '<', '>']) {
            return Err(VersionError::new("unknown operator"));
        }

        Ok(VersionOperator::new(operator.unwrap_or_default(), version))
    }
}

impl fmt::Display for VersionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Eq => write!(f, "{}", self.version),
            op => write!(f, "{}{}", op, self.version),
        }
    }
}

/// A toolchain name and/or a version constraint on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainVersionOperator {
    pub toolchain: Option<String>,
    pub versop: Option<VersionOperator>,
}

impl ToolchainVersionOperator {
    /// Returns `true` if the toolchain `name`/`version` satisfies both parts.
    #[must_use]
    pub fn test(&self, name: &str, version: &str) -> bool {
        self.toolchain.as_deref().map_or(true, |tc| tc == name)
            && self.versop.as_ref().map_or(true, |versop| versop.test(version))
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '+')
}

impl FromStr for ToolchainVersionOperator {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, VersionError> {
        let text = s.trim();
        if text.is_empty() {
            return Err(VersionError::new("empty toolchain version operator"));
        }

        let (toolchain, rest) = if text.starts_with(char::is_alphabetic) {
            let end = text.find(|ch: char| !is_name_char(ch)).unwrap_or(text.len());
            (Some(text[..end].to_string()), text[end..].trim_start())
        } else {
            (None, text)
        };

        let versop = if rest.is_empty() {
            None
        } else {
            Some(rest.parse::<VersionOperator>()?)
        };

        Ok(ToolchainVersionOperator { toolchain, versop })
    }
}

impl fmt::Display for ToolchainVersionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.toolchain, &self.versop) {
            (Some(tc), Some(versop)) => write!(f, "{} {}", tc, versop),
            (Some(tc), None) => f.write_str(tc),
            // a bare word would read back as a toolchain name
            (None, Some(versop)) if versop.version.as_str().starts_with(char::is_alphabetic) => {
                f.write_str(&versop.to_explicit_string())
            }
            (None, Some(versop)) => write!(f, "{}", versop),
            (None, None) => Ok(()),
        }
    }
}

serde_via_str!(VersionOperator);
serde_via_str!(ToolchainVersionOperator);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_version_ordering() {
        let ordered = ["1.0", "1.0.1", "1.2", "1.10", "2020a", "2020b", "2021a"];
        for pair in ordered.windows(2) {
            assert!(
                EasyVersion::new(pair[0]) < EasyVersion::new(pair[1]),
                "{} < {}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(EasyVersion::new("1.2.3"), EasyVersion::new("1-2-3"));
    }

    #[test]
    fn test_operator_parsing() {
        let cases = [
            ("1.2.3", Operator::Eq),
            ("==1.2.3", Operator::Eq),
            ("!= 1.2.3", Operator::Ne),
            (">1.2.3", Operator::Gt),
            (">= 1.2.3", Operator::Ge),
            ("<1.2.3", Operator::Lt),
            ("<=1.2.3", Operator::Le),
        ];
        for (text, expected) in cases {
            let versop: VersionOperator = text.parse().unwrap();
            assert_eq!(versop.operator, expected, "{}", text);
            assert_eq!(versop.version.as_str(), "1.2.3");
        }
    }

    #[test]
    fn test_versop_display() {
        let versop: VersionOperator = "== 1.2.3".parse().unwrap();
        assert_eq!(versop.to_string(), "1.2.3");
        assert_eq!(versop.to_explicit_string(), "==1.2.3");

        let versop: VersionOperator = ">= 2020a".parse().unwrap();
        assert_eq!(versop.to_string(), ">=2020a");
    }

    #[test]
    fn test_versop_rejects() {
        for bad in ["", ">=", "1.2 3", "=>1.2", "1;2", "...", ">>1"] {
            let err = bad.parse::<VersionOperator>().unwrap_err();
            assert!(!err.to_string().is_empty(), "{:?}", bad);
        }
    }

    #[test]
    fn test_versop_test() {
        let versop: VersionOperator = "<2.0".parse().unwrap();
        assert!(versop.test("1.9.9"));
        assert!(!versop.test("2.0"));

        let versop: VersionOperator = "!=2020a".parse().unwrap();
        assert!(versop.test("2020b"));
        assert!(!versop.test("2020a"));
    }

    #[test]
    fn test_toolchain_forms() {
        let tc: ToolchainVersionOperator = "GCC>=4.6".parse().unwrap();
        assert_eq!(tc.toolchain.as_deref(), Some("GCC"));
        assert_eq!(tc.versop.as_ref().map(|v| v.operator), Some(Operator::Ge));

        let tc: ToolchainVersionOperator = "foss".parse().unwrap();
        assert_eq!(tc.toolchain.as_deref(), Some("foss"));
        assert!(tc.versop.is_none());

        let tc: ToolchainVersionOperator = ">=2020a".parse().unwrap();
        assert!(tc.toolchain.is_none());
        assert!(tc.test("anything", "2020b"));

        let tc: ToolchainVersionOperator = "intel 2020a".parse().unwrap();
        assert_eq!(tc.to_string(), "intel 2020a");
    }

    #[test]
    fn test_toolchain_versop_word_roundtrip() {
        let tc = ToolchainVersionOperator {
            toolchain: None,
            versop: Some(VersionOperator::new(Operator::Eq, "dummy")),
        };
        assert_eq!(tc.to_string(), "==dummy");
        assert_eq!(tc.to_string().parse::<ToolchainVersionOperator>().unwrap(), tc);
    }

    #[test]
    fn test_toolchain_rejects() {
        assert!("".parse::<ToolchainVersionOperator>().is_err());
        assert!("GCC >=".parse::<ToolchainVersionOperator>().is_err());
        assert!("GCC 4.6 extra".parse::<ToolchainVersionOperator>().is_err());
    }
}
