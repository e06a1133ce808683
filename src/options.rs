//! Separator configuration for the string grammars.
//!
//! A dict grammar declares which characters delimit its parts:
//!
//! - **dict**: between the segments of a dict or dependency string (`;`)
//! - **key_value**: between a key and its value inside one segment (`:`)
//!
//! The list separator ([`LIST`], `,`) and the escape character ([`ESCAPE`], a
//! backslash) are fixed, since a dict value may sit inside any list.
//!
//! ## Examples
//!
//! ```rust
//! use easyconfig_convert::Separators;
//!
//! let pipes = Separators::new().with_dict('|').with_key_value('=');
//! assert_eq!(pipes.dict, '|');
//! assert!(pipes.is_special(','));
//! ```

/// Escape character shared by every grammar.
pub const ESCAPE: char = '\\';

/// Separator between the elements of a [`ListOfStrings`](crate::ListOfStrings).
pub const LIST: char = ',';

/// The characters a grammar splits on.
///
/// # Examples
///
/// ```rust
/// use easyconfig_convert::Separators;
///
/// let seps = Separators::default();
/// assert_eq!(seps.dict, ';');
/// assert_eq!(seps.key_value, ':');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Separators {
    pub dict: char,
    pub key_value: char,
}

impl Separators {
    /// Default separators used by every built-in type.
    pub const DEFAULT: Separators = Separators {
        dict: ';',
        key_value: ':',
    };

    /// Creates the default separators (`;` `:`).
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the dict segment separator.
    #[must_use]
    pub const fn with_dict(mut self, sep: char) -> Self {
        self.dict = sep;
        self
    }

    /// Sets the key/value separator.
    #[must_use]
    pub const fn with_key_value(mut self, sep: char) -> Self {
        self.key_value = sep;
        self
    }

    /// Returns `true` if `ch` has to be escaped inside a leaf value.
    #[inline]
    #[must_use]
    pub fn is_special(&self, ch: char) -> bool {
        ch == ESCAPE || ch == LIST || ch == self.dict || ch == self.key_value
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::DEFAULT
    }
}
