//! Templated-name formatting.
//!
//! A naming pattern contains exactly one `{0}` placeholder. Formatting an
//! identifier substitutes it for the placeholder, except that a prefix or
//! suffix the identifier already carries is not repeated. Formatting is
//! therefore idempotent:
//!
//! ```
//! use declgen::naming::NamePattern;
//!
//! let pattern = NamePattern::parse("{0}Async")?;
//! assert_eq!(pattern.format("Get"), "GetAsync");
//! assert_eq!(pattern.format("GetAsync"), "GetAsync");
//! # Ok::<_, std::sync::Arc<declgen::GenError>>(())
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{GenError, GenResult};

/// Placeholder token replaced by the original identifier.
pub const PLACEHOLDER: &str = "{0}";

/// Parsed naming pattern split around its placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamePattern {
    prefix: String,
    suffix: String,
}

impl NamePattern {
    /// Parse `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidNamePattern`] unless the pattern contains
    /// the placeholder exactly once. Malformed patterns are build
    /// configuration defects and abort the pass.
    pub fn parse(pattern: &str) -> GenResult<Self> {
        let found = pattern.matches(PLACEHOLDER).count();
        let split = if found == 1 {
            pattern.split_once(PLACEHOLDER)
        } else {
            None
        };
        let Some((prefix, suffix)) = split else {
            return Err(Arc::new(GenError::InvalidNamePattern {
                pattern: pattern.to_owned(),
                found,
            }));
        };
        Ok(Self {
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
        })
    }

    /// Text before the placeholder.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text after the placeholder.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Apply the pattern to `original` without duplicating an existing
    /// prefix or suffix.
    #[must_use]
    pub fn format(&self, original: &str) -> String {
        let prefix = if original.starts_with(&self.prefix) {
            ""
        } else {
            &self.prefix
        };
        let suffix = if original.ends_with(&self.suffix) {
            ""
        } else {
            &self.suffix
        };
        format!("{prefix}{original}{suffix}")
    }
}

impl FromStr for NamePattern {
    type Err = Arc<GenError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PLACEHOLDER}{}", self.prefix, self.suffix)
    }
}
