//! Publishable accessibility tiers.

use std::fmt;

use serde::Serialize;

use crate::host::Visibility;

/// Accessibility a generated declaration may carry.
///
/// Ordered so that `Internal < Public`; the minimum of a set of members is
/// therefore the most restrictive tier among them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Accessibility {
    /// Visible within the declaring assembly only.
    Internal,
    /// Visible everywhere.
    #[default]
    Public,
}

impl Accessibility {
    /// Map a host visibility onto a publishable tier.
    ///
    /// Returns `None` for visibilities that cannot be published (private,
    /// protected, private-protected).
    #[must_use]
    pub const fn from_visibility(visibility: Visibility) -> Option<Self> {
        match visibility {
            Visibility::Public => Some(Self::Public),
            Visibility::Internal | Visibility::ProtectedInternal => Some(Self::Internal),
            Visibility::Protected | Visibility::PrivateProtected | Visibility::Private => None,
        }
    }

    /// Parse the named-enum text used in annotations and project settings.
    ///
    /// Matching ignores ASCII case and an optional `Accessibility.` prefix.
    #[must_use]
    pub fn parse_name(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let name = trimmed.rsplit('.').next().unwrap_or(trimmed);
        if name.eq_ignore_ascii_case("public") {
            Some(Self::Public)
        } else if name.eq_ignore_ascii_case("internal") {
            Some(Self::Internal)
        } else {
            None
        }
    }

    /// Source keyword for this tier.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
        }
    }

    /// Minimum tier across `tiers`; an empty iterator yields `Public`.
    #[must_use]
    pub fn minimum<I>(tiers: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        tiers.into_iter().min().unwrap_or(Self::Public)
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
