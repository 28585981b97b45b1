//! Diagnostic identifiers, severities and message templates.

use std::fmt;

/// How severe a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The declaration is left out of generation.
    Error,
    /// Generation continues with a downgraded setting.
    Warning,
    /// Advice only.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// Stable diagnostic identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticId {
    /// A part of a union declaration lacks `partial`.
    UnionNotPartial,
    /// A union declares no variants.
    UnionHasNoVariants,
    /// An explicit constructor conflicts with the generated one.
    ConstructorConflict,
    /// Serialization tags were requested but the tag type is unavailable.
    SerializationTagUnavailable,
    /// The match strategy needs a newer language level.
    StrategyUnsupported,
    /// A variant is less accessible than its union.
    VariantNotPublishable,
    /// A variant is not sealed.
    VariantNotSealed,
    /// A by-reference parameter cannot be captured across an await.
    ByReferenceParameter,
    /// Requested accessibility exceeds the member's own.
    AccessibilityExceedsMember,
    /// Two members generate the same wrapper.
    DuplicateMember,
}

impl DiagnosticId {
    /// Every identifier, in code order.
    pub const ALL: [Self; 10] = [
        Self::UnionNotPartial,
        Self::UnionHasNoVariants,
        Self::ConstructorConflict,
        Self::SerializationTagUnavailable,
        Self::StrategyUnsupported,
        Self::VariantNotPublishable,
        Self::VariantNotSealed,
        Self::ByReferenceParameter,
        Self::AccessibilityExceedsMember,
        Self::DuplicateMember,
    ];

    /// `DG` code reported to users.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnionNotPartial => "DG0001",
            Self::UnionHasNoVariants => "DG0002",
            Self::ConstructorConflict => "DG0003",
            Self::SerializationTagUnavailable => "DG0004",
            Self::StrategyUnsupported => "DG0005",
            Self::VariantNotPublishable => "DG0006",
            Self::VariantNotSealed => "DG0007",
            Self::ByReferenceParameter => "DG0101",
            Self::AccessibilityExceedsMember => "DG0102",
            Self::DuplicateMember => "DG0103",
        }
    }

    /// Look an identifier up by its code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.code() == code)
    }

    /// Fixed severity.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::UnionNotPartial | Self::UnionHasNoVariants | Self::ByReferenceParameter => {
                Severity::Error
            }
            Self::ConstructorConflict
            | Self::SerializationTagUnavailable
            | Self::StrategyUnsupported
            | Self::VariantNotPublishable
            | Self::AccessibilityExceedsMember
            | Self::DuplicateMember => Severity::Warning,
            Self::VariantNotSealed => Severity::Info,
        }
    }

    /// Short title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::UnionNotPartial => "Union must be partial",
            Self::UnionHasNoVariants => "Union has no variants",
            Self::ConstructorConflict => "Explicit constructor conflicts with generated constructor",
            Self::SerializationTagUnavailable => "Serialization tag type is unavailable",
            Self::StrategyUnsupported => "Match strategy is not supported",
            Self::VariantNotPublishable => "Variant is less accessible than its union",
            Self::VariantNotSealed => "Variant should be sealed",
            Self::ByReferenceParameter => "By-reference parameter cannot be forwarded",
            Self::AccessibilityExceedsMember => "Requested accessibility exceeds member accessibility",
            Self::DuplicateMember => "Duplicate generated member",
        }
    }

    /// Message template with positional `{n}` placeholders.
    #[must_use]
    pub const fn message_template(self) -> &'static str {
        match self {
            Self::UnionNotPartial => "Union '{0}' must be declared partial in every part",
            Self::UnionHasNoVariants => {
                "Union '{0}' declares no nested variants deriving from it"
            }
            Self::ConstructorConflict => {
                "Union '{0}' declares a constructor; the generated constructor is disabled"
            }
            Self::SerializationTagUnavailable => {
                "Serialization tags for '{0}' need '{1}', which is not referenced; tags are disabled"
            }
            Self::StrategyUnsupported => {
                "Match strategy '{0}' needs language level {1} but the project uses {2}; matching is disabled"
            }
            Self::VariantNotPublishable => "Variant '{0}' is less accessible than union '{1}'",
            Self::VariantNotSealed => "Variant '{0}' should be sealed",
            Self::ByReferenceParameter => {
                "Parameter '{1}' of '{0}' is passed by reference and cannot be forwarded"
            }
            Self::AccessibilityExceedsMember => {
                "Accessibility '{1}' requested for '{0}' exceeds the member's accessibility; using '{2}'"
            }
            Self::DuplicateMember => {
                "'{0}' generates member '{1}' which is already generated in '{2}'"
            }
        }
    }
}

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
