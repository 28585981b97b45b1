//! The layering trait and the helpers that fold layers together.

/// Optional-field record forming one configuration tier.
///
/// `or` must be field-wise "first present wins". That makes it associative,
/// so callers may pre-merge any adjacent run of layers without changing the
/// outcome.
pub trait SettingsLayer: Clone + Default + PartialEq {
    /// Fully resolved form of the record.
    type Resolved;

    /// Keep every field present in `self`, taking the rest from `fallback`.
    #[must_use]
    fn or(self, fallback: Self) -> Self;

    /// Fill every absent field from the built-in defaults.
    fn finish(self) -> Self::Resolved;

    /// Whether no field is present.
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Merge `layers` (most specific first) into a single layer.
#[must_use]
pub fn merge<L, I>(layers: I) -> L
where
    L: SettingsLayer,
    I: IntoIterator<Item = L>,
{
    let mut iter = layers.into_iter();
    let Some(first) = iter.next() else {
        return L::default();
    };
    iter.fold(first, SettingsLayer::or)
}

/// Merge `layers` (most specific first) and fill built-in defaults.
#[must_use]
pub fn resolve<L, I>(layers: I) -> L::Resolved
where
    L: SettingsLayer,
    I: IntoIterator<Item = L>,
{
    merge(layers).finish()
}

/// Declares a settings layer together with its resolved counterpart.
///
/// Every field is written once with its concrete type and built-in default;
/// the layer receives `Option<T>` fields and the resolved record receives
/// `T` fields.
macro_rules! settings_layer {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $resolved:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: Option<$ty>,
            )*
        }

        #[doc = concat!("Fully resolved [`", stringify!($name), "`].")]
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
        pub struct $resolved {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::settings::SettingsLayer for $name {
            type Resolved = $resolved;

            fn or(self, fallback: Self) -> Self {
                Self {
                    $( $field: self.$field.or(fallback.$field), )*
                }
            }

            fn finish(self) -> $resolved {
                $resolved {
                    $( $field: self.$field.unwrap_or_else(|| $default), )*
                }
            }
        }

        impl Default for $resolved {
            fn default() -> Self {
                $crate::settings::SettingsLayer::finish($name::default())
            }
        }
    };
}

pub(crate) use settings_layer;
