// The closed string enumerations (sex, goal, category, ...) all share the same
// shape: a fixed set of snake_case labels, strict parsing, and (de)serialization
// through those labels. This macro stamps out that boiler-plate.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(try_from = "String", into = "&'static str")
        )]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every member of the enumeration, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The canonical label of this value
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::LookupError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($label => Ok($name::$variant),)+
                    _ => Err($crate::models::LookupError::new($kind, value)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::models::LookupError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.as_str().fmt(f)
            }
        }
    };
}

mod catalog;
mod item;
mod nutrition;
mod plate;
mod profile;
mod target;
mod weights;

pub use catalog::Catalog;
pub use item::{Category, ItemId, MealItemDto, MealItemError, MealItemSpec, Serving};
pub use nutrition::{DivisionError, NUTRIENT_COUNT, Nutrient, NutrientSource, NutritionVector};
pub use plate::PlateSection;
pub use profile::{ActivityLevel, HealthGoal, Meal, Sex, StudentProfile};
pub use target::TargetRange;
pub use weights::{ConfigurationError, NutrientWeights};

/// A hashmap with deterministic (insertion) ordering.
///
/// Identical inputs must produce identical menus, so iteration order is part of
/// the contract. indexmap::IndexMap gives us that, and the Fx hasher keeps the
/// small keys we use cheap to hash.
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;

/// A value fell outside one of the closed enumerations (sex, activity level, goal, ...)
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind}: {value:?}")]
pub struct LookupError {
    /// The name of the enumeration that was being parsed
    pub kind: &'static str,
    /// The offending input
    pub value: String,
}

impl LookupError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
