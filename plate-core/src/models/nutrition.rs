use super::LookupError;
use std::{iter::Sum, ops};

/// The number of nutrients tracked by a [`NutritionVector`]
pub const NUTRIENT_COUNT: usize = 16;

// Every componentwise operation below is generated from this one field list,
// so adding a nutrient cannot leave an operation behind.
macro_rules! nutrients {
    ($($field:ident => $variant:ident),+ $(,)?) => {
        /// One of the nutrients tracked by a [`NutritionVector`]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Nutrient {
            $(
                #[doc = concat!("The `", stringify!($field), "` field")]
                $variant,
            )+
        }

        impl Nutrient {
            /// Every nutrient, in canonical order
            pub const ALL: [Nutrient; NUTRIENT_COUNT] = [$(Nutrient::$variant),+];

            /// The field name of this nutrient
            pub fn name(self) -> &'static str {
                match self {
                    $(Nutrient::$variant => stringify!($field),)+
                }
            }
        }

        impl std::str::FromStr for Nutrient {
            type Err = LookupError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $(stringify!($field) => Ok(Nutrient::$variant),)+
                    _ => Err(LookupError::new("nutrient", value)),
                }
            }
        }

        /// A quantity for each tracked nutrient.
        ///
        /// This is a plain value type: every operation returns a new vector and
        /// leaves its operands untouched, so copies never alias.
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(default)
        )]
        pub struct NutritionVector {
            $(
                #[allow(missing_docs)]
                pub $field: f64,
            )+
        }

        impl NutritionVector {
            /// Read the quantity of a single nutrient
            pub fn get(&self, nutrient: Nutrient) -> f64 {
                match nutrient {
                    $(Nutrient::$variant => self.$field,)+
                }
            }

            /// Return a copy with a single nutrient replaced
            pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
                match nutrient {
                    $(Nutrient::$variant => self.$field = value,)+
                }
                self
            }

            /// Build a vector by evaluating `f` for every nutrient, in canonical order
            pub fn from_fn(mut f: impl FnMut(Nutrient) -> f64) -> Self {
                Self {
                    $($field: f(Nutrient::$variant),)+
                }
            }

            fn map(&self, f: impl Fn(f64) -> f64) -> Self {
                Self {
                    $($field: f(self.$field),)+
                }
            }

            fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
                Self {
                    $($field: f(self.$field, other.$field),)+
                }
            }
        }
    };
}

nutrients! {
    calories => Calories,
    carbohydrate => Carbohydrate,
    protein => Protein,
    total_fat => TotalFat,
    saturated_fat => SaturatedFat,
    trans_fat => TransFat,
    sugar => Sugar,
    cholesterol => Cholesterol,
    fiber => Fiber,
    sodium => Sodium,
    potassium => Potassium,
    calcium => Calcium,
    iron => Iron,
    vitamin_a => VitaminA,
    vitamin_c => VitaminC,
    vitamin_d => VitaminD,
}

/// Anything that can report a quantity for each nutrient.
///
/// This is how catalog rows, profile-derived targets and ad-hoc maps are
/// converted into a [`NutritionVector`] without caring about their concrete type.
pub trait NutrientSource {
    /// The quantity of `nutrient` carried by this source
    fn nutrient(&self, nutrient: Nutrient) -> f64;
}

impl NutrientSource for NutritionVector {
    fn nutrient(&self, nutrient: Nutrient) -> f64 {
        self.get(nutrient)
    }
}

// Missing keys are read as zero, matching the deserialization default.
impl<S: std::hash::BuildHasher> NutrientSource for indexmap::IndexMap<Nutrient, f64, S> {
    fn nutrient(&self, nutrient: Nutrient) -> f64 {
        self.get(&nutrient).copied().unwrap_or_default()
    }
}

impl NutritionVector {
    /// Structurally convert any [`NutrientSource`] into a vector
    pub fn from_source<T: NutrientSource + ?Sized>(source: &T) -> Self {
        Self::from_fn(|nutrient| source.nutrient(nutrient))
    }

    /// Componentwise sum
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Componentwise difference
    pub fn subtract(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Multiply every component by `c`
    pub fn scale(&self, c: f64) -> Self {
        self.map(|x| x * c)
    }

    /// Divide every component by `c`, failing if `c` is zero
    pub fn divide(&self, c: f64) -> Result<Self, DivisionError> {
        if c == 0.0 {
            Err(DivisionError)
        } else {
            Ok(self.map(|x| x / c))
        }
    }

    /// Iterate over `(nutrient, quantity)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL
            .into_iter()
            .map(|nutrient| (nutrient, self.get(nutrient)))
    }
}

impl ops::Add for NutritionVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl ops::Sub for NutritionVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl ops::Mul<f64> for NutritionVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Sum for NutritionVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a NutritionVector> for NutritionVector {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, x| acc + *x)
    }
}

/// Scalar division of a nutrition vector by zero
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot divide a nutrition vector by zero")]
pub struct DivisionError;
