use super::{Nutrient, NutrientSource, NutritionVector};
use std::{convert::Infallible, fmt, str::FromStr};

/// The identity of a catalog item: either a numeric primary key or a textual external id
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ItemId {
    /// A numeric key
    Numeric(u64),
    /// A textual key
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => id.fmt(f),
            Self::Text(id) => id.fmt(f),
        }
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl FromStr for ItemId {
    type Err = Infallible;

    /// Anything that reads as an unsigned integer is a numeric key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>().map_or_else(|_| Self::from(s), Self::Numeric))
    }
}

closed_enum! {
    /// The food category of a catalog item; each plate section is filled from one category
    Category("category") {
        /// Vegetables
        Vegetable => "vegetable",
        /// Proteins
        Protein => "protein",
        /// Grains and starches
        Grain => "grain",
    }
}

/// How a catalog item is portioned.
///
/// At the catalog boundary this is encoded by the sign of a single "portion volume"
/// number; internally it is always one of these two shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Serving {
    /// Served by volume (e.g. milliliters); `portion_volume` is the volume of one portion
    Continuous {
        /// The volume whose nutrition the catalog row describes
        portion_volume: f64,
    },
    /// Served in whole pieces
    Discrete {
        /// The magnitude of one serving unit
        piece_volume: f64,
        /// The most pieces that fit in a whole container
        max_pieces: u32,
    },
}

impl Serving {
    /// Decode the catalog sign convention: positive is continuous, negative is discrete
    pub fn from_raw(portion_volume: f64, max_pieces: u32) -> Result<Self, MealItemError> {
        if !portion_volume.is_finite() || portion_volume == 0.0 {
            Err(MealItemError::PortionVolume(portion_volume))
        } else if portion_volume > 0.0 {
            Ok(Self::Continuous { portion_volume })
        } else if max_pieces == 0 {
            Err(MealItemError::NoPieces)
        } else {
            Ok(Self::Discrete {
                piece_volume: -portion_volume,
                max_pieces,
            })
        }
    }

    /// Re-encode into the catalog sign convention
    pub fn raw(&self) -> f64 {
        match self {
            Self::Continuous { portion_volume } => *portion_volume,
            Self::Discrete { piece_volume, .. } => -piece_volume,
        }
    }

    /// The magnitude of one serving unit, regardless of shape
    pub fn unit(&self) -> f64 {
        match self {
            Self::Continuous { portion_volume } => *portion_volume,
            Self::Discrete { piece_volume, .. } => *piece_volume,
        }
    }

    /// Whether the item is counted in whole pieces
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete { .. })
    }
}

/// A catalog entry: an item, its category, how it is served, and the nutrition of one portion
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MealItemDto", into = "MealItemDto")
)]
pub struct MealItemSpec {
    /// The item identity
    pub id: ItemId,
    /// The category this item is drawn from
    pub category: Category,
    /// How the item is portioned
    pub serving: Serving,
    /// Nutrition of one portion (one `serving.unit()`)
    pub nutrition: NutritionVector,
}

impl MealItemSpec {
    /// Create a catalog item from its raw, sign-encoded portion volume
    pub fn new(
        id: impl Into<ItemId>,
        category: Category,
        portion_volume: f64,
        max_pieces: u32,
        nutrition: NutritionVector,
    ) -> Result<Self, MealItemError> {
        Ok(Self {
            id: id.into(),
            category,
            serving: Serving::from_raw(portion_volume, max_pieces)?,
            nutrition,
        })
    }
}

impl NutrientSource for MealItemSpec {
    fn nutrient(&self, nutrient: Nutrient) -> f64 {
        self.nutrition.get(nutrient)
    }
}

/// The flat catalog record, validated on its way into a [`MealItemSpec`]
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MealItemDto {
    /// The item identity
    pub id: ItemId,
    /// The item category
    pub category: Category,
    /// Positive for continuous items, negative for discrete items
    pub portion_volume: f64,
    /// The piece limit of a discrete item (ignored for continuous items)
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_pieces: u32,
    /// The per-portion nutrient fields
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub nutrition: NutritionVector,
}

impl TryFrom<MealItemDto> for MealItemSpec {
    type Error = MealItemError;

    fn try_from(value: MealItemDto) -> Result<Self, Self::Error> {
        let MealItemDto {
            id,
            category,
            portion_volume,
            max_pieces,
            nutrition,
        } = value;
        Self::new(id, category, portion_volume, max_pieces, nutrition)
    }
}

impl From<MealItemSpec> for MealItemDto {
    fn from(value: MealItemSpec) -> Self {
        let max_pieces = match value.serving {
            Serving::Discrete { max_pieces, .. } => max_pieces,
            Serving::Continuous { .. } => 0,
        };
        Self {
            id: value.id,
            category: value.category,
            portion_volume: value.serving.raw(),
            max_pieces,
            nutrition: value.nutrition,
        }
    }
}

/// Errors that can occur when validating a catalog record
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MealItemError {
    /// The portion volume was zero, infinite, or NaN
    #[error("portion volume must be nonzero and finite, got {0}")]
    PortionVolume(f64),
    /// A discrete item must fit at least one piece in a container
    #[error("discrete items must allow at least one piece")]
    NoPieces,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_encodes_shape() {
        assert_eq!(
            Serving::from_raw(150.0, 0),
            Ok(Serving::Continuous {
                portion_volume: 150.0
            })
        );
        assert_eq!(
            Serving::from_raw(-2.0, 6),
            Ok(Serving::Discrete {
                piece_volume: 2.0,
                max_pieces: 6
            })
        );
        assert_eq!(Serving::from_raw(-2.0, 6).unwrap().raw(), -2.0);
    }

    #[test]
    fn test_invalid_volumes() {
        assert_eq!(
            Serving::from_raw(0.0, 3),
            Err(MealItemError::PortionVolume(0.0))
        );
        assert!(Serving::from_raw(f64::NAN, 3).is_err());
        assert_eq!(Serving::from_raw(-1.0, 0), Err(MealItemError::NoPieces));
    }

    #[test]
    fn test_item_ids() {
        assert_eq!("42".parse::<ItemId>(), Ok(ItemId::Numeric(42)));
        assert_eq!("R-42".parse::<ItemId>(), Ok(ItemId::from("R-42")));
        assert_eq!(ItemId::from(7).to_string(), "7");
    }

    #[test]
    fn test_structural_conversion() {
        let nutrition = NutritionVector::default().with(Nutrient::Fiber, 4.0);
        let item = MealItemSpec::new(1, Category::Grain, 100.0, 0, nutrition).unwrap();
        assert_eq!(NutritionVector::from_source(&item), nutrition);
    }
}
