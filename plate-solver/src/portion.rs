use plate_core::models::{ItemId, MealItemSpec, NutritionVector, PlateSection, Serving};
use std::num::NonZeroU32;

/// The serving size of a portion: a volume for continuous items, a piece count for discrete ones
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Volume {
    /// A volume, in the same unit as the item's portion volume
    Continuous(f64),
    /// A whole number of pieces
    Discrete(u32),
}

impl Volume {
    /// The magnitude of the volume
    pub fn value(self) -> f64 {
        match self {
            Self::Continuous(volume) => volume,
            Self::Discrete(count) => f64::from(count),
        }
    }

    /// Re-encode into the catalog sign convention, where piece counts are negative
    pub fn raw(self) -> f64 {
        match self {
            Self::Continuous(volume) => volume,
            Self::Discrete(count) => -f64::from(count),
        }
    }
}

// The adjustable part of a portion. Bounds are fixed at construction.
#[derive(Clone, Debug, PartialEq)]
enum Shape {
    Continuous { max: f64, volume: f64 },
    Discrete { max: u32, count: u32 },
}

/// A catalog item placed into a plate section, with an adjustable serving size.
///
/// The serving size always lies in `[min_volume, max_volume]`. Cloning produces
/// a fully independent copy.
#[derive(Clone, Debug, PartialEq)]
pub struct PortionModel {
    id: ItemId,
    section: PlateSection,
    nutrition: NutritionVector,
    unit: f64,
    shape: Shape,
}

impl PortionModel {
    /// Place `item` into `section` of a container holding `container_volume`,
    /// shared evenly among `sections` items.
    ///
    /// Continuous items may fill up to their share of the container; discrete
    /// items may use up to their share of the piece limit, rounded up. The
    /// portion starts at its minimum volume.
    pub fn from_item(
        item: &MealItemSpec,
        container_volume: f64,
        sections: NonZeroU32,
        section: PlateSection,
    ) -> Self {
        let sections = sections.get();
        let shape = match item.serving {
            Serving::Continuous { .. } => {
                let max = container_volume / f64::from(sections);
                Shape::Continuous {
                    max,
                    volume: continuous_min(max),
                }
            }
            Serving::Discrete { max_pieces, .. } => {
                let max = max_pieces.div_ceil(sections);
                Shape::Discrete {
                    max,
                    count: discrete_min(max),
                }
            }
        };
        Self {
            id: item.id.clone(),
            section,
            nutrition: item.nutrition,
            unit: item.serving.unit(),
            shape,
        }
    }

    /// The id of the underlying catalog item
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// The plate section this portion fills
    pub fn section(&self) -> PlateSection {
        self.section
    }

    /// Nutrition of one serving unit
    pub fn nutrition(&self) -> &NutritionVector {
        &self.nutrition
    }

    /// The magnitude of one serving unit
    pub fn unit(&self) -> f64 {
        self.unit
    }

    /// Whether the portion is counted in whole pieces
    pub fn is_discrete(&self) -> bool {
        matches!(self.shape, Shape::Discrete { .. })
    }

    /// The current serving size
    pub fn volume(&self) -> Volume {
        match self.shape {
            Shape::Continuous { volume, .. } => Volume::Continuous(volume),
            Shape::Discrete { count, .. } => Volume::Discrete(count),
        }
    }

    /// Half of the maximum (rounded up, and at least one piece, for discrete items)
    pub fn min_volume(&self) -> Volume {
        match self.shape {
            Shape::Continuous { max, .. } => Volume::Continuous(continuous_min(max)),
            Shape::Discrete { max, .. } => Volume::Discrete(discrete_min(max)),
        }
    }

    /// Three quarters of the maximum (rounded up for discrete items)
    pub fn mid_volume(&self) -> Volume {
        match self.shape {
            Shape::Continuous { max, .. } => Volume::Continuous(0.75 * max),
            Shape::Discrete { max, .. } => Volume::Discrete((3 * max).div_ceil(4)),
        }
    }

    /// The largest serving that fits the section
    pub fn max_volume(&self) -> Volume {
        match self.shape {
            Shape::Continuous { max, .. } => Volume::Continuous(max),
            Shape::Discrete { max, .. } => Volume::Discrete(max),
        }
    }

    /// The item's nutrition, scaled to the current serving size
    pub fn scaled_nutrition(&self) -> NutritionVector {
        self.nutrition.scale(self.volume().value() / self.unit)
    }

    /// Move the serving size by `ratio` of the maximum, clamped into bounds.
    ///
    /// Positive ratios grow the portion and negative ratios shrink it. Discrete
    /// portions move by whole pieces, rounding the step away from zero. Returns
    /// the serving size before the move, suitable for [`PortionModel::restore`].
    pub fn nudge(&mut self, ratio: f64) -> Volume {
        let previous = self.volume();
        self.shape = match self.shape {
            Shape::Continuous { max, volume } => Shape::Continuous {
                max,
                volume: clamp(volume + ratio * max, continuous_min(max), max),
            },
            Shape::Discrete { max, count } => {
                let step = (ratio.abs() * f64::from(max)).ceil() as i64;
                let step = if ratio < 0.0 { -step } else { step };
                let count = clamp(
                    i64::from(count) + step,
                    i64::from(discrete_min(max)),
                    i64::from(max),
                );
                Shape::Discrete {
                    max,
                    count: u32::try_from(count).unwrap_or(max),
                }
            }
        };
        previous
    }

    /// Set the serving size back to one previously returned by [`PortionModel::nudge`]
    pub fn restore(&mut self, volume: Volume) {
        self.shape = match self.shape {
            Shape::Continuous { max, .. } => Shape::Continuous {
                max,
                volume: volume.value(),
            },
            Shape::Discrete { max, .. } => Shape::Discrete {
                max,
                count: match volume {
                    Volume::Discrete(count) => count,
                    Volume::Continuous(value) => value.round() as u32,
                },
            },
        };
    }

    /// A copy pinned at the minimum serving size
    pub fn with_min_volume(&self) -> Self {
        self.pinned(self.min_volume())
    }

    /// A copy pinned at the middle serving size
    pub fn with_mid_volume(&self) -> Self {
        self.pinned(self.mid_volume())
    }

    /// A copy pinned at the maximum serving size
    pub fn with_max_volume(&self) -> Self {
        self.pinned(self.max_volume())
    }

    fn pinned(&self, volume: Volume) -> Self {
        let mut copy = self.clone();
        copy.restore(volume);
        copy
    }
}

fn continuous_min(max: f64) -> f64 {
    max / 2.0
}

fn discrete_min(max: u32) -> u32 {
    max.div_ceil(2).max(1)
}

// Unlike `Ord::clamp`, this never panics when the bounds cross.
fn clamp<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
