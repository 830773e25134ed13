use crate::AnnealingSettings;
use plate_core::models::{ConfigurationError, NutrientWeights, PlateSection};

/// Container volumes of the plate sections, in milliliters
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PlateLayoutDto", into = "PlateLayoutDto")
)]
pub struct PlateLayout {
    large: f64,
    small: f64,
}

impl PlateLayout {
    /// A layout with the given container volumes. A large volume of zero
    /// describes a plate without a large section.
    pub fn new(large: f64, small: f64) -> Result<Self, ConfigurationError> {
        for volume in [large, small] {
            if !(volume.is_finite() && volume >= 0.0) {
                return Err(ConfigurationError::ContainerVolume(volume));
            }
        }
        Ok(Self { large, small })
    }

    /// The large container volume
    pub fn large(&self) -> f64 {
        self.large
    }

    /// The volume of each small container
    pub fn small(&self) -> f64 {
        self.small
    }

    /// Whether the plate has a usable large section
    pub fn has_large_section(&self) -> bool {
        self.large > 0.0
    }

    /// The container volume backing a section
    pub fn container_volume(&self, section: PlateSection) -> f64 {
        match section {
            PlateSection::Large => self.large,
            PlateSection::Small1 | PlateSection::Small2 => self.small,
        }
    }
}

impl Default for PlateLayout {
    fn default() -> Self {
        Self {
            large: 610.0,
            small: 270.0,
        }
    }
}

/// The external representation of [`PlateLayout`]
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlateLayoutDto {
    /// The large container volume
    pub large: f64,
    /// The volume of each small container
    pub small: f64,
}

impl Default for PlateLayoutDto {
    fn default() -> Self {
        PlateLayout::default().into()
    }
}

impl TryFrom<PlateLayoutDto> for PlateLayout {
    type Error = ConfigurationError;

    fn try_from(value: PlateLayoutDto) -> Result<Self, Self::Error> {
        Self::new(value.large, value.small)
    }
}

impl From<PlateLayout> for PlateLayoutDto {
    fn from(value: PlateLayout) -> Self {
        Self {
            large: value.large,
            small: value.small,
        }
    }
}

/// Everything that tunes the optimizer and the selector
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SolverParams {
    /// Per-nutrient cost coefficients
    pub weights: NutrientWeights,
    /// The cooling schedule and seed
    pub annealing: AnnealingSettings,
    /// Container volumes
    pub layout: PlateLayout,
    /// How many items the selector picks per section
    pub choose_count: usize,
}

impl SolverParams {
    /// Check the constraints the component types cannot enforce on their own
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.choose_count == 0 {
            return Err(ConfigurationError::SubsetSize);
        }
        Ok(())
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            weights: NutrientWeights::default(),
            annealing: AnnealingSettings::default(),
            layout: PlateLayout::default(),
            choose_count: 3,
        }
    }
}
