use crate::PortionModel;
use plate_core::models::{ConfigurationError, NutrientWeights, NutritionVector, TargetRange};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use tracing::{Level, event};

/// Every run starts cooling from this temperature
pub const INITIAL_TEMPERATURE: f64 = 0.5;

// Cost differences are rescaled so the largest plausible one is worth this much
const COST_SCALE: f64 = 60.0;
// Keeps the rescaling finite when every state already meets the target
const COST_EPSILON: f64 = 1e-4;

/// The seed used when none is configured
pub const DEFAULT_SEED: u64 = 20210226;

/// Parameters of the geometric cooling schedule
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "AnnealingSettingsDto", into = "AnnealingSettingsDto")
)]
pub struct AnnealingSettings {
    alpha: f64,
    smallest_temp: f64,
    seed: Option<u64>,
}

impl AnnealingSettings {
    /// Validate and construct the settings. A `seed` of `None` draws fresh entropy for every run.
    pub fn new(
        alpha: f64,
        smallest_temp: f64,
        seed: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigurationError::CoolingFactor(alpha));
        }
        if smallest_temp.is_nan() || smallest_temp <= 0.0 {
            return Err(ConfigurationError::SmallestTemperature(smallest_temp));
        }
        Ok(Self {
            alpha,
            smallest_temp,
            seed,
        })
    }

    /// The factor applied to the temperature after each iteration
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Cooling stops once the temperature drops below this
    pub fn smallest_temp(&self) -> f64 {
        self.smallest_temp
    }

    /// The random seed, if runs are reproducible
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Return a copy with a different seed
    pub fn with_seed(self, seed: Option<u64>) -> Self {
        Self { seed, ..self }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for AnnealingSettings {
    fn default() -> Self {
        Self {
            alpha: 0.99,
            smallest_temp: 0.01,
            seed: Some(DEFAULT_SEED),
        }
    }
}

/// The external representation of [`AnnealingSettings`]; a seed of -1 means unseeded
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AnnealingSettingsDto {
    /// The cooling factor
    pub alpha: f64,
    /// The stopping temperature
    pub smallest_temp: f64,
    /// The random seed, or -1
    pub seed: SeedDto,
}

/// The external representation of a seed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum SeedDto {
    /// A fixed seed
    Fixed(u64),
    /// A negative value, of which only -1 (unseeded) is valid
    Negative(i64),
}

impl SeedDto {
    /// The value standing for an unseeded run
    pub const UNSEEDED: Self = Self::Negative(-1);
}

impl From<Option<u64>> for SeedDto {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::UNSEEDED, Self::Fixed)
    }
}

impl TryFrom<SeedDto> for Option<u64> {
    type Error = ConfigurationError;

    fn try_from(value: SeedDto) -> Result<Self, Self::Error> {
        match value {
            SeedDto::Fixed(seed) => Ok(Some(seed)),
            SeedDto::Negative(-1) => Ok(None),
            SeedDto::Negative(other) => Err(ConfigurationError::Seed(other)),
        }
    }
}

impl Default for AnnealingSettingsDto {
    fn default() -> Self {
        AnnealingSettings::default().into()
    }
}

impl TryFrom<AnnealingSettingsDto> for AnnealingSettings {
    type Error = ConfigurationError;

    fn try_from(value: AnnealingSettingsDto) -> Result<Self, Self::Error> {
        Self::new(value.alpha, value.smallest_temp, value.seed.try_into()?)
    }
}

impl From<AnnealingSettings> for AnnealingSettingsDto {
    fn from(value: AnnealingSettings) -> Self {
        Self {
            alpha: value.alpha,
            smallest_temp: value.smallest_temp,
            seed: value.seed.into(),
        }
    }
}

/// What a completed run reports
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingOutcome {
    /// The cost of the final state
    pub final_cost: f64,
    /// Wall time spent from initialization to completion
    #[cfg_attr(feature = "serde", serde(with = "humantime_serde"))]
    pub elapsed: Duration,
    /// The number of cooling iterations performed
    pub iterations: u64,
}

/// The lifecycle of a [`SimulatedAnnealing`] run
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnnealingStatus {
    /// Constructed, no step taken yet
    Initialized,
    /// Cooling is in progress
    Running,
    /// Cooling has finished
    Done(AnnealingOutcome),
}

/// A simulated annealing search over the serving sizes of a fixed set of portions.
///
/// The run can be driven to completion with [`SimulatedAnnealing::run`] or one
/// iteration at a time with [`SimulatedAnnealing::step`]. Each instance owns
/// its portions and its random generator, so independent instances never
/// interfere with each other.
#[derive(Clone, Debug)]
pub struct SimulatedAnnealing {
    target: TargetRange,
    weights: NutrientWeights,
    alpha: f64,
    smallest_temp: f64,
    rng: ChaCha8Rng,
    state: Vec<PortionModel>,
    temperature: f64,
    scale_cost_by: f64,
    iterations: u64,
    started: Option<Instant>,
    status: AnnealingStatus,
}

impl SimulatedAnnealing {
    /// Prepare a run. The random generator is seeded here, so the sequence of
    /// moves depends only on the settings and the portions.
    pub fn new(
        target: TargetRange,
        weights: NutrientWeights,
        portions: Vec<PortionModel>,
        settings: &AnnealingSettings,
    ) -> Self {
        Self {
            target,
            weights,
            alpha: settings.alpha,
            smallest_temp: settings.smallest_temp,
            rng: settings.rng(),
            state: portions,
            temperature: INITIAL_TEMPERATURE,
            scale_cost_by: 0.0,
            iterations: 0,
            started: None,
            status: AnnealingStatus::Initialized,
        }
    }

    /// The total nutrition of a set of portions at their current sizes
    pub fn nutrition_of(state: &[PortionModel]) -> NutritionVector {
        state.iter().map(PortionModel::scaled_nutrition).sum()
    }

    /// The weighted distance of a set of portions from the target range
    pub fn cost_of(&self, state: &[PortionModel]) -> f64 {
        self.target
            .penalty(&Self::nutrition_of(state), &self.weights)
    }

    /// Every portion at its minimum size
    pub fn lo_state(&self) -> Vec<PortionModel> {
        self.state.iter().map(PortionModel::with_min_volume).collect()
    }

    /// Every portion at its middle size
    pub fn mid_state(&self) -> Vec<PortionModel> {
        self.state.iter().map(PortionModel::with_mid_volume).collect()
    }

    /// Every portion at its maximum size
    pub fn hi_state(&self) -> Vec<PortionModel> {
        self.state.iter().map(PortionModel::with_max_volume).collect()
    }

    /// The portions as they currently stand
    pub fn state(&self) -> &[PortionModel] {
        &self.state
    }

    /// Consume the run, keeping the portions
    pub fn into_state(self) -> Vec<PortionModel> {
        self.state
    }

    /// The current temperature
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Where the run is in its lifecycle
    pub fn status(&self) -> AnnealingStatus {
        self.status
    }

    /// The outcome, once the run is done
    pub fn outcome(&self) -> Option<AnnealingOutcome> {
        match self.status {
            AnnealingStatus::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Perform a single cooling iteration, initializing the run on the first call.
    /// Returns `true` once the run is done; further calls do nothing.
    pub fn step(&mut self) -> bool {
        match self.status {
            AnnealingStatus::Done(_) => return true,
            AnnealingStatus::Initialized => self.initialize(),
            AnnealingStatus::Running => {}
        }
        if self.temperature >= self.smallest_temp {
            self.iterate();
        }
        if self.temperature < self.smallest_temp {
            self.finish();
            return true;
        }
        false
    }

    /// Cool to completion and report the outcome
    pub fn run(&mut self) -> AnnealingOutcome {
        loop {
            if self.step() {
                if let AnnealingStatus::Done(outcome) = self.status {
                    return outcome;
                }
            }
        }
    }

    fn initialize(&mut self) {
        let bound = self
            .cost_of(&self.lo_state())
            .max(self.cost_of(&self.hi_state()));
        self.scale_cost_by = COST_SCALE / (bound + COST_EPSILON);
        self.state = self.mid_state();
        self.temperature = INITIAL_TEMPERATURE;
        self.started = Some(Instant::now());
        self.status = AnnealingStatus::Running;
    }

    fn iterate(&mut self) {
        let temperature = self.temperature;
        if !self.state.is_empty() {
            let old_cost = self.cost_of(&self.state);
            let idx = self.rng.random_range(0..self.state.len());
            let sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let previous = self.state[idx].nudge(temperature * sign);
            let new_cost = self.cost_of(&self.state);

            let probability = if new_cost <= old_cost {
                1.0
            } else {
                (-(new_cost - old_cost) * self.scale_cost_by / temperature).exp()
            };
            if self.rng.random::<f64>() >= probability {
                self.state[idx].restore(previous);
            }
        }
        self.temperature *= self.alpha;
        self.iterations += 1;
    }

    fn finish(&mut self) {
        let outcome = AnnealingOutcome {
            final_cost: self.cost_of(&self.state),
            elapsed: self.started.map(|t| t.elapsed()).unwrap_or_default(),
            iterations: self.iterations,
        };
        event!(
            Level::DEBUG,
            cost = outcome.final_cost,
            iterations = outcome.iterations,
            elapsed = ?outcome.elapsed,
            "annealing complete"
        );
        self.status = AnnealingStatus::Done(outcome);
    }
}
