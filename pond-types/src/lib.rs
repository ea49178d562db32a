use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FishId(pub u64);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Species {
    Pike,
    Carp,
}

impl Species {
    pub fn is_predator(self) -> bool {
        matches!(self, Species::Pike)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Eaten,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HungerClock {
    pub ticks_since_meal: u32,
    pub max_hunger_ticks: u32,
}

/// Per-species extension state. Pikes carry a hunger clock; carps carry
/// nothing beyond the shared fish attributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "species")]
pub enum SpeciesState {
    Pike { hunger: HungerClock },
    Carp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FishState {
    pub id: FishId,
    pub x: i32,
    pub y: i32,
    pub age: u32,
    pub max_age: u32,
    pub reproduction_age: u32,
    pub alive: bool,
    pub state: SpeciesState,
}

impl FishState {
    pub fn new_pike(id: FishId, x: i32, y: i32, params: &PikeParams) -> Self {
        Self {
            id,
            x,
            y,
            age: 0,
            max_age: params.max_age,
            reproduction_age: params.reproduction_age,
            alive: true,
            state: SpeciesState::Pike {
                hunger: HungerClock {
                    ticks_since_meal: 0,
                    max_hunger_ticks: params.max_hunger_ticks,
                },
            },
        }
    }

    pub fn new_carp(id: FishId, x: i32, y: i32, params: &CarpParams) -> Self {
        Self {
            id,
            x,
            y,
            age: 0,
            max_age: params.max_age,
            reproduction_age: params.reproduction_age,
            alive: true,
            state: SpeciesState::Carp,
        }
    }

    pub fn species(&self) -> Species {
        match self.state {
            SpeciesState::Pike { .. } => Species::Pike,
            SpeciesState::Carp => Species::Carp,
        }
    }

    pub fn is_predator(&self) -> bool {
        self.species().is_predator()
    }

    /// Sets the position unconditionally; occupancy consistency is the
    /// pond's responsibility.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Pure eligibility query. Nothing in the tick loop breeds fish; the
    /// count of eligible fish is reported through metrics only.
    pub fn can_reproduce(&self) -> bool {
        self.age >= self.reproduction_age
    }

    pub fn is_hungry(&self) -> bool {
        match self.state {
            SpeciesState::Pike { hunger } => hunger.ticks_since_meal >= hunger.max_hunger_ticks,
            SpeciesState::Carp => false,
        }
    }

    /// Resets the hunger clock. Meaningful for pikes only; locating and
    /// removing the prey is the caller's job.
    pub fn eat(&mut self) {
        if let SpeciesState::Pike { hunger } = &mut self.state {
            hunger.ticks_since_meal = 0;
        }
    }

    /// Shared aging routine plus the pike-only hunger extension. Both
    /// counters advance on every call; either threshold can kill in the same
    /// tick, with old age reported first.
    pub fn age_one_tick(&mut self) -> Option<DeathCause> {
        let mut cause = None;
        self.age += 1;
        if self.age > self.max_age {
            cause = Some(DeathCause::OldAge);
        }
        if let SpeciesState::Pike { hunger } = &mut self.state {
            hunger.ticks_since_meal += 1;
        }
        if cause.is_none() && self.is_hungry() {
            cause = Some(DeathCause::Starvation);
        }
        if cause.is_some() {
            self.alive = false;
        }
        cause
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PikeParams {
    pub max_age: u32,
    pub reproduction_age: u32,
    pub max_hunger_ticks: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarpParams {
    pub max_age: u32,
    pub reproduction_age: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PondConfig {
    pub width: u32,
    pub height: u32,
    pub num_pikes: u32,
    pub num_carps: u32,
    #[serde(default = "default_tick_delay_ms")]
    pub tick_delay_ms: u64,
    pub pike: PikeParams,
    pub carp: CarpParams,
}

impl PondConfig {
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for PondConfig {
    fn default() -> Self {
        default_pond_config()
    }
}

pub fn pond_config_from_toml_str(raw: &str) -> Result<PondConfig, toml::de::Error> {
    toml::from_str(raw)
}

pub fn default_pond_config() -> PondConfig {
    pond_config_from_toml_str(include_str!("../default.toml"))
        .expect("default pond config TOML must deserialize")
}

fn default_tick_delay_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MetricsSnapshot {
    pub ticks: u64,
    pub pikes: u32,
    pub carps: u32,
    pub predations_last_tick: u64,
    pub total_predations: u64,
    pub deaths_last_tick: u64,
    pub total_deaths: u64,
    pub reproduction_eligible: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OccupancyCell {
    pub x: i32,
    pub y: i32,
    pub fish_id: FishId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub rng_seed: u64,
    pub config: PondConfig,
    pub pikes: Vec<FishState>,
    pub carps: Vec<FishState>,
    pub occupancy: Vec<OccupancyCell>,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FishMove {
    pub id: FishId,
    pub from: (i32, i32),
    pub to: (i32, i32),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemovedFish {
    pub id: FishId,
    pub species: Species,
    pub x: i32,
    pub y: i32,
    pub cause: DeathCause,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TickDelta {
    pub tick: u64,
    pub moves: Vec<FishMove>,
    pub removed: Vec<RemovedFish>,
    pub metrics: MetricsSnapshot,
}
