use pond_types::{
    FishId, FishState, MetricsSnapshot, PondConfig, Species, TickDelta, WorldSnapshot,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

mod pond;
mod spawn;
mod tick;

pub use pond::{Pond, PondError};

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid pond config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Pond(#[from] PondError),
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: PondConfig,
    tick: u64,
    seed: u64,
    rng: ChaCha8Rng,
    next_fish_id: u64,
    pikes: Vec<FishState>,
    carps: Vec<FishState>,
    pond: Pond,
    metrics: MetricsSnapshot,
}

impl Simulation {
    pub fn new(config: PondConfig, seed: u64) -> Result<Self, SimError> {
        validate_config(&config)?;

        let pond = Pond::new(config.width as i32, config.height as i32);
        let mut sim = Self {
            config,
            tick: 0,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_fish_id: 0,
            pikes: Vec::new(),
            carps: Vec::new(),
            pond,
            metrics: MetricsSnapshot::default(),
        };

        sim.spawn_initial_population()?;
        sim.refresh_population_metrics();
        Ok(sim)
    }

    pub fn config(&self) -> &PondConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsSnapshot {
        &self.metrics
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn pond(&self) -> &Pond {
        &self.pond
    }

    pub fn step_n(&mut self, count: u32) -> Result<Vec<TickDelta>, SimError> {
        let mut deltas = Vec::with_capacity(count as usize);
        for _ in 0..count {
            deltas.push(self.tick()?);
        }
        Ok(deltas)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            rng_seed: self.seed,
            config: self.config.clone(),
            pikes: self.pikes.clone(),
            carps: self.carps.clone(),
            occupancy: self.pond.occupied_cells().collect(),
            metrics: self.metrics.clone(),
        }
    }

    pub fn reset(&mut self, seed: Option<u64>) -> Result<(), SimError> {
        self.seed = seed.unwrap_or(self.seed);
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.tick = 0;
        self.next_fish_id = 0;
        self.pikes.clear();
        self.carps.clear();
        self.pond = Pond::new(self.config.width as i32, self.config.height as i32);
        self.metrics = MetricsSnapshot::default();
        self.spawn_initial_population()?;
        self.refresh_population_metrics();
        Ok(())
    }

    pub fn export_trace_jsonl(&mut self, ticks: u32) -> Result<Vec<String>, SimError> {
        let mut lines = Vec::with_capacity(ticks as usize + 1);
        lines.push(
            serde_json::to_string(&self.snapshot())
                .expect("serialize initial snapshot for trace export"),
        );

        for _ in 0..ticks {
            self.tick()?;
            lines.push(
                serde_json::to_string(&self.snapshot())
                    .expect("serialize tick snapshot for trace export"),
            );
        }
        Ok(lines)
    }

    pub fn render(&self) -> String {
        self.pond
            .render(|id| self.species_of(id) == Some(Species::Pike))
    }

    pub(crate) fn alloc_fish_id(&mut self) -> FishId {
        let id = FishId(self.next_fish_id);
        self.next_fish_id += 1;
        id
    }

    // Rosters are appended in id order at spawn and only compacted by the
    // cull phase, so they stay sorted by id.
    pub(crate) fn carp_index_by_id(&self, id: FishId) -> Option<usize> {
        self.carps.binary_search_by_key(&id, |carp| carp.id).ok()
    }

    fn species_of(&self, id: FishId) -> Option<Species> {
        if self.pikes.binary_search_by_key(&id, |pike| pike.id).is_ok() {
            return Some(Species::Pike);
        }
        if self.carps.binary_search_by_key(&id, |carp| carp.id).is_ok() {
            return Some(Species::Carp);
        }
        None
    }

    pub(crate) fn refresh_population_metrics(&mut self) {
        self.metrics.pikes = self.pikes.len() as u32;
        self.metrics.carps = self.carps.len() as u32;
        self.metrics.reproduction_eligible = self
            .pikes
            .iter()
            .chain(self.carps.iter())
            .filter(|fish| fish.can_reproduce())
            .count() as u32;
    }

    pub(crate) fn debug_assert_consistent_state(&self) {
        if cfg!(debug_assertions) {
            debug_assert_eq!(
                self.pikes.len() + self.carps.len(),
                self.pond.occupied_count(),
                "occupied cell count should match roster sizes",
            );
            for fish in self.pikes.iter().chain(self.carps.iter()) {
                debug_assert_eq!(
                    self.pond.fish_at(fish.x, fish.y).ok().flatten(),
                    Some(fish.id),
                    "pond cell must point at the fish occupying it",
                );
            }
        }
    }
}

fn validate_config(config: &PondConfig) -> Result<(), SimError> {
    if config.width == 0 || config.height == 0 {
        return Err(SimError::InvalidConfig(
            "pond dimensions must be greater than zero".to_owned(),
        ));
    }
    if (config.num_pikes + config.num_carps) as usize > config.capacity() {
        return Err(SimError::InvalidConfig(
            "initial population must fit within the pond".to_owned(),
        ));
    }
    if config.pike.max_age == 0 || config.carp.max_age == 0 {
        return Err(SimError::InvalidConfig(
            "max_age must be greater than zero".to_owned(),
        ));
    }
    if config.pike.reproduction_age == 0 || config.carp.reproduction_age == 0 {
        return Err(SimError::InvalidConfig(
            "reproduction_age must be greater than zero".to_owned(),
        ));
    }
    if config.pike.max_hunger_ticks == 0 {
        return Err(SimError::InvalidConfig(
            "max_hunger_ticks must be greater than zero".to_owned(),
        ));
    }
    Ok(())
}
