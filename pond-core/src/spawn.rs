use crate::{SimError, Simulation};
use pond_types::FishState;

impl Simulation {
    /// Places the initial rosters at random free cells, pikes first, in the
    /// order the original stocking routine used.
    pub(crate) fn spawn_initial_population(&mut self) -> Result<(), SimError> {
        for _ in 0..self.config.num_pikes {
            let (x, y) = self.pond.random_free_position(&mut self.rng)?;
            let id = self.alloc_fish_id();
            let mut pike = FishState::new_pike(id, x, y, &self.config.pike);
            self.pond.place_fish(&mut pike, x, y)?;
            self.pikes.push(pike);
        }

        for _ in 0..self.config.num_carps {
            let (x, y) = self.pond.random_free_position(&mut self.rng)?;
            let id = self.alloc_fish_id();
            let mut carp = FishState::new_carp(id, x, y, &self.config.carp);
            self.pond.place_fish(&mut carp, x, y)?;
            self.carps.push(carp);
        }

        Ok(())
    }
}
