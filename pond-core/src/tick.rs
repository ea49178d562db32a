use crate::{SimError, Simulation};
use pond_types::{DeathCause, FishMove, RemovedFish, Species, TickDelta};

impl Simulation {
    /// One tick: carp phase, pike phase, cull phase, strictly in that order.
    /// Grid errors abort the tick; the domain has no partial-failure
    /// recovery.
    pub(crate) fn tick(&mut self) -> Result<TickDelta, SimError> {
        let mut moves = Vec::new();
        let mut removed = Vec::new();

        self.carp_phase(&mut moves, &mut removed)?;
        let predations = self.pike_phase(&mut moves, &mut removed)?;
        self.cull_phase()?;

        self.tick += 1;
        self.metrics.ticks = self.tick;
        self.metrics.predations_last_tick = predations;
        self.metrics.total_predations += predations;
        self.metrics.deaths_last_tick = removed.len() as u64;
        self.metrics.total_deaths += removed.len() as u64;
        self.refresh_population_metrics();
        self.debug_assert_consistent_state();

        Ok(TickDelta {
            tick: self.tick,
            moves,
            removed,
            metrics: self.metrics.clone(),
        })
    }

    /// Every live carp relocates to a random free cell over the whole grid,
    /// then ages. Carps neither stay put nor avoid predators.
    pub(crate) fn carp_phase(
        &mut self,
        moves: &mut Vec<FishMove>,
        removed: &mut Vec<RemovedFish>,
    ) -> Result<(), SimError> {
        for idx in 0..self.carps.len() {
            if !self.carps[idx].alive {
                continue;
            }
            let from = (self.carps[idx].x, self.carps[idx].y);
            let to = self.pond.random_free_position(&mut self.rng)?;
            self.pond.move_fish(&mut self.carps[idx], to.0, to.1)?;
            moves.push(FishMove {
                id: self.carps[idx].id,
                from,
                to,
            });

            if let Some(cause) = self.carps[idx].age_one_tick() {
                let carp = &self.carps[idx];
                removed.push(RemovedFish {
                    id: carp.id,
                    species: Species::Carp,
                    x: carp.x,
                    y: carp.y,
                    cause,
                });
            }
        }
        Ok(())
    }

    /// Every live pike eats the first live carp found among its neighbors in
    /// tie-break order, or relocates to a random free cell if none is found,
    /// then ages. Returns the number of predations.
    pub(crate) fn pike_phase(
        &mut self,
        moves: &mut Vec<FishMove>,
        removed: &mut Vec<RemovedFish>,
    ) -> Result<u64, SimError> {
        let mut predations = 0;
        for idx in 0..self.pikes.len() {
            if !self.pikes[idx].alive {
                continue;
            }
            let from = (self.pikes[idx].x, self.pikes[idx].y);

            let mut ate = false;
            for (x, y) in self.pond.adjacent_positions(from.0, from.1) {
                let Some(occupant) = self.pond.fish_at(x, y)? else {
                    continue;
                };
                let Some(carp_idx) = self.carp_index_by_id(occupant) else {
                    continue;
                };
                if !self.carps[carp_idx].alive {
                    continue;
                }

                // Eats: the prey cell is cleared and the carp felled here;
                // the cull phase drops it from the roster this same tick.
                self.pond.remove_fish(x, y)?;
                let carp = &mut self.carps[carp_idx];
                carp.alive = false;
                removed.push(RemovedFish {
                    id: carp.id,
                    species: Species::Carp,
                    x,
                    y,
                    cause: DeathCause::Eaten,
                });
                self.pikes[idx].eat();
                predations += 1;
                ate = true;
                break;
            }

            if !ate {
                let to = self.pond.random_free_position(&mut self.rng)?;
                self.pond.move_fish(&mut self.pikes[idx], to.0, to.1)?;
                moves.push(FishMove {
                    id: self.pikes[idx].id,
                    from,
                    to,
                });
            }

            if let Some(cause) = self.pikes[idx].age_one_tick() {
                let pike = &self.pikes[idx];
                removed.push(RemovedFish {
                    id: pike.id,
                    species: Species::Pike,
                    x: pike.x,
                    y: pike.y,
                    cause,
                });
            }
        }
        Ok(predations)
    }

    /// Clears the grid cell of every dead fish that still owns it, then
    /// drops the dead from both rosters. An eaten carp's cell was cleared at
    /// predation time and may hold another fish by now.
    pub(crate) fn cull_phase(&mut self) -> Result<(), SimError> {
        for fish in self.pikes.iter().chain(self.carps.iter()) {
            if fish.alive {
                continue;
            }
            if self.pond.fish_at(fish.x, fish.y)? == Some(fish.id) {
                self.pond.remove_fish(fish.x, fish.y)?;
            }
        }
        self.pikes.retain(|pike| pike.alive);
        self.carps.retain(|carp| carp.alive);
        Ok(())
    }
}
