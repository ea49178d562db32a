use super::*;

pub(super) fn test_config(width: u32, height: u32) -> PondConfig {
    let mut config = PondConfig::default();
    config.width = width;
    config.height = height;
    config.num_pikes = 0;
    config.num_carps = 0;
    config
}

/// An initialized simulation with an empty pond, ready for `configure_sim`.
pub(super) fn empty_sim(width: u32, height: u32) -> Simulation {
    Simulation::new(test_config(width, height), 7).expect("simulation should initialize")
}

pub(super) fn make_pike(id: u64, x: i32, y: i32) -> FishState {
    FishState::new_pike(FishId(id), x, y, &PondConfig::default().pike)
}

pub(super) fn make_carp(id: u64, x: i32, y: i32) -> FishState {
    FishState::new_carp(FishId(id), x, y, &PondConfig::default().carp)
}

pub(super) fn set_hunger(pike: &mut FishState, ticks_since_meal: u32) {
    match &mut pike.state {
        SpeciesState::Pike { hunger } => hunger.ticks_since_meal = ticks_since_meal,
        SpeciesState::Carp => panic!("only pikes carry a hunger clock"),
    }
}

pub(super) fn hunger_of(pike: &FishState) -> HungerClock {
    match pike.state {
        SpeciesState::Pike { hunger } => hunger,
        SpeciesState::Carp => panic!("only pikes carry a hunger clock"),
    }
}

pub(super) fn configure_sim(
    sim: &mut Simulation,
    mut pikes: Vec<FishState>,
    mut carps: Vec<FishState>,
) {
    pikes.sort_by_key(|fish| fish.id);
    carps.sort_by_key(|fish| fish.id);

    sim.pond = Pond::new(sim.config.width as i32, sim.config.height as i32);
    for fish in pikes.iter_mut().chain(carps.iter_mut()) {
        let (x, y) = (fish.x, fish.y);
        sim.pond
            .place_fish(fish, x, y)
            .expect("test setup should not overlap");
    }

    sim.next_fish_id = pikes
        .iter()
        .chain(carps.iter())
        .map(|fish| fish.id.0)
        .max()
        .map_or(0, |max_id| max_id + 1);
    sim.pikes = pikes;
    sim.carps = carps;
    sim.tick = 0;
    sim.metrics = MetricsSnapshot::default();
    sim.refresh_population_metrics();
}

pub(super) fn tick_once(sim: &mut Simulation) -> TickDelta {
    sim.step_n(1)
        .expect("tick should succeed")
        .into_iter()
        .next()
        .expect("exactly one delta")
}

pub(super) fn assert_grid_consistent(sim: &Simulation) {
    let mut seen = HashSet::new();
    for fish in sim.pikes.iter().chain(sim.carps.iter()) {
        assert!(
            seen.insert((fish.x, fish.y)),
            "fish should not share a cell",
        );
        assert_eq!(
            sim.pond.fish_at(fish.x, fish.y).expect("in-bounds lookup"),
            Some(fish.id),
            "pond cell must point at the fish occupying it",
        );
    }
    assert_eq!(
        sim.pikes.len() + sim.carps.len(),
        sim.pond.occupied_count(),
        "occupied cell count should match roster sizes",
    );
}
