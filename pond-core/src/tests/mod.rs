pub(super) use super::*;
pub(super) use pond_types::{DeathCause, FishId, FishMove, FishState, HungerClock, SpeciesState};
pub(super) use std::collections::HashSet;

mod config_and_seed;
mod support;
