pub mod arena;
pub mod build_schedule;
pub mod config;
pub mod director;
pub mod managers;
pub mod params;
pub mod runtime;
pub mod sandbox;
pub mod world;

use rand::rngs::StdRng;

use crate::arena::UnitHandle;
use crate::build_schedule::BuildSchedule;
use crate::config::AiConfig;
use crate::managers::squad_manager::Squads;
use crate::runtime::AiRuntimeState;
use crate::world::{PlayerId, World};

pub trait Preset {
    fn name(&self) -> &'static str;
    fn config(&self) -> AiConfig;
}

/// One stage of a planning pass. Components see host events before the pass that reacts to them.
pub trait AIComponent {
    fn process(&mut self, world: &mut dyn World, state: &mut DirectorState);

    fn on_event(&mut self, _: &dyn World, _: &Event, _: &mut DirectorState) {}
}

/// Notifications the host pushes into a director.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    UnitSpawned(UnitHandle),
    UnitDestroyed(UnitHandle),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectorStats {
    pub planning_passes: usize,
    pub buildings_enqueued: usize,
    pub buildings_placed: usize,
    pub placement_failures: usize,
    pub units_enqueued: usize,
    pub attacks_issued: usize,
}

pub struct DirectorState {
    pub player: PlayerId,
    pub config: AiConfig,
    pub runtime: AiRuntimeState,
    pub schedule: BuildSchedule,
    pub primary_facility: Option<UnitHandle>,
    pub completed_buildings: Vec<UnitHandle>,
    pub squads: Squads,
    pub stats: DirectorStats,
    pub rng: StdRng,
}

impl DirectorState {
    pub fn new(player: PlayerId, config: AiConfig, rng: StdRng) -> Self {
        Self {
            player,
            runtime: AiRuntimeState::new(&config),
            schedule: BuildSchedule::new(config.unit_lists.clone()),
            config,
            primary_facility: None,
            completed_buildings: vec![],
            squads: Squads::default(),
            stats: DirectorStats::default(),
            rng,
        }
    }
}
