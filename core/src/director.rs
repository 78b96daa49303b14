use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::build_schedule::BuildSchedule;
use crate::config::{AiConfig, ConfigError};
use crate::managers::building_manager::BuildingManager;
use crate::managers::production_manager::ProductionManager;
use crate::managers::squad_manager::{SquadManager, Squads};
use crate::world::*;
use crate::{AIComponent, DirectorState, DirectorStats, Event};

/// One computer opponent.
///
/// Nothing happens until [`AIDirector::bind`] attaches it to a player. Each
/// planning pass runs buildings first, then unit purchases, then squad orders
/// so attacks see the freshest squad membership.
pub struct AIDirector {
    config: AiConfig,
    seed: Option<u64>,
    components: Vec<Box<dyn AIComponent>>,
    state: Option<DirectorState>,
}

impl Default for AIDirector {
    fn default() -> Self {
        Self {
            config: AiConfig::default(),
            seed: None,
            components: vec![
                Box::new(BuildingManager::default()),
                Box::new(ProductionManager::default()),
                Box::new(SquadManager::default()),
            ],
            state: None,
        }
    }
}

impl AIDirector {
    pub fn new(config: &AiConfig) -> Result<Self, ConfigError> {
        let mut director = Self::default();
        director.configure(config)?;
        Ok(director)
    }

    /// Fixes the random stream used once the director is bound.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Takes a private copy of `config`. A bound director picks it up at once
    /// and starts its schedule over.
    pub fn configure(&mut self, config: &AiConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config.clone();
        if let Some(state) = self.state.as_mut() {
            state.schedule = BuildSchedule::new(config.unit_lists.clone());
            state.runtime.cursor.reset();
            state.config = config.clone();
        }
        Ok(())
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn bind(&mut self, world: &dyn World, player: PlayerId) {
        if !world.has_player(player) {
            warn!("Can't bind to unknown player {:?}", player);
            return;
        }
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = DirectorState::new(player, self.config.clone(), rng);
        state.primary_facility = world.primary_facility(player);
        state.completed_buildings = world
            .units_of(player)
            .into_iter()
            .filter(|u| {
                world
                    .template_of(*u)
                    .and_then(|t| world.template(t))
                    .map_or(false, |t| t.is_building())
            })
            .collect();
        if state.primary_facility.is_none() {
            warn!(
                "{:?} has no primary facility, buildings stay idle until one appears",
                player
            );
        }
        info!(
            "Director bound to {:?} (facility {:?}, {} buildings)",
            player,
            state.primary_facility,
            state.completed_buildings.len()
        );
        self.state = Some(state);
    }

    pub fn is_bound(&self) -> bool {
        self.state.is_some()
    }

    pub fn player(&self) -> Option<PlayerId> {
        self.state.as_ref().map(|s| s.player)
    }

    pub fn state(&self) -> Option<&DirectorState> {
        self.state.as_ref()
    }

    pub fn squads(&self) -> Option<&Squads> {
        self.state.as_ref().map(|s| &s.squads)
    }

    pub fn stats(&self) -> DirectorStats {
        self.state
            .as_ref()
            .map(|s| s.stats.clone())
            .unwrap_or_default()
    }

    pub fn tick(&mut self, world: &mut dyn World, delta: f32) {
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return,
        };
        state.runtime.tick(delta.max(0f32));
        if state.runtime.think.is_active() {
            return;
        }
        debug!("{:?} thinking at {:.1}s", state.player, world.match_time());
        for component in self.components.iter_mut() {
            component.process(world, state);
        }
        state.stats.planning_passes += 1;
        state.runtime.think.reset(state.config.think_interval);
    }

    pub fn on_event(&mut self, world: &dyn World, event: &Event) {
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return,
        };
        for component in self.components.iter_mut() {
            component.on_event(world, event, state);
        }
    }
}
