use log::{debug, info};
use rand::Rng;

use crate::arena::UnitHandle;
use crate::params::{PLACEMENT_HALF_EXTENT, PLACEMENT_ROTATION};
use crate::world::*;
use crate::{AIComponent, DirectorState};

#[derive(Default)]
pub struct BuildingManager {}

impl BuildingManager {
    fn primary_facility(&self, world: &dyn World, state: &mut DirectorState) -> Option<UnitHandle> {
        if let Some(facility) = state.primary_facility {
            if world.exists(facility) {
                return Some(facility);
            }
        }
        state.primary_facility = world.primary_facility(state.player);
        if let Some(facility) = state.primary_facility {
            debug!("Primary facility for {:?} is now {:?}", state.player, facility);
        }
        state.primary_facility
    }

    fn place_ready_building(
        &self,
        world: &mut dyn World,
        state: &mut DirectorState,
        facility: UnitHandle,
    ) {
        if !world.is_build_ready(facility) {
            return;
        }
        let template = match world.queue_head(facility) {
            Some(template) => template,
            None => return,
        };
        let footprint = match world.template(template) {
            Some(data) => data.footprint,
            None => return,
        };
        let origin = match world.position_of(facility) {
            Some(origin) => origin,
            None => return,
        };
        let position = origin
            + Point2::new(
                state
                    .rng
                    .gen_range(-PLACEMENT_HALF_EXTENT..=PLACEMENT_HALF_EXTENT),
                state
                    .rng
                    .gen_range(-PLACEMENT_HALF_EXTENT..=PLACEMENT_HALF_EXTENT),
            );
        if !world.is_footprint_valid(position, footprint, PLACEMENT_ROTATION, state.player) {
            debug!("Can't place {:?} at {:?}", template, position);
            state.stats.placement_failures += 1;
            return;
        }
        let building = world.instantiate(template, position, PLACEMENT_ROTATION, state.player);
        state.completed_buildings.push(building);
        world.pop_queue_head(facility);
        world.notify_building_placed(facility);
        state.stats.buildings_placed += 1;
        info!(
            "{:?} placed {:?} as {:?} at {:?}",
            state.player, template, building, position
        );
    }

    fn completed_count(&self, world: &dyn World, state: &DirectorState, template: TemplateId) -> usize {
        state
            .completed_buildings
            .iter()
            .filter(|b| world.template_of(**b) == Some(template))
            .count()
    }

    fn next_building(
        &self,
        world: &dyn World,
        state: &DirectorState,
        facility: UnitHandle,
    ) -> Option<TemplateId> {
        for candidate in state.config.building_priority.iter().flatten() {
            if !world.is_template_unlocked(state.player, *candidate) {
                continue;
            }
            if world.queue_contains(facility, *candidate) {
                continue;
            }
            if self.completed_count(world, state, *candidate) >= state.config.max_same_buildings {
                continue;
            }
            return Some(*candidate);
        }
        None
    }
}

impl AIComponent for BuildingManager {
    fn process(&mut self, world: &mut dyn World, state: &mut DirectorState) {
        if !state.runtime.buildings_started() {
            return;
        }
        let facility = match self.primary_facility(world, state) {
            Some(facility) => facility,
            None => return,
        };
        state.completed_buildings.retain(|b| world.exists(*b));
        self.place_ready_building(world, state, facility);
        if state.runtime.building.is_active() || world.queue_head(facility).is_some() {
            return;
        }
        if let Some(template) = self.next_building(world, state, facility) {
            debug!("Enqueueing building {:?} at {:?}", template, facility);
            world.enqueue_build(facility, template);
            state.stats.buildings_enqueued += 1;
        } else {
            debug!("Nothing to build for {:?}", state.player);
        }
        state.runtime.building.reset(state.config.building_interval);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::AiConfig;
    use crate::sandbox::fixtures::*;
    use crate::sandbox::Sandbox;
    use crate::DirectorStats;

    fn state(player: PlayerId, priority: Vec<Option<TemplateId>>, max_same: usize) -> DirectorState {
        let config = AiConfig {
            building_start_delay: 0f32,
            max_same_buildings: max_same,
            building_priority: priority,
            ..AiConfig::default()
        };
        DirectorState::new(player, config, StdRng::seed_from_u64(7))
    }

    fn hq(sandbox: &Sandbox, player: PlayerId) -> UnitHandle {
        sandbox.primary_facility(player).unwrap()
    }

    #[test]
    fn enqueues_first_unlocked_candidate() {
        let (mut sandbox, ai, _) = duel();
        let mut state = state(ai, vec![None, Some(FACTORY), Some(BARRACKS)], 1);
        let mut manager = BuildingManager::default();
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(hq(&sandbox, ai)), vec![BARRACKS]);
        assert_eq!(state.stats.buildings_enqueued, 1);
        assert!(state.runtime.building.is_active());
    }

    #[test]
    fn cap_moves_on_to_next_candidate() {
        let (mut sandbox, ai, _) = duel();
        let mut state = state(ai, vec![Some(BARRACKS), Some(TURRET)], 1);
        let barracks = sandbox.spawn(BARRACKS, ai, Point2::new(70f32, 40f32));
        state.completed_buildings.push(barracks);
        let mut manager = BuildingManager::default();
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(hq(&sandbox, ai)), vec![TURRET]);

        sandbox.pop_queue_head(hq(&sandbox, ai));
        state.runtime.building.tick(100f32);
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(hq(&sandbox, ai)), vec![TURRET]);
    }

    #[test]
    fn destroyed_building_frees_its_cap() {
        let (mut sandbox, ai, _) = duel();
        let mut state = state(ai, vec![Some(BARRACKS)], 1);
        let barracks = sandbox.spawn(BARRACKS, ai, Point2::new(70f32, 40f32));
        state.completed_buildings.push(barracks);
        let mut manager = BuildingManager::default();
        manager.process(&mut sandbox, &mut state);
        assert!(sandbox.queue(hq(&sandbox, ai)).is_empty());

        sandbox.destroy(barracks);
        state.runtime.building.tick(100f32);
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(hq(&sandbox, ai)), vec![BARRACKS]);
    }

    #[test]
    fn places_ready_building_and_records_it() {
        let (mut sandbox, ai, _) = duel();
        let mut state = state(ai, vec![Some(BARRACKS)], 2);
        let mut manager = BuildingManager::default();
        manager.process(&mut sandbox, &mut state);
        let facility = hq(&sandbox, ai);
        assert_eq!(sandbox.queue(facility), vec![BARRACKS]);

        // Cooldown is still running, placement is not gated by it.
        for _ in 0..50 {
            manager.process(&mut sandbox, &mut state);
            if state.stats.buildings_placed > 0 {
                break;
            }
        }
        assert_eq!(state.stats.buildings_placed, 1);
        assert_eq!(state.completed_buildings.len(), 1);
        assert!(sandbox.queue(facility).is_empty());
        assert_eq!(sandbox.placed_count(facility), 1);
        assert_eq!(sandbox.template_of(state.completed_buildings[0]), Some(BARRACKS));
        assert_eq!(state.stats.buildings_enqueued, 1);
    }

    #[test]
    fn busy_queue_keeps_cooldown_elapsed_for_next_pick() {
        let mut templates = catalog();
        for template in templates.iter_mut() {
            if template.id == BARRACKS {
                template.build_time = 3f32;
            }
            // Zero footprints always fit, so placement never misses.
            template.footprint = 0f32;
        }
        let mut sandbox = Sandbox::new(templates, 200f32);
        let ai = sandbox.add_player();
        sandbox.spawn(HEADQUARTERS, ai, Point2::new(40f32, 40f32));
        let facility = hq(&sandbox, ai);
        let mut state = state(ai, vec![Some(BARRACKS), Some(TURRET)], 1);
        state.config.building_interval = 2f32;
        let mut manager = BuildingManager::default();
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(facility), vec![BARRACKS]);

        for _ in 0..2 {
            sandbox.step(1f32);
            state.runtime.tick(1f32);
            manager.process(&mut sandbox, &mut state);
        }
        assert_eq!(state.stats.buildings_placed, 0);
        assert!(!state.runtime.building.is_active());

        sandbox.step(1f32);
        state.runtime.tick(1f32);
        manager.process(&mut sandbox, &mut state);
        assert_eq!(state.stats.buildings_placed, 1);
        assert_eq!(sandbox.queue(facility), vec![TURRET]);
        assert_eq!(state.stats.buildings_enqueued, 2);
        assert!(state.runtime.building.is_active());
    }

    #[test]
    fn blocked_placement_retries_silently() {
        // A map barely bigger than the headquarters leaves no room for anything else.
        let mut sandbox = Sandbox::new(catalog(), 6f32);
        let ai = sandbox.add_player();
        let facility = sandbox.spawn(HEADQUARTERS, ai, Point2::new(3f32, 3f32));
        sandbox.enqueue_build(facility, BARRACKS);
        let mut state = state(ai, vec![], 1);
        let mut manager = BuildingManager::default();
        for _ in 0..5 {
            manager.process(&mut sandbox, &mut state);
        }
        assert_eq!(state.stats.placement_failures, 5);
        assert_eq!(state.stats.buildings_placed, 0);
        assert_eq!(sandbox.queue(facility), vec![BARRACKS]);
    }

    #[test]
    fn waits_for_startup_delay() {
        let (mut sandbox, ai, _) = duel();
        let mut state = state(ai, vec![Some(BARRACKS)], 1);
        state.runtime.building_delay = 3f32;
        let mut manager = BuildingManager::default();
        manager.process(&mut sandbox, &mut state);
        assert!(sandbox.queue(hq(&sandbox, ai)).is_empty());
        state.runtime.tick(3f32);
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(hq(&sandbox, ai)), vec![BARRACKS]);
    }

    #[test]
    fn inert_without_primary_facility() {
        let mut sandbox = Sandbox::new(catalog(), 200f32);
        let ai = sandbox.add_player();
        let mut state = state(ai, vec![Some(BARRACKS)], 1);
        let mut manager = BuildingManager::default();
        manager.process(&mut sandbox, &mut state);
        assert_eq!(state.stats, DirectorStats::default());
        assert!(!state.runtime.building.is_active());
    }
}
