use std::collections::HashSet;

use log::debug;
use rand::prelude::SliceRandom;

use crate::world::*;
use crate::{AIComponent, DirectorState};

/// Templates a player may buy for the army right now.
#[derive(Debug, Default)]
pub struct UnitEligibility {
    eligible: HashSet<TemplateId>,
}

impl UnitEligibility {
    pub fn recompute(world: &dyn World, player: PlayerId) -> Self {
        let eligible = world
            .templates()
            .iter()
            .filter(|t| t.can_attack && world.is_template_unlocked(player, t.id))
            .map(|t| t.id)
            .collect();
        Self { eligible }
    }

    pub fn contains(&self, template: TemplateId) -> bool {
        self.eligible.contains(&template)
    }
}

#[derive(Default)]
pub struct ProductionManager {}

impl ProductionManager {
    fn produce_unit(&self, world: &mut dyn World, state: &mut DirectorState, unit_type: TemplateId) {
        let category = match world.template(unit_type) {
            Some(template) => template.produced_in,
            None => return,
        };
        let facilities = world.production_facilities(state.player, category);
        if let Some(train_at) = facilities.choose(&mut state.rng) {
            debug!("training a {:?} at {:?}", unit_type, train_at);
            world.enqueue_build(*train_at, unit_type);
            state.stats.units_enqueued += 1;
        } else {
            debug!("No {:?} to train {:?}", category, unit_type);
        }
    }
}

impl AIComponent for ProductionManager {
    fn process(&mut self, world: &mut dyn World, state: &mut DirectorState) {
        if state.runtime.unit.is_active() || !state.runtime.units_started() {
            return;
        }
        if world.opponents(state.player).is_empty() {
            return;
        }
        let eligibility = UnitEligibility::recompute(world, state.player);
        let next = state.schedule.next_eligible(
            &mut state.runtime.cursor,
            world.match_time(),
            |template| eligibility.contains(template),
        );
        match next {
            Some(unit_type) => self.produce_unit(world, state, unit_type),
            None => debug!("No eligible unit for {:?}", state.player),
        }
        state.runtime.unit.reset(state.config.unit_interval);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::{AiConfig, BuildList, TimeWindow};
    use crate::sandbox::fixtures::*;
    use crate::sandbox::Sandbox;

    fn state(player: PlayerId, unit_lists: Vec<BuildList>) -> DirectorState {
        let config = AiConfig {
            unit_start_delay: 0f32,
            unit_lists,
            ..AiConfig::default()
        };
        DirectorState::new(player, config, StdRng::seed_from_u64(11))
    }

    fn ready_cooldown(state: &mut DirectorState) {
        state.runtime.unit.tick(1_000f32);
    }

    #[test]
    fn eligibility_needs_unlock_and_attack() {
        let (mut sandbox, ai, _) = duel();
        let eligibility = UnitEligibility::recompute(&sandbox, ai);
        assert!(eligibility.contains(TURRET));
        assert!(!eligibility.contains(RIFLEMAN));

        sandbox.spawn(BARRACKS, ai, Point2::new(60f32, 40f32));
        let eligibility = UnitEligibility::recompute(&sandbox, ai);
        assert!(eligibility.contains(RIFLEMAN));
        assert!(!eligibility.contains(MEDIC));
        assert!(!eligibility.contains(HARVESTER));
        assert!(!eligibility.contains(TANK));
    }

    #[test]
    fn enqueues_at_a_matching_facility() {
        let (mut sandbox, ai, _) = duel();
        let barracks = sandbox.spawn(BARRACKS, ai, Point2::new(60f32, 40f32));
        let mut state = state(ai, vec![BuildList::always(vec![TANK, RIFLEMAN])]);
        let mut manager = ProductionManager::default();
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(barracks), vec![RIFLEMAN]);
        assert_eq!(state.stats.units_enqueued, 1);
        assert!(state.runtime.unit.is_active());
    }

    #[test]
    fn picks_follow_schedule_order() {
        let (mut sandbox, ai, _) = duel();
        let barracks = sandbox.spawn(BARRACKS, ai, Point2::new(60f32, 40f32));
        let factory = sandbox.spawn(FACTORY, ai, Point2::new(80f32, 40f32));
        let mut state = state(
            ai,
            vec![
                BuildList::always(vec![RIFLEMAN, RIFLEMAN]),
                BuildList::always(vec![TANK]),
            ],
        );
        let mut manager = ProductionManager::default();
        for _ in 0..4 {
            manager.process(&mut sandbox, &mut state);
            ready_cooldown(&mut state);
        }
        assert_eq!(sandbox.queue(barracks), vec![RIFLEMAN, RIFLEMAN, RIFLEMAN]);
        assert_eq!(sandbox.queue(factory), vec![TANK]);
    }

    #[test]
    fn no_opponents_means_no_enqueue() {
        let mut sandbox = Sandbox::new(catalog(), 200f32);
        let ai = sandbox.add_player();
        sandbox.spawn(HEADQUARTERS, ai, Point2::new(40f32, 40f32));
        let barracks = sandbox.spawn(BARRACKS, ai, Point2::new(60f32, 40f32));
        let mut state = state(ai, vec![BuildList::always(vec![RIFLEMAN])]);
        let mut manager = ProductionManager::default();
        manager.process(&mut sandbox, &mut state);
        assert!(sandbox.queue(barracks).is_empty());
        assert_eq!(state.stats.units_enqueued, 0);
        assert!(!state.runtime.unit.is_active());
    }

    #[test]
    fn missing_facility_still_consumes_the_pick() {
        let mut sandbox = Sandbox::new(catalog(), 200f32);
        let ai = sandbox.add_player();
        let enemy = sandbox.add_player();
        sandbox.spawn(HEADQUARTERS, enemy, Point2::new(160f32, 160f32));
        let barracks = sandbox.spawn(BARRACKS, ai, Point2::new(60f32, 40f32));
        // Turrets come out of a headquarters, which this player lacks.
        let mut state = state(ai, vec![BuildList::always(vec![TURRET, RIFLEMAN])]);
        let mut manager = ProductionManager::default();
        manager.process(&mut sandbox, &mut state);
        assert_eq!(state.stats.units_enqueued, 0);
        assert_eq!(state.runtime.cursor.item, 1);
        assert!(state.runtime.unit.is_active());

        ready_cooldown(&mut state);
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(barracks), vec![RIFLEMAN]);
    }

    #[test]
    fn waits_for_cooldown_and_delay() {
        let (mut sandbox, ai, _) = duel();
        let barracks = sandbox.spawn(BARRACKS, ai, Point2::new(60f32, 40f32));
        let mut state = state(ai, vec![BuildList::always(vec![RIFLEMAN])]);
        state.runtime.unit_delay = 1f32;
        let mut manager = ProductionManager::default();
        manager.process(&mut sandbox, &mut state);
        assert!(sandbox.queue(barracks).is_empty());

        state.runtime.tick(1f32);
        manager.process(&mut sandbox, &mut state);
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(barracks), vec![RIFLEMAN]);
    }

    #[test]
    fn time_windows_gate_lists() {
        let (mut sandbox, ai, _) = duel();
        let barracks = sandbox.spawn(BARRACKS, ai, Point2::new(60f32, 40f32));
        let mut state = state(
            ai,
            vec![BuildList::new(
                TimeWindow::ActiveAfterTime(30f32),
                vec![RIFLEMAN],
            )],
        );
        let mut manager = ProductionManager::default();
        manager.process(&mut sandbox, &mut state);
        assert!(sandbox.queue(barracks).is_empty());

        ready_cooldown(&mut state);
        sandbox.step(30f32);
        manager.process(&mut sandbox, &mut state);
        assert_eq!(sandbox.queue(barracks), vec![RIFLEMAN]);
    }
}
