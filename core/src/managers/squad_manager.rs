use itertools::Itertools;
use log::{debug, info};
use rand::prelude::SliceRandom;

use crate::arena::UnitHandle;
use crate::world::*;
use crate::{AIComponent, DirectorState, Event};

#[derive(Default, Clone, Debug)]
pub struct Squad {
    members: Vec<UnitHandle>,
    order: Order,
}

#[derive(Default, Debug)]
pub struct Squads {
    squads: Vec<Squad>,
}

impl Squad {
    /// Members in the order they joined, dead or alive.
    pub fn members(&self) -> &[UnitHandle] {
        &self.members
    }

    pub fn alive_members(&self, world: &dyn World) -> Vec<UnitHandle> {
        self.members
            .iter()
            .copied()
            .filter(|u| world.exists(*u))
            .collect()
    }

    pub fn alive_count(&self, world: &dyn World) -> usize {
        self.members.iter().filter(|u| world.exists(**u)).count()
    }

    pub fn is_full(&self, world: &dyn World, squad_size: usize) -> bool {
        self.alive_count(world) >= squad_size
    }

    /// Drops a stale attack order before answering. An order with a target is
    /// stale once the target is gone, one without a target once the opponent
    /// has left the match.
    pub fn has_order(&mut self, world: &dyn World, player: PlayerId) -> bool {
        if let Order::Attack { opponent, target } = &self.order {
            let stale = match target {
                Some(target) => !world.exists(*target),
                None => !world.opponents(player).contains(opponent),
            };
            if stale {
                debug!("Attack on {:?} ({:?}) is over, squad is idle", opponent, target);
                self.order = Order::None;
            }
        }
        self.order != Order::None
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    fn push(&mut self, unit: UnitHandle) {
        self.members.push(unit);
    }

    fn remove(&mut self, unit: UnitHandle) {
        self.members.retain(|u| *u != unit);
    }
}

impl Squads {
    pub fn len(&self) -> usize {
        self.squads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squads.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Squad> {
        self.squads.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Squad> {
        self.squads.get_mut(index)
    }

    /// Puts the unit in the oldest squad with room, opening a new squad if none has any.
    pub fn assign_unit(&mut self, world: &dyn World, unit: UnitHandle, squad_size: usize) -> usize {
        let index = match self
            .squads
            .iter()
            .position(|s| !s.is_full(world, squad_size))
        {
            Some(index) => index,
            None => {
                self.squads.push(Squad::default());
                self.squads.len() - 1
            }
        };
        self.squads[index].push(unit);
        index
    }

    pub fn destroy_unit(&mut self, unit: UnitHandle) {
        for squad in self.squads.iter_mut() {
            squad.remove(unit);
        }
    }

    pub fn find_unit_squad(&self, unit: UnitHandle) -> Option<&Squad> {
        self.squads.iter().find(|s| s.members.contains(&unit))
    }

    /// Squads with living members that are full (or can never grow) and idle.
    fn ready_for_orders(
        &mut self,
        world: &dyn World,
        player: PlayerId,
        squad_size: usize,
        treated_as_full: bool,
    ) -> Vec<usize> {
        self.squads
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| {
                let alive = s.alive_count(world);
                alive > 0 && (treated_as_full || alive >= squad_size)
            })
            .filter_map(|(index, s)| if s.has_order(world, player) { None } else { Some(index) })
            .collect_vec()
    }
}

#[derive(Default)]
pub struct SquadManager {}

impl SquadManager {
    fn join_squad(&self, world: &dyn World, state: &mut DirectorState, unit: UnitHandle) {
        if world.owner_of(unit) != Some(state.player) {
            return;
        }
        let template = match world.template_of(unit).and_then(|t| world.template(t)) {
            Some(template) => template,
            None => return,
        };
        if template.is_building() {
            return;
        }
        if template.is_harvester() {
            debug!("{:?} is a harvester, leaving it to the economy", unit);
            return;
        }
        let index = state
            .squads
            .assign_unit(world, unit, state.config.squad_size);
        debug!("{:?} ({}) joined squad {}", unit, template.name, index);
    }

    fn evaluate_orders(&self, world: &mut dyn World, state: &mut DirectorState) {
        let treated_as_full = !world.owns_unit_producers(state.player);
        let ready = state.squads.ready_for_orders(
            world,
            state.player,
            state.config.squad_size,
            treated_as_full,
        );
        let opponents = world.opponents(state.player);
        if ready.is_empty() || opponents.is_empty() {
            return;
        }
        let (squad_index, opponent) = match (
            ready.choose(&mut state.rng),
            opponents.choose(&mut state.rng),
        ) {
            (Some(squad_index), Some(opponent)) => (*squad_index, *opponent),
            _ => return,
        };
        let target = world
            .units_of(opponent)
            .into_iter()
            .filter(|u| world.exists(*u))
            .collect_vec()
            .choose(&mut state.rng)
            .copied();
        let order = Order::Attack { opponent, target };
        let squad = match state.squads.get_mut(squad_index) {
            Some(squad) => squad,
            None => return,
        };
        let members = squad.alive_members(world);
        squad.order = order.clone();
        for (index, unit) in members.iter().enumerate() {
            let first = index == 0;
            world.issue_order(*unit, &order, !first, first);
        }
        state.stats.attacks_issued += 1;
        info!(
            "{:?} sends squad {} ({} units) against {:?} [{}]",
            state.player,
            squad_index,
            members.len(),
            opponent,
            members.iter().map(|u| format!("{:?}", u)).join(", ")
        );
    }
}

impl AIComponent for SquadManager {
    fn process(&mut self, world: &mut dyn World, state: &mut DirectorState) {
        self.evaluate_orders(world, state);
    }

    fn on_event(&mut self, world: &dyn World, event: &Event, state: &mut DirectorState) {
        match event {
            Event::UnitSpawned(unit) => self.join_squad(world, state, *unit),
            Event::UnitDestroyed(unit) => state.squads.destroy_unit(*unit),
        }
    }
}
