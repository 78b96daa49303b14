//! A small in-memory match that implements every [`World`] contract.
//!
//! It has no movement or combat of its own. Facilities tick their queue heads,
//! finished units spawn next to the facility, and finished buildings wait for
//! their owner to place them. Hosts that want fights destroy units themselves.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::arena::{Arena, UnitHandle};
use crate::world::*;
use crate::Event;

#[derive(Clone, Debug)]
struct FacilityQueue {
    category: ProductionCategory,
    queue: VecDeque<TemplateId>,
    progress: f32,
    placed: usize,
}

impl FacilityQueue {
    fn new(category: ProductionCategory) -> Self {
        Self {
            category,
            queue: VecDeque::new(),
            progress: 0f32,
            placed: 0,
        }
    }
}

#[derive(Clone, Debug)]
struct Entity {
    template: TemplateId,
    owner: PlayerId,
    position: Point2,
    facility: Option<FacilityQueue>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IssuedOrder {
    pub unit: UnitHandle,
    pub order: Order,
    pub additive: bool,
    pub primary: bool,
}

#[derive(Clone, Debug)]
struct PlayerSlot {
    id: PlayerId,
    eliminated: bool,
}

pub struct Sandbox {
    templates: Vec<UnitTemplate>,
    entities: Arena<Entity>,
    players: Vec<PlayerSlot>,
    map_size: f32,
    time: f32,
    orders: HashMap<UnitHandle, Vec<Order>>,
    issued: Vec<IssuedOrder>,
    events: Vec<Event>,
}

impl Sandbox {
    const SPAWN_SPACING: f32 = 1.5f32;

    pub fn new(templates: Vec<UnitTemplate>, map_size: f32) -> Self {
        Self {
            templates,
            entities: Arena::with_key(),
            players: vec![],
            map_size,
            time: 0f32,
            orders: HashMap::new(),
            issued: vec![],
            events: vec![],
        }
    }

    pub fn add_player(&mut self) -> PlayerId {
        let id = PlayerId(self.players.len() as u32 + 1);
        self.players.push(PlayerSlot {
            id,
            eliminated: false,
        });
        id
    }

    pub fn players(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.players
            .iter()
            .any(|p| p.id == player && p.eliminated)
    }

    pub fn eliminate(&mut self, player: PlayerId) {
        if let Some(slot) = self.players.iter_mut().find(|p| p.id == player) {
            if !slot.eliminated {
                debug!("Player {:?} eliminated at {:.1}s", player, self.time);
            }
            slot.eliminated = true;
        }
    }

    pub fn spawn(&mut self, template: TemplateId, owner: PlayerId, position: Point2) -> UnitHandle {
        let facility = self
            .template(template)
            .and_then(|t| t.provides)
            .map(FacilityQueue::new);
        let handle = self.entities.insert(Entity {
            template,
            owner,
            position,
            facility,
        });
        self.events.push(Event::UnitSpawned(handle));
        handle
    }

    pub fn destroy(&mut self, unit: UnitHandle) -> bool {
        if self.entities.remove(unit).is_none() {
            return false;
        }
        self.orders.remove(&unit);
        self.events.push(Event::UnitDestroyed(unit));
        true
    }

    pub fn queue(&self, facility: UnitHandle) -> Vec<TemplateId> {
        self.facility(facility)
            .map(|f| f.queue.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn placed_count(&self, facility: UnitHandle) -> usize {
        self.facility(facility).map_or(0, |f| f.placed)
    }

    pub fn issued_orders(&self) -> &[IssuedOrder] {
        &self.issued
    }

    pub fn orders_of(&self, unit: UnitHandle) -> &[Order] {
        self.orders
            .get(&unit)
            .map(|o| o.as_slice())
            .unwrap_or(&[])
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Advances the clock and every facility queue head.
    pub fn step(&mut self, delta: f32) {
        self.time += delta;
        let mut finished = vec![];
        for (handle, entity) in self.entities.iter_mut() {
            let facility = match entity.facility.as_mut() {
                Some(facility) => facility,
                None => continue,
            };
            let head = match facility.queue.front() {
                Some(head) => *head,
                None => continue,
            };
            let template = match self.templates.iter().find(|t| t.id == head) {
                Some(template) => template,
                None => {
                    facility.queue.pop_front();
                    continue;
                }
            };
            facility.progress += delta;
            if !template.is_building() && facility.progress >= template.build_time {
                facility.queue.pop_front();
                facility.progress = 0f32;
                finished.push((handle, head, entity.owner, entity.position));
            }
        }
        for (facility, template, owner, origin) in finished {
            let offset = Self::SPAWN_SPACING * (self.units_of(owner).len() % 8) as f32;
            let unit = self.spawn(template, owner, origin + Point2::new(offset, -offset));
            debug!("{:?} finished {:?} as {:?}", facility, template, unit);
        }
        self.eliminate_defeated();
    }

    fn eliminate_defeated(&mut self) {
        let defeated = self
            .players
            .iter()
            .filter(|p| !p.eliminated)
            .map(|p| p.id)
            .filter(|id| self.units_of(*id).is_empty())
            .collect::<Vec<_>>();
        for player in defeated {
            self.eliminate(player);
        }
    }

    fn facility(&self, facility: UnitHandle) -> Option<&FacilityQueue> {
        self.entities.get(facility).and_then(|e| e.facility.as_ref())
    }

    fn facility_mut(&mut self, facility: UnitHandle) -> Option<&mut FacilityQueue> {
        self.entities
            .get_mut(facility)
            .and_then(|e| e.facility.as_mut())
    }

    fn overlaps(a: Point2, a_size: f32, b: Point2, b_size: f32) -> bool {
        let reach = (a_size + b_size) / 2f32;
        (a.x - b.x).abs() < reach && (a.y - b.y).abs() < reach
    }
}

impl UnitQuery for Sandbox {
    fn exists(&self, unit: UnitHandle) -> bool {
        self.entities.contains_key(unit)
    }

    fn owner_of(&self, unit: UnitHandle) -> Option<PlayerId> {
        self.entities.get(unit).map(|e| e.owner)
    }

    fn template_of(&self, unit: UnitHandle) -> Option<TemplateId> {
        self.entities.get(unit).map(|e| e.template)
    }

    fn position_of(&self, unit: UnitHandle) -> Option<Point2> {
        self.entities.get(unit).map(|e| e.position)
    }
}

impl PlayerRegistry for Sandbox {
    fn has_player(&self, player: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == player)
    }

    fn opponents(&self, player: PlayerId) -> Vec<PlayerId> {
        if !self.has_player(player) {
            return vec![];
        }
        self.players
            .iter()
            .filter(|p| p.id != player && !p.eliminated)
            .map(|p| p.id)
            .collect()
    }

    fn is_template_unlocked(&self, player: PlayerId, template: TemplateId) -> bool {
        match self.template(template) {
            Some(UnitTemplate {
                prerequisite: Some(requirement),
                ..
            }) => self
                .entities
                .iter()
                .any(|(_, e)| e.owner == player && e.template == *requirement),
            Some(_) => true,
            None => false,
        }
    }

    fn production_facilities(
        &self,
        player: PlayerId,
        category: ProductionCategory,
    ) -> Vec<UnitHandle> {
        self.entities
            .iter()
            .filter(|(_, e)| {
                e.owner == player
                    && e.facility
                        .as_ref()
                        .map_or(false, |f| f.category == category)
            })
            .map(|(handle, _)| handle)
            .collect()
    }

    fn units_of(&self, player: PlayerId) -> Vec<UnitHandle> {
        self.entities
            .iter()
            .filter(|(_, e)| e.owner == player)
            .map(|(handle, _)| handle)
            .collect()
    }

    fn templates(&self) -> &[UnitTemplate] {
        &self.templates
    }

    fn template(&self, id: TemplateId) -> Option<&UnitTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    fn match_time(&self) -> f32 {
        self.time
    }
}

impl ProductionFacility for Sandbox {
    fn enqueue_build(&mut self, facility: UnitHandle, template: TemplateId) {
        match self.facility_mut(facility) {
            Some(queue) => queue.queue.push_back(template),
            None => debug!("{:?} can't queue {:?}", facility, template),
        }
    }

    fn queue_head(&self, facility: UnitHandle) -> Option<TemplateId> {
        self.facility(facility).and_then(|f| f.queue.front().copied())
    }

    fn queue_contains(&self, facility: UnitHandle, template: TemplateId) -> bool {
        self.facility(facility)
            .map_or(false, |f| f.queue.contains(&template))
    }

    fn is_build_ready(&self, facility: UnitHandle) -> bool {
        let queue = match self.facility(facility) {
            Some(queue) => queue,
            None => return false,
        };
        queue
            .queue
            .front()
            .and_then(|head| self.template(*head))
            .map_or(false, |t| queue.progress >= t.build_time)
    }

    fn pop_queue_head(&mut self, facility: UnitHandle) {
        if let Some(queue) = self.facility_mut(facility) {
            queue.queue.pop_front();
            queue.progress = 0f32;
        }
    }

    fn notify_building_placed(&mut self, facility: UnitHandle) {
        if let Some(queue) = self.facility_mut(facility) {
            queue.placed += 1;
        }
    }
}

impl Placement for Sandbox {
    fn is_footprint_valid(
        &self,
        position: Point2,
        footprint: f32,
        _rotation: f32,
        _player: PlayerId,
    ) -> bool {
        let half = footprint / 2f32;
        if position.x - half < 0f32
            || position.y - half < 0f32
            || position.x + half > self.map_size
            || position.y + half > self.map_size
        {
            return false;
        }
        !self.entities.iter().any(|(_, e)| {
            self.template(e.template).map_or(false, |t| {
                t.is_building() && Self::overlaps(position, footprint, e.position, t.footprint)
            })
        })
    }

    fn instantiate(
        &mut self,
        template: TemplateId,
        position: Point2,
        _rotation: f32,
        player: PlayerId,
    ) -> UnitHandle {
        self.spawn(template, player, position)
    }
}

impl OrderSink for Sandbox {
    fn issue_order(&mut self, unit: UnitHandle, order: &Order, additive: bool, primary: bool) {
        self.issued.push(IssuedOrder {
            unit,
            order: order.clone(),
            additive,
            primary,
        });
        let orders = self.orders.entry(unit).or_default();
        if !additive {
            orders.clear();
        }
        orders.push(order.clone());
    }
}

/// Small catalog and match setups shared by the unit tests.
#[cfg(test)]
pub mod fixtures {
    use super::Sandbox;
    use crate::world::*;

    pub const HEADQUARTERS: TemplateId = TemplateId(0);
    pub const BARRACKS: TemplateId = TemplateId(1);
    pub const FACTORY: TemplateId = TemplateId(2);
    pub const TURRET: TemplateId = TemplateId(3);
    pub const HARVESTER: TemplateId = TemplateId(4);
    pub const RIFLEMAN: TemplateId = TemplateId(5);
    pub const TANK: TemplateId = TemplateId(6);
    pub const MEDIC: TemplateId = TemplateId(7);

    fn template(
        id: TemplateId,
        name: &str,
        role: UnitRole,
        can_attack: bool,
        prerequisite: Option<TemplateId>,
        produced_in: ProductionCategory,
        provides: Option<ProductionCategory>,
    ) -> UnitTemplate {
        UnitTemplate {
            id,
            name: name.to_string(),
            role,
            can_attack,
            prerequisite,
            produced_in,
            provides,
            footprint: if role == UnitRole::Structure { 4f32 } else { 1f32 },
            build_time: 0f32,
        }
    }

    pub fn catalog() -> Vec<UnitTemplate> {
        use ProductionCategory::*;
        use UnitRole::*;
        vec![
            template(HEADQUARTERS, "Headquarters", Structure, false, None, Headquarters, Some(Headquarters)),
            template(BARRACKS, "Barracks", Structure, false, None, Headquarters, Some(Barracks)),
            template(FACTORY, "Factory", Structure, false, Some(BARRACKS), Headquarters, Some(Factory)),
            template(TURRET, "Turret", Structure, true, None, Headquarters, None),
            template(HARVESTER, "Harvester", Harvester, false, None, Headquarters, None),
            template(RIFLEMAN, "Rifleman", Combat, true, Some(BARRACKS), Barracks, None),
            template(TANK, "Tank", Combat, true, Some(FACTORY), Factory, None),
            template(MEDIC, "Medic", Combat, false, Some(BARRACKS), Barracks, None),
        ]
    }

    pub fn sandbox() -> Sandbox {
        Sandbox::new(catalog(), 200f32)
    }

    /// Two players, each with a headquarters at opposite corners.
    pub fn duel() -> (Sandbox, PlayerId, PlayerId) {
        let mut sandbox = sandbox();
        let ai = sandbox.add_player();
        let enemy = sandbox.add_player();
        sandbox.spawn(HEADQUARTERS, ai, Point2::new(40f32, 40f32));
        sandbox.spawn(HEADQUARTERS, enemy, Point2::new(160f32, 160f32));
        sandbox.drain_events();
        (sandbox, ai, enemy)
    }
}
