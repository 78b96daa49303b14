//! Contracts the director needs from the host simulation.
//!
//! The director never owns units, facilities or players. Everything it knows
//! about the match comes through these traits, and everything it decides goes
//! back out through them.

use std::fmt;
use std::ops::Add;

use crate::arena::UnitHandle;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(pub u32);

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Self) -> Self::Output {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProductionCategory {
    Headquarters,
    Barracks,
    Factory,
    Airfield,
}

impl ProductionCategory {
    /// Categories that produce units rather than buildings.
    pub const UNIT_PRODUCERS: [ProductionCategory; 3] = [
        ProductionCategory::Barracks,
        ProductionCategory::Factory,
        ProductionCategory::Airfield,
    ];
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnitRole {
    Combat,
    Harvester,
    Structure,
}

#[derive(Clone, Debug)]
pub struct UnitTemplate {
    pub id: TemplateId,
    pub name: String,
    pub role: UnitRole,
    pub can_attack: bool,
    pub prerequisite: Option<TemplateId>,
    pub produced_in: ProductionCategory,
    pub provides: Option<ProductionCategory>,
    pub footprint: f32,
    pub build_time: f32,
}

impl UnitTemplate {
    pub fn is_building(&self) -> bool {
        self.role == UnitRole::Structure
    }

    pub fn is_harvester(&self) -> bool {
        self.role == UnitRole::Harvester
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Order {
    None,
    Attack {
        opponent: PlayerId,
        target: Option<UnitHandle>,
    },
}

impl Default for Order {
    fn default() -> Self {
        Order::None
    }
}

pub trait UnitQuery {
    fn exists(&self, unit: UnitHandle) -> bool;
    fn owner_of(&self, unit: UnitHandle) -> Option<PlayerId>;
    fn template_of(&self, unit: UnitHandle) -> Option<TemplateId>;
    fn position_of(&self, unit: UnitHandle) -> Option<Point2>;
}

pub trait PlayerRegistry {
    fn has_player(&self, player: PlayerId) -> bool;
    fn opponents(&self, player: PlayerId) -> Vec<PlayerId>;
    /// Whether the template's prerequisite is satisfied for the player.
    fn is_template_unlocked(&self, player: PlayerId, template: TemplateId) -> bool;
    fn production_facilities(&self, player: PlayerId, category: ProductionCategory)
        -> Vec<UnitHandle>;
    fn units_of(&self, player: PlayerId) -> Vec<UnitHandle>;
    fn templates(&self) -> &[UnitTemplate];
    fn template(&self, id: TemplateId) -> Option<&UnitTemplate>;
    /// Seconds since the match started.
    fn match_time(&self) -> f32;
}

pub trait ProductionFacility {
    fn enqueue_build(&mut self, facility: UnitHandle, template: TemplateId);
    fn queue_head(&self, facility: UnitHandle) -> Option<TemplateId>;
    fn queue_contains(&self, facility: UnitHandle, template: TemplateId) -> bool;
    fn is_build_ready(&self, facility: UnitHandle) -> bool;
    fn pop_queue_head(&mut self, facility: UnitHandle);
    fn notify_building_placed(&mut self, facility: UnitHandle);
}

pub trait Placement {
    fn is_footprint_valid(
        &self,
        position: Point2,
        footprint: f32,
        rotation: f32,
        player: PlayerId,
    ) -> bool;
    fn instantiate(
        &mut self,
        template: TemplateId,
        position: Point2,
        rotation: f32,
        player: PlayerId,
    ) -> UnitHandle;
}

pub trait OrderSink {
    fn issue_order(&mut self, unit: UnitHandle, order: &Order, additive: bool, primary: bool);
}

/// Everything a director talks to, as one object.
pub trait World: UnitQuery + PlayerRegistry + ProductionFacility + Placement + OrderSink {
    /// First headquarters the player controls, if any.
    fn primary_facility(&self, player: PlayerId) -> Option<UnitHandle> {
        self.production_facilities(player, ProductionCategory::Headquarters)
            .into_iter()
            .next()
    }

    fn owns_unit_producers(&self, player: PlayerId) -> bool {
        ProductionCategory::UNIT_PRODUCERS
            .iter()
            .any(|category| !self.production_facilities(player, *category).is_empty())
    }
}

impl<T> World for T where T: UnitQuery + PlayerRegistry + ProductionFacility + Placement + OrderSink
{}
