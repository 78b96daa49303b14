use crate::build_schedule::ScheduleCursor;
use crate::config::AiConfig;
use crate::params::COOLDOWN_FLOOR;

/// Seconds left before an action may run again.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0f32
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(COOLDOWN_FLOOR);
    }

    pub fn reset(&mut self, interval: f32) {
        self.remaining = interval;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiRuntimeState {
    pub think: Cooldown,
    pub building: Cooldown,
    pub unit: Cooldown,
    /// Startup delays are not floored and keep going negative.
    pub building_delay: f32,
    pub unit_delay: f32,
    pub cursor: ScheduleCursor,
}

impl AiRuntimeState {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            building_delay: config.building_start_delay,
            unit_delay: config.unit_start_delay,
            ..Default::default()
        }
    }

    pub fn tick(&mut self, delta: f32) {
        self.think.tick(delta);
        self.building.tick(delta);
        self.unit.tick(delta);
        self.building_delay -= delta;
        self.unit_delay -= delta;
    }

    pub fn buildings_started(&self) -> bool {
        self.building_delay <= 0f32
    }

    pub fn units_started(&self) -> bool {
        self.unit_delay <= 0f32
    }
}
