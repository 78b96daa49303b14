pub const THINK_INTERVAL: f32 = 1f32;
pub const BUILDING_BUY_INTERVAL: f32 = 10f32;
pub const UNIT_BUY_INTERVAL: f32 = 4f32;

pub const BUILDING_START_DELAY: f32 = 5f32;
pub const UNIT_START_DELAY: f32 = 20f32;

pub const SQUAD_SIZE: usize = 6;
pub const MAX_SAME_BUILDINGS: usize = 2;

pub const COOLDOWN_FLOOR: f32 = 0f32;

pub const PLACEMENT_HALF_EXTENT: f32 = 12f32;
pub const PLACEMENT_ROTATION: f32 = 0f32;
