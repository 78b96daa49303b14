use warband_core::config::{AiConfig, BuildList, TimeWindow};
use warband_core::Preset;

use super::*;

/// Towers first, then one big late push.
#[derive(Default)]
pub struct Turtle {}

impl Preset for Turtle {
    fn name(&self) -> &'static str {
        "turtle"
    }

    fn config(&self) -> AiConfig {
        AiConfig {
            building_interval: 6f32,
            unit_start_delay: 45f32,
            squad_size: 10,
            max_same_buildings: 4,
            building_priority: vec![
                Some(BARRACKS),
                Some(GUARD_TOWER),
                Some(FACTORY),
                Some(GUARD_TOWER),
                Some(AIRFIELD),
            ],
            unit_lists: vec![
                BuildList::always(vec![GRENADIER]),
                BuildList::new(
                    TimeWindow::ActiveAfterTime(300f32),
                    vec![TANK, TANK, BOMBER],
                ),
            ],
            ..AiConfig::default()
        }
    }
}
