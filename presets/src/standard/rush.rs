use warband_core::config::{AiConfig, BuildList, TimeWindow};
use warband_core::Preset;

use super::*;

/// Early infantry pressure, light tech later.
#[derive(Default)]
pub struct Rush {}

impl Preset for Rush {
    fn name(&self) -> &'static str {
        "rush"
    }

    fn config(&self) -> AiConfig {
        AiConfig {
            think_interval: 0.5f32,
            building_interval: 6f32,
            unit_interval: 2f32,
            building_start_delay: 2f32,
            unit_start_delay: 8f32,
            squad_size: 4,
            max_same_buildings: 3,
            building_priority: vec![Some(BARRACKS), None, Some(BARRACKS), Some(FACTORY)],
            unit_lists: vec![
                BuildList::new(
                    TimeWindow::ActiveBeforeTime(240f32),
                    vec![RIFLEMAN, RIFLEMAN, GRENADIER],
                ),
                BuildList::new(
                    TimeWindow::ActiveAfterTime(240f32),
                    vec![RIFLEMAN, GRENADIER, SCOUT_BUGGY],
                ),
            ],
        }
    }
}
