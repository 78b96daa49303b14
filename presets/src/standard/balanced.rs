use warband_core::config::{AiConfig, BuildList, TimeWindow};
use warband_core::Preset;

use super::*;

#[derive(Default)]
pub struct Balanced {}

impl Preset for Balanced {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn config(&self) -> AiConfig {
        AiConfig {
            building_priority: vec![
                Some(BARRACKS),
                Some(FACTORY),
                Some(GUARD_TOWER),
                Some(AIRFIELD),
                Some(BARRACKS),
            ],
            unit_lists: vec![
                BuildList::always(vec![RIFLEMAN, GRENADIER, FIELD_MEDIC]),
                BuildList::new(TimeWindow::ActiveAfterTime(180f32), vec![TANK, SCOUT_BUGGY]),
                BuildList::new(TimeWindow::ActiveAfterTime(360f32), vec![GUNSHIP]),
            ],
            ..AiConfig::default()
        }
    }
}
