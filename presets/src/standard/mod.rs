pub mod balanced;
pub mod rush;
pub mod turtle;

use warband_core::world::ProductionCategory::*;
use warband_core::world::UnitRole::*;
use warband_core::world::*;

pub const HEADQUARTERS: TemplateId = TemplateId(0);
pub const BARRACKS: TemplateId = TemplateId(1);
pub const FACTORY: TemplateId = TemplateId(2);
pub const AIRFIELD: TemplateId = TemplateId(3);
pub const GUARD_TOWER: TemplateId = TemplateId(4);
pub const HARVESTER: TemplateId = TemplateId(5);
pub const RIFLEMAN: TemplateId = TemplateId(6);
pub const GRENADIER: TemplateId = TemplateId(7);
pub const FIELD_MEDIC: TemplateId = TemplateId(8);
pub const SCOUT_BUGGY: TemplateId = TemplateId(9);
pub const TANK: TemplateId = TemplateId(10);
pub const GUNSHIP: TemplateId = TemplateId(11);
pub const BOMBER: TemplateId = TemplateId(12);

#[allow(clippy::too_many_arguments)]
fn template(
    id: TemplateId,
    name: &str,
    role: UnitRole,
    can_attack: bool,
    prerequisite: Option<TemplateId>,
    produced_in: ProductionCategory,
    provides: Option<ProductionCategory>,
    footprint: f32,
    build_time: f32,
) -> UnitTemplate {
    UnitTemplate {
        id,
        name: name.to_string(),
        role,
        can_attack,
        prerequisite,
        produced_in,
        provides,
        footprint,
        build_time,
    }
}

/// Templates used by every standard preset.
pub fn catalog() -> Vec<UnitTemplate> {
    vec![
        template(HEADQUARTERS, "Headquarters", Structure, false, None, Headquarters, Some(Headquarters), 6f32, 60f32),
        template(BARRACKS, "Barracks", Structure, false, None, Headquarters, Some(Barracks), 4f32, 15f32),
        template(FACTORY, "Factory", Structure, false, Some(BARRACKS), Headquarters, Some(Factory), 5f32, 25f32),
        template(AIRFIELD, "Airfield", Structure, false, Some(FACTORY), Headquarters, Some(Airfield), 6f32, 30f32),
        template(GUARD_TOWER, "Guard Tower", Structure, true, Some(BARRACKS), Headquarters, None, 2f32, 10f32),
        template(HARVESTER, "Harvester", Harvester, false, None, Headquarters, None, 1f32, 8f32),
        template(RIFLEMAN, "Rifleman", Combat, true, Some(BARRACKS), Barracks, None, 1f32, 6f32),
        template(GRENADIER, "Grenadier", Combat, true, Some(BARRACKS), Barracks, None, 1f32, 8f32),
        template(FIELD_MEDIC, "Field Medic", Combat, false, Some(BARRACKS), Barracks, None, 1f32, 7f32),
        template(SCOUT_BUGGY, "Scout Buggy", Combat, true, Some(FACTORY), Factory, None, 2f32, 10f32),
        template(TANK, "Tank", Combat, true, Some(FACTORY), Factory, None, 3f32, 18f32),
        template(GUNSHIP, "Gunship", Combat, true, Some(AIRFIELD), Airfield, None, 3f32, 20f32),
        template(BOMBER, "Bomber", Combat, true, Some(AIRFIELD), Airfield, None, 3f32, 28f32),
    ]
}
