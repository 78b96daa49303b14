pub mod building_manager;
pub mod production_manager;
pub mod squad_manager;
