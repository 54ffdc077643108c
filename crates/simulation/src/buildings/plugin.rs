use bevy::prelude::*;

use super::lifecycle::update_building_lifecycle;
use super::registry::BuildingRegistry;
use crate::templates::TemplateCatalog;

pub struct BuildingsPlugin;

impl Plugin for BuildingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BuildingRegistry>()
            .init_resource::<TemplateCatalog>()
            .add_systems(
                FixedUpdate,
                update_building_lifecycle.in_set(crate::SimulationSet::Lifecycle),
            );
    }
}
