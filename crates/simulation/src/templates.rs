//! Building templates: the static catalog plus a runtime overlay.
//!
//! Lookups always consult the overlay first, so a registered template can
//! shadow a built-in one with the same id.

use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid::{Sector, TileKind};

pub const RES_LOW: &str = "res_low";
pub const COM_LOW: &str = "com_low";
pub const IND_LOW: &str = "ind_low";
pub const WIND_TURBINE: &str = "wind_turbine";
pub const COAL_PLANT: &str = "coal_plant";
pub const HYDRO_PLANT: &str = "hydro_plant";
pub const WATER_PUMP: &str = "water_pump";
pub const ELEMENTARY_SCHOOL: &str = "elementary_school";
pub const HIGH_SCHOOL: &str = "high_school";

pub const SERVICE_ELEMENTARY: &str = "elementary";
pub const SERVICE_HIGH_SCHOOL: &str = "high_school";

/// What a service counts as "load" on a zone tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub enum ServiceLoad {
    /// Residents living on the tile (elementary-style).
    Residents,
    /// Jobs on the tile plus the working share of its residents (high-school-style).
    Workforce,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ServiceDescriptor {
    pub id: String,
    /// Maximum road/zone steps from the footprint.
    pub coverage_radius: u32,
    pub capacity: f32,
    pub load: ServiceLoad,
    /// Fraction of the raw tile load that actually needs the service.
    pub load_share: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct BuildingTemplate {
    pub id: String,
    pub name: String,
    /// Kind stamped onto the footprint. `None` keeps the lot's own kind.
    pub tile_kind: Option<TileKind>,
    /// Zoning sector this template grows in, if it is a zone building.
    pub sector: Option<Sector>,
    pub width: usize,
    pub height: usize,
    pub cost: f64,
    /// Charged once per game day.
    pub maintenance: f64,
    pub requires_power: bool,
    pub power_use: f32,
    pub power_output: f32,
    pub water_use: f32,
    pub water_output: f32,
    pub population_capacity: u32,
    pub jobs_capacity: u32,
    pub service: Option<ServiceDescriptor>,
}

impl Default for BuildingTemplate {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            tile_kind: None,
            sector: None,
            width: 1,
            height: 1,
            cost: 0.0,
            maintenance: 0.0,
            requires_power: true,
            power_use: 0.0,
            power_output: 0.0,
            water_use: 0.0,
            water_output: 0.0,
            population_capacity: 0,
            jobs_capacity: 0,
            service: None,
        }
    }
}

impl BuildingTemplate {
    pub fn is_power_source(&self) -> bool {
        self.power_output > 0.0
    }

    pub fn is_water_source(&self) -> bool {
        self.water_output > 0.0
    }

    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }

    /// Iterates every footprint cell for a building anchored at `origin`.
    pub fn footprint(&self, origin: (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
        let (ox, oy) = origin;
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |dy| (0..w).map(move |dx| (ox + dx, oy + dy)))
    }
}

/// The template a sector grows when a pending lot develops.
pub fn archetype_for(sector: Sector) -> &'static str {
    match sector {
        Sector::Residential => RES_LOW,
        Sector::Commercial => COM_LOW,
        Sector::Industrial => IND_LOW,
    }
}

fn builtin_templates() -> Vec<BuildingTemplate> {
    vec![
        BuildingTemplate {
            id: RES_LOW.into(),
            name: "Low Density Housing".into(),
            sector: Some(Sector::Residential),
            maintenance: 0.0,
            power_use: 1.0,
            population_capacity: 10,
            ..Default::default()
        },
        BuildingTemplate {
            id: COM_LOW.into(),
            name: "Corner Shop".into(),
            sector: Some(Sector::Commercial),
            power_use: 2.0,
            jobs_capacity: 8,
            ..Default::default()
        },
        BuildingTemplate {
            id: IND_LOW.into(),
            name: "Workshop".into(),
            sector: Some(Sector::Industrial),
            power_use: 3.0,
            jobs_capacity: 12,
            ..Default::default()
        },
        BuildingTemplate {
            id: WIND_TURBINE.into(),
            name: "Wind Turbine".into(),
            tile_kind: Some(TileKind::PowerPlant),
            cost: 1_500.0,
            maintenance: 5.0,
            requires_power: false,
            power_output: 5.0,
            ..Default::default()
        },
        BuildingTemplate {
            id: COAL_PLANT.into(),
            name: "Coal Power Plant".into(),
            tile_kind: Some(TileKind::PowerPlant),
            width: 2,
            height: 2,
            cost: 10_000.0,
            maintenance: 60.0,
            requires_power: false,
            power_output: 40.0,
            jobs_capacity: 20,
            ..Default::default()
        },
        BuildingTemplate {
            id: HYDRO_PLANT.into(),
            name: "Hydro Power Plant".into(),
            tile_kind: Some(TileKind::PowerPlant),
            width: 2,
            height: 2,
            cost: 20_000.0,
            maintenance: 40.0,
            requires_power: false,
            power_output: 60.0,
            jobs_capacity: 10,
            ..Default::default()
        },
        BuildingTemplate {
            id: WATER_PUMP.into(),
            name: "Water Pump".into(),
            tile_kind: Some(TileKind::WaterWorks),
            cost: 3_000.0,
            maintenance: 15.0,
            power_use: 2.0,
            water_output: 60.0,
            jobs_capacity: 4,
            ..Default::default()
        },
        BuildingTemplate {
            id: ELEMENTARY_SCHOOL.into(),
            name: "Elementary School".into(),
            tile_kind: Some(TileKind::Civic),
            width: 2,
            height: 2,
            cost: 8_000.0,
            maintenance: 40.0,
            power_use: 2.0,
            water_use: 1.0,
            jobs_capacity: 15,
            service: Some(ServiceDescriptor {
                id: SERVICE_ELEMENTARY.into(),
                coverage_radius: 12,
                capacity: 120.0,
                load: ServiceLoad::Residents,
                load_share: 0.2,
            }),
            ..Default::default()
        },
        BuildingTemplate {
            id: HIGH_SCHOOL.into(),
            name: "High School".into(),
            tile_kind: Some(TileKind::Civic),
            width: 2,
            height: 2,
            cost: 14_000.0,
            maintenance: 70.0,
            power_use: 3.0,
            water_use: 2.0,
            jobs_capacity: 25,
            service: Some(ServiceDescriptor {
                id: SERVICE_HIGH_SCHOOL.into(),
                coverage_radius: 16,
                capacity: 200.0,
                load: ServiceLoad::Workforce,
                load_share: 0.15,
            }),
            ..Default::default()
        },
    ]
}

/// Two-tier template registry. The built-in table never changes; the overlay
/// holds templates registered at runtime and is the only part that is saved.
#[derive(Resource, Debug, Clone)]
pub struct TemplateCatalog {
    builtin: BTreeMap<String, BuildingTemplate>,
    overlay: BTreeMap<String, BuildingTemplate>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::with_overlay(BTreeMap::new())
    }
}

impl TemplateCatalog {
    pub fn with_overlay(overlay: BTreeMap<String, BuildingTemplate>) -> Self {
        let builtin = builtin_templates()
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();
        Self { builtin, overlay }
    }

    pub fn get(&self, id: &str) -> Option<&BuildingTemplate> {
        self.overlay.get(id).or_else(|| self.builtin.get(id))
    }

    /// Registers (or replaces) a runtime template. Returns the previous
    /// overlay entry with the same id.
    pub fn register(&mut self, template: BuildingTemplate) -> Option<BuildingTemplate> {
        self.overlay.insert(template.id.clone(), template)
    }

    pub fn unregister(&mut self, id: &str) -> Option<BuildingTemplate> {
        self.overlay.remove(id)
    }

    pub fn overlay(&self) -> &BTreeMap<String, BuildingTemplate> {
        &self.overlay
    }

    pub fn is_builtin(&self, id: &str) -> bool {
        self.builtin.contains_key(id)
    }

    /// Every resolvable template, overlay entries shadowing built-ins.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingTemplate> {
        let shadowed = self
            .builtin
            .values()
            .filter(|t| !self.overlay.contains_key(&t.id));
        self.overlay.values().chain(shadowed)
    }
}
