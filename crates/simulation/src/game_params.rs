//! Runtime-tunable simulation parameters.
//!
//! Everything the demand model, growth, the economy and the tool boundary
//! read lives in one [`GameParams`] resource so it can be tweaked without
//! recompilation and is persisted with the save.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::grid::Sector;
use crate::zones::SectorCoefficients;

// ---------------------------------------------------------------------------
// Demand
// ---------------------------------------------------------------------------

/// Per-sector demand coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct DemandParams {
    pub residential: SectorCoefficients,
    pub commercial: SectorCoefficients,
    pub industrial: SectorCoefficients,
}

impl DemandParams {
    pub fn for_sector(&self, sector: Sector) -> &SectorCoefficients {
        match sector {
            Sector::Residential => &self.residential,
            Sector::Commercial => &self.commercial,
            Sector::Industrial => &self.industrial,
        }
    }
}

impl Default for DemandParams {
    fn default() -> Self {
        let shared = SectorCoefficients {
            base: 50.0,
            seeded: 35.0,
            pending_slope: 1.5,
            pending_hard_cap: 30.0,
            pending_base_fraction: 0.6,
            relief_threshold: 40.0,
            relief_factor: 0.5,
            floor: 8.0,
            saturation: 0.92,
            vacancy_weight: -15.0,
            unemployment_weight: 35.0,
            power_penalty: 25.0,
            water_penalty: 15.0,
        };
        Self {
            residential: SectorCoefficients {
                base: 60.0,
                seeded: 60.0,
                vacancy_weight: 30.0,
                unemployment_weight: -40.0,
                ..shared.clone()
            },
            commercial: SectorCoefficients {
                water_penalty: 0.0,
                ..shared.clone()
            },
            industrial: SectorCoefficients {
                seeded: 40.0,
                ..shared
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Labour
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct LabourParams {
    /// Fraction of residents that look for work.
    pub worker_share: f32,
}

impl Default for LabourParams {
    fn default() -> Self {
        Self { worker_share: 0.55 }
    }
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct GrowthParams {
    /// Ticks between growth passes.
    pub interval_ticks: u64,
    /// Sectors below this demand do not grow.
    pub min_demand: f32,
    /// Upper bound on new buildings per sector per pass.
    pub max_per_sector: usize,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            interval_ticks: 10,
            min_demand: 5.0,
            max_per_sector: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Economy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct EconomyParams {
    pub starting_funds: f64,
    /// Fixed ticks in one game day. At 10 Hz, 600 ticks is one minute.
    pub ticks_per_day: u64,
    /// Daily income per resident.
    pub res_tax_per_capita: f64,
    /// Daily income per filled job.
    pub job_tax_per_job: f64,
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            starting_funds: crate::config::STARTING_FUNDS,
            ticks_per_day: 600,
            res_tax_per_capita: 0.5,
            job_tax_per_job: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Flat per-tile tool costs. Buildings cost their template's `cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ToolCosts {
    pub road: f64,
    pub rail: f64,
    pub power_line: f64,
    pub water_pipe: f64,
    pub tree: f64,
    pub zone: f64,
    pub bulldoze: f64,
}

impl Default for ToolCosts {
    fn default() -> Self {
        Self {
            road: 10.0,
            rail: 25.0,
            power_line: 5.0,
            water_pipe: 5.0,
            tree: 2.0,
            zone: 0.0,
            bulldoze: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level resource
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct GameParams {
    pub demand: DemandParams,
    pub labour: LabourParams,
    pub growth: GrowthParams,
    pub economy: EconomyParams,
    pub tools: ToolCosts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_demand_coefficients() {
        let demand = DemandParams::default();
        assert_eq!(demand.residential.base, 60.0);
        assert_eq!(demand.commercial.base, 50.0);
        assert_eq!(demand.industrial.base, 50.0);
        assert_eq!(
            (
                demand.residential.seeded,
                demand.commercial.seeded,
                demand.industrial.seeded
            ),
            (60.0, 35.0, 40.0)
        );
        assert_eq!(demand.commercial.water_penalty, 0.0);
        assert_eq!(demand.industrial.water_penalty, 15.0);
        for sector in Sector::ALL {
            assert_eq!(demand.for_sector(sector).saturation, 0.92);
        }
    }

    #[test]
    fn test_params_json_roundtrip() {
        let mut params = GameParams::default();
        params.tools.road = 12.5;
        params.growth.max_per_sector = 9;
        let json = serde_json::to_string(&params).unwrap();
        let restored: GameParams = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, params);
    }
}
