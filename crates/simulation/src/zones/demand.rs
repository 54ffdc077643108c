use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::config::DEMAND_MAX;
use crate::grid::Sector;

/// Coefficients of the demand formula for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SectorCoefficients {
    /// Demand of a completely empty (unfilled) sector before other terms.
    pub base: f32,
    /// Fixed value returned while the city has no population and no jobs.
    pub seeded: f32,
    /// Penalty per pending (zoned but unbuilt) tile.
    pub pending_slope: f32,
    pub pending_hard_cap: f32,
    /// The pending penalty never exceeds this fraction of the base demand.
    pub pending_base_fraction: f32,
    /// Base demand above this starts relieving the pending penalty.
    pub relief_threshold: f32,
    pub relief_factor: f32,
    pub floor: f32,
    /// Fill fraction at or above which the floor no longer applies.
    pub saturation: f32,
    pub vacancy_weight: f32,
    pub unemployment_weight: f32,
    /// Subtracted at full power deficit.
    pub power_penalty: f32,
    /// Subtracted at full water deficit.
    pub water_penalty: f32,
}

/// Named inputs of [`compute_sector_demand`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DemandInputs {
    pub fill_fraction: f32,
    pub pending_zones: u32,
    pub population: u32,
    pub jobs: u32,
    pub unemployment_rate: f32,
    pub vacancy_rate: f32,
    pub power_balance: f32,
    pub power_consumed: f32,
    pub water_balance: f32,
    pub water_consumed: f32,
}

/// The demand value plus every intermediate term, for introspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct DemandBreakdown {
    pub fill_term: f32,
    pub workforce_term: f32,
    pub base_demand: f32,
    pub pending_penalty_raw: f32,
    pub pending_penalty_capped: f32,
    pub pressure_relief: f32,
    pub demand_after_penalty: f32,
    pub floor_applied: bool,
    pub utility_penalty: f32,
    pub seeded: bool,
    pub value: f32,
}

/// Share of consumption that is not covered, in [0, 1].
fn deficit_ratio(balance: f32, consumed: f32) -> f32 {
    if balance >= 0.0 {
        0.0
    } else if consumed <= 0.0 {
        1.0
    } else {
        (-balance / consumed).min(1.0)
    }
}

/// Demand for one sector. Pure: the live value used by growth and the debug
/// snapshot both come from here.
pub fn compute_sector_demand(inputs: &DemandInputs, coeffs: &SectorCoefficients) -> DemandBreakdown {
    let fill = if inputs.fill_fraction.is_finite() {
        inputs.fill_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let fill_term = coeffs.base * (1.0 - fill);

    if inputs.population == 0 && inputs.jobs == 0 {
        return DemandBreakdown {
            fill_term,
            seeded: true,
            value: coeffs.seeded.clamp(0.0, DEMAND_MAX),
            ..Default::default()
        };
    }

    let workforce_term = coeffs.vacancy_weight * inputs.vacancy_rate
        + coeffs.unemployment_weight * inputs.unemployment_rate;
    let base_demand = fill_term + workforce_term;

    let pending_penalty_raw = inputs.pending_zones as f32 * coeffs.pending_slope;
    let pending_penalty_capped = pending_penalty_raw
        .min(coeffs.pending_hard_cap)
        .min(coeffs.pending_base_fraction * base_demand.max(0.0));
    let pressure_relief = (base_demand - coeffs.relief_threshold).max(0.0) * coeffs.relief_factor;
    let demand_after_penalty =
        base_demand - (pending_penalty_capped - pressure_relief).max(0.0);

    let floor_applied = fill < coeffs.saturation && demand_after_penalty < coeffs.floor;
    let floored = if fill < coeffs.saturation {
        demand_after_penalty.max(coeffs.floor)
    } else {
        demand_after_penalty
    };

    let utility_penalty = coeffs.power_penalty
        * deficit_ratio(inputs.power_balance, inputs.power_consumed)
        + coeffs.water_penalty * deficit_ratio(inputs.water_balance, inputs.water_consumed);

    DemandBreakdown {
        fill_term,
        workforce_term,
        base_demand,
        pending_penalty_raw,
        pending_penalty_capped,
        pressure_relief,
        demand_after_penalty,
        floor_applied,
        utility_penalty,
        seeded: false,
        value: (floored - utility_penalty).clamp(0.0, DEMAND_MAX),
    }
}

/// Live per-sector demand, 0 ..= 100.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ZoneDemand {
    pub residential: f32,
    pub commercial: f32,
    pub industrial: f32,
    /// Indexed by [`Sector::index`].
    pub breakdowns: [DemandBreakdown; 3],
}

impl ZoneDemand {
    pub fn demand_for(&self, sector: Sector) -> f32 {
        match sector {
            Sector::Residential => self.residential,
            Sector::Commercial => self.commercial,
            Sector::Industrial => self.industrial,
        }
    }

    pub fn breakdown_for(&self, sector: Sector) -> &DemandBreakdown {
        &self.breakdowns[sector.index()]
    }

    pub fn set(&mut self, sector: Sector, breakdown: DemandBreakdown) {
        match sector {
            Sector::Residential => self.residential = breakdown.value,
            Sector::Commercial => self.commercial = breakdown.value,
            Sector::Industrial => self.industrial = breakdown.value,
        }
        self.breakdowns[sector.index()] = breakdown;
    }
}
