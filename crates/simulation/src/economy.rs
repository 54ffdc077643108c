use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingRegistry;
use crate::config::STARTING_FUNDS;
use crate::game_params::{EconomyParams, GameParams};
use crate::templates::TemplateCatalog;
use crate::time_of_day::GameClock;
use crate::zones::LabourStats;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct CityBudget {
    /// May go negative; there is no bankruptcy.
    pub funds: f64,
    pub last_income: f64,
    pub last_expenses: f64,
}

impl Default for CityBudget {
    fn default() -> Self {
        Self::with_funds(STARTING_FUNDS)
    }
}

impl CityBudget {
    pub fn with_funds(funds: f64) -> Self {
        Self {
            funds,
            last_income: 0.0,
            last_expenses: 0.0,
        }
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        cost <= self.funds
    }

    pub fn charge(&mut self, cost: f64) {
        self.funds -= cost;
    }
}

/// Maintenance of every placed building, whatever its status.
pub fn daily_expenses(registry: &BuildingRegistry, catalog: &TemplateCatalog) -> f64 {
    registry
        .iter()
        .filter_map(|b| catalog.get(&b.template_id))
        .map(|t| t.maintenance)
        .sum()
}

/// Residents plus filled jobs, at the configured rates.
pub fn daily_income(labour: &LabourStats, params: &EconomyParams) -> f64 {
    labour.population as f64 * params.res_tax_per_capita
        + labour.employed as f64 * params.job_tax_per_job
}

pub fn settle_day(
    budget: &mut CityBudget,
    registry: &BuildingRegistry,
    catalog: &TemplateCatalog,
    labour: &LabourStats,
    params: &EconomyParams,
) {
    let income = daily_income(labour, params);
    let expenses = daily_expenses(registry, catalog);
    budget.funds += income - expenses;
    budget.last_income = income;
    budget.last_expenses = expenses;
}

pub fn settle_daily_budget(
    clock: Res<GameClock>,
    mut budget: ResMut<CityBudget>,
    registry: Res<BuildingRegistry>,
    catalog: Res<TemplateCatalog>,
    labour: Res<LabourStats>,
    params: Res<GameParams>,
) {
    if !clock.is_day_boundary(params.economy.ticks_per_day) {
        return;
    }
    settle_day(&mut budget, &registry, &catalog, &labour, &params.economy);
    info!(
        "Day {}: income {:.0}, expenses {:.0}, funds {:.0}",
        clock.day, budget.last_income, budget.last_expenses, budget.funds
    );
    if budget.funds < 0.0 {
        warn!("City is in debt: {:.0}", budget.funds);
    }
}
