//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! Every system in `FixedUpdate` belongs to exactly one phase, and the phases
//! are chained:
//!
//! ```text
//! PreSim → Networks → Lifecycle → Zones → Growth → Services → PostSim
//! ```
//!
//! * **PreSim** – game clock, then queued tool actions.
//! * **Networks** – power and water flood fills plus production/consumption
//!   totals.
//! * **Lifecycle** – building status from the fresh tile flags, trouble
//!   counting and abandonment.
//! * **Zones** – per-tile loads, zone stats, labour stats, then demand.
//! * **Growth** – pending lots develop into archetype buildings.
//! * **Services** – capacity-limited coverage over the current loads.
//! * **PostSim** – daily budget settlement. Reads simulation state only.
//!
//! [`crate::run_simulation_pass`] runs the same order by hand on plain values.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Networks,
    Lifecycle,
    Zones,
    Growth,
    Services,
    PostSim,
}

impl SimulationSet {
    pub const ORDER: [SimulationSet; 7] = [
        SimulationSet::PreSim,
        SimulationSet::Networks,
        SimulationSet::Lifecycle,
        SimulationSet::Zones,
        SimulationSet::Growth,
        SimulationSet::Services,
        SimulationSet::PostSim,
    ];
}
