//! Integration tests using the `TestCity` harness.
//!
//! These spin up a headless Bevy App with `SimulationPlugin` and verify
//! behavior that only emerges from the full phase order.

mod growth_lifecycle_tests;
