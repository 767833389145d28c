use bevy::prelude::*;

pub mod city_grid;
pub mod city_grid_error;
pub mod city_rng;
pub mod config;
pub mod grid_config;
pub mod input_state;
pub mod parcels;
pub mod primitives;
pub mod road_network;
pub mod vehicle;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use city_grid::{generate, generate_primitives, CityGridPlugin, CityLayout};
pub use city_grid_error::CityGridError;
pub use grid_config::{GridConfig, StartBlock};
pub use input_state::InputState;
pub use primitives::{PlacedPrimitive, PrimitiveKind, RoadAxis};
pub use vehicle::{DriveSet, VehicleMotionModel, VehiclePlugin};

/// Headless core: city generation at startup and one vehicle tick per frame.
///
/// Insert `GridConfig` and `CityRng` before adding the plugin to override the
/// environment-derived defaults. The host is expected to write `InputState`
/// in `DriveSet::Input`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>();
        app.add_plugins((CityGridPlugin, VehiclePlugin));
    }
}
