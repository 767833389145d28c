//! # TestDrive — headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so tests can generate a city,
//! hold controls down for a number of frames and inspect the result without
//! a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::city_grid::CityLayout;
use crate::city_rng::CityRng;
use crate::grid_config::GridConfig;
use crate::input_state::InputState;
use crate::vehicle::{
    DriveTick, TrailEmitter, TrailMarkerEmitted, TrailMarkerRetired, VehicleMotionModel,
    VehicleState, VehicleTuning,
};
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestDrive {
    app: App,
}

impl Default for TestDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDrive {
    /// Default 8x8 city with the default seed.
    pub fn new() -> Self {
        Self::with_config(GridConfig::default(), crate::city_rng::DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(GridConfig::default(), seed)
    }

    /// Build the app with an explicit config and seed, then run the first
    /// update so Startup systems generate the city and place the vehicle.
    pub fn with_config(config: GridConfig, seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Resources inserted BEFORE SimulationPlugin win over env defaults.
        app.insert_resource(config);
        app.insert_resource(CityRng::from_seed_u64(seed));
        app.add_plugins(SimulationPlugin);

        app.update();
        Self { app }
    }

    /// Replace the vehicle tuning, keeping the current position.
    pub fn with_tuning(mut self, tuning: VehicleTuning) -> Self {
        let world = self.app.world_mut();
        let position = world.resource::<VehicleMotionModel>().state().position;
        let mut model = VehicleMotionModel::new(tuning);
        model.set_position(position);
        world.insert_resource(model);
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Hold `input` for `frames` updates.
    pub fn drive(&mut self, input: InputState, frames: usize) -> &mut Self {
        *self.app.world_mut().resource_mut::<InputState>() = input;
        for _ in 0..frames {
            self.app.update();
        }
        self
    }

    /// Release every control and coast for `frames` updates.
    pub fn coast(&mut self, frames: usize) -> &mut Self {
        self.drive(InputState::IDLE, frames)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn layout(&self) -> &CityLayout {
        self.app.world().resource::<CityLayout>()
    }

    pub fn has_layout(&self) -> bool {
        self.app.world().contains_resource::<CityLayout>()
    }

    pub fn config(&self) -> &GridConfig {
        self.app.world().resource::<GridConfig>()
    }

    pub fn vehicle(&self) -> &VehicleState {
        self.app.world().resource::<VehicleMotionModel>().state()
    }

    pub fn speed_readout(&self) -> i32 {
        self.app
            .world()
            .resource::<VehicleMotionModel>()
            .speed_readout()
    }

    pub fn trail(&self) -> &TrailEmitter {
        self.app.world().resource::<TrailEmitter>()
    }

    /// Frames ticked since startup.
    pub fn frames(&self) -> u64 {
        self.app.world().resource::<DriveTick>().0
    }

    /// Trail emit events still buffered (events live for two updates).
    pub fn buffered_emitted(&self) -> usize {
        self.app.world().resource::<Events<TrailMarkerEmitted>>().len()
    }

    pub fn buffered_retired(&self) -> usize {
        self.app.world().resource::<Events<TrailMarkerRetired>>().len()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
