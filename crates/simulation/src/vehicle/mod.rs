//! Player vehicle: motion model, tire trail and their per-frame systems.
//!
//! # Update phases (`DriveSet`)
//!
//! ```text
//! Input  →  Tick
//! ```
//!
//! * **Input** – the host samples its devices into `InputState`.
//! * **Tick** – one motion tick and one trail tick per frame. Rendering reads
//!   `VehicleMotionModel` and the trail events after this set.

pub mod motion;
pub mod trail;

use bevy::prelude::*;

pub use motion::{VehicleMotionModel, VehicleState, VehicleTuning};
pub use trail::{TrailEmitter, TrailEvents, TrailMarker, TrailSettings, TrailSide};

use crate::city_grid::{init_city, CityLayout};
use crate::config::EYE_HEIGHT;
use crate::input_state::InputState;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DriveSet {
    Input,
    Tick,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct TrailMarkerEmitted(pub TrailMarker);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailMarkerRetired {
    pub id: u64,
}

/// Frames driven since startup.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DriveTick(pub u64);

/// Put the vehicle at the start intersection, at eye height.
pub fn place_vehicle_at_start(
    layout: Option<Res<CityLayout>>,
    mut vehicle: ResMut<VehicleMotionModel>,
) {
    let Some(layout) = layout else {
        warn!("Vehicle: no city layout, starting at the origin");
        vehicle.set_position(Vec3::Y * EYE_HEIGHT);
        return;
    };
    let position = layout.start_position() + Vec3::Y * EYE_HEIGHT;
    vehicle.set_position(position);
    info!(
        "Vehicle: placed at {:?} facing {:.2} rad",
        position,
        vehicle.state().heading
    );
}

pub fn tick_vehicle(
    input: Res<InputState>,
    mut vehicle: ResMut<VehicleMotionModel>,
    mut trail: ResMut<TrailEmitter>,
    mut tick: ResMut<DriveTick>,
    mut emitted: EventWriter<TrailMarkerEmitted>,
    mut retired: EventWriter<TrailMarkerRetired>,
) {
    let state = *vehicle.tick(*input);
    let events = trail.tick(&state);
    for marker in events.emitted {
        emitted.send(TrailMarkerEmitted(marker));
    }
    for id in events.retired {
        retired.send(TrailMarkerRetired { id });
    }
    tick.0 += 1;
}

pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VehicleMotionModel>()
            .init_resource::<TrailEmitter>()
            .init_resource::<DriveTick>()
            .add_event::<TrailMarkerEmitted>()
            .add_event::<TrailMarkerRetired>()
            .configure_sets(Update, (DriveSet::Input, DriveSet::Tick).chain())
            .add_systems(Startup, place_vehicle_at_start.after(init_city))
            .add_systems(Update, tick_vehicle.in_set(DriveSet::Tick));
    }
}
