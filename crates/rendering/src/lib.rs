use bevy::prelude::*;

pub mod camera;
pub mod city_render;
pub mod cockpit;
pub mod input;
pub mod trail_render;

use simulation::primitives::hex_color;
use simulation::vehicle::{place_vehicle_at_start, DriveSet};

/// Sky color, also used as the fog color so distant blocks fade into it.
pub const SKY_COLOR: u32 = 0xa0c4ff;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(hex_color(SKY_COLOR)))
            .init_resource::<city_render::PrimitiveMaterials>()
            .init_resource::<input::DriveBindings>()
            .init_resource::<trail_render::TrailDecalMesh>()
            .add_systems(
                Startup,
                (
                    setup_lighting,
                    city_render::spawn_city_meshes,
                    camera::setup_cameras,
                    cockpit::spawn_cockpit,
                )
                    .chain()
                    .after(place_vehicle_at_start),
            )
            .add_systems(Update, input::sample_keyboard.in_set(DriveSet::Input))
            .add_systems(
                Update,
                (
                    camera::follow_vehicle,
                    camera::follow_vehicle_minimap,
                    camera::fit_minimap_viewport,
                    cockpit::turn_steering_wheel,
                    trail_render::spawn_trail_decals,
                    trail_render::fade_trail_decals,
                    trail_render::despawn_trail_decals,
                )
                    .after(DriveSet::Tick),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Sky-tinted ambient in place of a hemisphere light
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 600.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 7.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
