use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::render::camera::{ScalingMode, Viewport};
use bevy::render::view::RenderLayers;
use bevy::window::PrimaryWindow;

use simulation::primitives::hex_color;
use simulation::vehicle::{VehicleMotionModel, VehicleState};

use crate::SKY_COLOR;

const FOV_DEGREES: f32 = 75.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;
const FOG_START: f32 = 10.0;
const FOG_END: f32 = 200.0;

/// World units visible across the minimap, both axes.
pub const MINIMAP_SPAN: f32 = 100.0;
pub const MINIMAP_HEIGHT: f32 = 100.0;
/// Minimap size and inset from the window's bottom-left corner, logical px.
pub const MINIMAP_SIZE: f32 = 200.0;
pub const MINIMAP_MARGIN: f32 = 10.0;

/// Layer for geometry only the driver sees (the cockpit).
pub const COCKPIT_LAYER: usize = 1;

#[derive(Component)]
pub struct DriverCamera;

#[derive(Component)]
pub struct MinimapCamera;

pub fn setup_cameras(mut commands: Commands, vehicle: Res<VehicleMotionModel>) {
    let state = vehicle.state();

    commands.spawn((
        Camera3d::default(),
        Camera {
            order: 0,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR,
            far: FAR,
            ..default()
        }),
        DistanceFog {
            color: hex_color(SKY_COLOR),
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
        driver_transform(state),
        RenderLayers::from_layers(&[0, COCKPIT_LAYER]),
        DriverCamera,
    ));

    // Drawn after the driver view, into a corner viewport set once the
    // window size is known.
    commands.spawn((
        Camera3d::default(),
        Camera {
            order: 1,
            is_active: false,
            ..default()
        },
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: MINIMAP_SPAN,
                height: MINIMAP_SPAN,
            },
            near: 1.0,
            far: FAR,
            ..OrthographicProjection::default_3d()
        }),
        minimap_transform(state),
        RenderLayers::layer(0),
        MinimapCamera,
    ));
}

/// Eye at the vehicle position, yawed by its heading.
pub fn driver_transform(state: &VehicleState) -> Transform {
    Transform::from_translation(state.position).with_rotation(Quat::from_rotation_y(state.heading))
}

/// Straight down onto the vehicle, north (-Z) at the top.
pub fn minimap_transform(state: &VehicleState) -> Transform {
    let ground = Vec3::new(state.position.x, 0.0, state.position.z);
    Transform::from_translation(ground + Vec3::Y * MINIMAP_HEIGHT).looking_at(ground, Vec3::NEG_Z)
}

/// Bottom-left corner viewport for a window of `physical` size.
///
/// `None` when the window is too small to hold it.
pub fn minimap_viewport(physical: UVec2, scale_factor: f32) -> Option<Viewport> {
    let size = (MINIMAP_SIZE * scale_factor).round() as u32;
    let margin = (MINIMAP_MARGIN * scale_factor).round() as u32;
    if size == 0 || physical.x < size + margin || physical.y < size + margin {
        return None;
    }
    Some(Viewport {
        physical_position: UVec2::new(margin, physical.y - size - margin),
        physical_size: UVec2::splat(size),
        ..default()
    })
}

pub fn follow_vehicle(
    vehicle: Res<VehicleMotionModel>,
    mut query: Query<&mut Transform, With<DriverCamera>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = driver_transform(vehicle.state());
}

pub fn follow_vehicle_minimap(
    vehicle: Res<VehicleMotionModel>,
    mut query: Query<&mut Transform, With<MinimapCamera>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = minimap_transform(vehicle.state());
}

/// Keep the minimap pinned to the bottom-left corner across resizes.
pub fn fit_minimap_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Camera, With<MinimapCamera>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok(mut camera) = cameras.get_single_mut() else {
        return;
    };

    let viewport = minimap_viewport(window.physical_size(), window.scale_factor());
    let active = viewport.is_some();
    let unchanged = camera.is_active == active
        && match (&camera.viewport, &viewport) {
            (Some(a), Some(b)) => {
                a.physical_position == b.physical_position && a.physical_size == b.physical_size
            }
            (None, None) => true,
            _ => false,
        };
    if unchanged {
        return;
    }
    camera.viewport = viewport;
    camera.is_active = active;
}
