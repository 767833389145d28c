//! Cockpit interior parented to the driver camera: dashboard, steering wheel
//! and windshield frame. Everything here lives on `COCKPIT_LAYER` so the
//! minimap never draws it.

use bevy::prelude::*;
use bevy::render::view::RenderLayers;

use simulation::primitives::hex_color;
use simulation::vehicle::VehicleMotionModel;

use crate::camera::{DriverCamera, COCKPIT_LAYER};

const DASHBOARD_COLOR: u32 = 0x333333;
const WHEEL_COLOR: u32 = 0x000000;
const HUB_COLOR: u32 = 0x888888;
const FRAME_COLOR: u32 = 0x222222;

const WHEEL_OFFSET: Vec3 = Vec3::new(0.0, -0.3, -0.6);
const FRAME_THICKNESS: f32 = 0.1;
const FRAME_WIDTH: f32 = 3.5;
const FRAME_HEIGHT: f32 = 2.0;
const FRAME_DEPTH: f32 = -1.1;

#[derive(Component)]
pub struct Cockpit;

/// Rotated about its local Z by the vehicle's wheel rotation.
#[derive(Component)]
pub struct SteeringWheel;

pub fn spawn_cockpit(
    mut commands: Commands,
    cameras: Query<Entity, With<DriverCamera>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(camera) = cameras.get_single() else {
        warn!("Cockpit: no driver camera to attach to");
        return;
    };

    let layer = RenderLayers::layer(COCKPIT_LAYER);
    let mut matte = |rgb: u32| {
        materials.add(StandardMaterial {
            base_color: hex_color(rgb),
            perceptual_roughness: 0.8,
            ..default()
        })
    };
    let dash_mat = matte(DASHBOARD_COLOR);
    let wheel_mat = matte(WHEEL_COLOR);
    let hub_mat = matte(HUB_COLOR);
    let frame_mat = matte(FRAME_COLOR);

    let horizontal_bar = meshes.add(Cuboid::new(FRAME_WIDTH, FRAME_THICKNESS, FRAME_THICKNESS));
    let vertical_bar = meshes.add(Cuboid::new(FRAME_THICKNESS, FRAME_HEIGHT, FRAME_THICKNESS));
    let side_x = FRAME_WIDTH / 2.0 - FRAME_THICKNESS / 2.0;
    let frame_bars = [
        (horizontal_bar.clone(), Vec3::new(0.0, FRAME_HEIGHT / 2.0, FRAME_DEPTH)),
        (horizontal_bar, Vec3::new(0.0, -FRAME_HEIGHT / 2.0, FRAME_DEPTH)),
        (vertical_bar.clone(), Vec3::new(-side_x, 0.0, FRAME_DEPTH)),
        (vertical_bar, Vec3::new(side_x, 0.0, FRAME_DEPTH)),
    ];

    let cockpit = commands
        .spawn((
            Cockpit,
            Transform::default(),
            Visibility::default(),
            layer.clone(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(2.5, 0.5, 1.0))),
                MeshMaterial3d(dash_mat),
                Transform::from_xyz(0.0, -0.6, -1.5),
                layer.clone(),
            ));

            parent
                .spawn((
                    SteeringWheel,
                    Transform::from_translation(WHEEL_OFFSET),
                    Visibility::default(),
                    layer.clone(),
                ))
                .with_children(|wheel| {
                    // Torus lies in XZ; stand it up facing the driver.
                    wheel.spawn((
                        Mesh3d(meshes.add(Torus::new(0.35, 0.45))),
                        MeshMaterial3d(wheel_mat.clone()),
                        Transform::from_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                        layer.clone(),
                    ));
                    wheel.spawn((
                        Mesh3d(meshes.add(Cylinder::new(0.03, 0.4))),
                        MeshMaterial3d(wheel_mat),
                        Transform::from_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                        layer.clone(),
                    ));
                    wheel.spawn((
                        Mesh3d(meshes.add(Cylinder::new(0.1, 0.05))),
                        MeshMaterial3d(hub_mat),
                        Transform::from_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                        layer.clone(),
                    ));
                });

            for (mesh, position) in frame_bars {
                parent.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(frame_mat.clone()),
                    Transform::from_translation(position),
                    layer.clone(),
                ));
            }
        })
        .id();

    commands.entity(camera).add_child(cockpit);
}

pub fn wheel_transform(rotation: f32) -> Transform {
    Transform::from_translation(WHEEL_OFFSET).with_rotation(Quat::from_rotation_z(rotation))
}

pub fn turn_steering_wheel(
    vehicle: Res<VehicleMotionModel>,
    mut wheels: Query<&mut Transform, With<SteeringWheel>>,
) {
    let rotation = vehicle.wheel_rotation();
    for mut transform in &mut wheels {
        *transform = wheel_transform(rotation);
    }
}
