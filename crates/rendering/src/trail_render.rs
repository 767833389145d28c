//! Tire-trail decals: one small dark sphere per live trail marker.
//!
//! Decals follow the emitter's events. Each gets its own material so its
//! alpha can track the marker's opacity as it fades.

use bevy::prelude::*;

use simulation::vehicle::{TrailEmitter, TrailMarkerEmitted, TrailMarkerRetired};

const DECAL_RADIUS: f32 = 0.05;

#[derive(Component, Debug, Clone, Copy)]
pub struct TrailDecal {
    pub id: u64,
}

/// Shared low-poly sphere for every decal.
#[derive(Resource)]
pub struct TrailDecalMesh(pub Handle<Mesh>);

impl FromWorld for TrailDecalMesh {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        Self(meshes.add(Sphere::new(DECAL_RADIUS).mesh().uv(6, 6)))
    }
}

pub fn decal_color(opacity: f32) -> Color {
    Color::srgba(0.0, 0.0, 0.0, opacity.clamp(0.0, 1.0))
}

pub fn spawn_trail_decals(
    mut commands: Commands,
    mut emitted: EventReader<TrailMarkerEmitted>,
    mesh: Res<TrailDecalMesh>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for TrailMarkerEmitted(marker) in emitted.read() {
        let material = materials.add(StandardMaterial {
            base_color: decal_color(marker.opacity),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(mesh.0.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(marker.position),
            TrailDecal { id: marker.id },
        ));
    }
}

pub fn fade_trail_decals(
    trail: Res<TrailEmitter>,
    decals: Query<(&TrailDecal, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !trail.is_changed() {
        return;
    }
    for (decal, material) in &decals {
        let Some(opacity) = trail.opacity(decal.id) else {
            continue;
        };
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color = decal_color(opacity);
        }
    }
}

pub fn despawn_trail_decals(
    mut commands: Commands,
    mut retired: EventReader<TrailMarkerRetired>,
    decals: Query<(Entity, &TrailDecal, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ids: Vec<u64> = retired.read().map(|r| r.id).collect();
    if ids.is_empty() {
        return;
    }
    for (entity, decal, material) in &decals {
        if ids.contains(&decal.id) {
            materials.remove(&material.0);
            commands.entity(entity).despawn();
        }
    }
}
