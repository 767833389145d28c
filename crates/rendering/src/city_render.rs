//! Materializes the generated city as box meshes.
//!
//! Every `PlacedPrimitive` is an axis-aligned box, so all of them share one
//! unit cube mesh scaled by the primitive's size. Materials are cached by
//! color and surface finish; a default city needs only a few dozen.

use std::collections::HashMap;

use bevy::color::ColorToPacked;
use bevy::prelude::*;

use simulation::city_grid::CityLayout;
use simulation::primitives::{PlacedPrimitive, PrimitiveKind};

#[derive(Component, Debug, Clone, Copy)]
pub struct CityPrimitive {
    pub kind: PrimitiveKind,
}

/// Surface roughness class of a primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finish {
    /// Asphalt and road paint.
    Paved,
    Soil,
    Structure,
}

impl Finish {
    pub fn of(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::RoadSurface { .. } | PrimitiveKind::LaneMarker { .. } => Finish::Paved,
            PrimitiveKind::Field => Finish::Soil,
            PrimitiveKind::Building | PrimitiveKind::Wall => Finish::Structure,
        }
    }

    pub fn roughness(self) -> f32 {
        match self {
            Finish::Paved => 0.95,
            Finish::Soil => 1.0,
            Finish::Structure => 0.7,
        }
    }
}

/// `StandardMaterial` handles keyed by packed sRGBA8 color and finish.
#[derive(Resource, Default)]
pub struct PrimitiveMaterials {
    by_key: HashMap<(u32, Finish), Handle<StandardMaterial>>,
}

impl PrimitiveMaterials {
    pub fn get_or_insert(
        &mut self,
        color: Color,
        kind: PrimitiveKind,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        let finish = Finish::of(kind);
        self.by_key
            .entry((color_key(color), finish))
            .or_insert_with(|| materials.add(material_for(color, finish)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

pub fn color_key(color: Color) -> u32 {
    u32::from_be_bytes(color.to_srgba().to_u8_array())
}

fn material_for(color: Color, finish: Finish) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        perceptual_roughness: finish.roughness(),
        ..default()
    }
}

pub fn primitive_transform(primitive: &PlacedPrimitive) -> Transform {
    Transform::from_translation(primitive.center).with_scale(primitive.size)
}

pub fn spawn_city_meshes(
    mut commands: Commands,
    layout: Option<Res<CityLayout>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut cache: ResMut<PrimitiveMaterials>,
) {
    let Some(layout) = layout else {
        warn!("CityRender: no city layout to render");
        return;
    };

    let cube = meshes.add(Cuboid::from_length(1.0));
    for primitive in &layout.primitives {
        let material = cache.get_or_insert(primitive.color, primitive.kind, &mut materials);
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(material),
            primitive_transform(primitive),
            CityPrimitive {
                kind: primitive.kind,
            },
        ));
    }

    info!(
        "CityRender: spawned {} primitives with {} materials",
        layout.primitives.len(),
        cache.len()
    );
}
