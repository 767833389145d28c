//! Block contents (buildings and fields) and their footprints.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{FIELD_HEIGHT, FOOTPRINT_SHRINK_FACTOR, MAX_BUILDING_HEIGHT, MIN_BUILDING_HEIGHT};
use crate::grid_config::GridConfig;
use crate::road_network::RoadNetwork;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParcelContent {
    Field { color: Color },
    Building { color: Color, height: f32 },
}

impl ParcelContent {
    /// Draw one parcel: the field/building draw, then color, then height.
    pub fn random<R: Rng + ?Sized>(field_chance: f32, rng: &mut R) -> Self {
        if rng.gen::<f32>() < field_chance {
            ParcelContent::Field {
                color: random_green(rng),
            }
        } else {
            let color = random_gray(rng);
            let height = rng.gen_range(MIN_BUILDING_HEIGHT..MAX_BUILDING_HEIGHT);
            ParcelContent::Building { color, height }
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            ParcelContent::Field { color } | ParcelContent::Building { color, .. } => color,
        }
    }

    pub fn height(&self) -> f32 {
        match *self {
            ParcelContent::Field { .. } => FIELD_HEIGHT,
            ParcelContent::Building { height, .. } => height,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, ParcelContent::Field { .. })
    }
}

/// Gray with shade in 60..200.
pub fn random_gray<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let shade = rng.gen_range(60u8..200);
    Color::srgb_u8(shade, shade, shade)
}

/// Green `(b, g, b)` with `b` in 60..120 and `g` in 160..220.
pub fn random_green<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let base = rng.gen_range(60u8..120);
    let green = rng.gen_range(160u8..220);
    Color::srgb_u8(base, green, base)
}

/// Row-major `grid_size x grid_size` parcel contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelGrid {
    grid_size: usize,
    cells: Vec<ParcelContent>,
}

impl ParcelGrid {
    pub fn generate<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> Self {
        let n = config.grid_size;
        let cells = (0..n * n)
            .map(|_| ParcelContent::random(config.field_chance, &mut *rng))
            .collect();
        Self { grid_size: n, cells }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &ParcelContent {
        &self.cells[y * self.grid_size + x]
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn field_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_field()).count()
    }

    pub fn building_count(&self) -> usize {
        self.cells.len() - self.field_count()
    }
}

/// Ground rectangle of one parcel, in grid-local coordinates
/// (origin at the grid's north-west corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Footprint {
    /// Footprint of block `(x, y)` given its bounding roads.
    ///
    /// Each side with a present road pulls in by `0.6 * road_width`. A missing
    /// east or south road with a neighbor beyond it pushes that side out by
    /// the same amount on top of the unshrunk edge, so the parcel overlaps
    /// its neighbor across the gap. West and north never expand.
    pub fn compute(config: &GridConfig, roads: &RoadNetwork, x: usize, y: usize) -> Self {
        let cell = config.cell_size;
        let half = cell / 2.0;
        let shrink = config.road_width * FOOTPRINT_SHRINK_FACTOR;
        let cx = x as f32 * cell + half;
        let cz = y as f32 * cell + half;
        let r = roads.cell_roads(x, y);

        let min_x = cx - half + if r.west { shrink } else { 0.0 };
        let mut max_x = cx + half - if r.east { shrink } else { 0.0 };
        let min_z = cz - half + if r.north { shrink } else { 0.0 };
        let mut max_z = cz + half - if r.south { shrink } else { 0.0 };

        let last = config.grid_size - 1;
        if !r.east && x < last {
            max_x += shrink;
        }
        if !r.south && y < last {
            max_z += shrink;
        }

        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }
}
