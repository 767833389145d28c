// Default grid parameters (blocks per side, world units)
pub const DEFAULT_GRID_SIZE: usize = 8;
pub const DEFAULT_CELL_SIZE: f32 = 25.0;
pub const DEFAULT_ROAD_WIDTH: f32 = 10.0;
pub const DEFAULT_FIELD_CHANCE: f32 = 0.12;
pub const DEFAULT_MISSING_ROAD_CHANCE: f32 = 0.18;

/// Fraction of the road width a building footprint gives up on a side with a road.
pub const FOOTPRINT_SHRINK_FACTOR: f32 = 0.6;

pub const ROAD_THICKNESS: f32 = 0.11;
pub const ROAD_COLOR: u32 = 0x111111;

/// One lane marker per this many world units of road length (floored).
pub const LANE_MARKER_SPACING: f32 = 2.2;
pub const LANE_MARKER_Y: f32 = 0.13;
pub const LANE_MARKER_HEIGHT: f32 = 0.12;
pub const LANE_MARKER_WIDTH: f32 = 0.3;
/// Marker length as a fraction of its slot along the road.
pub const LANE_MARKER_FILL: f32 = 0.5;
pub const HORIZONTAL_MARKER_COLOR: u32 = 0xffff00;
pub const VERTICAL_MARKER_COLOR: u32 = 0xffffff;

pub const FIELD_HEIGHT: f32 = 0.01;
pub const MIN_BUILDING_HEIGHT: f32 = 2.0;
pub const MAX_BUILDING_HEIGHT: f32 = 4.0;

pub const WALL_HEIGHT: f32 = 6.0;
pub const WALL_THICKNESS: f32 = 1.1;
pub const WALL_COLOR: u32 = 0x888888;

/// Upper bound on primitives one generation pass may emit.
pub const MAX_PRIMITIVES: usize = 4_000_000;

/// Driver eye height above the ground plane.
pub const EYE_HEIGHT: f32 = 1.5;

/// Environment variable naming a JSON file with a `GridConfig` override.
pub const GRID_CONFIG_ENV: &str = "CITYDRIVE_GRID_CONFIG";
/// Environment variable with a `u64` seed for city generation.
pub const SEED_ENV: &str = "CITYDRIVE_SEED";
