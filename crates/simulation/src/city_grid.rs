//! Procedural city grid generator.
//!
//! Turns a [`GridConfig`] and a random source into a flat, ordered list of
//! [`PlacedPrimitive`]s: one building or field per block, a road surface plus
//! dashed center markings per present road edge, and a four-sided perimeter
//! wall. The grid is centered on the world origin.
//!
//! Randomness is consumed in a fixed order (road edges, then parcels), so a
//! seeded source always reproduces the same layout.

use bevy::prelude::*;
use rand::Rng;

use crate::city_grid_error::CityGridError;
use crate::city_rng::CityRng;
use crate::config::{
    HORIZONTAL_MARKER_COLOR, LANE_MARKER_FILL, LANE_MARKER_HEIGHT, LANE_MARKER_SPACING,
    LANE_MARKER_WIDTH, LANE_MARKER_Y, ROAD_COLOR, ROAD_THICKNESS, VERTICAL_MARKER_COLOR,
    WALL_COLOR, WALL_HEIGHT, WALL_THICKNESS,
};
use crate::grid_config::GridConfig;
use crate::parcels::{Footprint, ParcelContent, ParcelGrid};
use crate::primitives::{hex_color, PlacedPrimitive, PrimitiveKind, RoadAxis};
use crate::road_network::RoadNetwork;

/// Everything one generation pass produced.
#[derive(Resource, Debug, Clone)]
pub struct CityLayout {
    pub config: GridConfig,
    pub roads: RoadNetwork,
    pub parcels: ParcelGrid,
    pub primitives: Vec<PlacedPrimitive>,
}

/// Generate a full city layout.
///
/// Fails with [`CityGridError::InvalidConfig`] before drawing any random
/// numbers if `config` is out of range.
pub fn generate<R: Rng + ?Sized>(
    config: &GridConfig,
    rng: &mut R,
) -> Result<CityLayout, CityGridError> {
    config.validate()?;

    let roads = RoadNetwork::generate(config, rng);
    let parcels = ParcelGrid::generate(config, rng);
    let primitives = build_primitives(config, &roads, &parcels);

    Ok(CityLayout {
        config: config.clone(),
        roads,
        parcels,
        primitives,
    })
}

/// Generate only the primitive list.
pub fn generate_primitives<R: Rng + ?Sized>(
    config: &GridConfig,
    rng: &mut R,
) -> Result<Vec<PlacedPrimitive>, CityGridError> {
    generate(config, rng).map(|layout| layout.primitives)
}

/// Derive geometry from an already-decided road network and parcel grid.
pub fn build_primitives(
    config: &GridConfig,
    roads: &RoadNetwork,
    parcels: &ParcelGrid,
) -> Vec<PlacedPrimitive> {
    let n = config.grid_size;
    let markers_per_road = lane_marker_count(config.cell_size);
    let mut out = Vec::with_capacity(n * n + roads.present_count() * (1 + markers_per_road) + 4);

    emit_parcels(config, roads, parcels, &mut out);
    emit_roads(config, roads, &mut out);
    emit_walls(config, &mut out);
    out
}

/// Dashes per road edge: one per 2.2 units of block length, floored.
pub fn lane_marker_count(cell_size: f32) -> usize {
    (cell_size / LANE_MARKER_SPACING).floor() as usize
}

fn emit_parcels(
    config: &GridConfig,
    roads: &RoadNetwork,
    parcels: &ParcelGrid,
    out: &mut Vec<PlacedPrimitive>,
) {
    let offset = config.extent() / 2.0;
    for y in 0..config.grid_size {
        for x in 0..config.grid_size {
            let parcel = parcels.get(x, y);
            let footprint = Footprint::compute(config, roads, x, y);
            let height = parcel.height();
            let center = footprint.center();
            let kind = match parcel {
                ParcelContent::Field { .. } => PrimitiveKind::Field,
                ParcelContent::Building { .. } => PrimitiveKind::Building,
            };
            out.push(PlacedPrimitive::new(
                kind,
                Vec3::new(footprint.width(), height, footprint.depth()),
                Vec3::new(center.x - offset, height / 2.0, center.y - offset),
                parcel.color(),
            ));
        }
    }
}

fn emit_roads(config: &GridConfig, roads: &RoadNetwork, out: &mut Vec<PlacedPrimitive>) {
    let cell = config.cell_size;
    let offset = config.extent() / 2.0;
    let road_y = ROAD_THICKNESS / 2.0;

    for (y, x) in roads.horizontal_edges() {
        let center = Vec3::new(
            x as f32 * cell + cell / 2.0 - offset,
            road_y,
            y as f32 * cell - offset,
        );
        out.push(PlacedPrimitive::new(
            PrimitiveKind::RoadSurface {
                axis: RoadAxis::Horizontal,
            },
            Vec3::new(cell, ROAD_THICKNESS, config.road_width),
            center,
            hex_color(ROAD_COLOR),
        ));
        emit_lane_markers(cell, center, RoadAxis::Horizontal, out);
    }

    for (y, x) in roads.vertical_edges() {
        let center = Vec3::new(
            x as f32 * cell - offset,
            road_y,
            y as f32 * cell + cell / 2.0 - offset,
        );
        out.push(PlacedPrimitive::new(
            PrimitiveKind::RoadSurface {
                axis: RoadAxis::Vertical,
            },
            Vec3::new(config.road_width, ROAD_THICKNESS, cell),
            center,
            hex_color(ROAD_COLOR),
        ));
        emit_lane_markers(cell, center, RoadAxis::Vertical, out);
    }
}

/// Evenly spaced dashes along the road's centerline. Horizontal roads get
/// yellow dashes, vertical roads white.
fn emit_lane_markers(
    cell: f32,
    road_center: Vec3,
    axis: RoadAxis,
    out: &mut Vec<PlacedPrimitive>,
) {
    let count = lane_marker_count(cell);
    if count == 0 {
        return;
    }
    let slot = cell / count as f32;
    let dash = slot * LANE_MARKER_FILL;

    for i in 0..count {
        let along = -cell / 2.0 + (i as f32 + 0.5) * slot;
        let (size, center, color) = match axis {
            RoadAxis::Horizontal => (
                Vec3::new(dash, LANE_MARKER_HEIGHT, LANE_MARKER_WIDTH),
                Vec3::new(road_center.x + along, LANE_MARKER_Y, road_center.z),
                HORIZONTAL_MARKER_COLOR,
            ),
            RoadAxis::Vertical => (
                Vec3::new(LANE_MARKER_WIDTH, LANE_MARKER_HEIGHT, dash),
                Vec3::new(road_center.x, LANE_MARKER_Y, road_center.z + along),
                VERTICAL_MARKER_COLOR,
            ),
        };
        out.push(PlacedPrimitive::new(
            PrimitiveKind::LaneMarker { axis },
            size,
            center,
            hex_color(color),
        ));
    }
}

/// North, south, west, east walls just outside the outer roads.
fn emit_walls(config: &GridConfig, out: &mut Vec<PlacedPrimitive>) {
    let extent = config.extent();
    let outer = wall_distance(config);
    let span = extent + WALL_THICKNESS * 2.0;
    let y = WALL_HEIGHT / 2.0;
    let color = hex_color(WALL_COLOR);

    for sign in [-1.0, 1.0] {
        out.push(PlacedPrimitive::new(
            PrimitiveKind::Wall,
            Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
            Vec3::new(0.0, y, sign * outer),
            color,
        ));
    }
    for sign in [-1.0, 1.0] {
        out.push(PlacedPrimitive::new(
            PrimitiveKind::Wall,
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span),
            Vec3::new(sign * outer, y, 0.0),
            color,
        ));
    }
}

/// Distance from the origin to each wall's centerline.
pub fn wall_distance(config: &GridConfig) -> f32 {
    config.extent() / 2.0 + WALL_THICKNESS / 2.0
}

impl CityLayout {
    /// Ground-level world position of the start block's north-west
    /// intersection. Both roads through it are always present.
    pub fn start_position(&self) -> Vec3 {
        let offset = self.extent() / 2.0;
        let start = self.config.start_block;
        Vec3::new(
            start.x as f32 * self.config.cell_size - offset,
            0.0,
            start.y as f32 * self.config.cell_size - offset,
        )
    }

    /// Edge length of the whole grid, walls excluded.
    pub fn extent(&self) -> f32 {
        self.config.extent()
    }

    pub fn wall_distance(&self) -> f32 {
        wall_distance(&self.config)
    }

    pub fn count_where(&self, pred: impl Fn(PrimitiveKind) -> bool) -> usize {
        self.primitives.iter().filter(|p| pred(p.kind)).count()
    }

    pub fn parcel_count(&self) -> usize {
        self.count_where(PrimitiveKind::is_parcel)
    }

    pub fn road_count(&self) -> usize {
        self.count_where(PrimitiveKind::is_road_surface)
    }

    pub fn lane_marker_count(&self) -> usize {
        self.count_where(PrimitiveKind::is_lane_marker)
    }

    pub fn wall_count(&self) -> usize {
        self.count_where(|k| k == PrimitiveKind::Wall)
    }
}

// ---------------------------------------------------------------------------
// Bevy integration
// ---------------------------------------------------------------------------

/// Startup system: generate the city from `GridConfig` and `CityRng`.
///
/// An invalid config is logged and replaced by `GridConfig::default()`.
pub fn init_city(mut commands: Commands, config: Res<GridConfig>, mut rng: ResMut<CityRng>) {
    let seed = rng.seed;
    let layout = match generate(&config, &mut rng.rng) {
        Ok(layout) => layout,
        Err(e) => {
            warn!("CityGrid: {}, falling back to the default config", e);
            let fallback = GridConfig::default();
            match generate(&fallback, &mut rng.rng) {
                Ok(layout) => {
                    commands.insert_resource(fallback);
                    layout
                }
                Err(e) => {
                    error!("CityGrid: default config rejected: {}", e);
                    return;
                }
            }
        }
    };

    let start = layout.config.start_block;
    let reachable = layout
        .roads
        .reachable_intersections((start.x, start.y))
        .len();
    info!(
        "CityGrid: seed {} -> {}x{} blocks ({} fields), {}/{} roads, {} markers, {}/{} intersections reachable from start",
        seed,
        layout.config.grid_size,
        layout.config.grid_size,
        layout.parcels.field_count(),
        layout.roads.present_count(),
        layout.roads.total_edge_count(),
        layout.lane_marker_count(),
        reachable,
        layout.roads.intersection_count(),
    );

    commands.insert_resource(layout);
}

pub struct CityGridPlugin;

impl Plugin for CityGridPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GridConfig>() {
            let config = match GridConfig::from_env() {
                Ok(Some(config)) => {
                    info!("CityGrid: loaded config override {:?}", config);
                    config
                }
                Ok(None) => GridConfig::default(),
                Err(e) => {
                    warn!("CityGrid: ignoring config override: {}", e);
                    GridConfig::default()
                }
            };
            app.insert_resource(config);
        }
        if !app.world().contains_resource::<CityRng>() {
            app.insert_resource(CityRng::from_env());
        }
        app.add_systems(Startup, init_city);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_config::StartBlock;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario_config() -> GridConfig {
        GridConfig {
            grid_size: 1,
            cell_size: 10.0,
            road_width: 2.0,
            field_chance: 0.0,
            missing_road_chance: 0.0,
            start_block: StartBlock::new(0, 0),
        }
    }

    #[test]
    fn test_single_block_scenario_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let layout = generate(&scenario_config(), &mut rng).expect("valid config");
        assert_eq!(layout.count_where(|k| k == PrimitiveKind::Building), 1);
        assert_eq!(layout.count_where(|k| k == PrimitiveKind::Field), 0);
        assert_eq!(layout.road_count(), 4);
        assert_eq!(layout.wall_count(), 4);
        // floor(10 / 2.2) = 4 dashes per road.
        assert_eq!(layout.lane_marker_count(), 16);
        assert_eq!(layout.primitives.len(), 1 + 4 + 16 + 4);
    }

    #[test]
    fn test_single_block_building_geometry() {
        let mut rng = StdRng::seed_from_u64(2);
        let layout = generate(&scenario_config(), &mut rng).expect("valid config");
        let building = layout.primitives[0];
        assert_eq!(building.kind, PrimitiveKind::Building);
        // 10 - 2 * 1.2 on both ground axes, centered on the origin.
        assert!((building.size.x - 7.6).abs() < 1e-4);
        assert!((building.size.z - 7.6).abs() < 1e-4);
        assert!(building.center.x.abs() < 1e-4);
        assert!(building.center.z.abs() < 1e-4);
        assert!((building.center.y - building.size.y / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_config_fails_without_consuming_rng() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut untouched = StdRng::seed_from_u64(9);
        let config = GridConfig {
            grid_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            generate(&config, &mut rng),
            Err(CityGridError::InvalidConfig {
                field: "grid_size",
                ..
            })
        ));
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_oversized_cells_fail_instead_of_panicking() {
        let mut rng = StdRng::seed_from_u64(9);
        let config = GridConfig {
            cell_size: 1e20,
            ..scenario_config()
        };
        assert!(matches!(
            generate(&config, &mut rng),
            Err(CityGridError::InvalidConfig {
                field: "cell_size",
                ..
            })
        ));
    }

    #[test]
    fn test_layout_extent_follows_config() {
        let mut rng = StdRng::seed_from_u64(8);
        let layout = generate(&GridConfig::default(), &mut rng).expect("valid config");
        assert!((layout.extent() - 200.0).abs() < 1e-4);
        let expected = layout.extent() / 2.0 + WALL_THICKNESS / 2.0;
        assert!((layout.wall_distance() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_output_order_parcels_roads_walls() {
        let mut rng = StdRng::seed_from_u64(3);
        let layout = generate(&GridConfig::default(), &mut rng).expect("valid config");
        let n = layout.config.grid_size;
        assert!(layout.primitives[..n * n].iter().all(|p| p.kind.is_parcel()));
        let tail = &layout.primitives[layout.primitives.len() - 4..];
        assert!(tail.iter().all(|p| p.kind == PrimitiveKind::Wall));
        let first_road = layout.primitives[n * n];
        assert!(first_road.kind.is_road_surface());
    }

    #[test]
    fn test_horizontal_and_vertical_marker_colors_differ() {
        let mut rng = StdRng::seed_from_u64(4);
        let layout = generate(&scenario_config(), &mut rng).expect("valid config");
        for p in &layout.primitives {
            match p.kind {
                PrimitiveKind::LaneMarker {
                    axis: RoadAxis::Horizontal,
                } => assert_eq!(p.color, hex_color(HORIZONTAL_MARKER_COLOR)),
                PrimitiveKind::LaneMarker {
                    axis: RoadAxis::Vertical,
                } => assert_eq!(p.color, hex_color(VERTICAL_MARKER_COLOR)),
                _ => {}
            }
        }
    }

    #[test]
    fn test_lane_markers_lie_on_a_road_surface() {
        let mut rng = StdRng::seed_from_u64(5);
        let layout = generate(&GridConfig::default(), &mut rng).expect("valid config");
        let roads: Vec<_> = layout
            .primitives
            .iter()
            .filter(|p| p.kind.is_road_surface())
            .collect();
        for marker in layout.primitives.iter().filter(|p| p.kind.is_lane_marker()) {
            let on_road = roads.iter().any(|road| {
                marker.min().x >= road.min().x - 1e-3
                    && marker.max().x <= road.max().x + 1e-3
                    && marker.min().z >= road.min().z - 1e-3
                    && marker.max().z <= road.max().z + 1e-3
            });
            assert!(on_road, "marker at {:?} is off-road", marker.center);
            assert!((marker.center.y - LANE_MARKER_Y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_tiny_cells_emit_no_markers() {
        let mut rng = StdRng::seed_from_u64(6);
        let config = GridConfig {
            cell_size: 2.0,
            road_width: 0.5,
            ..scenario_config()
        };
        let layout = generate(&config, &mut rng).expect("valid config");
        assert_eq!(lane_marker_count(2.0), 0);
        assert_eq!(layout.lane_marker_count(), 0);
        assert_eq!(layout.road_count(), 4);
    }

    #[test]
    fn test_start_position_is_start_intersection() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = GridConfig {
            start_block: StartBlock::new(2, 3),
            ..Default::default()
        };
        let layout = generate(&config, &mut rng).expect("valid config");
        // extent 200, cell 25
        assert_eq!(layout.start_position(), Vec3::new(-50.0, 0.0, -25.0));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = GridConfig::default();
        let a = generate_primitives(&config, &mut StdRng::seed_from_u64(11)).expect("valid");
        let b = generate_primitives(&config, &mut StdRng::seed_from_u64(11)).expect("valid");
        assert_eq!(a, b);
    }
}
