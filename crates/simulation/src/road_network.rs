//! Road edges of the city grid.
//!
//! Roads run along block boundaries. Intersections sit at grid points
//! `(x, y)` with `0 <= x, y <= grid_size`:
//!
//! - horizontal edge `[y][x]` joins intersections `(x, y)` and `(x + 1, y)`;
//!   there are `grid_size + 1` rows of `grid_size` edges.
//! - vertical edge `[y][x]` joins intersections `(x, y)` and `(x, y + 1)`;
//!   there are `grid_size` rows of `grid_size + 1` edges.
//!
//! Any edge whose row equals the start block's `y` or whose column equals its
//! `x` is never removed, so the start block always touches the network.

use pathfinding::prelude::bfs_reach;
use rand::Rng;

use crate::grid_config::{GridConfig, StartBlock};

/// Grid-point coordinate of a road intersection.
pub type Intersection = (usize, usize);

/// Presence of the four roads bounding one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRoads {
    pub north: bool,
    pub south: bool,
    pub west: bool,
    pub east: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadNetwork {
    grid_size: usize,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
}

impl RoadNetwork {
    /// A network with every edge present.
    pub fn full(grid_size: usize) -> Self {
        Self {
            grid_size,
            horizontal: vec![true; (grid_size + 1) * grid_size],
            vertical: vec![true; grid_size * (grid_size + 1)],
        }
    }

    /// Start from a full network and drop each non-forced edge with
    /// probability `missing_road_chance`. Horizontal edges are drawn first,
    /// row-major, then vertical edges.
    pub fn generate<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> Self {
        let n = config.grid_size;
        let start = config.start_block;
        let mut network = Self::full(n);

        for y in 0..=n {
            for x in 0..n {
                if Self::is_forced(start, y, x) {
                    continue;
                }
                if rng.gen::<f32>() < config.missing_road_chance {
                    network.horizontal[y * n + x] = false;
                }
            }
        }
        for y in 0..n {
            for x in 0..=n {
                if Self::is_forced(start, y, x) {
                    continue;
                }
                if rng.gen::<f32>() < config.missing_road_chance {
                    network.vertical[y * (n + 1) + x] = false;
                }
            }
        }
        network
    }

    /// Whether edge `[row][col]` (of either orientation) is pinned present.
    #[inline]
    pub fn is_forced(start: StartBlock, row: usize, col: usize) -> bool {
        row == start.y || col == start.x
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Horizontal edge `[row][col]`, `row <= grid_size`, `col < grid_size`.
    #[inline]
    pub fn horizontal(&self, row: usize, col: usize) -> bool {
        debug_assert!(row <= self.grid_size && col < self.grid_size);
        self.horizontal[row * self.grid_size + col]
    }

    /// Vertical edge `[row][col]`, `row < grid_size`, `col <= grid_size`.
    #[inline]
    pub fn vertical(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.grid_size && col <= self.grid_size);
        self.vertical[row * (self.grid_size + 1) + col]
    }

    pub fn set_horizontal(&mut self, row: usize, col: usize, present: bool) {
        let idx = row * self.grid_size + col;
        self.horizontal[idx] = present;
    }

    pub fn set_vertical(&mut self, row: usize, col: usize, present: bool) {
        let idx = row * (self.grid_size + 1) + col;
        self.vertical[idx] = present;
    }

    /// Roads around block `(x, y)`.
    pub fn cell_roads(&self, x: usize, y: usize) -> CellRoads {
        CellRoads {
            north: self.horizontal(y, x),
            south: self.horizontal(y + 1, x),
            west: self.vertical(y, x),
            east: self.vertical(y, x + 1),
        }
    }

    /// Present horizontal edges as `(row, col)`, row-major.
    pub fn horizontal_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.grid_size;
        (0..=n)
            .flat_map(move |y| (0..n).map(move |x| (y, x)))
            .filter(move |&(y, x)| self.horizontal(y, x))
    }

    /// Present vertical edges as `(row, col)`, row-major.
    pub fn vertical_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.grid_size;
        (0..n)
            .flat_map(move |y| (0..=n).map(move |x| (y, x)))
            .filter(move |&(y, x)| self.vertical(y, x))
    }

    /// Number of edge slots, present or not.
    pub fn total_edge_count(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn present_count(&self) -> usize {
        self.horizontal.iter().filter(|&&p| p).count() + self.vertical.iter().filter(|&&p| p).count()
    }

    pub fn missing_count(&self) -> usize {
        self.total_edge_count() - self.present_count()
    }

    /// Intersections joined to `(x, y)` by a present edge.
    pub fn neighbors(&self, (x, y): Intersection) -> Vec<Intersection> {
        let n = self.grid_size;
        let mut out = Vec::with_capacity(4);
        if x > 0 && self.horizontal(y, x - 1) {
            out.push((x - 1, y));
        }
        if x < n && self.horizontal(y, x) {
            out.push((x + 1, y));
        }
        if y > 0 && self.vertical(y - 1, x) {
            out.push((x, y - 1));
        }
        if y < n && self.vertical(y, x) {
            out.push((x, y + 1));
        }
        out
    }

    /// Every intersection reachable from `from` along present roads,
    /// including `from` itself, in breadth-first order.
    pub fn reachable_intersections(&self, from: Intersection) -> Vec<Intersection> {
        if from.0 > self.grid_size || from.1 > self.grid_size {
            return Vec::new();
        }
        bfs_reach(from, |&node| self.neighbors(node)).collect()
    }

    pub fn intersection_count(&self) -> usize {
        (self.grid_size + 1) * (self.grid_size + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(grid_size: usize, missing: f32, start: StartBlock) -> GridConfig {
        GridConfig {
            grid_size,
            missing_road_chance: missing,
            start_block: start,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_network_dimensions() {
        let net = RoadNetwork::full(3);
        assert_eq!(net.total_edge_count(), 4 * 3 + 3 * 4);
        assert_eq!(net.present_count(), 24);
        assert_eq!(net.missing_count(), 0);
        assert_eq!(net.intersection_count(), 16);
    }

    #[test]
    fn test_cell_roads_map_to_correct_edges() {
        let mut net = RoadNetwork::full(2);
        net.set_horizontal(1, 0, false); // south of (0,0), north of (0,1)
        net.set_vertical(0, 1, false); // east of (0,0), west of (1,0)

        let roads = net.cell_roads(0, 0);
        assert!(roads.north && roads.west);
        assert!(!roads.south && !roads.east);

        assert!(!net.cell_roads(0, 1).north);
        assert!(!net.cell_roads(1, 0).west);
        assert!(net.cell_roads(1, 1).north);
    }

    #[test]
    fn test_all_missing_keeps_only_forced_edges() {
        let start = StartBlock::new(1, 2);
        let mut rng = StdRng::seed_from_u64(7);
        let net = RoadNetwork::generate(&config(4, 1.0, start), &mut rng);
        for y in 0..=4 {
            for x in 0..4 {
                assert_eq!(net.horizontal(y, x), RoadNetwork::is_forced(start, y, x));
            }
        }
        for y in 0..4 {
            for x in 0..=4 {
                assert_eq!(net.vertical(y, x), RoadNetwork::is_forced(start, y, x));
            }
        }
    }

    #[test]
    fn test_neighbors_respect_missing_edges() {
        let mut net = RoadNetwork::full(2);
        assert_eq!(net.neighbors((1, 1)).len(), 4);
        assert_eq!(net.neighbors((0, 0)).len(), 2);
        net.set_horizontal(1, 0, false);
        assert_eq!(net.neighbors((1, 1)).len(), 3);
        assert!(!net.neighbors((1, 1)).contains(&(0, 1)));
    }

    #[test]
    fn test_reachable_full_network_covers_everything() {
        let net = RoadNetwork::full(3);
        let reach = net.reachable_intersections((0, 0));
        assert_eq!(reach.len(), net.intersection_count());
        assert_eq!(reach[0], (0, 0));
    }

    #[test]
    fn test_reachable_isolated_corner() {
        let mut net = RoadNetwork::full(1);
        // Cut both edges touching intersection (1,1).
        net.set_horizontal(1, 0, false);
        net.set_vertical(0, 1, false);
        let reach = net.reachable_intersections((1, 1));
        assert_eq!(reach, vec![(1, 1)]);
        assert_eq!(net.reachable_intersections((0, 0)).len(), 3);
    }

    #[test]
    fn test_reachable_out_of_bounds_is_empty() {
        let net = RoadNetwork::full(2);
        assert!(net.reachable_intersections((3, 0)).is_empty());
    }
}
