//! City generator parameters.
//!
//! `GridConfig` is a Bevy resource with demo defaults. A JSON override can be
//! supplied through the `CITYDRIVE_GRID_CONFIG` environment variable; fields
//! missing from the file keep their defaults.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::city_grid_error::CityGridError;
use crate::config::{
    DEFAULT_CELL_SIZE, DEFAULT_FIELD_CHANCE, DEFAULT_GRID_SIZE, DEFAULT_MISSING_ROAD_CHANCE,
    DEFAULT_ROAD_WIDTH, GRID_CONFIG_ENV, LANE_MARKER_SPACING, MAX_PRIMITIVES,
};

/// Block coordinate of the vehicle's starting block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartBlock {
    pub x: usize,
    pub y: usize,
}

impl StartBlock {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Blocks per side.
    pub grid_size: usize,
    /// Block edge length in world units.
    pub cell_size: f32,
    pub road_width: f32,
    /// Probability that a block is a field rather than a building.
    pub field_chance: f32,
    /// Probability that a non-forced road edge is left out.
    pub missing_road_chance: f32,
    pub start_block: StartBlock,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            road_width: DEFAULT_ROAD_WIDTH,
            field_chance: DEFAULT_FIELD_CHANCE,
            missing_road_chance: DEFAULT_MISSING_ROAD_CHANCE,
            start_block: StartBlock::default(),
        }
    }
}

impl GridConfig {
    /// Check every parameter against its valid range.
    pub fn validate(&self) -> Result<(), CityGridError> {
        if self.grid_size < 1 {
            return Err(CityGridError::invalid(
                "grid_size",
                format!("must be at least 1, got {}", self.grid_size),
            ));
        }
        check_positive("cell_size", self.cell_size)?;
        check_positive("road_width", self.road_width)?;
        check_probability("field_chance", self.field_chance)?;
        check_probability("missing_road_chance", self.missing_road_chance)?;

        let StartBlock { x, y } = self.start_block;
        if x >= self.grid_size || y >= self.grid_size {
            return Err(CityGridError::invalid(
                "start_block",
                format!(
                    "({x}, {y}) lies outside a {n}x{n} grid",
                    n = self.grid_size
                ),
            ));
        }
        self.check_primitive_budget()
    }

    /// Reject grids whose worst case (every road present) would exceed
    /// `MAX_PRIMITIVES`. Assumes sizes already passed their range checks.
    fn check_primitive_budget(&self) -> Result<(), CityGridError> {
        let n = self.grid_size;
        let within = |count: Option<usize>| count.filter(|&c| c <= MAX_PRIMITIVES);

        let parcels = within(n.checked_mul(n));
        let edges = within(
            n.checked_add(1)
                .and_then(|m| m.checked_mul(n))
                .and_then(|e| e.checked_mul(2)),
        );
        let (Some(parcels), Some(edges)) = (parcels, edges) else {
            return Err(CityGridError::invalid(
                "grid_size",
                format!("a {n}x{n} grid exceeds {MAX_PRIMITIVES} primitives"),
            ));
        };

        let markers = (self.cell_size / LANE_MARKER_SPACING).floor();
        let total = if markers > MAX_PRIMITIVES as f32 {
            None
        } else {
            (markers as usize + 1)
                .checked_mul(edges)
                .and_then(|roads| roads.checked_add(parcels))
                .and_then(|t| t.checked_add(4))
        };
        if within(total).is_none() {
            return Err(CityGridError::invalid(
                "cell_size",
                format!(
                    "{} needs more than {MAX_PRIMITIVES} primitives on a {n}x{n} grid",
                    self.cell_size
                ),
            ));
        }
        Ok(())
    }

    /// Total edge length of the grid in world units.
    pub fn extent(&self) -> f32 {
        self.cell_size * self.grid_size as f32
    }

    pub fn from_json_str(json: &str) -> Result<Self, CityGridError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CityGridError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load the override named by `CITYDRIVE_GRID_CONFIG`, if the variable is set.
    pub fn from_env() -> Result<Option<Self>, CityGridError> {
        match std::env::var_os(GRID_CONFIG_ENV) {
            Some(path) => Self::load_from_file(path).map(Some),
            None => Ok(None),
        }
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), CityGridError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CityGridError::invalid(
            field,
            format!("must be a positive finite number, got {value}"),
        ))
    }
}

fn check_probability(field: &'static str, value: f32) -> Result<(), CityGridError> {
    // NaN fails the range check as well.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CityGridError::invalid(
            field,
            format!("must lie in [0, 1], got {value}"),
        ))
    }
}
