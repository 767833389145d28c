//! Output unit of the city generator: a colored axis-aligned box.

use bevy::prelude::*;

/// Orientation of a road edge. Horizontal roads run along X, vertical along Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    RoadSurface { axis: RoadAxis },
    LaneMarker { axis: RoadAxis },
    Building,
    Field,
    Wall,
}

impl PrimitiveKind {
    pub fn is_road_surface(self) -> bool {
        matches!(self, PrimitiveKind::RoadSurface { .. })
    }

    pub fn is_lane_marker(self) -> bool {
        matches!(self, PrimitiveKind::LaneMarker { .. })
    }

    /// Buildings and fields: exactly one per block.
    pub fn is_parcel(self) -> bool {
        matches!(self, PrimitiveKind::Building | PrimitiveKind::Field)
    }
}

/// A box of `size` centered at `center` (world space, Y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPrimitive {
    pub kind: PrimitiveKind,
    pub size: Vec3,
    pub center: Vec3,
    pub color: Color,
}

impl PlacedPrimitive {
    pub fn new(kind: PrimitiveKind, size: Vec3, center: Vec3, color: Color) -> Self {
        Self {
            kind,
            size,
            center,
            color,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size / 2.0
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size / 2.0
    }
}

/// `0xRRGGBB` to an sRGB color.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8(
        ((rgb >> 16) & 0xff) as u8,
        ((rgb >> 8) & 0xff) as u8,
        (rgb & 0xff) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_channels() {
        assert_eq!(hex_color(0xffff00), Color::srgb_u8(255, 255, 0));
        assert_eq!(hex_color(0x111111), Color::srgb_u8(17, 17, 17));
    }

    #[test]
    fn test_bounds_from_center_and_size() {
        let p = PlacedPrimitive::new(
            PrimitiveKind::Wall,
            Vec3::new(2.0, 6.0, 4.0),
            Vec3::new(1.0, 3.0, -1.0),
            Color::WHITE,
        );
        assert_eq!(p.min(), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(p.max(), Vec3::new(2.0, 6.0, 1.0));
    }

    #[test]
    fn test_kind_classification() {
        assert!(PrimitiveKind::Field.is_parcel());
        assert!(PrimitiveKind::Building.is_parcel());
        assert!(!PrimitiveKind::Wall.is_parcel());
        assert!(PrimitiveKind::RoadSurface {
            axis: RoadAxis::Vertical
        }
        .is_road_surface());
        assert!(PrimitiveKind::LaneMarker {
            axis: RoadAxis::Horizontal
        }
        .is_lane_marker());
    }
}
