//! Windshield overlay: a translucent dark band across the top of the screen
//! whose lower edge sags in a quadratic curve toward the middle, like the
//! roof line seen from the driver's seat.

use bevy_egui::{egui, EguiContexts};

/// How far the curve's control point sits below the top edge, in points.
/// The curve itself dips to half of this at the center.
pub const OVERLAY_SAG: f32 = 80.0;
pub const OVERLAY_ALPHA: u8 = 102;
const SEGMENTS: usize = 32;

/// Outline of the overlay for a screen `width` wide, starting at the
/// top-left corner and ending at the top-right corner.
pub fn overlay_outline(left: f32, top: f32, width: f32, segments: usize) -> Vec<egui::Pos2> {
    let p0 = egui::pos2(left, top);
    let control = egui::pos2(left + width / 2.0, top + OVERLAY_SAG);
    let p2 = egui::pos2(left + width, top);

    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            let x = u * u * p0.x + 2.0 * u * t * control.x + t * t * p2.x;
            let y = u * u * p0.y + 2.0 * u * t * control.y + t * t * p2.y;
            egui::pos2(x, y)
        })
        .collect()
}

pub fn windshield_overlay_ui(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("windshield_overlay"),
    ));

    painter.add(egui::Shape::convex_polygon(
        overlay_outline(screen.left(), screen.top(), screen.width(), SEGMENTS),
        egui::Color32::from_black_alpha(OVERLAY_ALPHA),
        egui::Stroke::NONE,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_spans_full_width() {
        let pts = overlay_outline(0.0, 0.0, 1280.0, 32);
        assert_eq!(pts.len(), 33);
        assert_eq!(pts[0], egui::pos2(0.0, 0.0));
        assert_eq!(pts[32], egui::pos2(1280.0, 0.0));
    }

    #[test]
    fn test_outline_dips_to_half_sag_at_center() {
        let pts = overlay_outline(0.0, 0.0, 1000.0, 32);
        let mid = pts[16];
        assert!((mid.x - 500.0).abs() < 1e-3);
        assert!((mid.y - OVERLAY_SAG / 2.0).abs() < 1e-3);
        assert!(pts.iter().all(|p| p.y >= 0.0 && p.y <= OVERLAY_SAG / 2.0 + 1e-3));
    }

    #[test]
    fn test_outline_with_zero_segments_is_a_line() {
        let pts = overlay_outline(10.0, 5.0, 100.0, 0);
        assert_eq!(pts, vec![egui::pos2(10.0, 5.0), egui::pos2(110.0, 5.0)]);
    }
}
