use bevy_egui::{egui, EguiContexts};

/// Translucent dark HUD panels with light text.
pub fn apply_hud_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgba_unmultiplied(20, 22, 30, 170);
    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.override_text_color = Some(egui::Color32::from_rgb(235, 238, 245));
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.window_stroke = egui::Stroke::NONE;

    ctx.set_style(style);
}
