use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::vehicle::VehicleMotionModel;

pub fn speed_label(readout: i32) -> String {
    format!("Speed: {}", readout)
}

/// Speed readout pinned to the bottom-right corner.
pub fn speedometer_ui(mut contexts: EguiContexts, vehicle: Res<VehicleMotionModel>) {
    let label = speed_label(vehicle.speed_readout());
    let ctx = contexts.ctx_mut();

    egui::Area::new(egui::Id::new("speedometer"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
        .interactable(false)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(ui.visuals().window_fill)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(label).monospace().strong().size(22.0));
                });
        });
}
