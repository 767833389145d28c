use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod overlay;
pub mod speedometer;
pub mod theme;

use simulation::vehicle::DriveSet;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_hud_theme)
            .add_systems(
                Update,
                (overlay::windshield_overlay_ui, speedometer::speedometer_ui)
                    .chain()
                    .after(DriveSet::Tick),
            );
    }
}
