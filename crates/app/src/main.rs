use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::PresentMode;
use bevy::winit::WinitSettings;

use simulation::input_state::InputState;
use simulation::vehicle::DriveSet;

/// Set to a file path to drive forward briefly, save one frame there and exit.
const SCREENSHOT_ENV: &str = "CITYDRIVE_SCREENSHOT";

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "CityDrive".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    // The vehicle ticks once per frame, so keep frames coming without input.
    .insert_resource(WinitSettings::game())
    .add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    if let Ok(path) = std::env::var(SCREENSHOT_ENV) {
        info!("Screenshot mode: writing {}", path);
        app.insert_resource(ScreenshotRun { frame: 0, path })
            .add_systems(
                Update,
                drive_screenshot
                    .in_set(DriveSet::Input)
                    .after(rendering::input::sample_keyboard),
            );
    }

    app.run();
}

#[derive(Resource)]
struct ScreenshotRun {
    frame: u32,
    path: String,
}

const WARMUP_FRAMES: u32 = 90;
const SHOT_FRAME: u32 = 120;
const EXIT_FRAME: u32 = 140;

fn drive_screenshot(
    mut commands: Commands,
    mut run: ResMut<ScreenshotRun>,
    mut input: ResMut<InputState>,
    mut exit: EventWriter<AppExit>,
) {
    run.frame += 1;

    // Roll forward out of the start intersection, then coast for the shot.
    *input = if run.frame < WARMUP_FRAMES {
        InputState::forward()
    } else {
        InputState::IDLE
    };

    if run.frame == SHOT_FRAME {
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(run.path.clone()));
    } else if run.frame > EXIT_FRAME {
        exit.send(AppExit::Success);
    }
}
