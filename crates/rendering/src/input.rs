//! Keyboard to `InputState`, sampled once per frame before the vehicle tick.

use bevy::prelude::*;

use simulation::input_state::InputState;

/// Keys held for each driving control. Any key in a list activates it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DriveBindings {
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub forward: Vec<KeyCode>,
    pub reverse: Vec<KeyCode>,
}

impl Default for DriveBindings {
    fn default() -> Self {
        Self {
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
            forward: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            reverse: vec![KeyCode::KeyS, KeyCode::ArrowDown],
        }
    }
}

impl DriveBindings {
    pub fn sample(&self, keys: &ButtonInput<KeyCode>) -> InputState {
        InputState {
            left: keys.any_pressed(self.left.iter().copied()),
            right: keys.any_pressed(self.right.iter().copied()),
            forward: keys.any_pressed(self.forward.iter().copied()),
            reverse: keys.any_pressed(self.reverse.iter().copied()),
        }
    }
}

pub fn sample_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<DriveBindings>,
    mut input: ResMut<InputState>,
) {
    let sampled = bindings.sample(&keys);
    if *input != sampled {
        *input = sampled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keys_is_idle() {
        let keys = ButtonInput::<KeyCode>::default();
        assert_eq!(DriveBindings::default().sample(&keys), InputState::IDLE);
    }

    #[test]
    fn test_letters_and_arrows_both_drive() {
        let bindings = DriveBindings::default();

        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::ArrowLeft);
        assert_eq!(bindings.sample(&keys), InputState::forward().with_left());

        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ArrowDown);
        keys.press(KeyCode::KeyD);
        assert_eq!(bindings.sample(&keys), InputState::reverse().with_right());
    }

    #[test]
    fn test_released_key_stops_control() {
        let bindings = DriveBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        keys.release(KeyCode::KeyW);
        assert_eq!(bindings.sample(&keys), InputState::IDLE);
    }

    #[test]
    fn test_rebinding_replaces_defaults() {
        let bindings = DriveBindings {
            forward: vec![KeyCode::Space],
            ..Default::default()
        };
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        assert!(!bindings.sample(&keys).forward);
        keys.press(KeyCode::Space);
        assert!(bindings.sample(&keys).forward);
    }
}
