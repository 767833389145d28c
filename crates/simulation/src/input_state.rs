use bevy::prelude::*;

/// Per-frame snapshot of the driving controls.
///
/// The host samples its input devices into this resource once per frame;
/// the vehicle tick reads it and never touches input devices itself.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub reverse: bool,
}

impl InputState {
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        forward: false,
        reverse: false,
    };

    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Self::IDLE
        }
    }

    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Self::IDLE
        }
    }

    pub fn with_left(mut self) -> Self {
        self.left = true;
        self
    }

    pub fn with_right(mut self) -> Self {
        self.right = true;
        self
    }

    pub fn with_forward(mut self) -> Self {
        self.forward = true;
        self
    }

    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}
