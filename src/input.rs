/// Logical controls the movement step understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
}

/// Latched key state. Written by key handlers, read once per tick.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct InputFlags {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl InputFlags {
    pub fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::MoveForward => self.forward = pressed,
            Action::MoveBackward => self.backward = pressed,
            Action::TurnLeft => self.turn_left = pressed,
            Action::TurnRight => self.turn_right = pressed,
        }
    }

    /// -1, 0 or 1 along the facing direction.
    pub fn thrust(&self) -> f64 {
        (self.forward as i8 - self.backward as i8) as f64
    }

    /// -1, 0 or 1; positive turns clockwise on screen (y grows downward).
    pub fn turn(&self) -> f64 {
        (self.turn_right as i8 - self.turn_left as i8) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let mut input = InputFlags::default();
        input.set(Action::MoveForward, true);
        assert_eq!(input.thrust(), 1.0);
        input.set(Action::MoveBackward, true);
        assert_eq!(input.thrust(), 0.0);
        input.set(Action::MoveForward, false);
        assert_eq!(input.thrust(), -1.0);

        input.set(Action::TurnLeft, true);
        assert_eq!(input.turn(), -1.0);
        input.set(Action::TurnRight, true);
        assert_eq!(input.turn(), 0.0);
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut input = InputFlags::default();
        input.set(Action::TurnRight, true);
        input.set(Action::TurnRight, true);
        input.set(Action::TurnRight, false);
        assert_eq!(input, InputFlags::default());
    }
}
