//! Keyboard and virtual joystick mapping

use glam::Vec2;

use crate::sim::{Command, Direction};

/// What a key press means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
}

/// Map a `KeyboardEvent.key` value. Letters are case-insensitive.
pub fn map_key(key: &str) -> Option<KeyAction> {
    let action = match key {
        "ArrowUp" => KeyAction::Steer(Direction::Up),
        "ArrowDown" => KeyAction::Steer(Direction::Down),
        "ArrowLeft" => KeyAction::Steer(Direction::Left),
        "ArrowRight" => KeyAction::Steer(Direction::Right),
        "Enter" | " " => KeyAction::Restart,
        _ => match key.to_lowercase().as_str() {
            "w" => KeyAction::Steer(Direction::Up),
            "s" => KeyAction::Steer(Direction::Down),
            "a" => KeyAction::Steer(Direction::Left),
            "d" => KeyAction::Steer(Direction::Right),
            "r" => KeyAction::Restart,
            _ => return None,
        },
    };
    Some(action)
}

impl From<KeyAction> for Command {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::Steer(dir) => Command::Steer(dir),
            KeyAction::Restart => Command::Restart,
        }
    }
}

/// Virtual analog stick snapped to four directions.
///
/// Emits a command only when the snapped direction changes, or a halt when
/// the thumb returns to the dead zone or is released.
#[derive(Debug, Clone, Default)]
pub struct Joystick {
    /// Pointer currently driving the stick
    pub pointer_id: Option<i32>,
    direction: Option<Direction>,
    /// Thumb offset from the base centre, clamped to the base radius
    pub thumb: Vec2,
    dead_zone: f32,
}

impl Joystick {
    /// `dead_zone` is a fraction of the base radius
    pub fn new(dead_zone: f32) -> Self {
        Self {
            dead_zone,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.pointer_id.is_some()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Start tracking a pointer
    pub fn press(&mut self, pointer_id: i32, offset: Vec2, radius: f32) -> Option<Command> {
        self.pointer_id = Some(pointer_id);
        self.sample(offset, radius)
    }

    /// Pointer moved. Offsets from other pointers are ignored.
    pub fn drag(&mut self, pointer_id: i32, offset: Vec2, radius: f32) -> Option<Command> {
        if self.pointer_id != Some(pointer_id) {
            return None;
        }
        self.sample(offset, radius)
    }

    /// Pointer lifted, cancelled or left the base
    pub fn release(&mut self, pointer_id: i32) -> Option<Command> {
        if self.pointer_id != Some(pointer_id) {
            return None;
        }
        self.reset();
        Some(Command::Halt)
    }

    /// Forget everything (touch controls hidden, run restarted)
    pub fn reset(&mut self) {
        self.pointer_id = None;
        self.direction = None;
        self.thumb = Vec2::ZERO;
    }

    /// `offset` is the pointer position relative to the base centre
    fn sample(&mut self, offset: Vec2, radius: f32) -> Option<Command> {
        let distance = offset.length();
        let clamped = distance.min(radius);
        self.thumb = if distance > 0.0 {
            offset / distance * clamped
        } else {
            Vec2::ZERO
        };

        if clamped <= radius * self.dead_zone {
            return self.direction.take().map(|_| Command::Halt);
        }

        let next = snap(offset);
        if self.direction == Some(next) {
            return None;
        }
        self.direction = Some(next);
        Some(Command::Steer(next))
    }
}

/// Dominant axis wins; ties go vertical. Screen y grows downward.
fn snap(offset: Vec2) -> Direction {
    if offset.x.abs() > offset.y.abs() {
        if offset.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if offset.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key("ArrowUp"), Some(KeyAction::Steer(Direction::Up)));
        assert_eq!(map_key("a"), Some(KeyAction::Steer(Direction::Left)));
        assert_eq!(map_key("D"), Some(KeyAction::Steer(Direction::Right)));
        assert_eq!(map_key("S"), Some(KeyAction::Steer(Direction::Down)));
        assert_eq!(map_key("R"), Some(KeyAction::Restart));
        assert_eq!(map_key(" "), Some(KeyAction::Restart));
        assert_eq!(map_key("Enter"), Some(KeyAction::Restart));
        assert_eq!(map_key("q"), None);
        assert_eq!(map_key("Escape"), None);
    }

    #[test]
    fn test_joystick_dead_zone() {
        let mut js = Joystick::new(0.28);
        // 50px radius: dead zone is 14px
        assert_eq!(js.press(1, Vec2::new(10.0, 0.0), 50.0), None);
        assert_eq!(js.direction(), None);
        assert_eq!(
            js.drag(1, Vec2::new(20.0, 5.0), 50.0),
            Some(Command::Steer(Direction::Right))
        );
        // Same snapped direction: nothing new
        assert_eq!(js.drag(1, Vec2::new(30.0, -10.0), 50.0), None);
        // Back into the dead zone halts once
        assert_eq!(js.drag(1, Vec2::new(3.0, 3.0), 50.0), Some(Command::Halt));
        assert_eq!(js.drag(1, Vec2::new(2.0, 2.0), 50.0), None);
    }

    #[test]
    fn test_joystick_snapping() {
        let mut js = Joystick::new(0.28);
        assert_eq!(
            js.press(7, Vec2::new(-5.0, -40.0), 50.0),
            Some(Command::Steer(Direction::Up))
        );
        assert_eq!(
            js.drag(7, Vec2::new(-40.0, 10.0), 50.0),
            Some(Command::Steer(Direction::Left))
        );
        // Tie goes vertical
        assert_eq!(
            js.drag(7, Vec2::new(30.0, 30.0), 50.0),
            Some(Command::Steer(Direction::Down))
        );
    }

    #[test]
    fn test_joystick_thumb_clamped() {
        let mut js = Joystick::new(0.28);
        js.press(1, Vec2::new(300.0, 400.0), 50.0);
        assert!((js.thumb - Vec2::new(30.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn test_joystick_foreign_pointer_and_release() {
        let mut js = Joystick::new(0.28);
        js.press(1, Vec2::new(40.0, 0.0), 50.0);
        assert_eq!(js.drag(2, Vec2::new(0.0, 40.0), 50.0), None);
        assert_eq!(js.release(2), None);
        assert_eq!(js.release(1), Some(Command::Halt));
        assert!(!js.is_active());
        assert_eq!(js.thumb, Vec2::ZERO);
    }
}
