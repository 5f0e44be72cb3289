//! Keyboard and touch mapping

use glam::Vec2;

use crate::settings::{ControlLayout, InputMode, Viewport};
use crate::sim::{Action, Direction};

/// Map a `KeyboardEvent.code` to an action; unknown codes map to nothing
pub fn key_action(code: &str) -> Option<Action> {
    match code {
        "Space" => Some(Action::Start),
        "ArrowLeft" => Some(Action::Nudge(Direction::Left)),
        "ArrowRight" => Some(Action::Nudge(Direction::Right)),
        "ArrowUp" => Some(Action::Nudge(Direction::Up)),
        "ArrowDown" => Some(Action::Nudge(Direction::Down)),
        _ => None,
    }
}

/// Which control (if any) a touch at `point` presses
///
/// Horizontal controls are checked before vertical ones; the layouts never
/// overlap, so at most one control can match anyway.
pub fn hit_test(layout: &ControlLayout, viewport: Viewport, point: Vec2) -> Option<Direction> {
    [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ]
    .into_iter()
    .find(|d| layout.center(*d, viewport).distance(point) < layout.hit_radius)
}

/// Actions for a touch-start event carrying `touches` (page coordinates)
///
/// Any touch starts or restarts the game; only the first touch point is
/// hit-tested against the pad.
pub fn touch_start_actions(mode: InputMode, viewport: Viewport, touches: &[Vec2]) -> Vec<Action> {
    let Some(first) = touches.first() else {
        return Vec::new();
    };
    let mut actions = vec![Action::Start];
    if let Some(layout) = mode.control_layout() {
        if let Some(direction) = hit_test(&layout, viewport, *first) {
            actions.push(Action::PressControl(direction));
        }
    }
    actions
}

/// Lifting any touch releases every control
pub fn touch_end_actions() -> [Action; 1] {
    [Action::ReleaseControls]
}
