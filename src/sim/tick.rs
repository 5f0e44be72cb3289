//! Frame step
//!
//! Advances a session by exactly one animation frame and describes what to
//! draw. Order within a frame is fixed: input actions, held touch controls,
//! physics, terrain, collision, then the state-dependent layers.

use super::collision::ship_terrain_collision;
use super::draw::DrawList;
use super::noise::HeightField;
use super::scene;
use super::state::{Direction, GameSession, LifecycleState};
use super::terrain::draw_terrain;

/// A discrete input, independent of where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start the first run or restart after a crash (ignored while flying)
    Start,
    /// One speed increment in a direction (a key press)
    Nudge(Direction),
    /// A touch control went down; it nudges every frame while held
    PressControl(Direction),
    /// All touches lifted
    ReleaseControls,
}

/// Inputs gathered since the previous frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub actions: Vec<Action>,
}

impl FrameInput {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Apply one action to the session
pub fn apply_action(session: &mut GameSession, action: Action) {
    match action {
        Action::Start => start(session),
        Action::Nudge(direction) => nudge(session, direction),
        Action::PressControl(direction) => session.touch.set(direction, true),
        Action::ReleaseControls => session.touch.clear(),
    }
}

/// Start/Restart: only takes effect when not already flying
pub fn start(session: &mut GameSession) {
    if session.state == LifecycleState::Flying {
        return;
    }
    let from = session.state;
    session.reset_run();
    log::info!(
        "{} -> Flying (world offset {:.2})",
        from.as_str(),
        session.world_offset
    );
}

/// One bounded speed increment; speed persists until countered
pub fn nudge(session: &mut GameSession, direction: Direction) {
    let t = &session.tuning;
    match direction {
        Direction::Right => {
            session.x_speed = (session.x_speed + t.x_nudge).clamp(-t.x_max_speed, t.x_max_speed)
        }
        Direction::Left => {
            session.x_speed = (session.x_speed - t.x_nudge).clamp(-t.x_max_speed, t.x_max_speed)
        }
        Direction::Down => {
            session.y_speed = (session.y_speed + t.y_nudge).clamp(-t.y_max_speed, t.y_max_speed)
        }
        Direction::Up => {
            session.y_speed = (session.y_speed - t.y_nudge).clamp(-t.y_max_speed, t.y_max_speed)
        }
    }
}

/// Scroll and move vertically, then hold the ship at the floor
fn integrate(session: &mut GameSession) {
    session.world_offset += session.x_speed;
    session.ship_y += session.y_speed;

    if session.ship_y < session.tuning.floor_y {
        session.ship_y = session.tuning.floor_y;
        session.y_speed = 0.0;
    }
}

/// Advance the session by one frame and describe what to draw
pub fn step<F: HeightField + ?Sized>(
    session: &mut GameSession,
    field: &F,
    input: &FrameInput,
) -> DrawList {
    for action in &input.actions {
        apply_action(session, *action);
    }
    let held: Vec<Direction> = session.touch.held().collect();
    for direction in held {
        nudge(session, direction);
    }

    session.frame_count += 1;
    integrate(session);

    let viewport = session.viewport;
    let mut list = DrawList::with_capacity(viewport.columns() as usize * 2 + 16);
    scene::draw_background(&mut list, viewport);

    if session.state.shows_terrain() {
        draw_terrain(
            &mut list,
            field,
            session.world_offset,
            viewport,
            session.tuning.zoom,
        );
    }

    // Armed in every state; only a flying ship explodes
    let collision = ship_terrain_collision(session, field);
    if collision.hit {
        session.x_speed = 0.0;
        session.y_speed = 0.0;
        if session.state == LifecycleState::Flying {
            session.state = LifecycleState::Exploding;
            log::info!(
                "Flying -> Exploding (column {:?}, world offset {:.2})",
                collision.column,
                session.world_offset
            );
        }
    }

    match session.state {
        LifecycleState::Title => scene::draw_title(&mut list, session),
        LifecycleState::Flying => {
            scene::draw_ship(&mut list, session);
            if let Some(layout) = session.input_mode.control_layout() {
                scene::draw_touch_controls(&mut list, &layout, viewport);
            }
        }
        LifecycleState::Exploding => {
            if session.explosion_timer < session.tuning.explosion_visible {
                scene::draw_explosion(&mut list, session);
            }
            session.explosion_timer += session.tuning.explosion_step;
            if session.explosion_timer >= session.tuning.explosion_duration {
                session.state = LifecycleState::GameOver;
                log::info!(
                    "Exploding -> GameOver (timer {})",
                    session.explosion_timer
                );
            }
        }
        LifecycleState::GameOver => scene::draw_game_over(&mut list, session),
    }

    list
}
