//! State-dependent scene layers
//!
//! Everything drawn on top of (or instead of) the terrain: the ship, the
//! explosion, the touch pad and the title/game-over overlays.

use glam::Vec2;

use super::draw::{Color, DrawList, palette};
use super::state::{Direction, GameSession};
use crate::settings::{ControlLayout, Viewport};

pub const TITLE: &str = "POOR MAN'S SKY";
pub const GAME_OVER: &str = "GAME OVER";

/// Sky fill behind everything
pub fn draw_background(list: &mut DrawList, viewport: Viewport) {
    list.fill_rect(
        Vec2::ZERO,
        Vec2::new(viewport.width, viewport.height),
        palette::SKY,
    );
}

/// Ship body plus exhaust flame, nose pointing along the scroll direction
pub fn draw_ship(list: &mut DrawList, session: &GameSession) {
    let m = session.viewport.middle();
    let y = session.ship_y as f32;
    let w = session.ship.width;
    let h = session.ship.height;
    let dir = if session.x_speed < 0.0 { -1.0 } else { 1.0 };

    // Flame trails behind the body, flickering through 12 hues
    let flame_hue = 20.0 + (session.frame_count % 12) as f32 * 2.0;
    list.fill_triangle(
        Vec2::new(m + (w / 2.0 + 5.0) * -dir, y - h / 4.0),
        Vec2::new(m + (w + w / 4.0) * -dir, y),
        Vec2::new(m + (w / 2.0 + 5.0) * -dir, y + h / 4.0),
        Color::hsl(flame_hue, 100.0, 50.0),
    );

    list.fill_triangle(
        Vec2::new(m - w / 2.0 * dir, y - h / 2.0),
        Vec2::new(m + w / 2.0 * dir, y),
        Vec2::new(m - w / 2.0 * dir, y + h / 2.0),
        palette::SHIP_BODY,
    );
}

/// Three concentric circles growing with the explosion timer
pub fn draw_explosion(list: &mut DrawList, session: &GameSession) {
    let center = Vec2::new(session.viewport.middle(), session.ship_y as f32);
    let t = session.explosion_timer as f32;
    let w = session.ship.width;

    for ring in 0..3 {
        let inset = ring as f32 * 10.0;
        list.fill_circle(
            center,
            w - inset + t,
            Color::hsl(inset + t / 2.0, 100.0, 50.0),
        );
    }
}

fn unit(direction: Direction) -> Vec2 {
    match direction {
        Direction::Left => Vec2::NEG_X,
        Direction::Right => Vec2::X,
        Direction::Up => Vec2::NEG_Y,
        Direction::Down => Vec2::Y,
    }
}

/// On-screen directional pad with arrow glyphs
pub fn draw_touch_controls(list: &mut DrawList, layout: &ControlLayout, viewport: Viewport) {
    let r = layout.pad_radius;
    for direction in Direction::ALL {
        list.fill_circle(layout.center(direction, viewport), r, palette::CONTROL_PAD);
    }
    for direction in Direction::ALL {
        let c = layout.center(direction, viewport);
        let along = unit(direction);
        let across = along.perp() * (0.6 * r);
        let base = c - along * (0.5 * r);
        list.fill_triangle(
            base + across,
            base - across,
            c + along * (0.7 * r),
            palette::CONTROL_ARROW,
        );
    }
}

/// Black screen with a cycling headline, a prompt and a controls hint
fn draw_overlay(list: &mut DrawList, session: &GameSession, headline: &str, size_pt: f32, prompt: &str) {
    let viewport = session.viewport;
    let m = viewport.middle();
    let mid_y = viewport.height / 2.0;
    let cycle = (session.frame_count % 25) as f32;

    list.fill_rect(
        Vec2::ZERO,
        Vec2::new(viewport.width, viewport.height),
        palette::OVERLAY,
    );
    list.text(
        headline,
        Vec2::new(m, mid_y - 50.0),
        size_pt,
        Color::hsl(cycle, 100.0, 50.0),
    );
    list.text(
        prompt,
        Vec2::new(m, mid_y + 50.0),
        48.0,
        Color::hsl(20.0 + cycle, 100.0, 50.0),
    );
    list.text(
        session.input_mode.controls_hint(),
        Vec2::new(m, mid_y + 125.0),
        28.0,
        palette::HINT_TEXT,
    );
}

pub fn draw_title(list: &mut DrawList, session: &GameSession) {
    let prompt = format!("{} to Start", session.input_mode.start_verb());
    draw_overlay(list, session, TITLE, 76.0, &prompt);
}

pub fn draw_game_over(list: &mut DrawList, session: &GameSession) {
    let prompt = format!("{} to Restart", session.input_mode.start_verb());
    draw_overlay(list, session, GAME_OVER, 100.0, &prompt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::InputMode;
    use crate::sim::draw::DrawCommand;

    fn session(mode: InputMode) -> GameSession {
        GameSession::with_defaults(Viewport::new(800.0, 600.0), mode, 5)
    }

    fn triangles(list: &DrawList) -> Vec<[Vec2; 3]> {
        list.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillTriangle { points, .. } => Some(*points),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_ship_nose_follows_speed_sign() {
        let mut s = session(InputMode::Keyboard);
        let mut list = DrawList::default();
        draw_ship(&mut list, &s);
        let body = triangles(&list)[1];
        assert_eq!(body[1].x, 425.0); // nose right of centre

        s.x_speed = -0.1;
        let mut list = DrawList::default();
        draw_ship(&mut list, &s);
        let tris = triangles(&list);
        assert_eq!(tris[1][1].x, 375.0); // nose left of centre
        assert!(tris[0][1].x > 400.0); // flame behind, on the right
    }

    #[test]
    fn test_flame_hue_cycles_every_12_frames() {
        let mut s = session(InputMode::Keyboard);
        let hue = |s: &GameSession| {
            let mut list = DrawList::default();
            draw_ship(&mut list, s);
            match &list.commands[0] {
                DrawCommand::FillTriangle {
                    color: Color::Hsl { h, .. },
                    ..
                } => *h,
                other => panic!("unexpected {other:?}"),
            }
        };
        s.frame_count = 3;
        let a = hue(&s);
        s.frame_count = 15;
        assert_eq!(a, hue(&s));
        assert_eq!(a, 26.0);
    }

    #[test]
    fn test_explosion_rings() {
        let mut s = session(InputMode::Keyboard);
        s.explosion_timer = 20;
        let mut list = DrawList::default();
        draw_explosion(&mut list, &s);
        let radii: Vec<f32> = list
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::FillCircle { radius, .. } => *radius,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(radii, vec![70.0, 60.0, 50.0]);
    }

    #[test]
    fn test_touch_pad_draws_four_controls() {
        let mut list = DrawList::default();
        draw_touch_controls(&mut list, &ControlLayout::FAR, Viewport::new(800.0, 600.0));
        let circles = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(circles, 4);
        assert_eq!(triangles(&list).len(), 4);
    }

    #[test]
    fn test_up_arrow_points_up() {
        let mut list = DrawList::default();
        let viewport = Viewport::new(800.0, 600.0);
        draw_touch_controls(&mut list, &ControlLayout::FAR, viewport);
        let up = triangles(&list)[2];
        let center = ControlLayout::FAR.center(Direction::Up, viewport);
        assert!((up[2].y - (center.y - 35.0)).abs() < 1e-4);
        assert!((up[0].y - (center.y + 25.0)).abs() < 1e-4);
    }

    #[test]
    fn test_overlay_texts_follow_input_mode() {
        let s = session(InputMode::TouchNear);
        let mut list = DrawList::default();
        draw_game_over(&mut list, &s);
        let texts: Vec<&str> = list.texts().map(|(t, ..)| t).collect();
        assert_eq!(texts, vec![GAME_OVER, "Tap to Restart", "Use the pad to fly around"]);

        let s = session(InputMode::Keyboard);
        let mut list = DrawList::default();
        draw_title(&mut list, &s);
        let texts: Vec<&str> = list.texts().map(|(t, ..)| t).collect();
        assert_eq!(texts[0], TITLE);
        assert_eq!(texts[1], "Press Space to Start");
    }
}
