//! Scene composition: background, obstacles, body and mode overlays

use glam::Vec2;

use super::{Color, Font, Paint, Rect, Surface};
use crate::sim::{Body, GameSession, Mode, Obstacle};

/// Palette
const SKY_TOP: Color = Color::hex(0x87CEEB);
const SKY_BOTTOM: Color = Color::hex(0xB0E2FF);
const GROUND: Color = Color::hex(0x90EE90);
const GROUND_STRIPE: Color = Color::hex(0x7CCD7C);
const PIPE: Color = Color::hex(0x228B22);
const PIPE_EDGE: Color = Color::hex(0x1A6B1A);
const PIPE_CAP: Color = Color::hex(0x32CD32);
const BIRD: Color = Color::hex(0xFFD700);
const BEAK: Color = Color::hex(0xFF6347);
const GAME_OVER: Color = Color::hex(0xFF6347);

/// Fraction of the canvas height covered by sky
const HORIZON: f32 = 0.7;
const STRIPE_SPACING: f32 = 20.0;
const STRIPE_WIDTH: f32 = 10.0;
const CAP_HEIGHT: f32 = 20.0;
const CAP_OVERHANG: f32 = 5.0;
const PIPE_LINE_WIDTH: f32 = 3.0;

/// Draw the whole frame for the current mode
pub fn draw_scene<S: Surface + ?Sized>(session: &GameSession, surface: &mut S) {
    let settings = session.settings();
    let (w, h) = (settings.canvas_width, settings.canvas_height);

    surface.clear(w, h);
    draw_background(surface, w, h);

    match session.mode() {
        Mode::Playing => {
            draw_obstacles(surface, session.obstacles.as_slice(), h);
            draw_body(surface, &session.body);
        }
        Mode::AwaitingStart => {
            draw_body(surface, &session.body);
            draw_start_overlay(surface, w, h);
        }
        Mode::Over => {
            draw_obstacles(surface, session.obstacles.as_slice(), h);
            draw_body(surface, &session.body);
            draw_game_over_overlay(surface, w, h, session.score(), session.pending_best());
        }
    }
}

pub fn draw_background<S: Surface + ?Sized>(surface: &mut S, w: f32, h: f32) {
    let horizon = h * HORIZON;

    surface.fill_rect(
        Rect::new(0.0, 0.0, w, horizon),
        &Paint::VerticalGradient {
            y0: 0.0,
            y1: horizon,
            top: SKY_TOP,
            bottom: SKY_BOTTOM,
        },
    );

    surface.fill_rect(Rect::new(0.0, horizon, w, h - horizon), &GROUND.into());

    let stripe = Paint::Solid(GROUND_STRIPE);
    let mut x = 0.0;
    while x < w {
        surface.fill_rect(Rect::new(x, horizon, STRIPE_WIDTH, h - horizon), &stripe);
        x += STRIPE_SPACING;
    }
}

pub fn draw_obstacles<S: Surface + ?Sized>(surface: &mut S, obstacles: &[Obstacle], h: f32) {
    let pipe = Paint::Solid(PIPE);
    let cap = Paint::Solid(PIPE_CAP);

    for o in obstacles {
        // Top segment with its cap hanging at the gap
        let top = Rect::new(o.x, 0.0, o.width, o.top_height);
        surface.fill_rect(top, &pipe);
        surface.stroke_rect(top, PIPE_EDGE, PIPE_LINE_WIDTH);

        let top_cap = Rect::new(
            o.x - CAP_OVERHANG,
            o.top_height - CAP_HEIGHT,
            o.width + CAP_OVERHANG * 2.0,
            CAP_HEIGHT,
        );
        surface.fill_rect(top_cap, &cap);
        surface.stroke_rect(top_cap, PIPE_EDGE, PIPE_LINE_WIDTH);

        // Bottom segment down to the canvas edge
        let bottom = Rect::new(o.x, o.bottom_y, o.width, h - o.bottom_y);
        surface.fill_rect(bottom, &pipe);
        surface.stroke_rect(bottom, PIPE_EDGE, PIPE_LINE_WIDTH);

        let bottom_cap = Rect::new(
            o.x - CAP_OVERHANG,
            o.bottom_y,
            o.width + CAP_OVERHANG * 2.0,
            CAP_HEIGHT,
        );
        surface.fill_rect(bottom_cap, &cap);
        surface.stroke_rect(bottom_cap, PIPE_EDGE, PIPE_LINE_WIDTH);
    }
}

pub fn draw_body<S: Surface + ?Sized>(surface: &mut S, body: &Body) {
    let c = body.pos;
    let r = body.radius;

    surface.fill_circle(c, r, BIRD);

    // Eye and pupil
    surface.fill_circle(c + Vec2::new(5.0, -3.0), 4.0, Color::WHITE);
    surface.fill_circle(c + Vec2::new(6.0, -3.0), 2.0, Color::BLACK);

    // Beak
    surface.fill_polygon(
        &[
            c + Vec2::new(r, 0.0),
            c + Vec2::new(r + 8.0, -3.0),
            c + Vec2::new(r + 8.0, 3.0),
        ],
        BEAK,
    );
}

pub fn draw_start_overlay<S: Surface + ?Sized>(surface: &mut S, w: f32, h: f32) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, w, h),
        &Color::rgba(0, 0, 0, 0.5).into(),
    );

    let cx = w / 2.0;
    let cy = h / 2.0;
    surface.fill_text("Flappy Bird", Vec2::new(cx, cy - 50.0), Font::bold(30.0), Color::WHITE);
    surface.fill_text(
        "Press SPACE or Click",
        Vec2::new(cx, cy),
        Font::regular(20.0),
        Color::WHITE,
    );
    surface.fill_text("to Start", Vec2::new(cx, cy + 30.0), Font::regular(20.0), Color::WHITE);
}

pub fn draw_game_over_overlay<S: Surface + ?Sized>(
    surface: &mut S,
    w: f32,
    h: f32,
    score: u32,
    best: u32,
) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, w, h),
        &Color::rgba(0, 0, 0, 0.7).into(),
    );

    let cx = w / 2.0;
    let cy = h / 2.0;
    surface.fill_text("Game Over!", Vec2::new(cx, cy - 60.0), Font::bold(40.0), GAME_OVER);
    surface.fill_text(
        &format!("Score: {}", score),
        Vec2::new(cx, cy - 10.0),
        Font::regular(24.0),
        Color::WHITE,
    );
    surface.fill_text(
        &format!("Best: {}", best),
        Vec2::new(cx, cy + 25.0),
        Font::regular(24.0),
        Color::WHITE,
    );
    surface.fill_text(
        "Click Restart to play again",
        Vec2::new(cx, cy + 70.0),
        Font::regular(18.0),
        Color::WHITE,
    );
}
