use macroquad::prelude::*;

use crate::game::{Board, GameState, Position};

pub const SNAKE_COLOR: Color = Color::new(0.545, 0.765, 0.290, 1.0); // #8bc34a
pub const FOOD_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0); // #ff0000
pub const TEXT_COLOR: Color = WHITE;
pub const BACKGROUND: Color = BLACK;
pub const HUD_FONT_SIZE: f32 = 20.0;

/// Drawing surface in board coordinates (logical units, `y` down).
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// `at` is the left end of the text baseline.
    fn text(&mut self, text: &str, at: Vec2, size: f32, color: Color);
    fn text_width(&self, text: &str, size: f32) -> f32;
}

/// Paints one frame of `state`. Read-only with respect to the game.
pub fn render<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let cell = state.board.cell as f32;
    canvas.clear(BACKGROUND);

    for segment in &state.snake {
        canvas.fill_rect(cell_rect(*segment, cell), SNAKE_COLOR);
    }

    let half = cell / 2.0;
    let food = vec2(state.food.x as f32 + half, state.food.y as f32 + half);
    canvas.fill_circle(food, half, FOOD_COLOR);

    let hud = [
        format!("Score: {}", state.score),
        format!("Level: {:.1}", state.level),
        format!("High Score: {}", state.high_score),
    ];
    for (line, y) in hud.iter().zip([30.0, 60.0, 90.0]) {
        canvas.text(line, vec2(10.0, y), HUD_FONT_SIZE, TEXT_COLOR);
    }
}

fn cell_rect(p: Position, cell: f32) -> Rect {
    Rect::new(p.x as f32, p.y as f32, cell, cell)
}

/// The real window. The board is scaled uniformly and centred, so it keeps
/// its aspect ratio whatever the window shape.
#[derive(Debug, Clone, Copy)]
pub struct ScreenCanvas {
    scale: f32,
    offset: Vec2,
    size: Vec2,
}

impl ScreenCanvas {
    /// Fit `board` into the current window.
    pub fn fit(board: &Board) -> Self {
        Self::fit_into(board, screen_width(), screen_height())
    }

    pub fn fit_into(board: &Board, sw: f32, sh: f32) -> Self {
        let scale = (sw / board.width as f32).min(sh / board.height as f32);
        let size = vec2(board.width as f32, board.height as f32);
        Self { scale, offset: (vec2(sw, sh) - size * scale) * 0.5, size }
    }

    pub fn to_screen(&self, p: Vec2) -> Vec2 { self.offset + p * self.scale }

    /// Inverse of [`ScreenCanvas::to_screen`], for hit testing clicks.
    pub fn to_board(&self, p: Vec2) -> Vec2 { (p - self.offset) / self.scale }
}

impl Canvas for ScreenCanvas {
    fn clear(&mut self, color: Color) {
        clear_background(BLACK);
        let origin = self.to_screen(Vec2::ZERO);
        let size = self.size * self.scale;
        draw_rectangle(origin.x, origin.y, size.x, size.y, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let p = self.to_screen(rect.point());
        draw_rectangle(p.x, p.y, rect.w * self.scale, rect.h * self.scale, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let c = self.to_screen(center);
        draw_circle(c.x, c.y, radius * self.scale, color);
    }

    fn text(&mut self, text: &str, at: Vec2, size: f32, color: Color) {
        let p = self.to_screen(at);
        draw_text(text, p.x, p.y, size * self.scale, color);
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        // Measured at on-screen size, reported back in board units.
        let px = (size * self.scale).max(1.0) as u16;
        measure_text(text, None, px, 1.0).width / self.scale
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Rect(Rect, Color),
    Circle(Vec2, f32, Color),
    Text(String, Vec2, f32, Color),
}

/// Canvas that keeps a list of what was drawn instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self { Self::default() }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, ..) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<(Rect, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect(r, col) => Some((*r, *col)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) { self.calls.push(DrawCall::Clear(color)); }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Rect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle(center, radius, color));
    }

    fn text(&mut self, text: &str, at: Vec2, size: f32, color: Color) {
        self.calls.push(DrawCall::Text(text.to_owned(), at, size, color));
    }

    // Rough monospace estimate; there is no font to measure against.
    fn text_width(&self, text: &str, size: f32) -> f32 { text.chars().count() as f32 * size * 0.5 }
}
