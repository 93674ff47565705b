use macroquad::prelude::*;

use crate::input::Command;
use crate::render::{Canvas, TEXT_COLOR};

const BUTTON_FILL: Color = Color::new(0.2, 0.2, 0.2, 0.9);
const OVERLAY_SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.7);
const BUTTON_FONT_SIZE: f32 = 18.0;

pub fn sound_label(on: bool) -> &'static str {
    if on { "Sound: ON" } else { "Sound: OFF" }
}

/// Clickable rectangle in board coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub command: Command,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, command: Command) -> Self {
        Self { rect, label: label.into(), command }
    }

    pub fn contains(&self, p: Vec2) -> bool { self.rect.contains(p) }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.fill_rect(self.rect, BUTTON_FILL);
        let w = canvas.text_width(&self.label, BUTTON_FONT_SIZE);
        let x = self.rect.x + (self.rect.w - w) * 0.5;
        let y = self.rect.y + self.rect.h * 0.5 + BUTTON_FONT_SIZE * 0.35;
        canvas.text(&self.label, vec2(x, y), BUTTON_FONT_SIZE, TEXT_COLOR);
    }
}

/// Shown once the game ends, hidden again on restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameOverOverlay {
    visible: bool,
    message: String,
}

impl GameOverOverlay {
    pub fn show(&mut self, final_score: u32) {
        self.visible = true;
        self.message = format!("Your final score is {final_score}");
    }

    pub fn hide(&mut self) { self.visible = false; }

    pub fn is_visible(&self) -> bool { self.visible }

    pub fn message(&self) -> &str { &self.message }
}

/// On-screen controls, laid out for a board of the given size.
#[derive(Debug, Clone)]
pub struct Controls {
    pub restart: Button,
    pub sound: Button,
}

impl Controls {
    pub fn layout(board_w: f32, board_h: f32, sound_on: bool) -> Self {
        Self {
            restart: Button::new(
                Rect::new(board_w * 0.5 - 60.0, board_h * 0.5 + 20.0, 120.0, 36.0),
                "Restart",
                Command::Restart,
            ),
            sound: Button::new(
                Rect::new(board_w - 130.0, 10.0, 120.0, 30.0),
                sound_label(sound_on),
                Command::ToggleSound,
            ),
        }
    }

    pub fn set_sound(&mut self, on: bool) { self.sound.label = sound_label(on).to_owned(); }

    /// Which control, if any, sits under `p`. Restart only answers while the
    /// overlay is up.
    pub fn hit(&self, p: Vec2, overlay_visible: bool) -> Option<Command> {
        if overlay_visible && self.restart.contains(p) {
            return Some(self.restart.command);
        }
        self.sound.contains(p).then_some(self.sound.command)
    }

    pub fn draw<C: Canvas + ?Sized>(
        &self,
        overlay: &GameOverOverlay,
        board_w: f32,
        board_h: f32,
        canvas: &mut C,
    ) {
        self.sound.draw(canvas);
        if !overlay.is_visible() {
            return;
        }
        canvas.fill_rect(Rect::new(0.0, 0.0, board_w, board_h), OVERLAY_SHADE);
        let lines = [
            ("Game Over", 36.0, board_h * 0.5 - 40.0),
            (overlay.message(), 22.0, board_h * 0.5),
        ];
        for (text, size, y) in lines {
            let w = canvas.text_width(text, size);
            canvas.text(text, vec2((board_w - w) * 0.5, y), size, TEXT_COLOR);
        }
        self.restart.draw(canvas);
    }
}
