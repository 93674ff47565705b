use std::collections::VecDeque;

use macroquad::prelude::*;

use crate::game::Direction;

/// Directional intents waiting for the next tick, oldest first. Keyboard and
/// touch both feed this; the engine decides which ones stick.
#[derive(Debug, Default)]
pub struct IntentQueue {
    pending: VecDeque<Direction>,
}

impl IntentQueue {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, dir: Direction) { self.pending.push_back(dir); }

    pub fn drain(&mut self) -> impl Iterator<Item = Direction> + '_ { self.pending.drain(..) }

    pub fn clear(&mut self) { self.pending.clear(); }

    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    pub fn len(&self) -> usize { self.pending.len() }
}

/// Something that turns raw input into direction intents.
pub trait IntentSource {
    fn poll(&mut self, queue: &mut IntentQueue);
}

/// Non-directional actions the player can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    ToggleSound,
    Quit,
}

pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Direction::Up),
        KeyCode::Down | KeyCode::S => Some(Direction::Down),
        KeyCode::Left | KeyCode::A => Some(Direction::Left),
        KeyCode::Right | KeyCode::D => Some(Direction::Right),
        _ => None,
    }
}

pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::R | KeyCode::Enter => Some(Command::Restart),
        KeyCode::M => Some(Command::ToggleSound),
        KeyCode::Q | KeyCode::Escape => Some(Command::Quit),
        _ => None,
    }
}

const STEER_KEYS: [KeyCode; 8] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::S,
    KeyCode::A,
    KeyCode::D,
];

const COMMAND_KEYS: [KeyCode; 5] =
    [KeyCode::R, KeyCode::Enter, KeyCode::M, KeyCode::Q, KeyCode::Escape];

/// Arrow keys and WASD.
#[derive(Debug, Default)]
pub struct Keyboard;

impl IntentSource for Keyboard {
    fn poll(&mut self, queue: &mut IntentQueue) {
        for key in STEER_KEYS {
            if is_key_pressed(key) {
                if let Some(dir) = direction_for_key(key) {
                    queue.push(dir);
                }
            }
        }
    }
}

/// Commands pressed this frame.
pub fn pressed_commands() -> Vec<Command> {
    COMMAND_KEYS
        .iter()
        .filter(|k| is_key_pressed(**k))
        .filter_map(|k| command_for_key(*k))
        .collect()
}

/// Maps a swipe vector to a direction: the larger axis wins, ties go to the
/// vertical axis, and a zero vector means nothing.
pub fn swipe_direction(delta: Vec2) -> Option<Direction> {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 { Some(Direction::Right) } else { Some(Direction::Left) }
    } else if delta.y > 0.0 {
        Some(Direction::Down)
    } else if delta.y < 0.0 {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Incremental swipe detection: every move is measured from the previous
/// touch point, not from where the finger went down.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<Vec2>,
}

impl SwipeTracker {
    pub fn new() -> Self { Self::default() }

    pub fn begin(&mut self, at: Vec2) { self.origin = Some(at); }

    pub fn moved(&mut self, to: Vec2) -> Option<Direction> {
        let from = self.origin.replace(to)?;
        swipe_direction(to - from)
    }

    pub fn end(&mut self) { self.origin = None; }
}

/// Touchscreen swipes. Only the first finger steers.
#[derive(Debug, Default)]
pub struct TouchInput {
    tracker: SwipeTracker,
    finger: Option<u64>,
}

impl TouchInput {
    pub fn new() -> Self { Self::default() }
}

impl IntentSource for TouchInput {
    fn poll(&mut self, queue: &mut IntentQueue) {
        for touch in touches() {
            match touch.phase {
                TouchPhase::Started => {
                    if self.finger.is_none() {
                        self.finger = Some(touch.id);
                        self.tracker.begin(touch.position);
                    }
                }
                TouchPhase::Moved if self.finger == Some(touch.id) => {
                    if let Some(dir) = self.tracker.moved(touch.position) {
                        queue.push(dir);
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled if self.finger == Some(touch.id) => {
                    self.finger = None;
                    self.tracker.end();
                }
                _ => {}
            }
        }
    }
}
