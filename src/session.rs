use macroquad::math::Vec2;
use rand::Rng;

use crate::audio::{Sfx, SoundPlayer};
use crate::config::GameConfig;
use crate::error::Result;
use crate::game::{Engine, GameState, TickOutcome};
use crate::input::{Command, IntentQueue, IntentSource};
use crate::render::{Canvas, render};
use crate::scheduler::{Clock, TickScheduler};
use crate::storage::HighScoreStore;
use crate::ui::{Controls, GameOverOverlay};

/// Most ticks a single [`Session::update`] will run to catch up after a
/// stalled frame.
pub const MAX_TICKS_PER_UPDATE: u32 = 4;

/// One player's run of games: the state plus everything that drives it.
///
/// Call [`Session::update`] every frame. It ticks the engine only when the
/// scheduler says a tick is due, so frame rate and game speed stay separate.
pub struct Session<R, S, P, C> {
    config: GameConfig,
    engine: Engine,
    state: GameState,
    rng: R,
    store: S,
    sound: P,
    clock: C,
    scheduler: TickScheduler,
    intents: IntentQueue,
    sound_on: bool,
    overlay: GameOverOverlay,
    controls: Controls,
}

impl<R, S, P, C> Session<R, S, P, C>
where
    R: Rng,
    S: HighScoreStore,
    P: SoundPlayer,
    C: Clock,
{
    /// Checks the config, loads the high score, lays out a fresh game and
    /// starts ticking.
    pub fn new(config: GameConfig, mut rng: R, store: S, sound: P, clock: C) -> Result<Self> {
        config.validate()?;
        let high_score = store.load();
        let state = GameState::new(&config, high_score, &mut rng);
        let mut scheduler = TickScheduler::new();
        scheduler.start(clock.now());
        let board = config.board;
        let controls = Controls::layout(board.width as f32, board.height as f32, config.sound_on);
        tracing::info!(high_score, level = state.level, "game started");

        Ok(Self {
            engine: Engine::new(&config),
            sound_on: config.sound_on,
            config,
            state,
            rng,
            store,
            sound,
            clock,
            scheduler,
            intents: IntentQueue::new(),
            overlay: GameOverOverlay::default(),
            controls,
        })
    }

    pub fn state(&self) -> &GameState { &self.state }

    pub fn overlay(&self) -> &GameOverOverlay { &self.overlay }

    pub fn controls(&self) -> &Controls { &self.controls }

    pub fn clock(&self) -> &C { &self.clock }

    pub fn store(&self) -> &S { &self.store }

    pub fn sound(&self) -> &P { &self.sound }

    pub fn sound_on(&self) -> bool { self.sound_on }

    pub fn is_ticking(&self) -> bool { self.scheduler.is_running() }

    pub fn intents(&mut self) -> &mut IntentQueue { &mut self.intents }

    /// Collect whatever `source` has to say since the last frame.
    pub fn poll<I: IntentSource + ?Sized>(&mut self, source: &mut I) {
        source.poll(&mut self.intents);
    }

    /// Run every tick that has come due since the last call, up to
    /// [`MAX_TICKS_PER_UPDATE`]; a longer backlog is dropped. Returns the most
    /// significant outcome among the ticks that ran.
    pub fn update(&mut self) -> Option<TickOutcome> {
        let now = self.clock.now();
        let mut summary = None;
        let mut ran = 0;
        while self.scheduler.due(now) {
            if ran == MAX_TICKS_PER_UPDATE {
                self.scheduler.resync(now, self.state.level);
                break;
            }
            let outcome = self.tick_once();
            ran += 1;
            summary = Some(match (summary, outcome) {
                (_, TickOutcome::GameOver) => TickOutcome::GameOver,
                (Some(TickOutcome::AteFood), _) => TickOutcome::AteFood,
                (_, other) => other,
            });
            if outcome == TickOutcome::GameOver {
                break;
            }
        }
        summary
    }

    fn tick_once(&mut self) -> TickOutcome {
        for dir in self.intents.drain() {
            self.state.steer(dir);
        }
        let best_before = self.state.high_score;
        let direction = self.state.direction;
        let outcome = self.engine.advance(&mut self.state, direction, &mut self.rng);

        if outcome == TickOutcome::AteFood {
            self.play(Sfx::Eat);
        }
        if self.state.high_score > best_before {
            if let Err(err) = self.store.save(self.state.high_score) {
                tracing::warn!(error = %err, "could not persist high score");
            }
        }

        if outcome == TickOutcome::GameOver {
            self.play(Sfx::GameOver);
            self.scheduler.halt();
            self.overlay.show(self.state.score);
        } else {
            self.scheduler.reschedule(self.state.level);
        }
        outcome
    }

    /// Throw the current game away and start a new one right away.
    pub fn restart(&mut self) {
        let high_score = self.state.high_score;
        self.state = GameState::new(&self.config, high_score, &mut self.rng);
        self.intents.clear();
        self.overlay.hide();
        self.scheduler.start(self.clock.now());
        tracing::info!(high_score, "game restarted");
    }

    /// Flip the sound flag; returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_on = !self.sound_on;
        self.controls.set_sound(self.sound_on);
        tracing::debug!(sound_on = self.sound_on, "sound toggled");
        self.sound_on
    }

    /// Apply a player command. Restart is only honoured once the game is
    /// over; quitting is the caller's business.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Restart if self.overlay.is_visible() => self.restart(),
            Command::Restart => {}
            Command::ToggleSound => {
                self.toggle_sound();
            }
            Command::Quit => {}
        }
    }

    /// A click or tap at `p`, in board coordinates.
    pub fn click(&mut self, p: Vec2) -> Option<Command> {
        let command = self.controls.hit(p, self.overlay.is_visible())?;
        self.handle(command);
        Some(command)
    }

    pub fn draw<K: Canvas + ?Sized>(&self, canvas: &mut K) {
        render(&self.state, canvas);
        let board = self.state.board;
        self.controls.draw(&self.overlay, board.width as f32, board.height as f32, canvas);
    }

    fn play(&mut self, sfx: Sfx) {
        if self.sound_on {
            self.sound.play(sfx);
        }
    }
}
