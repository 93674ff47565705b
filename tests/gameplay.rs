use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

use snake_canvas::audio::{Sfx, SoundPlayer};
use snake_canvas::game::{Board, place_food};
use snake_canvas::input::{Command, SwipeTracker};
use snake_canvas::render::RecordingCanvas;
use snake_canvas::scheduler::ManualClock;
use snake_canvas::storage::{HighScoreStore, JsonFileStore, MemoryStore};
use snake_canvas::{Direction, Engine, GameConfig, GameState, Position, Session, TickOutcome};

#[derive(Default)]
struct SfxLog(Vec<Sfx>);

impl SoundPlayer for SfxLog {
    fn play(&mut self, sfx: Sfx) {
        self.0.push(sfx);
    }
}

type TestSession<S> = Session<StdRng, S, SfxLog, ManualClock>;

fn session_for<S: HighScoreStore>(config: GameConfig, store: S) -> TestSession<S> {
    let rng = StdRng::seed_from_u64(11);
    Session::new(config, rng, store, SfxLog::default(), ManualClock::new()).unwrap()
}

fn session_with<S: HighScoreStore>(store: S) -> TestSession<S> {
    session_for(GameConfig::default(), store)
}

/// Tick until the snake runs into the top wall.
fn crash<S: HighScoreStore>(s: &mut TestSession<S>) -> u32 {
    s.intents().push(Direction::Up);
    let mut ticks = 0;
    loop {
        match s.update() {
            Some(TickOutcome::GameOver) => return ticks,
            Some(_) => ticks += 1,
            None => s.clock().advance_ms(1000),
        }
        assert!(ticks < 1000, "snake never hit a wall");
    }
}

#[test]
fn test_eat_scenario() {
    let config = GameConfig::default();
    let engine = Engine::new(&config);
    let mut rng = StdRng::seed_from_u64(1);
    let mut state = GameState::new(&config, 0, &mut rng);
    state.food = Position::new(210, 200);
    let mut replay = rng.clone();

    let (next, outcome) = engine.tick(state, Direction::Right, &mut rng);

    assert_eq!(outcome, TickOutcome::AteFood);
    assert_eq!(
        next.snake,
        vec![
            Position::new(210, 200),
            Position::new(200, 200),
            Position::new(190, 200),
            Position::new(180, 200),
        ]
    );
    assert_eq!(next.score, 1);
    assert_eq!(next.level, 4.5);
    assert_eq!(next.food, place_food(&config.board, &mut replay));
}

#[test]
fn test_wall_scenario() {
    let config = GameConfig::default();
    let engine = Engine::new(&config);
    let mut rng = StdRng::seed_from_u64(1);
    let mut state = GameState::new(&config, 0, &mut rng);
    state.snake = vec![Position::new(0, 200), Position::new(10, 200), Position::new(20, 200)];
    state.direction = Direction::Left;
    state.food = Position::new(300, 300);

    let (next, outcome) = engine.tick(state, Direction::Left, &mut rng);
    assert_eq!(outcome, TickOutcome::GameOver);
    assert_eq!(next.head(), Position::new(-10, 200));
}

#[test]
fn test_food_can_land_on_the_snake() {
    // 2x2 board with three cells taken: placement never re-rolls.
    let board = Board { width: 20, height: 20, cell: 10 };
    let body = [Position::new(0, 0), Position::new(10, 0), Position::new(10, 10)];
    let mut rng = StdRng::seed_from_u64(2);
    let hits = (0..200).filter(|_| body.contains(&place_food(&board, &mut rng))).count();
    assert!(hits > 0);
    assert!(hits < 200);
}

#[test]
fn test_game_over_halts_and_shows_overlay() {
    let mut s = session_with(MemoryStore::default());
    crash(&mut s);

    assert!(!s.is_ticking());
    assert!(!s.state().running);
    assert!(s.overlay().is_visible());
    assert_eq!(s.overlay().message(), format!("Your final score is {}", s.state().score));
    assert_eq!(s.sound().0.last(), Some(&Sfx::GameOver));

    s.clock().advance_ms(60_000);
    assert_eq!(s.update(), None);
}

#[test]
fn test_restart_resets_everything() {
    let mut s = session_with(MemoryStore::default());
    crash(&mut s);

    s.handle(Command::Restart);

    let state = s.state();
    assert_eq!(
        state.snake,
        vec![Position::new(200, 200), Position::new(190, 200), Position::new(180, 200)]
    );
    assert_eq!(state.score, 0);
    assert_eq!(state.level, 3.0);
    assert_eq!(state.direction, Direction::Right);
    assert!(state.running);
    assert!(!s.overlay().is_visible());
    assert!(s.is_ticking());
    assert!(s.update().is_some());
}

#[test]
fn test_restart_button_click() {
    let mut s = session_with(MemoryStore::default());
    crash(&mut s);
    let centre = s.controls().restart.rect.center();
    assert_eq!(s.click(centre), Some(Command::Restart));
    assert!(s.state().running);
}

#[test]
fn test_eating_plays_sound_and_saves_best() {
    // Session::new draws the first food from the rng before anything else,
    // so the same seed tells us where it will be.
    let board = Board::default();
    let mut replay = StdRng::seed_from_u64(11);
    let food = place_food(&board, &mut replay);
    let (head, heading) = if food.x > 0 {
        (Position::new(food.x - 10, food.y), Direction::Right)
    } else {
        (Position::new(10, food.y), Direction::Left)
    };
    let config = GameConfig {
        initial_snake: vec![head],
        initial_direction: heading,
        ..Default::default()
    };
    let mut s = session_for(config, MemoryStore::default());
    assert_eq!(s.state().food, food);

    assert_eq!(s.update(), Some(TickOutcome::AteFood));
    assert_eq!(s.state().snake, vec![food, head]);
    assert_eq!(s.state().food, place_food(&board, &mut replay));
    assert_eq!(s.sound().0, vec![Sfx::Eat]);
    assert_eq!(s.store().score, Some(1));
    assert_eq!(s.store().writes, 1);
    assert_eq!(s.state().high_score, 1);

    // The next tick comes sooner at the new level.
    s.clock().advance_ms(223);
    assert!(s.update().is_some());
}

#[test]
fn test_muted_session_is_silent() {
    let mut s = session_with(MemoryStore::default());
    s.handle(Command::ToggleSound);
    crash(&mut s);
    assert!(s.sound().0.is_empty());
}

#[test]
fn test_high_score_survives_sessions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snake_save.json");
    let mut store = JsonFileStore::new(&path);
    store.save(4).unwrap();

    let s = session_with(JsonFileStore::new(&path));
    assert_eq!(s.state().high_score, 4);

    let mut canvas = RecordingCanvas::new();
    s.draw(&mut canvas);
    assert!(canvas.texts().contains(&"High Score: 4"));
}

#[test]
fn test_swipes_steer_the_snake() {
    let mut s = session_with(MemoryStore::default());
    let mut swipe = SwipeTracker::new();
    swipe.begin(macroquad::math::vec2(300.0, 300.0));
    if let Some(dir) = swipe.moved(macroquad::math::vec2(302.0, 340.0)) {
        s.intents().push(dir);
    }
    s.update();
    assert_eq!(s.state().direction, Direction::Down);
    assert_eq!(s.state().head(), Position::new(200, 210));
}
