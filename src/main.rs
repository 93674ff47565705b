use clap::Parser;
use macroquad::prelude::*;
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snake_canvas::audio::ToneBank;
use snake_canvas::input::{Command, Keyboard, TouchInput, pressed_commands};
use snake_canvas::render::ScreenCanvas;
use snake_canvas::scheduler::MacroquadClock;
use snake_canvas::storage::JsonFileStore;
use snake_canvas::{Options, Session};

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake".to_owned(),
        window_width: 600,
        window_height: 600,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_canvas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Options::parse().resolve() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "bad configuration");
            std::process::exit(2);
        }
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = JsonFileStore::new(&config.save_path);
    let sounds = ToneBank::load().await;
    let mut session = match Session::new(config, rng, store, sounds, MacroquadClock) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(error = %err, "could not start a game");
            std::process::exit(2);
        }
    };

    let mut keyboard = Keyboard;
    let mut touch = TouchInput::new();

    loop {
        let commands = pressed_commands();
        if commands.contains(&Command::Quit) {
            break;
        }
        for command in commands {
            session.handle(command);
        }
        session.poll(&mut keyboard);
        session.poll(&mut touch);

        let mut canvas = ScreenCanvas::fit(&session.state().board);
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            session.click(canvas.to_board(vec2(x, y)));
        }

        session.update();
        session.draw(&mut canvas);

        next_frame().await;
    }
}
