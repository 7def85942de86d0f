//! # DELVE Headless Runner
//!
//! Generates a world and drives the player through a scripted run without a
//! window. Useful for profiling ticks and for eyeballing generation logs.
//!
//! ```bash
//! # Stock config, 600 ticks
//! delve_headless
//!
//! # Custom config and tick count
//! RUST_LOG=delve=debug delve_headless config/delve.toml 3600
//! ```

use std::process::ExitCode;

use delve::{
    init_tracing, Action, ActionSet, FrameInput, GameConfig, GameEvent, GameResult, GameSession,
    LogConfig, PointerCommand,
};
use delve::world::TileKind;
use tracing::{error, info};

const DEFAULT_TICKS: u64 = 600;

const USAGE: &str = "usage: delve_headless [CONFIG.toml] [TICKS]";

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let ticks = match parse_ticks(args.next().as_deref()) {
        Ok(ticks) => ticks,
        Err(message) => {
            eprintln!("delve_headless: {message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(config_path.as_deref(), ticks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // No-op when the configured subscriber is already installed.
            init_tracing(&LogConfig::default());
            error!(%err, "headless run failed");
            eprintln!("delve_headless: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Tick count from the second argument, or the default when absent.
fn parse_ticks(arg: Option<&str>) -> Result<u64, String> {
    match arg {
        None => Ok(DEFAULT_TICKS),
        Some(text) => text
            .parse()
            .map_err(|err| format!("invalid tick count {text:?}: {err}")),
    }
}

fn run(config_path: Option<&str>, ticks: u64) -> GameResult<()> {
    let config = match config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    init_tracing(&config.log);
    info!(config = config_path.unwrap_or("<default>"), ticks, "starting headless run");

    let mut session = GameSession::new(&config)?;
    let events = session.event_receiver();
    let generation = *session.generation();
    info!(
        seed = generation.seed,
        ponds = generation.ponds,
        trees = generation.trees,
        overrides = generation.overrides,
        "world ready"
    );

    let mut previous = ActionSet::EMPTY;
    let (mut dug, mut placed, mut toggles) = (0_u32, 0_u32, 0_u32);

    for tick in 0..ticks {
        let held = scripted_actions(tick);
        let input = FrameInput::from_transition(previous, held);
        previous = held;

        let pointer = scripted_pointer(tick, &config);
        let report = session.tick(&input, &pointer);

        for event in events.drain() {
            match event {
                GameEvent::TileDug { .. } => dug += 1,
                GameEvent::TilePlaced { .. } => placed += 1,
                GameEvent::FlyModeToggled { .. } => toggles += 1,
            }
        }

        if tick % 120 == 0 {
            let player = session.player();
            info!(
                tick,
                x = player.x,
                y = player.y,
                on_ground = player.on_ground,
                in_water = report.player.in_water,
                water_moved = report.flow.moved,
                visible = report.visible_tiles,
                "progress"
            );
        }
    }

    info!(dug, placed, toggles, overrides = session.world().override_count(), "run finished");
    session.stats().log_summary();
    Ok(())
}

/// Walk right, hop regularly, take a short flight in the middle.
fn scripted_actions(tick: u64) -> ActionSet {
    let mut held = ActionSet::EMPTY;
    match tick % 600 {
        0..=239 => {
            held.insert(Action::Right);
            if tick % 40 < 5 {
                held.insert(Action::Jump);
            }
        }
        240 | 300 => held.insert(Action::ToggleFly),
        241..=299 => held.insert(Action::Up),
        301..=539 => {
            held.insert(Action::Left);
            if tick % 60 < 5 {
                held.insert(Action::Jump);
            }
        }
        _ => {}
    }
    held
}

/// Dig the tile under the screen center now and then, and patch it back.
fn scripted_pointer(tick: u64, config: &GameConfig) -> Vec<PointerCommand> {
    let screen_x = config.camera.viewport_width / 2.0;
    let screen_y = config.camera.viewport_height / 2.0 + 48.0;
    match tick % 150 {
        75 => vec![PointerCommand::Dig { screen_x, screen_y }],
        76 => vec![PointerCommand::Place {
            screen_x,
            screen_y,
            kind: TileKind::Dirt,
        }],
        _ => Vec::new(),
    }
}
