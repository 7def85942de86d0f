//! # Game Session Tests
//!
//! Whole ticks: pointer edits, water, player, camera and the event channel
//! working together.

use delve::world::{GenerationReport, Tile, TileCoord, TileKind, World};
use delve::{
    Action, ActionSet, FrameInput, GameConfig, GameEvent, GameSession, PointerCommand,
    PLAYER_HEIGHT,
};

fn flat_session() -> GameSession {
    GameSession::with_world(World::default(), GenerationReport::default(), &GameConfig::default())
}

/// Screen pixel over the middle of tile `(x, y)` for the current camera.
fn screen_of(session: &GameSession, x: i32, y: i32) -> (f32, f32) {
    let (px, py) = TileCoord::new(x, y).to_pixel(session.world().tile_size());
    let camera = session.camera();
    (px + 16.0 - camera.x, py + 16.0 - camera.y)
}

fn seeded_config(seed: u64) -> GameConfig {
    let mut config = GameConfig::default();
    config.world.generation.seed = Some(seed);
    config
}

/// Test: The player spawns two rows above the ground and settles on it.
#[test]
fn test_spawn_and_settle() {
    let mut session = flat_session();
    assert_eq!(session.player().x, 0.0);
    assert_eq!(session.player().y, 8.0 * 32.0);

    for _ in 0..30 {
        session.tick(&FrameInput::default(), &[]);
    }

    assert!(session.player().on_ground);
    assert_eq!(session.player().y, 320.0 - PLAYER_HEIGHT);
    assert_eq!(session.tick_count(), 30);
}

/// Test: The camera starts centered on the spawned player.
#[test]
fn test_camera_starts_centered() {
    let session = flat_session();
    let (cx, cy) = session.player().center();
    let camera = session.camera();
    assert_eq!(cx - camera.x, camera.config().viewport_width / 2.0);
    assert_eq!(cy - camera.y, camera.config().viewport_height / 2.0);
}

/// Test: A player moved into a pond swims on the next tick.
#[test]
fn test_teleported_player_swims() {
    let mut session = flat_session();
    session.world_mut().add_tile(10, 9, TileKind::Water);
    let player = session.player_mut();
    player.x = 320.0;
    player.y = 320.0 - PLAYER_HEIGHT;

    let report = session.tick(&FrameInput::default(), &[]);

    assert!(report.player.in_water);
    assert!(!session.player().on_ground);
    assert!(session.player().x >= 320.0 && session.player().x < 328.0);
}

/// Test: Digging and placing under the pointer edit the world and emit
/// events with the tile coordinate.
#[test]
fn test_pointer_edits_emit_events() {
    let mut session = flat_session();
    let events = session.event_receiver();

    let (sx, sy) = screen_of(&session, 3, 12);
    let report = session.tick(&FrameInput::default(), &[PointerCommand::Dig { screen_x: sx, screen_y: sy }]);
    assert_eq!(report.edits, 1);
    assert_eq!(session.world().get_tile(3, 12), None);

    let dug = events.drain();
    assert_eq!(dug.len(), 1);
    assert!(matches!(
        dug[0],
        GameEvent::TileDug { coord, .. } if coord == TileCoord::new(3, 12)
    ));

    let (sx, sy) = screen_of(&session, 3, 12);
    let place = PointerCommand::Place { screen_x: sx, screen_y: sy, kind: TileKind::Stone };
    let report = session.tick(&FrameInput::default(), &[place]);
    assert_eq!(report.edits, 1);
    assert_eq!(session.world().get_tile(3, 12).map(Tile::kind), Some(TileKind::Stone));
    assert_eq!(
        events.drain(),
        vec![GameEvent::TilePlaced { coord: TileCoord::new(3, 12), kind: TileKind::Stone }]
    );
}

/// Test: Digging air or water does nothing and emits nothing.
#[test]
fn test_noop_dig_is_silent() {
    let mut session = flat_session();
    session.world_mut().add_tile(4, 5, TileKind::Water);
    let events = session.event_receiver();

    let (ax, ay) = screen_of(&session, 2, 2);
    let (wx, wy) = screen_of(&session, 4, 5);
    let report = session.tick(
        &FrameInput::default(),
        &[
            PointerCommand::Dig { screen_x: ax, screen_y: ay },
            PointerCommand::Dig { screen_x: wx, screen_y: wy },
        ],
    );

    assert_eq!(report.edits, 0);
    assert!(!events.has_events());
    assert!(session.world().get_tile(4, 5).is_some_and(Tile::is_source));
}

/// Test: Edits land before the water step of the same tick.
#[test]
fn test_edit_then_water_same_tick() {
    let mut session = flat_session();
    let (sx, sy) = screen_of(&session, 6, 3);

    let report = session.tick(
        &FrameInput::default(),
        &[PointerCommand::Place { screen_x: sx, screen_y: sy, kind: TileKind::Water }],
    );

    assert_eq!(report.edits, 1);
    assert_eq!(report.flow.spawned, 1);
    assert!(session.world().get_tile(6, 4).is_some_and(Tile::is_water));
}

/// Test: Pressing the fly key emits one toggle event per press.
#[test]
fn test_fly_toggle_event() {
    let mut session = flat_session();
    let events = session.event_receiver();
    let toggle = ActionSet::of(&[Action::ToggleFly]);

    let report = session.tick(&FrameInput::from_transition(ActionSet::EMPTY, toggle), &[]);
    assert!(report.player.fly_toggled);
    session.tick(&FrameInput::from_transition(toggle, toggle), &[]);

    assert_eq!(events.drain(), vec![GameEvent::FlyModeToggled { enabled: true }]);
    assert!(session.player().fly_mode);
}

/// Test: The camera keeps the player inside the dead zone while flying far.
#[test]
fn test_camera_tracks_player() {
    let mut session = flat_session();
    let toggle = ActionSet::of(&[Action::ToggleFly]);
    session.tick(&FrameInput::from_transition(ActionSet::EMPTY, toggle), &[]);

    let right = FrameInput::holding(ActionSet::of(&[Action::Right]));
    for _ in 0..400 {
        session.tick(&right, &[]);
    }

    let player = session.player();
    let camera = session.camera();
    let margin = camera.config().margin;
    let screen_x = player.x - camera.x;
    assert!(player.x >= 2000.0);
    assert!(screen_x >= margin);
    assert!(screen_x <= camera.config().viewport_width - margin);
}

/// Test: Every tick sees a full screen of tiles and the visible list matches
/// the report.
#[test]
fn test_visible_tiles() {
    let mut session = flat_session();
    let report = session.tick(&FrameInput::default(), &[]);
    assert!(report.visible_tiles > 0);
    assert_eq!(report.visible_tiles, session.visible_tiles().len());
}

/// Test: Carved cells below the surface show up as backdrop.
#[test]
fn test_visible_backdrop() {
    let mut session = flat_session();
    assert!(session.visible_backdrop().is_empty());
    session.world_mut().carve(1, 12);
    assert_eq!(session.visible_backdrop().len(), 1);
}

/// Test: Same seed and same inputs give the same run.
#[test]
fn test_seeded_sessions_match() {
    let config = seeded_config(99);
    let mut a = GameSession::new(&config).expect("valid config");
    let mut b = GameSession::new(&config).expect("valid config");
    assert_eq!(a.generation(), b.generation());

    let inputs = [
        FrameInput::holding(ActionSet::of(&[Action::Right])),
        FrameInput::holding(ActionSet::of(&[Action::Right, Action::Jump])),
        FrameInput::default(),
        FrameInput::holding(ActionSet::of(&[Action::Left])),
    ];
    for tick in 0..240 {
        let input = &inputs[(tick / 30) % inputs.len()];
        let ra = a.tick(input, &[]);
        let rb = b.tick(input, &[]);
        assert_eq!(ra.flow, rb.flow);
        assert_eq!(ra.player, rb.player);
    }

    assert_eq!(a.player(), b.player());
    assert_eq!(a.camera(), b.camera());
    assert_eq!(a.world().override_count(), b.world().override_count());
}

/// Test: An invalid config is rejected before any generation.
#[test]
fn test_invalid_config_rejected() {
    let mut config = GameConfig::default();
    config.physics.terminal_velocity = 0.0;
    assert!(GameSession::new(&config).is_err());
}

/// Test: The shipped sample config loads and starts a session.
#[test]
fn test_sample_config_starts() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/delve.toml");
    let config = GameConfig::load(path).expect("sample config");
    assert_eq!(config.world.generation.seed, Some(42));

    let session = GameSession::new(&config).expect("valid config");
    assert_eq!(session.generation().seed, 42);
}
