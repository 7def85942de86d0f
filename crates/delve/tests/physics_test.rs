//! # Player Physics Tests
//!
//! Multi-tick player movement on a flat, ungenerated world with the grass
//! surface at row 10 (pixel 320).

use delve::{Action, ActionSet, Facing, FrameInput, PhysicsConfig, Player, PLAYER_HEIGHT};
use delve::world::{Tile, TileKind, World};
use proptest::prelude::*;

/// Top of the player when standing on the grass row.
const STANDING_Y: f32 = 320.0 - PLAYER_HEIGHT;

fn idle() -> FrameInput {
    FrameInput::default()
}

fn hold(actions: &[Action]) -> FrameInput {
    FrameInput::holding(ActionSet::of(actions))
}

fn standing_player(world: &World, config: &PhysicsConfig) -> Player {
    let mut player = Player::new(0.0, STANDING_Y);
    player.update(world, &idle(), config);
    assert!(player.on_ground);
    player
}

/// Test: A falling player lands on the grass, stops, and stays put.
#[test]
fn test_landing() {
    let world = World::default();
    let config = PhysicsConfig::default();
    let mut player = Player::new(0.0, 200.0);

    for _ in 0..60 {
        player.update(&world, &idle(), &config);
    }

    assert!(player.on_ground);
    assert_eq!(player.vel_y, 0.0);
    assert_eq!(player.y, STANDING_Y);
}

/// Test: Walking into a block stops flush against it.
#[test]
fn test_wall_clamp() {
    let mut world = World::default();
    world.add_tile(2, 9, TileKind::Stone);
    let config = PhysicsConfig::default();
    let mut player = standing_player(&world, &config);

    for _ in 0..30 {
        player.update(&world, &hold(&[Action::Right]), &config);
    }

    assert_eq!(player.x, 40.0);
    assert_eq!(player.facing, Facing::Right);
    assert!(player.on_ground);
}

/// Test: Holding left and right walks left.
#[test]
fn test_left_wins_over_right() {
    let world = World::default();
    let config = PhysicsConfig::default();
    let mut player = standing_player(&world, &config);

    player.update(&world, &hold(&[Action::Left, Action::Right]), &config);

    assert_eq!(player.x, -config.move_speed);
    assert_eq!(player.facing, Facing::Left);
    assert!(player.walking);
}

/// Test: A jump under a low ceiling stops at the ceiling's underside.
#[test]
fn test_ceiling_bump() {
    let mut world = World::default();
    world.add_tile(0, 6, TileKind::Stone);
    let config = PhysicsConfig::default();
    let mut player = standing_player(&world, &config);

    let step = player.update(&world, &hold(&[Action::Jump]), &config);
    assert!(step.jumped);
    assert_eq!(player.vel_y, -config.jump_velocity);

    let mut highest = player.y;
    for _ in 0..40 {
        player.update(&world, &idle(), &config);
        highest = highest.min(player.y);
    }

    assert_eq!(highest, 224.0);
    assert!(player.on_ground);
    assert_eq!(player.y, STANDING_Y);
}

/// Test: Jump does nothing in mid-air.
#[test]
fn test_no_air_jump() {
    let world = World::default();
    let config = PhysicsConfig::default();
    let mut player = Player::new(0.0, 0.0);

    let step = player.update(&world, &hold(&[Action::Jump]), &config);

    assert!(!step.jumped);
    assert_eq!(player.vel_y, config.gravity);
}

/// Test: Falling speed is capped.
#[test]
fn test_terminal_velocity() {
    let world = World::default();
    let config = PhysicsConfig::default();
    let mut player = Player::new(0.0, -100_000.0);

    for _ in 0..200 {
        player.update(&world, &idle(), &config);
    }

    assert_eq!(player.vel_y, config.terminal_velocity);
}

/// Test: In water, jump swims up and idling sinks slowly.
#[test]
fn test_swimming() {
    let mut world = World::default();
    world.set_tile(0, 8, Tile::source());
    world.set_tile(0, 9, Tile::source());
    let config = PhysicsConfig::default();
    let mut player = Player::new(0.0, STANDING_Y);

    let step = player.update(&world, &hold(&[Action::Jump]), &config);
    assert!(step.in_water);
    assert!(!step.jumped);
    assert!(!player.on_ground);
    assert_eq!(player.vel_y, -config.swim_impulse);

    for _ in 0..30 {
        let step = player.update(&world, &idle(), &config);
        assert!(step.in_water);
        assert!(player.vel_y <= config.max_sink_speed);
    }
}

/// Test: The fly toggle fires on the press edge only, and fly mode ignores
/// gravity.
#[test]
fn test_fly_toggle_edge() {
    let world = World::default();
    let config = PhysicsConfig::default();
    let mut player = Player::new(0.0, 0.0);
    let toggle = ActionSet::of(&[Action::ToggleFly]);

    let step = player.update(&world, &FrameInput::from_transition(ActionSet::EMPTY, toggle), &config);
    assert!(step.fly_toggled);
    assert!(player.fly_mode);

    for _ in 0..10 {
        let step = player.update(&world, &FrameInput::from_transition(toggle, toggle), &config);
        assert!(!step.fly_toggled);
    }
    assert!(player.fly_mode);
    assert_eq!(player.y, 0.0);

    player.update(&world, &hold(&[Action::Down]), &config);
    assert_eq!(player.y, config.fly_speed);

    let step = player.update(&world, &FrameInput::from_transition(ActionSet::EMPTY, toggle), &config);
    assert!(step.fly_toggled);
    assert!(!player.fly_mode);
}

/// Test: Walking off a ledge drops the player into the pit.
#[test]
fn test_walk_off_ledge() {
    let mut world = World::default();
    world.carve(1, 10);
    world.carve(2, 10);
    let config = PhysicsConfig::default();
    let mut player = standing_player(&world, &config);

    let mut left_ground = false;
    for _ in 0..60 {
        player.update(&world, &hold(&[Action::Right]), &config);
        left_ground |= !player.on_ground;
    }

    assert!(left_ground);
    assert!(player.on_ground);
    assert_eq!(player.y, 352.0 - PLAYER_HEIGHT);
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

fn arb_input() -> impl Strategy<Value = FrameInput> {
    any::<u8>().prop_map(|bits| {
        let held: ActionSet = [Action::Left, Action::Right, Action::Jump]
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| bits & (1_u8 << i) != 0)
            .map(|(_, action)| action)
            .collect();
        FrameInput::holding(held)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// On flat ground no input sequence sinks the player into the grass or
    /// pushes the fall speed past the cap.
    #[test]
    fn prop_flat_ground_holds(inputs in prop::collection::vec(arb_input(), 1..200)) {
        let world = World::default();
        let config = PhysicsConfig::default();
        let mut player = Player::new(0.0, STANDING_Y);

        for input in &inputs {
            player.update(&world, input, &config);
            prop_assert!(player.y <= STANDING_Y);
            prop_assert!(player.vel_y <= config.terminal_velocity);
        }
    }
}
