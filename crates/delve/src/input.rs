//! # Input Model
//!
//! Device-independent input for one tick. The windowing layer maps keys and
//! mouse buttons onto [`Action`]s and [`PointerCommand`]s; the simulation
//! never sees key codes.
//!
//! Two sets per tick: `held` (level-triggered, movement) and `pressed`
//! (edge-triggered, toggles). [`FrameInput::from_transition`] derives the
//! edges from two consecutive held sets.

use delve_world::TileKind;

/// A logical input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    /// Walk or fly left.
    Left = 0,
    /// Walk or fly right.
    Right = 1,
    /// Fly up.
    Up = 2,
    /// Fly down.
    Down = 3,
    /// Jump, or swim up in water.
    Jump = 4,
    /// Switch fly mode.
    ToggleFly = 5,
}

impl Action {
    /// Every action.
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Jump,
        Self::ToggleFly,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Bit set of actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    /// No actions.
    pub const EMPTY: Self = Self(0);

    /// Set containing the given actions.
    #[must_use]
    pub fn of(actions: &[Action]) -> Self {
        actions.iter().fold(Self::EMPTY, |set, &action| set.with(action))
    }

    /// Copy of this set with `action` added.
    #[inline]
    #[must_use]
    pub const fn with(self, action: Action) -> Self {
        Self(self.0 | action.bit())
    }

    /// Adds `action`.
    #[inline]
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    /// Removes `action`.
    #[inline]
    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    /// Whether `action` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// Whether the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Actions in `self` but not in `other`.
    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// Input state for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Actions held down this tick.
    pub held: ActionSet,
    /// Actions that went down this tick.
    pub pressed: ActionSet,
}

impl FrameInput {
    /// Input with `held` actions and no new presses.
    #[must_use]
    pub const fn holding(held: ActionSet) -> Self {
        Self {
            held,
            pressed: ActionSet::EMPTY,
        }
    }

    /// Input for a tick where the held set went from `previous` to `current`.
    #[must_use]
    pub const fn from_transition(previous: ActionSet, current: ActionSet) -> Self {
        Self {
            held: current,
            pressed: current.difference(previous),
        }
    }

    /// Whether `action` is held.
    #[inline]
    #[must_use]
    pub const fn is_held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    /// Whether `action` went down this tick.
    #[inline]
    #[must_use]
    pub const fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }
}

/// A mouse edit in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerCommand {
    /// Dig out the tile under the pointer.
    Dig {
        /// Pointer x in screen pixels.
        screen_x: f32,
        /// Pointer y in screen pixels.
        screen_y: f32,
    },
    /// Place a tile under the pointer.
    Place {
        /// Pointer x in screen pixels.
        screen_x: f32,
        /// Pointer y in screen pixels.
        screen_y: f32,
        /// What to place.
        kind: TileKind,
    },
}

impl PointerCommand {
    /// Screen position of the pointer.
    #[must_use]
    pub const fn screen_pos(&self) -> (f32, f32) {
        match *self {
            Self::Dig { screen_x, screen_y } | Self::Place { screen_x, screen_y, .. } => {
                (screen_x, screen_y)
            }
        }
    }
}
