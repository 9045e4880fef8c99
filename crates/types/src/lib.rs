//! Shared types - commands, lifecycle states, rotations and board constants
//!
//! Everything here is plain data with no external dependencies, so it can be used from the
//! core rules, the game loop, terminal front ends and wire protocols alike.
//!
//! # Board Dimensions
//!
//! Playable dimensions exclude the one-cell wall ring the field keeps around them:
//!
//! | Variant | Rows | Columns | Piece kinds |
//! |---------|------|---------|-------------|
//! | standard | 18 | 10 | 7 |
//! | bucket | 10 | 3 | 1 |
//!
//! New pieces appear at row [`SPAWN_ROW`], column `columns / 2`, rotation 0.
//!
//! # Timing
//!
//! Gravity advances the active piece one row every [`GRAVITY_MS`] milliseconds unless the
//! game is paused, over, or gravity was toggled off.
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{Command, LifecycleState, Rotation};
//!
//! assert_eq!(Command::from_code(1), Some(Command::MoveLeft));
//! assert_eq!(Command::from_code(200), None);
//! assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
//!
//! assert_eq!(Rotation::new(3).next(), Rotation::new(0));
//! assert!(LifecycleState::GameOver.is_terminal());
//! ```

/// Playable rows of the standard board
pub const DEFAULT_ROWS: usize = 18;

/// Playable columns of the standard board
pub const DEFAULT_COLUMNS: usize = 10;

/// Number of piece kinds on the standard board
pub const DEFAULT_PIECE_KINDS: usize = 7;

/// Playable rows of the bucket board
pub const BUCKET_ROWS: usize = 10;

/// Playable columns of the bucket board
pub const BUCKET_COLUMNS: usize = 3;

/// Number of piece kinds on the bucket board
pub const BUCKET_PIECE_KINDS: usize = 1;

/// Side length of a piece mask
pub const MASK_SIZE: usize = 4;

/// Authored masks per piece kind
pub const ROTATIONS: u8 = 4;

/// Field row new pieces are anchored at
pub const SPAWN_ROW: i32 = 1;

/// Default gravity interval in milliseconds
pub const GRAVITY_MS: u64 = 500;

/// A single field cell
pub type Cell = u8;

/// Cell value for an empty cell
pub const EMPTY: Cell = 0;

/// Cell value for an occupied cell (walls, floor and locked blocks)
pub const OCCUPIED: Cell = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_variant_defaults() {
        assert_eq!((DEFAULT_ROWS, DEFAULT_COLUMNS, DEFAULT_PIECE_KINDS), (18, 10, 7));
        assert_eq!((BUCKET_ROWS, BUCKET_COLUMNS, BUCKET_PIECE_KINDS), (10, 3, 1));
        assert_eq!(GRAVITY_MS, 500);
        assert_eq!(SPAWN_ROW, 1);
    }

    #[test]
    fn command_codes_are_stable() {
        for code in 0..=6u8 {
            let command = Command::from_code(code).unwrap();
            assert_eq!(command.code(), code);
            assert_eq!(Command::from_str(command.as_str()), Some(command));
        }
        assert_eq!(Command::from_code(7), None);
        assert_eq!(Command::from_code(u8::MAX), None);
    }

    #[test]
    fn rotation_wraps_after_four_steps() {
        let start = Rotation::new(2);
        let mut r = start;
        for _ in 0..4 {
            r = r.next();
        }
        assert_eq!(r, start);
        assert_eq!(Rotation::new(6).index(), 2);
    }

    #[test]
    fn lifecycle_names_roundtrip() {
        for state in [
            LifecycleState::Initializing,
            LifecycleState::Running,
            LifecycleState::Paused,
            LifecycleState::GameOver,
        ] {
            assert_eq!(LifecycleState::from_str(state.as_str()), Some(state));
        }
        assert_eq!(LifecycleState::from_str("exploded"), None);
    }
}

/// Player commands accepted by the game loop
///
/// The numeric codes are stable and used on the wire and in recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// End the game from any state
    Stop = 0,
    /// Shift the piece one column left
    MoveLeft = 1,
    /// Shift the piece one column right
    MoveRight = 2,
    /// Advance to the next rotation index
    Rotate = 3,
    /// Force one gravity step
    Drop = 4,
    /// Toggle between running and paused
    Pause = 5,
    /// Switch timer gravity off or back on
    ToggleGravity = 6,
}

impl Command {
    /// Decode a command code; unknown codes yield `None`
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Command::Stop),
            1 => Some(Command::MoveLeft),
            2 => Some(Command::MoveRight),
            3 => Some(Command::Rotate),
            4 => Some(Command::Drop),
            5 => Some(Command::Pause),
            6 => Some(Command::ToggleGravity),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Parse a command name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("TOGGLEGRAVITY"), Some(Command::ToggleGravity));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stop" => Some(Command::Stop),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "drop" => Some(Command::Drop),
            "pause" => Some(Command::Pause),
            "togglegravity" => Some(Command::ToggleGravity),
            _ => None,
        }
    }

    /// camelCase name used by text protocols
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Stop => "stop",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::Drop => "drop",
            Command::Pause => "pause",
            Command::ToggleGravity => "toggleGravity",
        }
    }
}

/// Lifecycle of a game
///
/// `Initializing -> Running <-> Paused`, and any state `-> GameOver`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Initializing,
    Running,
    Paused,
    GameOver,
}

impl LifecycleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::GameOver)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "initializing" => Some(LifecycleState::Initializing),
            "running" => Some(LifecycleState::Running),
            "paused" => Some(LifecycleState::Paused),
            "gameover" => Some(LifecycleState::GameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Initializing => "initializing",
            LifecycleState::Running => "running",
            LifecycleState::Paused => "paused",
            LifecycleState::GameOver => "gameOver",
        }
    }
}

/// Rotation index in `0..4`, selecting one of the authored masks of a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u8);

impl Rotation {
    /// Build a rotation index, wrapping values past 3
    pub const fn new(index: u8) -> Self {
        Self(index % ROTATIONS)
    }

    /// Next rotation index, `(r + 1) mod 4`
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % ROTATIONS)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}
