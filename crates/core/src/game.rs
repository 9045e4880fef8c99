//! Game state machine - active piece, field, counters and lifecycle
//!
//! Every transition either fully commits or leaves the game untouched. Rejected moves are
//! silent and reported only through the `false` return value.

use crate::collision::{collides, place};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::field::Field;
use crate::rng::SimpleRng;
use crate::snapshot::Snapshot;
use crate::types::{Command, LifecycleState, Rotation, SPAWN_ROW};

/// The piece currently in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: usize,
    pub rotation: Rotation,
    /// Field row of the mask's top-left cell
    pub row: i32,
    /// Field column of the mask's top-left cell
    pub col: i32,
}

impl ActivePiece {
    pub fn spawn(kind: usize, config: &GameConfig) -> Self {
        Self {
            kind,
            rotation: Rotation::default(),
            row: SPAWN_ROW,
            col: config.spawn_col(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    seed: u64,
    config: GameConfig,
    rng: SimpleRng,
    field: Field,
    piece: ActivePiece,
    pieces_spawned: u32,
    lines_cleared: u32,
    state: LifecycleState,
    gravity: bool,
}

impl Game {
    /// Build a game and spawn its first piece
    ///
    /// The game starts in [`LifecycleState::Initializing`]; call [`Game::start`] (the game
    /// loop does this) to begin play.
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = SimpleRng::new(seed);
        let kind = rng.next_below(config.piece_kinds as u32) as usize;

        Ok(Self {
            seed,
            config,
            rng,
            field: Field::new(config.rows, config.columns),
            piece: ActivePiece::spawn(kind, &config),
            pieces_spawned: 1,
            lines_cleared: 0,
            state: LifecycleState::Initializing,
            gravity: true,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn piece(&self) -> ActivePiece {
        self.piece
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity
    }

    /// Whether a gravity tick would currently do anything
    pub fn accepts_gravity(&self) -> bool {
        self.state == LifecycleState::Running && self.gravity
    }

    /// Mutable field access for staging positions before play
    ///
    /// Only meant for setting up puzzles and tests; once the game is handed to the game
    /// loop the loop is its sole owner.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// Replace the active piece, for staging positions before play
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.piece = piece;
    }

    /// `Initializing -> Running`
    pub fn start(&mut self) -> bool {
        if self.state != LifecycleState::Initializing {
            return false;
        }
        self.state = LifecycleState::Running;
        true
    }

    /// Apply one command; returns true if anything changed
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Stop => self.stop(),
            Command::Pause => self.toggle_pause(),
            Command::ToggleGravity => self.toggle_gravity(),
            _ if self.state != LifecycleState::Running => false,
            Command::MoveLeft => self.shift(-1),
            Command::MoveRight => self.shift(1),
            Command::Rotate => self.rotate(),
            Command::Drop => self.step_down(),
        }
    }

    /// One timer gravity step; ignored unless running with gravity enabled
    pub fn tick(&mut self) -> bool {
        if !self.accepts_gravity() {
            return false;
        }
        self.step_down()
    }

    /// Copy the current state for consumers outside the game loop
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            state: self.state,
            piece: self.piece,
            field: self.field.clone(),
            rows: self.config.rows,
            columns: self.config.columns,
            piece_kinds: self.config.piece_kinds,
            catalog: self.config.catalog,
            pieces_spawned: self.pieces_spawned,
            lines_cleared: self.lines_cleared,
            gravity: self.gravity,
        }
    }

    fn stop(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = LifecycleState::GameOver;
        true
    }

    fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            LifecycleState::Running => LifecycleState::Paused,
            LifecycleState::Paused => LifecycleState::Running,
            _ => return false,
        };
        true
    }

    fn toggle_gravity(&mut self) -> bool {
        match self.state {
            LifecycleState::Running | LifecycleState::Paused => {
                self.gravity = !self.gravity;
                true
            }
            _ => false,
        }
    }

    fn fits(&self, rotation: Rotation, row: i32, col: i32) -> bool {
        !collides(
            &self.field,
            &self.config.catalog,
            self.piece.kind,
            rotation,
            row,
            col,
        )
    }

    fn shift(&mut self, dcol: i32) -> bool {
        let col = self.piece.col + dcol;
        if !self.fits(self.piece.rotation, self.piece.row, col) {
            return false;
        }
        self.piece.col = col;
        true
    }

    fn rotate(&mut self) -> bool {
        let rotation = self.piece.rotation.next();
        if !self.fits(rotation, self.piece.row, self.piece.col) {
            return false;
        }
        self.piece.rotation = rotation;
        true
    }

    /// Lower the piece one row, or lock it and bring in the next one
    fn step_down(&mut self) -> bool {
        let row = self.piece.row + 1;
        if self.fits(self.piece.rotation, row, self.piece.col) {
            self.piece.row = row;
        } else {
            self.lock_piece();
        }
        true
    }

    fn lock_piece(&mut self) {
        place(&mut self.field, &self.config.catalog, &self.piece);
        self.lines_cleared += self.field.clear_completed_rows();

        let topped_out = self.piece.row == SPAWN_ROW;
        self.spawn_next(topped_out);
    }

    /// Draw the next piece; a top-out shows it without counting it
    fn spawn_next(&mut self, topped_out: bool) {
        let kind = self.rng.next_below(self.config.piece_kinds as u32) as usize;
        self.piece = ActivePiece::spawn(kind, &self.config);

        if topped_out || !self.fits(self.piece.rotation, self.piece.row, self.piece.col) {
            self.state = LifecycleState::GameOver;
            return;
        }
        self.pieces_spawned += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OCCUPIED;

    fn running(seed: u64, config: GameConfig) -> Game {
        let mut game = Game::new(seed, config).unwrap();
        game.start();
        game
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(12345, GameConfig::standard()).unwrap();
        assert_eq!(game.state(), LifecycleState::Initializing);
        assert_eq!(game.pieces_spawned(), 1);
        assert_eq!(game.lines_cleared(), 0);
        assert_eq!(game.piece().row, SPAWN_ROW);
        assert_eq!(game.piece().col, 5);
        assert_eq!(game.piece().rotation, Rotation::default());
        assert!(game.piece().kind < 7);
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut game = Game::new(1, GameConfig::standard()).unwrap();
        assert!(!game.apply(Command::MoveLeft));
        assert!(!game.apply(Command::Drop));
        assert!(!game.apply(Command::Pause));
        assert!(!game.tick());
        assert!(game.start());
        assert!(!game.start());
        assert_eq!(game.state(), LifecycleState::Running);
    }

    #[test]
    fn test_tick_lowers_piece() {
        let mut game = running(3, GameConfig::standard());
        let row = game.piece().row;
        assert!(game.tick());
        assert_eq!(game.piece().row, row + 1);
    }

    #[test]
    fn test_rotation_blocked_by_wall_is_discarded() {
        let mut game = running(3, GameConfig::standard());
        // Vertical I against the right wall cannot turn horizontal.
        game.set_active(ActivePiece {
            kind: 0,
            rotation: Rotation::new(1),
            row: 5,
            col: 9,
        });
        assert!(!game.apply(Command::Rotate));
        assert_eq!(game.piece().rotation, Rotation::new(1));
    }

    #[test]
    fn test_stop_from_paused() {
        let mut game = running(3, GameConfig::standard());
        assert!(game.apply(Command::Pause));
        assert!(game.apply(Command::Stop));
        assert_eq!(game.state(), LifecycleState::GameOver);
        assert!(!game.apply(Command::Stop));
        assert!(!game.apply(Command::Pause));
        assert!(!game.apply(Command::ToggleGravity));
    }

    #[test]
    fn test_toggle_gravity_freezes_ticks_only() {
        let mut game = running(3, GameConfig::standard());
        assert!(game.apply(Command::ToggleGravity));
        assert!(!game.accepts_gravity());
        let before = game.piece();
        assert!(!game.tick());
        assert_eq!(game.piece(), before);

        assert!(game.apply(Command::Drop));
        assert_eq!(game.piece().row, before.row + 1);

        assert!(game.apply(Command::ToggleGravity));
        assert!(game.accepts_gravity());
    }

    #[test]
    fn test_bucket_piece_stacks_and_clears() {
        let mut game = running(9, GameConfig::bucket());
        // Bucket block sits in mask column 1: anchors 0..=2 cover field columns 1..=3.
        for anchor in [0, 1, 2] {
            game.set_active(ActivePiece {
                kind: 0,
                rotation: Rotation::default(),
                row: 9,
                col: anchor,
            });
            game.apply(Command::Drop);
            game.apply(Command::Drop);
        }
        assert_eq!(game.lines_cleared(), 1);
        assert_eq!(game.field().occupied_count(), 0);
        assert_eq!(game.pieces_spawned(), 4);
        assert_eq!(game.state(), LifecycleState::Running);
    }

    #[test]
    fn test_spawn_collision_ends_game_without_counting_the_piece() {
        let mut game = running(9, GameConfig::bucket());
        // Block the bucket spawn cell, then lock a piece lower down.
        game.field_mut().set(1, 2, OCCUPIED);
        game.set_active(ActivePiece {
            kind: 0,
            rotation: Rotation::default(),
            row: 10,
            col: 0,
        });
        assert!(game.apply(Command::Drop));
        assert_eq!(game.state(), LifecycleState::GameOver);
        assert_eq!(game.pieces_spawned(), 1);
        assert!(!game.tick());
    }

    #[test]
    fn test_lock_in_spawn_row_with_free_spawn_cell_does_not_count_next_piece() {
        let mut game = running(9, GameConfig::bucket());
        assert!(game.apply(Command::MoveLeft));
        game.field_mut().set(2, 1, OCCUPIED);

        assert!(game.apply(Command::Drop));
        assert_eq!(game.state(), LifecycleState::GameOver);
        assert_eq!(game.pieces_spawned(), 1);
        assert!(game.field().is_occupied(1, 1));
        assert!(!game.field().is_occupied(1, 2));

        let shown = game.piece();
        assert_eq!((shown.row, shown.col), (SPAWN_ROW, 1));
        assert!(!game.tick());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut game = running(5, GameConfig::standard());
        let snap = game.snapshot();
        game.field_mut().set(10, 3, OCCUPIED);
        game.apply(Command::Drop);

        assert!(!snap.field.is_occupied(10, 3));
        assert_eq!(snap.piece.row, SPAWN_ROW);
        assert_eq!(snap.state, LifecycleState::Running);
        assert_eq!(snap.catalog, game.config().catalog);
    }
}
