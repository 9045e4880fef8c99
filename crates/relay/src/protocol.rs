//! Protocol module - line-delimited JSON messages between the relay and its clients
//!
//! Relay to client:
//!
//! - `{"type":"stateUpdate","game":{..}}` after every engine event
//! - `{"type":"move","move":4,"game":{..}}` a command and the snapshot it was applied to
//!
//! Client to relay:
//!
//! - `{"type":"command","move":4}`
//!
//! `move` carries the numeric command code. Unknown codes are accepted on the wire and ignored
//! by the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ActivePiece, ConfigError, Field, PieceCatalog, Snapshot};
use crate::types::{Cell, LifecycleState, Rotation, ROTATIONS};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("unknown piece catalog {0:?}")]
    UnknownCatalog(String),

    #[error("unknown lifecycle state {0:?}")]
    UnknownState(String),

    #[error("piece {kind} rotation {rotation} not in catalog {catalog} ({kinds} kinds)")]
    UnknownPiece {
        catalog: String,
        kind: usize,
        rotation: u8,
        kinds: usize,
    },

    #[error("field is {found_rows}x{found_columns}, header says {rows}x{columns}")]
    Dimensions {
        rows: usize,
        columns: usize,
        found_rows: usize,
        found_columns: usize,
    },

    #[error("malformed field: {0}")]
    Field(#[from] ConfigError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot as it travels over the wire
///
/// The field is sent in full, borders included, one inner array per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSnapshot {
    pub seed: u64,
    pub state: String,
    pub piece: usize,
    pub rotation: u8,
    pub row: i32,
    pub col: i32,
    pub rows: usize,
    pub columns: usize,
    pub piece_kinds: usize,
    pub catalog: String,
    pub field: Vec<Vec<Cell>>,
    pub pieces_spawned: u32,
    pub lines_cleared: u32,
    pub gravity: bool,
}

impl From<&Snapshot> for WireSnapshot {
    fn from(snap: &Snapshot) -> Self {
        Self {
            seed: snap.seed,
            state: snap.state.as_str().to_string(),
            piece: snap.piece.kind,
            rotation: snap.piece.rotation.index(),
            row: snap.piece.row,
            col: snap.piece.col,
            rows: snap.rows,
            columns: snap.columns,
            piece_kinds: snap.piece_kinds,
            catalog: snap.catalog.name().to_string(),
            field: snap.field.to_rows(),
            pieces_spawned: snap.pieces_spawned,
            lines_cleared: snap.lines_cleared,
            gravity: snap.gravity,
        }
    }
}

impl TryFrom<WireSnapshot> for Snapshot {
    type Error = WireError;

    fn try_from(wire: WireSnapshot) -> Result<Self, Self::Error> {
        let catalog = PieceCatalog::by_name(&wire.catalog)
            .ok_or_else(|| WireError::UnknownCatalog(wire.catalog.clone()))?;
        let state = LifecycleState::from_str(&wire.state)
            .ok_or_else(|| WireError::UnknownState(wire.state.clone()))?;

        if wire.piece >= catalog.len()
            || wire.piece_kinds > catalog.len()
            || wire.rotation >= ROTATIONS
        {
            return Err(WireError::UnknownPiece {
                catalog: wire.catalog,
                kind: wire.piece,
                rotation: wire.rotation,
                kinds: catalog.len(),
            });
        }

        let field = Field::from_rows(&wire.field)?;
        if field.rows() != wire.rows || field.columns() != wire.columns {
            return Err(WireError::Dimensions {
                rows: wire.rows,
                columns: wire.columns,
                found_rows: field.rows(),
                found_columns: field.columns(),
            });
        }

        Ok(Snapshot {
            seed: wire.seed,
            state,
            piece: ActivePiece {
                kind: wire.piece,
                rotation: Rotation::new(wire.rotation),
                row: wire.row,
                col: wire.col,
            },
            field,
            rows: wire.rows,
            columns: wire.columns,
            piece_kinds: wire.piece_kinds,
            catalog,
            pieces_spawned: wire.pieces_spawned,
            lines_cleared: wire.lines_cleared,
            gravity: wire.gravity,
        })
    }
}

/// Relay to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    StateUpdate {
        game: WireSnapshot,
    },
    Move {
        #[serde(rename = "move")]
        code: u8,
        game: WireSnapshot,
    },
}

impl Message {
    pub fn state_update(snap: &Snapshot) -> Self {
        Message::StateUpdate { game: snap.into() }
    }

    /// A command paired with the snapshot it was applied to
    pub fn movement(code: u8, preceding: &Snapshot) -> Self {
        Message::Move {
            code,
            game: preceding.into(),
        }
    }

    pub fn game(&self) -> &WireSnapshot {
        match self {
            Message::StateUpdate { game } | Message::Move { game, .. } => game,
        }
    }

    pub fn move_code(&self) -> Option<u8> {
        match self {
            Message::Move { code, .. } => Some(*code),
            Message::StateUpdate { .. } => None,
        }
    }

    /// Decode the carried snapshot
    pub fn snapshot(&self) -> Result<Snapshot, WireError> {
        Snapshot::try_from(self.game().clone())
    }

    /// One JSON line, without the trailing newline
    pub fn to_line(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_line(line: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(line.trim())?)
    }
}

/// Client to relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Command {
        #[serde(rename = "move")]
        code: u8,
    },
}

impl ClientMessage {
    pub fn command(code: u8) -> Self {
        ClientMessage::Command { code }
    }

    pub fn code(&self) -> u8 {
        match self {
            ClientMessage::Command { code } => *code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Game, GameConfig};
    use crate::types::{Command, OCCUPIED};

    fn sample() -> Snapshot {
        let mut game = Game::new(77, GameConfig::standard()).unwrap();
        game.start();
        game.field_mut().set(18, 1, OCCUPIED);
        game.apply(Command::Rotate);
        game.snapshot()
    }

    #[test]
    fn test_state_update_shape() {
        let line = Message::state_update(&sample()).to_line().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["type"], "stateUpdate");
        assert_eq!(value["game"]["seed"], 77);
        assert_eq!(value["game"]["state"], "running");
        assert_eq!(value["game"]["catalog"], "standard");
        assert_eq!(value["game"]["pieceKinds"], 7);
        assert_eq!(value["game"]["field"].as_array().unwrap().len(), 20);
        assert_eq!(value["game"]["field"][18][1], 1);
        assert!(value.get("move").is_none());
    }

    #[test]
    fn test_move_message_carries_code() {
        let msg = Message::movement(Command::Drop.code(), &sample());
        let line = msg.to_line().unwrap();
        assert!(line.starts_with(r#"{"type":"move","move":4,"#));

        let back = Message::from_line(&line).unwrap();
        assert_eq!(back.move_code(), Some(4));
        assert_eq!(back.snapshot().unwrap(), sample());
    }

    #[test]
    fn test_client_command_parse() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"command","move":1}"#).unwrap();
        assert_eq!(msg.code(), Command::MoveLeft.code());
        assert_eq!(
            serde_json::to_string(&ClientMessage::command(6)).unwrap(),
            r#"{"type":"command","move":6}"#
        );
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"hello"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_snapshots() {
        let good = WireSnapshot::from(&sample());

        let mut wire = good.clone();
        wire.catalog = "pentomino".into();
        assert!(matches!(
            Snapshot::try_from(wire),
            Err(WireError::UnknownCatalog(_))
        ));

        let mut wire = good.clone();
        wire.state = "sleeping".into();
        assert!(matches!(
            Snapshot::try_from(wire),
            Err(WireError::UnknownState(_))
        ));

        let mut wire = good.clone();
        wire.piece = 9;
        assert!(matches!(
            Snapshot::try_from(wire),
            Err(WireError::UnknownPiece { .. })
        ));

        let mut wire = good.clone();
        wire.field[0][3] = 0;
        assert!(matches!(
            Snapshot::try_from(wire),
            Err(WireError::Field(ConfigError::BorderBreached { row: 0, col: 3 }))
        ));

        let mut wire = good;
        wire.columns = 9;
        assert!(matches!(
            Snapshot::try_from(wire),
            Err(WireError::Dimensions { .. })
        ));
    }
}
