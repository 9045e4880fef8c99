//! Keyboard input for the console game.
//!
//! Maps `crossterm` key events onto engine [`Command`](crate::types::Command)s. There is no
//! repeat handling: every key press becomes exactly one command.

pub mod map;

pub use blocktris_types as types;

pub use map::{handle_key_event, should_quit};
