//! Terminal front end for the console game.
//!
//! [`GameView`] turns a snapshot into a [`FrameBuffer`]; [`TerminalRenderer`] puts frames on
//! screen, rewriting only what changed. Field cells are drawn two characters wide to keep them
//! roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
