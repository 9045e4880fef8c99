//! Blocktris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so binaries, integration tests and benches
//! can use `blocktris::{core,engine,input,record,relay,term,types}`.

pub use blocktris_core as core;
pub use blocktris_engine as engine;
pub use blocktris_input as input;
pub use blocktris_record as record;
pub use blocktris_relay as relay;
pub use blocktris_term as term;
pub use blocktris_types as types;
