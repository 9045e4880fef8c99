//! Network relay for running games
//!
//! Streams every snapshot to TCP clients as line-delimited JSON and accepts commands back.
//! Commands that pass through the relay are also announced as `move` messages carrying the
//! snapshot they were applied to, which is what the recorder stores.
//!
//! - [`protocol`]: message types and snapshot wire encoding
//! - [`server`]: [`RelayHub`] and [`run_relay`]
//! - [`client`]: [`RelayClient`]

pub mod client;
pub mod protocol;
pub mod server;

pub use blocktris_core as core;
pub use blocktris_engine as engine;
pub use blocktris_types as types;

pub use client::RelayClient;
pub use protocol::{ClientMessage, Message, WireError, WireSnapshot};
pub use server::{run_relay, RelayConfig, RelayHub};
