//! Move recordings
//!
//! A recording is a gzip-compressed file of relay [`Message`](crate::relay::Message)s, one
//! JSON object per line. [`MoveRecorder`] builds one per session; the codec functions read it
//! back, optionally straight into snapshots for playback.

pub mod codec;
pub mod error;
pub mod recorder;

pub use blocktris_core as core;
pub use blocktris_relay as relay;
pub use blocktris_types as types;

pub use codec::{read_messages, read_recording, replay_snapshots, write_messages};
pub use error::RecordError;
pub use recorder::MoveRecorder;
