//! gzip-compressed JSON lines, one relay message per line.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::core::Snapshot;
use crate::error::RecordError;
use crate::relay::Message;

/// Encode `messages` into `writer`, returning the writer once the gzip stream is finished
pub fn write_messages<W: Write>(writer: W, messages: &[Message]) -> Result<W, RecordError> {
    let mut encoder = GzEncoder::new(writer, Compression::default());
    for message in messages {
        serde_json::to_writer(&mut encoder, message)?;
        encoder.write_all(b"\n")?;
    }
    Ok(encoder.finish()?)
}

/// Decode every message in a gzip JSON-lines stream
pub fn read_messages<R: Read>(reader: R) -> Result<Vec<Message>, RecordError> {
    let decoder = GzDecoder::new(reader);
    serde_json::Deserializer::from_reader(decoder)
        .into_iter::<Message>()
        .map(|m| m.map_err(RecordError::from))
        .collect()
}

pub fn read_recording(path: impl AsRef<Path>) -> Result<Vec<Message>, RecordError> {
    let file = File::open(path)?;
    read_messages(BufReader::new(file))
}

/// Decode a recording into the snapshots it carries, in file order
pub fn replay_snapshots(path: impl AsRef<Path>) -> Result<Vec<Snapshot>, RecordError> {
    read_recording(path)?
        .iter()
        .map(|m| m.snapshot().map_err(RecordError::from))
        .collect()
}
