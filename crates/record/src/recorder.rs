//! MoveRecorder: accumulates messages for one session file.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::codec::write_messages;
use crate::error::RecordError;
use crate::relay::Message;

#[derive(Debug)]
pub struct MoveRecorder {
    path: PathBuf,
    messages: Vec<Message>,
}

impl MoveRecorder {
    /// New session file `move_records_<unix-seconds>.dat` inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::with_path(dir.as_ref().join(format!("move_records_{}.dat", secs)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            messages: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn queue(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Rewrite the session file with everything queued so far
    ///
    /// The file is written beside the target and renamed over it, so readers only ever see a
    /// complete gzip stream.
    pub fn flush(&self) -> Result<(), RecordError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let partial = self.path.with_extension("dat.partial");
        let writer = write_messages(BufWriter::new(File::create(&partial)?), &self.messages)?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        fs::rename(&partial, &self.path)?;
        Ok(())
    }
}
