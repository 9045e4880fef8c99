//! Producer and consumer ends of a running game.
//!
//! Commands travel over a bounded mpsc queue: producers wait when it is full. Snapshots
//! travel over a bounded broadcast ring: the loop never waits on consumers, and a consumer
//! that falls behind loses the oldest snapshots and resumes from the newest retained ones.

use tokio::sync::{broadcast, mpsc};

use crate::core::Snapshot;
use crate::error::EngineError;
use crate::types::Command;

/// Sends commands into a game loop. Cheap to clone; one per producer.
#[derive(Debug, Clone)]
pub struct CommandSink {
    tx: mpsc::Sender<Command>,
}

impl CommandSink {
    pub(crate) fn new(tx: mpsc::Sender<Command>) -> Self {
        Self { tx }
    }

    /// Queue a command, waiting for room if the queue is full
    pub async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.tx.send(command).await.map_err(|_| EngineError::Closed)
    }

    /// Queue a raw command code
    ///
    /// Unknown codes are dropped as no-ops; returns whether anything was queued.
    pub async fn send_code(&self, code: u8) -> Result<bool, EngineError> {
        match Command::from_code(code) {
            Some(command) => {
                self.send(command).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Queue a command without waiting
    pub fn try_send(&self, command: Command) -> Result<(), EngineError> {
        self.tx.try_send(command).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => EngineError::Busy,
            mpsc::error::TrySendError::Closed(_) => EngineError::Closed,
        })
    }

    /// Queue a command from a thread outside the async runtime
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context.
    pub fn blocking_send(&self, command: Command) -> Result<(), EngineError> {
        self.tx.blocking_send(command).map_err(|_| EngineError::Closed)
    }

    /// True once the game loop has exited
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receives snapshots from a game loop
#[derive(Debug)]
pub struct SnapshotSource {
    rx: broadcast::Receiver<Snapshot>,
    dropped: u64,
}

impl SnapshotSource {
    pub(crate) fn new(rx: broadcast::Receiver<Snapshot>) -> Self {
        Self { rx, dropped: 0 }
    }

    /// Next snapshot, or `None` once the loop has exited and everything was read
    pub async fn recv(&mut self) -> Option<Snapshot> {
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(n)) => self.dropped += n,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next snapshot if one is already waiting
    pub fn try_recv(&mut self) -> Option<Snapshot> {
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::TryRecvError::Lagged(n)) => self.dropped += n,
                Err(_) => return None,
            }
        }
    }

    /// Drain everything waiting and keep only the newest snapshot
    pub fn latest(&mut self) -> Option<Snapshot> {
        let mut last = None;
        while let Some(snapshot) = self.try_recv() {
            last = Some(snapshot);
        }
        last
    }

    /// Snapshots this subscriber lost by falling behind
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// A new independent subscriber starting from the next published snapshot
    pub fn resubscribe(&self) -> Self {
        Self::new(self.rx.resubscribe())
    }
}
