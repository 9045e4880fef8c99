//! Records moves announced by a relay, or dumps an existing recording.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::time::{self, MissedTickBehavior};

use blocktris::record::{read_recording, MoveRecorder};
use blocktris::relay::{Message, RelayClient};

const FLUSH_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Parser)]
#[command(about, name = "game-recorder")]
struct Args {
    /// Relay address to record from
    #[arg(short, long, default_value = "127.0.0.1:7878")]
    url: String,

    /// Decode this recording and print every snapshot instead of recording
    #[arg(short, long)]
    dump: Option<PathBuf>,

    /// Directory new recordings are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    match args.dump {
        Some(path) => dump(&path),
        None => record(&args.url, args.out_dir).await,
    }
}

fn dump(path: &Path) -> anyhow::Result<()> {
    let messages = read_recording(path)
        .with_context(|| format!("couldn't read recording {}", path.display()))?;
    println!("[Recorder] decoded {} messages from {}", messages.len(), path.display());

    for message in &messages {
        let snap = message.snapshot().context("couldn't decode snapshot")?;
        if let Some(code) = message.move_code() {
            println!("move {}", code);
        }
        println!("{}", snap.debug_string());
    }
    Ok(())
}

async fn record(url: &str, out_dir: PathBuf) -> anyhow::Result<()> {
    let mut client = RelayClient::connect(url)
        .await
        .with_context(|| format!("couldn't connect to relay at {}", url))?;
    let mut recorder = MoveRecorder::new(out_dir);
    println!("[Recorder] recording {} into {}", url, recorder.path().display());

    let mut flush = time::interval(FLUSH_INTERVAL);
    flush.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            message = client.recv() => match message? {
                Some(message @ Message::Move { .. }) => recorder.queue(message),
                Some(Message::StateUpdate { .. }) => {}
                None => {
                    println!("[Recorder] relay closed the connection");
                    break;
                }
            },
            _ = flush.tick() => {
                if !recorder.is_empty() {
                    recorder.flush()?;
                }
            }
            _ = &mut ctrl_c => {
                println!("[Recorder] interrupted");
                break;
            }
        }
    }

    recorder.flush()?;
    println!("[Recorder] wrote {} moves to {}", recorder.len(), recorder.path().display());
    Ok(())
}
