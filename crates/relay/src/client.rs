//! Relay client: reads broadcast messages and sends commands.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::protocol::{ClientMessage, Message};
use crate::types::Command;

pub struct RelayClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl RelayClient {
    pub async fn connect(addr: impl ToSocketAddrs) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let (reader, writer) = stream.into_split();
        Ok(Self {
            lines: BufReader::new(reader).lines(),
            writer,
        })
    }

    /// Next message from the relay; `None` once the relay closed the connection
    pub async fn recv(&mut self) -> anyhow::Result<Option<Message>> {
        while let Some(line) = self.lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            return Ok(Some(Message::from_line(&line)?));
        }
        Ok(None)
    }

    pub async fn send_command(&mut self, command: Command) -> anyhow::Result<()> {
        self.send_code(command.code()).await
    }

    pub async fn send_code(&mut self, code: u8) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(&ClientMessage::command(code))?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
