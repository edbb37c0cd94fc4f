use crate::cddb::codec::{LineSource, parse_status_line, strip_line_ending};
use crate::cddb::error::{CddbError, CddbResult};
use crate::cddb::models::StatusLine;
use crate::cddb::transport::Transport;
use async_trait::async_trait;
use log::{debug, trace, warn};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

/// CDDBP over a persistent TCP connection, one CRLF terminated line per command.
pub struct SocketTransport {
    host: String,
    port: u16,
    connect_timeout: Duration,
    connection: Option<Connection>,
}

impl SocketTransport {
    pub fn new(host: impl Into<String>, port: u16, connect_timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout,
            connection: None,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    fn connection(&mut self) -> CddbResult<&mut Connection> {
        self.connection.as_mut().ok_or(CddbError::ConnectionClosed)
    }

    async fn read_line(&mut self) -> CddbResult<Option<String>> {
        let connection = self.connection()?;

        let mut buf = Vec::new();
        let read = connection.reader.read_until(b'\n', &mut buf).await?;
        if read == 0 {
            return Ok(None);
        }

        let line = strip_line_ending(&String::from_utf8_lossy(&buf)).to_string();
        trace!("<- {line}");

        Ok(Some(line))
    }

    async fn read_status(&mut self) -> CddbResult<StatusLine> {
        let line = self.read_line().await?.ok_or(CddbError::ConnectionClosed)?;
        parse_status_line(&line)
    }
}

#[async_trait]
impl LineSource for SocketTransport {
    async fn next_line(&mut self) -> CddbResult<Option<String>> {
        self.read_line().await
    }
}

#[async_trait]
impl Transport for SocketTransport {
    async fn open(&mut self) -> CddbResult<Option<StatusLine>> {
        let address = self.address();
        debug!("Connecting to {address}");

        let stream = tokio::time::timeout(
            self.connect_timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        .map_err(|_| CddbError::ConnectTimeout(address.clone()))??;

        let (reader, writer) = stream.into_split();
        self.connection = Some(Connection {
            reader: BufReader::new(reader),
            writer,
        });

        let greeting = self.read_status().await?;
        debug!("Connected to {address}: {greeting}");

        Ok(Some(greeting))
    }

    async fn send_command(&mut self, command: &str) -> CddbResult<StatusLine> {
        trace!("-> {command}");

        let connection = self.connection()?;
        connection
            .writer
            .write_all(format!("{command}\r\n").as_bytes())
            .await?;
        connection.writer.flush().await?;

        self.read_status().await
    }

    async fn close(&mut self) -> CddbResult<()> {
        let Some(mut connection) = self.connection.take() else {
            return Ok(());
        };

        debug!("Closing connection to {}", self.address());

        if let Err(err) = connection.writer.write_all(b"quit\r\n").await {
            warn!("Failed to send quit to {}: {err}", self.address());
        }
        connection.writer.shutdown().await?;

        Ok(())
    }
}
