use crate::cddb::batch::{FetchOutcome, MetadataSource, fetch_all};
use crate::cddb::codec::{
    hello_command, parse_match_line, parse_metadata, read_block, read_command,
};
use crate::cddb::config::{CddbConfig, Identity};
use crate::cddb::constants::{
    ENTRY_FOLLOWS, EXACT_MATCHES, HANDSHAKE_FAILED_FROM, INEXACT_MATCHES, NO_MATCH, OK,
};
use crate::cddb::error::{CddbError, CddbResult};
use crate::cddb::models::{MatchCandidate, MetadataRecord, QueryCommand, StatusLine};
use crate::cddb::transport::{HttpTransport, SocketTransport, Transport};
use crate::toc::models::DiscToc;
use crate::util::http::client_for;
use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Disconnected,
    /// Greeting accepted, hello not yet acknowledged.
    Connected,
    Ready,
}

pub struct CddbClient<T: Transport> {
    transport: T,
    identity: Identity,
    state: ClientState,
}

impl CddbClient<SocketTransport> {
    pub fn socket(config: &CddbConfig) -> Self {
        let transport =
            SocketTransport::new(config.server.clone(), config.port, config.connect_timeout);

        Self::new(transport, config.identity.clone())
    }
}

impl CddbClient<HttpTransport> {
    pub fn http(config: &CddbConfig) -> CddbResult<Self> {
        let transport = HttpTransport::new(
            client_for(config.connect_timeout)?,
            &config.server,
            config.port,
            config.identity.hello_argument(),
        );

        Ok(Self::new(transport, config.identity.clone()))
    }
}

impl<T: Transport> CddbClient<T> {
    pub fn new(transport: T, identity: Identity) -> Self {
        Self {
            transport,
            identity,
            state: ClientState::Disconnected,
        }
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    /// Opens the connection and performs the hello handshake. Transports without a
    /// persistent connection go straight to [`ClientState::Ready`].
    pub async fn connect(&mut self) -> CddbResult<()> {
        let Some(greeting) = self.transport.open().await? else {
            self.state = ClientState::Ready;
            return Ok(());
        };

        if greeting.code != OK {
            return Err(handshake_rejected(greeting));
        }
        self.state = ClientState::Connected;

        let hello = hello_command(
            &self.identity.user,
            &self.identity.host,
            &self.identity.app_name,
            &self.identity.app_version,
        );
        let status = self.transport.send_command(&hello).await?;
        if status.code >= HANDSHAKE_FAILED_FROM {
            return Err(handshake_rejected(status));
        }

        debug!("Handshake complete: {status}");
        self.state = ClientState::Ready;

        Ok(())
    }

    async fn ensure_ready(&mut self) -> CddbResult<()> {
        match self.state {
            ClientState::Ready => Ok(()),
            _ => self.connect().await,
        }
    }

    pub async fn query(&mut self, toc: &DiscToc) -> CddbResult<Vec<MatchCandidate>> {
        self.ensure_ready().await?;

        let command = QueryCommand::from_toc(toc);
        info!("Looking up disc {:08x}", command.disc_id);

        let status = self.transport.send_command(&command.to_string()).await?;

        let matches = match status.code {
            OK => vec![parse_match_line(&status.rest)?],
            NO_MATCH => Vec::new(),
            INEXACT_MATCHES | EXACT_MATCHES => read_block(&mut self.transport)
                .await?
                .iter()
                .map(|line| parse_match_line(line))
                .collect::<CddbResult<Vec<_>>>()?,
            _ => return Err(unexpected_status(status)),
        };

        debug!("Query returned {} match(es)", matches.len());

        Ok(matches)
    }

    pub async fn fetch(&mut self, category: &str, disc_key: &str) -> CddbResult<MetadataRecord> {
        self.ensure_ready().await?;

        let status = self
            .transport
            .send_command(&read_command(category, disc_key))
            .await?;

        if status.code != ENTRY_FOLLOWS {
            return Err(unexpected_status(status));
        }

        let lines = read_block(&mut self.transport).await?;

        Ok(parse_metadata(lines.iter().map(String::as_str)))
    }

    pub async fn fetch_all(
        &mut self,
        candidates: &[MatchCandidate],
        delay: Duration,
    ) -> Vec<FetchOutcome> {
        fetch_all(self, candidates, delay).await
    }

    /// Ends the session with the server.
    pub async fn quit(mut self) -> CddbResult<()> {
        self.state = ClientState::Disconnected;
        self.transport.close().await
    }
}

#[async_trait]
impl<T: Transport> MetadataSource for CddbClient<T> {
    async fn read_entry(&mut self, category: &str, disc_key: &str) -> CddbResult<MetadataRecord> {
        self.fetch(category, disc_key).await
    }
}

fn handshake_rejected(status: StatusLine) -> CddbError {
    CddbError::HandshakeRejected {
        code: status.code,
        line: status.to_string(),
    }
}

fn unexpected_status(status: StatusLine) -> CddbError {
    CddbError::UnexpectedStatus {
        code: status.code,
        line: status.to_string(),
    }
}
