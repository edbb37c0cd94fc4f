use crate::cddb::codec::LineSource;
use crate::cddb::error::CddbResult;
use crate::cddb::models::StatusLine;
use async_trait::async_trait;

mod http;
mod socket;

pub use http::HttpTransport;
pub use socket::SocketTransport;

/// Carries CDDB commands to a server.
///
/// After [`Transport::send_command`] returns the status line, any block belonging to the
/// same reply is read through the [`LineSource`] implementation.
#[async_trait]
pub trait Transport: LineSource {
    /// Opens the connection and returns the server greeting, or `None` for transports
    /// without a persistent connection.
    async fn open(&mut self) -> CddbResult<Option<StatusLine>>;

    async fn send_command(&mut self, command: &str) -> CddbResult<StatusLine>;

    /// Ends the session. Dropping the transport closes it as well.
    async fn close(&mut self) -> CddbResult<()>;
}
