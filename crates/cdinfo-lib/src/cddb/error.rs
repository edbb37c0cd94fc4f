use thiserror::Error;

#[derive(Debug, Error)]
pub enum CddbError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    HttpError(#[from] reqwest::Error),

    #[error("Timed out connecting to {0}")]
    ConnectTimeout(String),

    #[error("Connection closed by the server")]
    ConnectionClosed,

    #[error("Server returned HTTP status {0}: {1}")]
    NoSuccessStatusCode(reqwest::StatusCode, String),

    #[error("Server rejected the handshake with {code}: {line}")]
    HandshakeRejected { code: u16, line: String },

    #[error("Unexpected response {code} from server: {line}")]
    UnexpectedStatus { code: u16, line: String },

    #[error("Malformed status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("Malformed match line: {0:?}")]
    MalformedMatchLine(String),

    #[error("Malformed query command: {0:?}")]
    MalformedQueryCommand(String),

    #[error("Server sent an empty response")]
    EmptyResponse,

    #[error("Response ended before the terminating '.' line")]
    TruncatedBlock,
}

impl CddbError {
    /// Whether the transport worked but the server said something unexpected.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            CddbError::HandshakeRejected { .. }
                | CddbError::UnexpectedStatus { .. }
                | CddbError::MalformedStatusLine(_)
                | CddbError::MalformedMatchLine(_)
                | CddbError::MalformedQueryCommand(_)
                | CddbError::EmptyResponse
                | CddbError::TruncatedBlock
        )
    }

    pub fn is_connection(&self) -> bool {
        !self.is_protocol()
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            CddbError::HandshakeRejected { code, .. } | CddbError::UnexpectedStatus { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }
}

pub type CddbResult<T> = Result<T, CddbError>;
