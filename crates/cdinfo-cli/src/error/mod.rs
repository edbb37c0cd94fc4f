use cdinfo_lib::cddb::CddbError;
use cdinfo_lib::toc::error::TocError;
use thiserror::Error;

pub const EXIT_DEVICE_ERROR: u8 = 3;
pub const EXIT_PROTOCOL_ERROR: u8 = 4;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    TocError(#[from] TocError),

    #[error("Lookup on {server} failed: {source}")]
    CddbError { server: String, source: CddbError },
}

impl CliError {
    pub fn cddb(server: impl Into<String>, source: CddbError) -> Self {
        CliError::CddbError {
            server: server.into(),
            source,
        }
    }

    /// Connection failures share the device error code, only protocol errors get their own.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::TocError(_) => EXIT_DEVICE_ERROR,
            CliError::CddbError { source, .. } if source.is_protocol() => EXIT_PROTOCOL_ERROR,
            CliError::CddbError { .. } => EXIT_DEVICE_ERROR,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_exit_codes() {
        assert_eq!(CliError::from(TocError::NoTracks).exit_code(), 3);
        assert_eq!(CliError::from(TocError::DriveUnsupported).exit_code(), 3);

        let protocol = CliError::cddb(
            "gnudb.gnudb.org",
            CddbError::UnexpectedStatus {
                code: 500,
                line: "500 Unrecognized command".to_string(),
            },
        );
        assert_eq!(protocol.exit_code(), 4);

        let connection = CliError::cddb("gnudb.gnudb.org", CddbError::ConnectionClosed);
        assert_eq!(connection.exit_code(), 3);
    }

    #[test]
    fn cddb_error_names_the_server() {
        let err = CliError::cddb("gnudb.gnudb.org", CddbError::TruncatedBlock);
        assert_eq!(
            err.to_string(),
            "Lookup on gnudb.gnudb.org failed: Response ended before the terminating '.' line"
        );
    }
}
