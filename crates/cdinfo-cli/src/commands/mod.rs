use crate::built_info;
use cdinfo_lib::cddb::constants::{DEFAULT_APP_NAME, DEFAULT_SERVER};
use cdinfo_lib::cddb::{CddbConfig, Identity, TransportKind};
use cdinfo_lib::toc::constants::DEFAULT_DEVICE;
use clap::{ArgAction, Parser};
use log::LevelFilter;

/// Identifies an audio CD and looks it up in a CDDB/freedb compatible database.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CD-ROM device to read the table of contents from
    #[arg(long, short = 'd', value_name = "DEVICE", default_value = DEFAULT_DEVICE)]
    pub device: String,

    /// CDDB server to query
    #[arg(
        long,
        short = 's',
        value_name = "HOST",
        env = "CDINFO_SERVER",
        default_value = DEFAULT_SERVER
    )]
    pub server: String,

    /// Server port, defaults to 8880 for the socket protocol and 80 for HTTP
    #[arg(long, short = 'p', value_name = "PORT", env = "CDINFO_PORT")]
    pub port: Option<u16>,

    /// User name sent with the hello handshake, defaults to the login name
    #[arg(long, short = 'u', value_name = "USER", env = "CDINFO_USER")]
    pub user: Option<String>,

    /// Use the server's HTTP CGI interface instead of the CDDBP socket protocol
    #[arg(long, default_value_t = false)]
    pub http: bool,

    /// Read entries from the gnudb web pages (default for gnudb.gnudb.org)
    #[arg(long, overrides_with = "no_web_read")]
    pub web_read: bool,

    /// Always read entries through the CDDB protocol
    #[arg(long, overrides_with = "web_read")]
    pub no_web_read: bool,

    /// Long form, read and show the entry of every match
    #[arg(long, short = 'l', default_value_t = false)]
    pub long: bool,

    /// Verbose output, repeat for more detail
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Test mode, look up a built-in disc instead of reading the drive
    #[arg(long, short = 'T', default_value_t = false)]
    pub test: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn transport(&self) -> TransportKind {
        if self.http {
            TransportKind::Http
        } else {
            TransportKind::Socket
        }
    }

    pub fn identity(&self) -> Identity {
        let identity = Identity::detect(DEFAULT_APP_NAME, built_info::PKG_VERSION);

        match &self.user {
            Some(user) => identity.with_user(user.clone()),
            None => identity,
        }
    }

    pub fn cddb_config(&self, identity: Identity) -> CddbConfig {
        let config = CddbConfig::new(identity)
            .with_server(self.server.clone())
            .with_transport(self.transport());

        match self.port {
            Some(port) => config.with_port(port),
            None => config,
        }
    }

    /// gnudb serves incomplete entries over the protocol, so its web pages are used for
    /// reads unless told otherwise.
    pub fn use_web_read(&self, config: &CddbConfig) -> bool {
        if self.no_web_read {
            return false;
        }

        self.web_read || config.is_default_server()
    }
}
