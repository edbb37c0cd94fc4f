use std::time::Duration;

pub const DEFAULT_SERVER: &str = "gnudb.gnudb.org";
pub const DEFAULT_WEB_SERVER: &str = "gnudb.org";
pub const DEFAULT_SOCKET_PORT: u16 = 8880;
pub const DEFAULT_HTTP_PORT: u16 = 80;
pub const CGI_PATH: &str = "/~cddb/cddb.cgi";

pub const PROTOCOL_LEVEL: u8 = 6;
pub const BLOCK_TERMINATOR: &str = ".";

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const FETCH_DELAY: Duration = Duration::from_secs(1);

pub const DEFAULT_APP_NAME: &str = "cdinfo";

// Status codes
pub const OK: u16 = 200;
pub const NO_MATCH: u16 = 202;
pub const EXACT_MATCHES: u16 = 210;
pub const INEXACT_MATCHES: u16 = 211;
pub const ENTRY_FOLLOWS: u16 = 210;
pub const HANDSHAKE_FAILED_FROM: u16 = 300;
