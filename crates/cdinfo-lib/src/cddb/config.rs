use crate::cddb::codec::hello_argument;
use crate::cddb::constants::{
    CONNECT_TIMEOUT, DEFAULT_APP_NAME, DEFAULT_HTTP_PORT, DEFAULT_SERVER, DEFAULT_SOCKET_PORT,
    DEFAULT_WEB_SERVER, FETCH_DELAY,
};
use log::debug;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    #[default]
    Socket,
    Http,
}

impl TransportKind {
    pub fn default_port(self) -> u16 {
        match self {
            TransportKind::Socket => DEFAULT_SOCKET_PORT,
            TransportKind::Http => DEFAULT_HTTP_PORT,
        }
    }
}

/// How the client introduces itself in `cddb hello`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub host: String,
    pub app_name: String,
    pub app_version: String,
}

impl Identity {
    /// Identity of the current login user on this machine. The host is the name the OS
    /// reports, which is not necessarily fully qualified.
    pub fn detect(app_name: impl Into<String>, app_version: impl Into<String>) -> Self {
        let user = whoami::username();
        let host = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string());

        debug!("Detected identity {user}@{host}");

        Self::new(user, host, app_name, app_version)
    }

    pub fn new(
        user: impl Into<String>,
        host: impl Into<String>,
        app_name: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            user: hello_word(user.into(), "anonymous"),
            host: hello_word(host.into(), "localhost"),
            app_name: hello_word(app_name.into(), DEFAULT_APP_NAME),
            app_version: hello_word(app_version.into(), "0"),
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = hello_word(user.into(), "anonymous");
        self
    }

    pub fn hello_argument(&self) -> String {
        hello_argument(&self.user, &self.host, &self.app_name, &self.app_version)
    }
}

/// The hello arguments are space separated, so each one has to be a single word.
fn hello_word(value: String, fallback: &str) -> String {
    let word: String = value
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    if word.is_empty() {
        fallback.to_string()
    } else {
        word
    }
}

#[derive(Debug, Clone)]
pub struct CddbConfig {
    pub server: String,
    pub port: u16,
    pub transport: TransportKind,
    pub identity: Identity,
    pub connect_timeout: Duration,
    pub fetch_delay: Duration,
    pub web_server: String,
}

impl CddbConfig {
    pub fn new(identity: Identity) -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            port: TransportKind::Socket.default_port(),
            transport: TransportKind::Socket,
            identity,
            connect_timeout: CONNECT_TIMEOUT,
            fetch_delay: FETCH_DELAY,
            web_server: DEFAULT_WEB_SERVER.to_string(),
        }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Switches transport; the port follows unless set explicitly afterwards.
    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self.port = transport.default_port();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn is_default_server(&self) -> bool {
        self.server.eq_ignore_ascii_case(DEFAULT_SERVER)
    }
}
