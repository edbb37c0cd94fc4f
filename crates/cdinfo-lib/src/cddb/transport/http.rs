use crate::cddb::codec::{BufferedLines, LineSource, cgi_form, parse_status_line};
use crate::cddb::constants::CGI_PATH;
use crate::cddb::error::{CddbError, CddbResult};
use crate::cddb::models::StatusLine;
use crate::cddb::transport::Transport;
use async_trait::async_trait;
use log::{debug, trace};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};

/// CDDB over HTTP: every command is a separate form POST to the server's CGI script.
pub struct HttpTransport {
    client: Client,
    url: String,
    hello: String,
    pending: BufferedLines,
}

impl HttpTransport {
    /// `hello` is the `<user> <host> <app> <version>` identification sent with each request.
    pub fn new(client: Client, host: &str, port: u16, hello: impl Into<String>) -> Self {
        Self::with_url(client, format!("http://{host}:{port}{CGI_PATH}"), hello)
    }

    pub fn with_url(client: Client, url: impl Into<String>, hello: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            hello: hello.into(),
            pending: BufferedLines::default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LineSource for HttpTransport {
    async fn next_line(&mut self) -> CddbResult<Option<String>> {
        self.pending.next_line().await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open(&mut self) -> CddbResult<Option<StatusLine>> {
        Ok(None)
    }

    async fn send_command(&mut self, command: &str) -> CddbResult<StatusLine> {
        debug!("POST {} cmd={command}", self.url);

        let res = self
            .client
            .request(Method::POST, &self.url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(cgi_form(command, &self.hello))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(CddbError::NoSuccessStatusCode(res.status(), res.text().await?));
        }

        let body = res.text().await?;
        trace!("<- {body}");

        self.pending = BufferedLines::from_text(&body);

        let status = self
            .pending
            .next_line()
            .await?
            .ok_or(CddbError::EmptyResponse)?;

        parse_status_line(&status)
    }

    async fn close(&mut self) -> CddbResult<()> {
        self.pending = BufferedLines::default();
        Ok(())
    }
}
