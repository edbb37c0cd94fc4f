use crate::cddb::batch::MetadataSource;
use crate::cddb::codec::parse_metadata;
use crate::cddb::constants::BLOCK_TERMINATOR;
use crate::cddb::error::{CddbError, CddbResult};
use crate::cddb::models::MetadataRecord;
use crate::util::http::client_for;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method};
use std::time::Duration;

/// Reads disc entries from the gnudb web front-end instead of the CDDB protocol.
///
/// gnudb drops the `DYEAR` and `DGENRE` fields from entries served over the protocol, the
/// web pages carry the complete entry.
pub struct WebEntryReader {
    client: Client,
    base_url: String,
}

impl WebEntryReader {
    pub fn new(web_server: &str, connect_timeout: Duration) -> CddbResult<Self> {
        Ok(Self::with_base_url(
            client_for(connect_timeout)?,
            format!("http://{web_server}"),
        ))
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(&self, category: &str, disc_key: &str) -> CddbResult<MetadataRecord> {
        let url = format!("{}/gnudb/{category}/{disc_key}", self.base_url);
        debug!("GET {url}");

        let res = self.client.request(Method::GET, &url).send().await?;

        if !res.status().is_success() {
            return Err(CddbError::NoSuccessStatusCode(res.status(), res.text().await?));
        }

        let body = res.text().await?;

        // Unlike protocol replies the page may end without a terminator line
        Ok(parse_metadata(
            body.lines().take_while(|line| line.trim_end() != BLOCK_TERMINATOR),
        ))
    }
}

#[async_trait]
impl MetadataSource for WebEntryReader {
    async fn read_entry(&mut self, category: &str, disc_key: &str) -> CddbResult<MetadataRecord> {
        self.fetch(category, disc_key).await
    }
}
