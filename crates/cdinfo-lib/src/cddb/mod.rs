pub mod batch;
pub mod client;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod transport;
pub mod web;

pub use batch::{FetchOutcome, MetadataSource, fetch_all};
pub use client::{CddbClient, ClientState};
pub use config::{CddbConfig, Identity, TransportKind};
pub use error::{CddbError, CddbResult};
pub use models::{MatchCandidate, MetadataRecord, QueryCommand, StatusLine};
pub use web::WebEntryReader;
