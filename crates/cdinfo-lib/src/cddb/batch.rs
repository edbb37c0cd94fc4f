use crate::cddb::error::CddbResult;
use crate::cddb::models::{MatchCandidate, MetadataRecord};
use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;

/// Anything able to read the full entry behind a match.
#[async_trait]
pub trait MetadataSource: Send {
    async fn read_entry(&mut self, category: &str, disc_key: &str) -> CddbResult<MetadataRecord>;
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub candidate: MatchCandidate,
    pub result: CddbResult<MetadataRecord>,
}

/// Reads every candidate in order, waiting `delay` between reads so servers do not rate
/// limit us. A failed read is recorded and the remaining candidates are still read.
pub async fn fetch_all<S>(
    source: &mut S,
    candidates: &[MatchCandidate],
    delay: Duration,
) -> Vec<FetchOutcome>
where
    S: MetadataSource + ?Sized,
{
    let mut outcomes = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        debug!("Reading {}/{}", candidate.category, candidate.disc_key);

        let result = source
            .read_entry(&candidate.category, &candidate.disc_key)
            .await;

        if let Err(err) = &result {
            warn!(
                "Failed to read {}/{}: {err}",
                candidate.category, candidate.disc_key
            );
        }

        outcomes.push(FetchOutcome {
            candidate: candidate.clone(),
            result,
        });
    }

    outcomes
}
