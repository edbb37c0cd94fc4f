use crate::toc::constants::{TEST_DISC_LEADOUT, TEST_DISC_OFFSETS};
use crate::toc::error::TocResult;
use crate::toc::models::DiscToc;
use log::debug;

pub mod constants;
#[cfg(feature = "drive")]
mod drive;
pub mod error;
pub mod models;

#[cfg(feature = "drive")]
pub use drive::DriveToc;

/// Anything able to supply the table of contents of a disc.
pub trait TocSource {
    fn read_toc(&self) -> TocResult<DiscToc>;
}

/// TOC source backed by a literal list of track offsets and a leadout, all in frames.
#[derive(Debug, Clone)]
pub struct OffsetsToc {
    offsets: Vec<u32>,
    leadout: u32,
}

impl OffsetsToc {
    pub fn new(offsets: Vec<u32>, leadout: u32) -> Self {
        Self { offsets, leadout }
    }

    pub fn test_disc() -> Self {
        Self::new(TEST_DISC_OFFSETS.to_vec(), TEST_DISC_LEADOUT)
    }
}

impl TocSource for OffsetsToc {
    fn read_toc(&self) -> TocResult<DiscToc> {
        debug!(
            "Building TOC from {} offsets, leadout {}",
            self.offsets.len(),
            self.leadout
        );

        DiscToc::from_offsets(&self.offsets, self.leadout)
    }
}
