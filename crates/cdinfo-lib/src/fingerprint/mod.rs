//! CDDB disc id computation.
//!
//! The id packs a digit-sum checksum of the track start times, the playing time and the
//! track count into 32 bits. CDDB servers key their database on this exact value, so any
//! difference in rounding turns into "no match" rather than an error.

use crate::toc::constants::FRAMES_PER_SECOND;
use crate::toc::models::DiscToc;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscFingerprint {
    pub checksum: u32,
    pub total_seconds: u32,
    pub track_count: u8,
}

impl DiscFingerprint {
    pub fn from_toc(toc: &DiscToc) -> Self {
        let checksum = toc
            .tracks()
            .iter()
            .map(|track| cddb_sum(track.seconds_total()))
            .sum();

        Self {
            checksum,
            total_seconds: total_seconds(toc),
            track_count: toc.track_count(),
        }
    }

    pub fn disc_id(&self) -> u32 {
        (self.checksum % 0xff) << 24 | self.total_seconds << 8 | self.track_count as u32
    }
}

impl Display for DiscFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.disc_id())
    }
}

pub fn compute_fingerprint(toc: &DiscToc) -> u32 {
    DiscFingerprint::from_toc(toc).disc_id()
}

pub fn track_offsets(toc: &DiscToc) -> Vec<u32> {
    toc.tracks().iter().map(|track| track.frame_offset()).collect()
}

/// Whole seconds between the start of the first track and the leadout.
pub fn total_seconds(toc: &DiscToc) -> u32 {
    toc.leadout().frame_offset() / FRAMES_PER_SECOND
        - toc.first_track().frame_offset() / FRAMES_PER_SECOND
}

/// Sum of the base-10 digits of `n`.
pub fn cddb_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}
