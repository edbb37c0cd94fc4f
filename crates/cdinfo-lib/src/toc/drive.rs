use crate::toc::TocSource;
use crate::toc::constants::LEADOUT_TRACK_NUMBER;
use crate::toc::error::{TocError, TocResult};
use crate::toc::models::{DiscToc, Track};
use discid::DiscId;
use log::debug;

/// Reads the TOC of the disc in a physical drive through libdiscid.
#[derive(Debug, Clone)]
pub struct DriveToc {
    device: String,
}

impl DriveToc {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
        }
    }

    fn unreadable(&self, reason: impl Into<String>) -> TocError {
        TocError::DeviceUnreadable {
            device: self.device.clone(),
            reason: reason.into(),
        }
    }

    fn track_number(&self, number: i32) -> TocResult<u8> {
        u8::try_from(number).map_err(|_| self.unreadable(format!("invalid track number {number}")))
    }

    fn offset(&self, offset: i32) -> TocResult<u32> {
        u32::try_from(offset).map_err(|_| self.unreadable(format!("invalid offset {offset}")))
    }
}

impl TocSource for DriveToc {
    fn read_toc(&self) -> TocResult<DiscToc> {
        debug!("Reading TOC from {}", self.device);

        let disc = DiscId::read(Some(self.device.as_str())).map_err(|err| self.unreadable(err))?;

        let first = disc.get_first_track_num();
        let last = disc.get_last_track_num();

        let mut tracks = Vec::new();
        for number in first..=last {
            tracks.push(Track::from_offset(
                self.track_number(number)?,
                self.offset(disc.get_track_offset(number))?,
            ));
        }

        let leadout = Track::from_offset(LEADOUT_TRACK_NUMBER, self.offset(disc.get_sectors())?);

        debug!("Drive reported tracks {first} to {last}, leadout at {}", leadout.frame_offset());

        DiscToc::new(self.track_number(first)?, tracks, leadout)
    }
}
