use crate::toc::constants::{FRAMES_PER_SECOND, LEADOUT_TRACK_NUMBER, MAX_TRACKS};
use crate::toc::error::{TocError, TocResult};
use std::fmt::{Display, Formatter};

/// A single TOC entry in minute/second/frame form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub number: u8,
    pub minutes: u32,
    pub seconds: u8,
    pub frames: u8,
    pub mode: u8,
}

impl Track {
    /// Builds a track starting at an absolute frame offset.
    pub fn from_offset(number: u8, offset: u32) -> Self {
        let total_seconds = offset / FRAMES_PER_SECOND;

        Self {
            number,
            minutes: total_seconds / 60,
            seconds: (total_seconds % 60) as u8,
            frames: (offset % FRAMES_PER_SECOND) as u8,
            mode: 0,
        }
    }

    pub fn seconds_total(&self) -> u32 {
        self.minutes * 60 + self.seconds as u32
    }

    pub fn frame_offset(&self) -> u32 {
        self.seconds_total() * FRAMES_PER_SECOND + self.frames as u32
    }

    fn check_position(&self) -> TocResult<()> {
        if self.seconds >= 60 || self.frames as u32 >= FRAMES_PER_SECOND {
            return Err(TocError::InvalidPosition {
                track: self.number,
                seconds: self.seconds,
                frames: self.frames,
            });
        }

        Ok(())
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Track({}, {}:{:02}:{:02}, mode {})",
            self.number, self.minutes, self.seconds, self.frames, self.mode
        )
    }
}

/// Table of contents of an audio CD.
///
/// Only constructible through [`DiscToc::new`] or [`DiscToc::from_offsets`], both of which
/// reject tables that a drive could never report: no tracks, track numbers past 99, gaps in
/// the numbering, seconds or frames out of range, or a leadout that does not follow the last
/// track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscToc {
    first: u8,
    tracks: Vec<Track>,
    leadout: Track,
}

impl DiscToc {
    pub fn new(first: u8, tracks: Vec<Track>, leadout: Track) -> TocResult<Self> {
        if first < 1 {
            return Err(TocError::InvalidFirstTrack(first));
        }

        if tracks.is_empty() {
            return Err(TocError::NoTracks);
        }

        if tracks.len() > MAX_TRACKS {
            return Err(TocError::TooManyTracks(tracks.len()));
        }

        let last = first as usize + tracks.len() - 1;
        if last > MAX_TRACKS {
            return Err(TocError::TrackNumberOutOfRange(last));
        }

        for (index, track) in tracks.iter().enumerate() {
            let expected = first as usize + index;
            if track.number as usize != expected {
                return Err(TocError::NonContiguousTrack {
                    expected: expected as u8,
                    found: track.number,
                });
            }
            track.check_position()?;
        }
        leadout.check_position()?;

        let last_track = tracks[tracks.len() - 1].frame_offset();
        if leadout.frame_offset() <= last_track {
            return Err(TocError::LeadoutBeforeLastTrack {
                leadout: leadout.frame_offset(),
                last_track,
            });
        }

        Ok(Self {
            first,
            tracks,
            leadout,
        })
    }

    /// Builds a TOC from absolute track offsets (in frames) and the leadout offset.
    /// Tracks are numbered from 1.
    pub fn from_offsets(offsets: &[u32], leadout: u32) -> TocResult<Self> {
        if offsets.len() > MAX_TRACKS {
            return Err(TocError::TooManyTracks(offsets.len()));
        }

        let tracks = offsets
            .iter()
            .enumerate()
            .map(|(index, offset)| Track::from_offset(index as u8 + 1, *offset))
            .collect();

        Self::new(1, tracks, Track::from_offset(LEADOUT_TRACK_NUMBER, leadout))
    }

    pub fn first(&self) -> u8 {
        self.first
    }

    pub fn last(&self) -> u8 {
        self.tracks[self.tracks.len() - 1].number
    }

    pub fn track_count(&self) -> u8 {
        self.tracks.len() as u8
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn first_track(&self) -> &Track {
        &self.tracks[0]
    }

    pub fn leadout(&self) -> &Track {
        &self.leadout
    }
}

impl Display for DiscToc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<DiscToc {} tracks>", self.track_count())
    }
}
