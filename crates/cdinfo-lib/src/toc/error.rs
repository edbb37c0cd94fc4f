use thiserror::Error;

#[derive(Debug, Error)]
pub enum TocError {
    #[error("The first track number must be at least 1, got {0}")]
    InvalidFirstTrack(u8),

    #[error("The table of contents does not contain any tracks")]
    NoTracks,

    #[error("Too many tracks: {0}, an audio CD holds at most 99")]
    TooManyTracks(usize),

    #[error("Track numbers must lie between 1 and 99, the disc ends at track {0}")]
    TrackNumberOutOfRange(usize),

    #[error("Track {track} has an invalid position {seconds}s {frames}f")]
    InvalidPosition { track: u8, seconds: u8, frames: u8 },

    #[error("Expected track {expected} but found track {found}")]
    NonContiguousTrack { expected: u8, found: u8 },

    #[error("Leadout at frame {leadout} does not follow the last track at frame {last_track}")]
    LeadoutBeforeLastTrack { leadout: u32, last_track: u32 },

    #[error("Could not read the table of contents from {device}: {reason}")]
    DeviceUnreadable { device: String, reason: String },

    #[error("Reading from a drive is not supported by this build, enable the `drive` feature")]
    DriveUnsupported,
}

pub type TocResult<T> = Result<T, TocError>;
