pub const FRAMES_PER_SECOND: u32 = 75;

/// Track number the drive reports for the leadout entry.
pub const LEADOUT_TRACK_NUMBER: u8 = 0xAA;

pub const MAX_TRACKS: usize = 99;

pub const DEFAULT_DEVICE: &str = "/dev/cdrom";

/// Track offsets of "A Million Year Girl" by Max Sharam, used by test mode.
pub const TEST_DISC_OFFSETS: [u32; 13] = [
    150, 17395, 34292, 53067, 71137, 84725, 85962, 104055, 124290, 141842, 162472, 175480, 194340,
];

pub const TEST_DISC_LEADOUT: u32 = 213525;
