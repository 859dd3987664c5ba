use crate::bits::reader::{read_field, read_u16_le};
use serde::Serialize;

/// Size of one Text and Timing Information block.
pub const TTI_BLOCK_SIZE: usize = 128;
/// Size of the text field at the end of a TTI block.
pub const TEXT_FIELD_SIZE: usize = 112;

/// Extension block number of the final block of a subtitle.
pub const LAST_EXTENSION_BLOCK: u8 = 0xff;
/// Extension block number of a user data block.
pub const USER_DATA_BLOCK: u8 = 0xfe;

/// `HH:MM:SS:FF` time code stored as four binary bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl Timecode {
    pub fn new(hours: u8, minutes: u8, seconds: u8, frames: u8) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    pub fn to_seconds(&self, frame_rate: u32) -> f64 {
        3600.0 * self.hours as f64
            + 60.0 * self.minutes as f64
            + self.seconds as f64
            + self.frames as f64 / frame_rate as f64
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

/// One TTI block.
#[derive(Debug, Clone, PartialEq)]
pub struct TtiRecord {
    pub subtitle_group_number: u8,
    pub subtitle_number: u16,
    pub extension_block_number: u8,
    pub cumulative_status: u8,
    pub time_code_in: Timecode,
    pub time_code_out: Timecode,
    pub vertical_position: u8,
    pub justification_code: u8,
    pub comment_flag: u8,
    pub text_field: [u8; TEXT_FIELD_SIZE],
}

impl TtiRecord {
    /// Parse a TTI block; `None` if `block` is shorter than a full record.
    pub fn parse(block: &[u8]) -> Option<Self> {
        let mut pos = 0usize;
        let header = read_field(block, &mut pos, 1)?;
        let subtitle_group_number = header[0];
        let subtitle_number = read_u16_le(block, &mut pos)?;
        let flags = read_field(block, &mut pos, 2)?;
        let time_code_in = Timecode::from_bytes(read_field(block, &mut pos, 4)?);
        let time_code_out = Timecode::from_bytes(read_field(block, &mut pos, 4)?);
        let layout = read_field(block, &mut pos, 3)?;

        let mut text_field = [0u8; TEXT_FIELD_SIZE];
        text_field.copy_from_slice(read_field(block, &mut pos, TEXT_FIELD_SIZE)?);

        Some(TtiRecord {
            subtitle_group_number,
            subtitle_number,
            extension_block_number: flags[0],
            cumulative_status: flags[1],
            time_code_in,
            time_code_out,
            vertical_position: layout[0],
            justification_code: layout[1],
            comment_flag: layout[2],
            text_field,
        })
    }

    /// Comment records carry no displayable text.
    pub fn is_comment(&self) -> bool {
        self.comment_flag != 0
    }

    pub fn is_user_data(&self) -> bool {
        self.extension_block_number == USER_DATA_BLOCK
    }

    /// True for the block that completes a subtitle.
    pub fn is_last_block(&self) -> bool {
        self.extension_block_number == LAST_EXTENSION_BLOCK
    }
}
