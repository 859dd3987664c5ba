use super::types::ContainerFormat;
use crate::bits::reader::{ascii_field, read_block};
use crate::errors::{StlParserError, StlParserResult};
use crate::stl::DiskFormat;
use crate::streams::seekable_stream::SeekableStream;
use std::io::SeekFrom;

const DFC_OFFSET: usize = 3;
const DFC_LEN: usize = 8;

/// Detect the container format from the Disk Format Code.
///
/// Reads from the start of the stream and leaves it positioned at offset 0.
pub fn detect_format<S: SeekableStream>(
    stream: &mut S,
) -> StlParserResult<ContainerFormat> {
    let mut prefix = [0u8; DFC_OFFSET + DFC_LEN];
    stream.seek(SeekFrom::Start(0))?;
    let read = read_block(stream, &mut prefix)?;
    stream.seek(SeekFrom::Start(0))?;
    if read < prefix.len() {
        return Err(StlParserError::TruncatedInput {
            context: "disk format code",
            expected: prefix.len(),
            actual: read,
        });
    }

    let code = ascii_field(&prefix[DFC_OFFSET..]);
    Ok(match DiskFormat::from_code(&code) {
        Some(format) => format.into(),
        None => ContainerFormat::Unknown(code.trim_end().to_string()),
    })
}

/// Get format name as string for display
pub fn format_to_string(format: &ContainerFormat) -> String {
    match format {
        ContainerFormat::Unknown(code) if code.is_empty() => "unknown".to_string(),
        ContainerFormat::Unknown(code) => format!("unknown ({})", code),
        known => known.name().to_string(),
    }
}
