use super::types::ProgrammeMetadata;
use crate::errors::StlParserResult;
use crate::stl::{read_gsi, GsiHeader};
use crate::streams::seekable_http_stream::SeekableHttpStream;
use crate::streams::seekable_stream::LocalSeekableStream;
use crate::streams::seekable_stream::SeekableStream;
use std::io::SeekFrom;

/// Read the GSI header of a remote file
pub fn read_remote_header(url: &str) -> StlParserResult<GsiHeader> {
    let stream = SeekableHttpStream::new(url)?;
    read_header_generic(stream)
}

/// Read the GSI header of a local file
pub fn read_local_header<P: AsRef<std::path::Path>>(path: P) -> StlParserResult<GsiHeader> {
    let stream = LocalSeekableStream::open(path)?;
    read_header_generic(stream)
}

/// Extract programme metadata from a remote URL
pub fn read_remote_metadata(url: &str) -> StlParserResult<ProgrammeMetadata> {
    let stream = SeekableHttpStream::new(url)?;
    extract_metadata_generic(stream)
}

/// Extract programme metadata from a local file
pub fn read_local_metadata<P: AsRef<std::path::Path>>(
    path: P,
) -> StlParserResult<ProgrammeMetadata> {
    let stream = LocalSeekableStream::open(path)?;
    extract_metadata_generic(stream)
}

fn read_header_generic<S: SeekableStream>(mut stream: S) -> StlParserResult<GsiHeader> {
    stream.seek(SeekFrom::Start(0))?;
    read_gsi(&mut stream)
}

fn extract_metadata_generic<S: SeekableStream>(mut stream: S) -> StlParserResult<ProgrammeMetadata> {
    let size = match stream.len_hint() {
        Some(size) => size,
        None => stream.seek(SeekFrom::End(0))?,
    };
    let header = read_header_generic(stream)?;
    Ok(ProgrammeMetadata::from_header(&header, size))
}
