use super::detector::{detect_format, format_to_string};
use super::types::{ContainerFormat, ProbeResult};
use crate::errors::StlParserResult;
use crate::stl::read_gsi;
use crate::streams::seekable_http_stream::SeekableHttpStream;
use crate::streams::seekable_stream::LocalSeekableStream;
use crate::streams::seekable_stream::SeekableStream;
use std::io::{self, SeekFrom};

/// Probe a remote STL file
pub fn probe_remote_stl(url: &str) -> StlParserResult<String> {
    let stream = SeekableHttpStream::new(url)?;
    probe_generic(stream)
}

/// Probe a local STL file
pub fn probe_local_stl<P: AsRef<std::path::Path>>(path: P) -> StlParserResult<String> {
    let stream = LocalSeekableStream::open(path)?;
    probe_generic(stream)
}

/// Probe a remote file and return detailed information
pub fn probe_remote_detailed(url: &str) -> io::Result<ProbeResult> {
    let stream = SeekableHttpStream::new(url)?;
    probe_detailed_generic(stream)
}

/// Probe a local file and return detailed information
pub fn probe_local_detailed<P: AsRef<std::path::Path>>(path: P) -> io::Result<ProbeResult> {
    let stream = LocalSeekableStream::open(path)?;
    probe_detailed_generic(stream)
}

/// A file is valid when the disk format is known and the whole GSI block parses.
fn probe_detailed_generic<S: SeekableStream>(mut stream: S) -> io::Result<ProbeResult> {
    let size = stream.seek(SeekFrom::End(0))?;

    let checked = detect_format(&mut stream).and_then(|format| {
        if format.is_stl() {
            read_gsi(&mut stream).map(|_| format)
        } else {
            Ok(format)
        }
    });

    match checked {
        Ok(format) if format.is_stl() => Ok(ProbeResult {
            format,
            size,
            is_valid: true,
            error: None,
        }),
        Ok(format) => Ok(ProbeResult {
            error: Some(format!("not an EBU STL file: {}", format_to_string(&format))),
            format,
            size,
            is_valid: false,
        }),
        Err(e) => Ok(ProbeResult {
            format: ContainerFormat::Unknown("unknown".to_string()),
            size,
            is_valid: false,
            error: Some(e.to_string()),
        }),
    }
}

/// Generic probe function that detects format and returns a descriptive string
fn probe_generic<S: SeekableStream>(mut stream: S) -> StlParserResult<String> {
    let format = detect_format(&mut stream)?;
    Ok(format_to_string(&format))
}
