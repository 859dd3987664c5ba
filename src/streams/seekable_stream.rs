use std::io::{self, Read, Seek};
use std::path::Path;

/// A seekable byte source, local or remote
pub trait SeekableStream: Read + Seek {
    fn print_stats(&self) {}
    fn http_request_count(&self) -> u64 {
        0
    }
    fn http_request_bytes_read(&self) -> u64 {
        0
    }
    /// Total length when known without reading.
    fn len_hint(&self) -> Option<u64> {
        None
    }
}

use super::SeekableHttpStream;
impl SeekableStream for SeekableHttpStream {
    fn print_stats(&self) {
        SeekableHttpStream::print_stats(self)
    }
    fn http_request_count(&self) -> u64 {
        SeekableHttpStream::http_request_count(self)
    }
    fn http_request_bytes_read(&self) -> u64 {
        SeekableHttpStream::http_request_bytes_read(self)
    }
    fn len_hint(&self) -> Option<u64> {
        self.get_length()
    }
}

/// Local file wrapper
pub struct LocalSeekableStream {
    file: std::fs::File,
    length: u64,
}

impl LocalSeekableStream {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let length = file.metadata()?.len();
        Ok(LocalSeekableStream { file, length })
    }
}
impl Read for LocalSeekableStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}
impl Seek for LocalSeekableStream {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
impl SeekableStream for LocalSeekableStream {
    fn len_hint(&self) -> Option<u64> {
        Some(self.length)
    }
}

impl<T: AsRef<[u8]>> SeekableStream for io::Cursor<T> {
    fn len_hint(&self) -> Option<u64> {
        Some(self.get_ref().as_ref().len() as u64)
    }
}
