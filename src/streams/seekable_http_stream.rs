use crate::errors::{StlParserError, StlParserResult, StreamError};
use log::{debug, info};
use reqwest::{
    blocking::Client,
    header::{CONTENT_LENGTH, RANGE},
    StatusCode,
};
use std::io::{self, Read, Seek, SeekFrom};

/// Read-only view of a remote file fetched with HTTP range requests.
///
/// Small reads are served from a block cache so walking a file record by
/// record costs one request per cache block.
pub struct SeekableHttpStream {
    url: String,
    client: Client,
    position: u64,
    length: Option<u64>,
    cache: Vec<u8>,
    cache_position: u64,
    cache_count: usize,
    http_request_count: u64,
    http_request_bytes_read: u64,
}

impl SeekableHttpStream {
    const CACHE_SIZE: usize = 4096;

    pub fn new(url: impl Into<String>) -> StlParserResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| StreamError::new(e.to_string()))?;

        let mut stream = Self {
            url: url.into(),
            client,
            position: 0,
            length: None,
            cache: vec![0; Self::CACHE_SIZE],
            cache_position: 0,
            cache_count: 0,
            http_request_count: 0,
            http_request_bytes_read: 0,
        };

        stream.get_content_length()?;
        Ok(stream)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn http_request_count(&self) -> u64 {
        self.http_request_count
    }

    pub fn http_request_bytes_read(&self) -> u64 {
        self.http_request_bytes_read
    }

    pub fn print_stats(&self) {
        info!("📊 Download Statistics:");
        info!("   🔢 HTTP Requests: {}", self.http_request_count);
        info!(
            "   📥 Total Downloaded: {} bytes ({:.2} KB)",
            self.http_request_bytes_read,
            self.http_request_bytes_read as f64 / 1024.0
        );
        if let Some(length) = self.length.filter(|&l| l > 0) {
            let percentage = (self.http_request_bytes_read as f64 / length as f64) * 100.0;
            info!("   📊 Downloaded: {:.2}% of total file", percentage);
        }
    }

    pub fn get_length(&self) -> Option<u64> {
        self.length
    }

    fn get_content_length(&mut self) -> StlParserResult<u64> {
        if let Some(length) = self.length {
            return Ok(length);
        }

        let response = self
            .client
            .head(&self.url)
            .send()
            .map_err(|e| StreamError::new(e.to_string()))?;

        self.http_request_count += 1;

        if !response.status().is_success() {
            return Err(StlParserError::Stream(StreamError::new(format!(
                "HTTP error: {}",
                response.status()
            ))));
        }

        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or(StreamError::new(
                "Content-Length header not found or invalid",
            ))?;

        debug!("{} is {} bytes", self.url, content_length);
        self.length = Some(content_length);
        Ok(content_length)
    }

    fn get_byte_range(
        &mut self,
        buffer: &mut [u8],
        offset: usize,
        count: usize,
    ) -> StlParserResult<usize> {
        let range_from = self.position;
        let mut effective_count = count;

        if let Some(length) = self.length {
            if range_from >= length {
                return Ok(0);
            }
            if range_from + effective_count as u64 > length {
                effective_count = (length - range_from) as usize;
            }
        }

        if effective_count == 0 {
            return Ok(0);
        }

        let range_to = range_from + effective_count as u64 - 1;
        let range_header = format!("bytes={}-{}", range_from, range_to);

        let response = self
            .client
            .get(&self.url)
            .header(RANGE, range_header)
            .send()
            .map_err(|e| StreamError::new(e.to_string()))?;

        self.http_request_count += 1;

        if response.status().as_u16() == 416 {
            return Ok(0);
        }

        if !response.status().is_success() {
            return Err(StlParserError::Stream(StreamError::new(format!(
                "HTTP error: {}",
                response.status()
            ))));
        }

        // 200 means the server ignored Range and sent the whole file
        let skip = if response.status() == StatusCode::OK {
            range_from as usize
        } else {
            0
        };

        let bytes = response
            .bytes()
            .map_err(|e| StreamError::new(e.to_string()))?;
        let body = bytes.get(skip..).unwrap_or_default();

        let bytes_read = std::cmp::min(body.len(), effective_count);
        buffer[offset..offset + bytes_read].copy_from_slice(&body[..bytes_read]);
        self.http_request_bytes_read += bytes_read as u64;

        Ok(bytes_read)
    }

    fn get_byte_range_from_cache(
        &self,
        buffer: &mut [u8],
        offset: &mut usize,
        count: &mut usize,
    ) -> usize {
        if self.cache_position > self.position
            || (self.cache_position + self.cache_count as u64) <= self.position
        {
            return 0;
        }

        let cc_offset = (self.position - self.cache_position) as usize;
        let cc_count = std::cmp::min(self.cache_count - cc_offset, *count);

        buffer[*offset..*offset + cc_count]
            .copy_from_slice(&self.cache[cc_offset..cc_offset + cc_count]);
        *offset += cc_count;
        *count -= cc_count;

        cc_count
    }
}

impl Read for SeekableHttpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut offset = 0;
        let mut count = buf.len();
        let current_position = self.position;

        let bytes_from_cache = self.get_byte_range_from_cache(buf, &mut offset, &mut count);
        self.position += bytes_from_cache as u64;

        if count > Self::CACHE_SIZE {
            let bytes_read = self.get_byte_range(buf, offset, count)?;
            self.position += bytes_read as u64;
        } else if count > 0 {
            self.cache_position = self.position;
            self.cache_count = 0;
            let mut block = std::mem::take(&mut self.cache);
            let fetched = self.get_byte_range(&mut block, 0, Self::CACHE_SIZE);
            self.cache = block;
            self.cache_count = fetched?;

            let bytes_from_cache = self.get_byte_range_from_cache(buf, &mut offset, &mut count);
            self.position += bytes_from_cache as u64;
        }

        Ok((self.position - current_position) as usize)
    }
}

impl Seek for SeekableHttpStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let new_position = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::End(offset) => {
                let length = self.get_content_length()?;
                if offset >= 0 {
                    length + offset as u64
                } else {
                    length.saturating_sub((-offset) as u64)
                }
            }
            SeekFrom::Current(offset) => {
                if offset >= 0 {
                    self.position + offset as u64
                } else {
                    self.position.saturating_sub((-offset) as u64)
                }
            }
        };

        self.position = new_position;
        Ok(self.position)
    }
}
