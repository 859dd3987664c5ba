use super::gsi::{read_gsi, GsiHeader};
use super::tti::{Timecode, TtiRecord, TTI_BLOCK_SIZE};
use crate::bits::reader::read_block;
use crate::charset::{CodecRegistry, TextCodec};
use crate::errors::{StlParserError, StlParserResult};
use crate::subtitles::utils::collapse_empty_lines;
use crate::subtitles::{ControlCodeInterpreter, Cue, Justification, RenderMode};
use log::{debug, info, trace, warn};
use std::io::Read;
use std::sync::Arc;

/// Where cue times are measured from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartOffset {
    /// Subtract a fixed number of seconds from every time code.
    Seconds(f64),
    /// Subtract the start-of-programme time code from the header.
    FromHeader,
}

impl Default for StartOffset {
    fn default() -> Self {
        StartOffset::Seconds(0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecoderOptions {
    /// Render formatting codes as WebVTT tags instead of spaces.
    pub rich_formatting: bool,
    pub start_offset: StartOffset,
}

impl DecoderOptions {
    pub fn with_rich_formatting(mut self, rich: bool) -> Self {
        self.rich_formatting = rich;
        self
    }

    pub fn with_start_timecode(mut self, seconds: f64) -> Self {
        self.start_offset = StartOffset::Seconds(seconds);
        self
    }

    pub fn with_programme_start(mut self) -> Self {
        self.start_offset = StartOffset::FromHeader;
        self
    }
}

/// Anything that yields cues one at a time.
pub trait CueSource {
    fn header(&self) -> &GsiHeader;

    /// Next complete cue, or `None` once the input is exhausted.
    fn next_cue(&mut self) -> StlParserResult<Option<Cue>>;
}

/// Pull-based STL decoder.
///
/// The GSI block is read when the decoder is opened; each call to
/// [`StlDecoder::next_cue`] then reads as many TTI blocks as it takes to
/// complete one cue. The stream is only ever read forward.
pub struct StlDecoder<S: Read> {
    stream: S,
    header: GsiHeader,
    codec: Arc<dyn TextCodec>,
    mode: RenderMode,
    start_time: f64,
    records_read: u64,
    last_start: Option<f64>,
    finished: bool,
}

impl<S: Read> StlDecoder<S> {
    /// Open with the default STL codec set.
    pub fn open(stream: S, options: DecoderOptions) -> StlParserResult<Self> {
        Self::open_with_registry(stream, options, &CodecRegistry::with_stl_defaults())
    }

    pub fn open_with_registry(
        mut stream: S,
        options: DecoderOptions,
        registry: &CodecRegistry,
    ) -> StlParserResult<Self> {
        let header = read_gsi(&mut stream)?;
        let code_page = header.code_page_name();
        let codec = registry
            .lookup(code_page)
            .ok_or_else(|| StlParserError::unsupported("code page", code_page))?;

        let start_time = match options.start_offset {
            StartOffset::Seconds(seconds) => seconds,
            StartOffset::FromHeader => {
                if header.timecode_status != "1" {
                    warn!(
                        "Time code status is {:?}, using start-of-programme anyway",
                        header.timecode_status
                    );
                }
                header.start_of_programme_seconds()
            }
        };

        info!(
            "Opened {} ({} fps, {}), programme {:?}, start offset {:.3}s",
            header.disk_format_code,
            header.frame_rate(),
            codec.name(),
            header.original_programme_title,
            start_time
        );
        if let Some(blocks) = header.total_tti_blocks {
            debug!("Header declares {} TTI blocks", blocks);
        }

        Ok(Self {
            stream,
            header,
            codec,
            mode: RenderMode::from_rich_formatting(options.rich_formatting),
            start_time,
            records_read: 0,
            last_start: None,
            finished: false,
        })
    }

    pub fn header(&self) -> &GsiHeader {
        &self.header
    }

    /// Seconds subtracted from every time code.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    fn seconds(&self, timecode: &Timecode) -> f64 {
        timecode.to_seconds(self.header.frame_rate()) - self.start_time
    }

    fn read_record(&mut self) -> StlParserResult<Option<TtiRecord>> {
        let mut block = [0u8; TTI_BLOCK_SIZE];
        let read = read_block(&mut self.stream, &mut block)?;
        if read == 0 {
            return Ok(None);
        }
        let truncated = StlParserError::TruncatedInput {
            context: "TTI block",
            expected: TTI_BLOCK_SIZE,
            actual: read,
        };
        if read < TTI_BLOCK_SIZE {
            return Err(truncated);
        }
        self.records_read += 1;
        let record = TtiRecord::parse(&block).ok_or(truncated)?;
        trace!(
            "TTI #{}: sgn={} sn={} ebn={:#04x} cs={} tci={:?} tco={:?} vp={} jc={} cf={}",
            self.records_read,
            record.subtitle_group_number,
            record.subtitle_number,
            record.extension_block_number,
            record.cumulative_status,
            record.time_code_in,
            record.time_code_out,
            record.vertical_position,
            record.justification_code,
            record.comment_flag
        );
        Ok(Some(record))
    }

    pub fn next_cue(&mut self) -> StlParserResult<Option<Cue>> {
        if self.finished {
            return Ok(None);
        }
        match self.assemble_cue() {
            Ok(Some(cue)) => Ok(Some(cue)),
            other => {
                self.finished = true;
                other
            }
        }
    }

    fn assemble_cue(&mut self) -> StlParserResult<Option<Cue>> {
        let codec = Arc::clone(&self.codec);
        let interpreter = ControlCodeInterpreter::new(codec.as_ref(), self.mode);

        loop {
            let mut timing: Option<(f64, f64)> = None;
            let mut text = String::new();

            let record = loop {
                let Some(record) = self.read_record()? else {
                    if timing.is_some() {
                        warn!("Input ended inside a subtitle, discarding {:?}", text);
                    }
                    return Ok(None);
                };
                if record.is_comment() {
                    debug!("Skipping comment record {}", record.subtitle_number);
                    continue;
                }
                if record.is_user_data() {
                    debug!("Skipping user data record {}", record.subtitle_number);
                    continue;
                }
                if timing.is_none() {
                    timing = Some((
                        self.seconds(&record.time_code_in),
                        self.seconds(&record.time_code_out),
                    ));
                }
                text.push_str(&interpreter.interpret(&record.text_field).text);
                if record.is_last_block() {
                    break record;
                }
            };

            let Some((start, end)) = timing else {
                continue;
            };
            let text = collapse_empty_lines(&text);
            if text.is_empty() {
                debug!("Dropping empty subtitle {}", record.subtitle_number);
                continue;
            }
            if start < 0.0 {
                debug!(
                    "Dropping subtitle {} starting {:.3}s before the start offset",
                    record.subtitle_number, -start
                );
                continue;
            }

            let justification =
                Justification::from_code(record.justification_code).unwrap_or_else(|| {
                    warn!(
                        "Unknown justification code {} in subtitle {}",
                        record.justification_code, record.subtitle_number
                    );
                    Justification::Unchanged
                });

            if let Some(previous) = self.last_start {
                if start < previous {
                    warn!(
                        "Subtitle {} starts at {:.3}s, before the previous one at {:.3}s",
                        record.subtitle_number, start, previous
                    );
                }
            }
            self.last_start = Some(start);

            return Ok(Some(Cue {
                start,
                end,
                text,
                sequence_number: record.subtitle_number,
                justification,
            }));
        }
    }
}

impl<S: Read> CueSource for StlDecoder<S> {
    fn header(&self) -> &GsiHeader {
        StlDecoder::header(self)
    }

    fn next_cue(&mut self) -> StlParserResult<Option<Cue>> {
        StlDecoder::next_cue(self)
    }
}

/// Yields cues until the input ends or the first error.
impl<S: Read> Iterator for StlDecoder<S> {
    type Item = StlParserResult<Cue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_cue().transpose()
    }
}

impl<S: Read> std::iter::FusedIterator for StlDecoder<S> {}
