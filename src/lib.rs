pub mod bits;
pub use bits::reader::{mask, read_block};

pub mod charset;
pub use charset::{CodecRegistry, Iso6937, TextCodec};

pub mod stl;
pub use stl::{CueSource, DecoderOptions, GsiHeader, StartOffset, StlDecoder};

pub mod streams;
pub use streams::{
    seekable_http_stream, seekable_stream, LocalSeekableStream, SeekableHttpStream, SeekableStream,
};

pub mod subtitles;
pub use subtitles::{pump, Cue, CueSink, Justification, RenderMode, WebVttWriter};

pub mod metadata;
pub use metadata::{
    detect_format, probe_local_detailed, probe_remote_detailed, read_local_header,
    read_remote_header, ContainerFormat, ProbeResult, ProgrammeMetadata,
};

pub mod errors;
pub use errors::{StlParserError, StlParserResult, StreamError};

/// Open `$source` as an HTTP or local stream and hand it to `$body`.
macro_rules! with_seekable_stream {
    ($source:expr, $body:expr) => {
        if $source.starts_with("http://") || $source.starts_with("https://") {
            let stream = SeekableHttpStream::new($source)?;
            $body(stream)
        } else {
            let stream = LocalSeekableStream::open($source)?;
            $body(stream)
        }
    };
}

/// Decode every cue of a local file or URL, ordered by start time.
pub fn extract_cues(source: &str, options: DecoderOptions) -> StlParserResult<Vec<Cue>> {
    with_seekable_stream!(source, |stream| extract_cues_generic(stream, options.clone()))
}

fn extract_cues_generic<S: SeekableStream>(
    stream: S,
    options: DecoderOptions,
) -> StlParserResult<Vec<Cue>> {
    let mut decoder = StlDecoder::open(stream, options)?;
    let mut cues = decoder.by_ref().collect::<StlParserResult<Vec<Cue>>>()?;
    decoder.into_inner().print_stats();
    // stable, so cues sharing a start keep file order
    cues.sort_by(|a, b| a.start.total_cmp(&b.start));
    Ok(cues)
}
