use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};
use stlparser::{
    pump, DecoderOptions, LocalSeekableStream, SeekableHttpStream, SeekableStream, StlDecoder,
    StlParserResult, WebVttWriter,
};

#[derive(Debug, Parser)]
#[command(
    name = "stl2vtt",
    version,
    about = "Convert EBU STL subtitle files to WebVTT",
    after_help = "Examples:\n  stl2vtt input.stl -o output.vtt\n  stl2vtt https://example.com/input.stl --programme-start\n  stl2vtt input.stl --json"
)]
struct Cli {
    /// Input STL path or URL.
    source: String,

    /// Seconds subtracted from every time code.
    #[arg(long, value_name = "SECONDS", conflicts_with = "programme_start")]
    start_timecode: Option<f64>,

    /// Measure times from the start-of-programme time code in the header.
    #[arg(long)]
    programme_start: bool,

    /// Emit plain text instead of WebVTT markup.
    #[arg(long)]
    plain: bool,

    /// Print cues as JSON instead of WebVTT.
    #[arg(long)]
    json: bool,

    /// Leave the header fields out of the WebVTT output.
    #[arg(long)]
    no_header_note: bool,

    /// Output file (default: stdout).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// More logging; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn decoder_options(&self) -> DecoderOptions {
        let options = DecoderOptions::default().with_rich_formatting(!self.plain);
        match (self.programme_start, self.start_timecode) {
            (true, _) => options.with_programme_start(),
            (false, Some(seconds)) => options.with_start_timecode(seconds),
            (false, None) => options,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(&cli) {
        Ok(count) => {
            info!("Wrote {} cues", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("stl2vtt: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> StlParserResult<usize> {
    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let source = cli.source.as_str();
    if source.starts_with("http://") || source.starts_with("https://") {
        convert(SeekableHttpStream::new(source)?, cli, out)
    } else {
        convert(LocalSeekableStream::open(source)?, cli, out)
    }
}

fn convert<S: SeekableStream>(
    stream: S,
    cli: &Cli,
    mut out: Box<dyn Write>,
) -> StlParserResult<usize> {
    let mut decoder = StlDecoder::open(stream, cli.decoder_options())?;

    let count = if cli.json {
        let cues = decoder.by_ref().collect::<StlParserResult<Vec<_>>>()?;
        serde_json::to_writer_pretty(&mut out, &cues).map_err(io::Error::from)?;
        writeln!(out)?;
        out.flush()?;
        cues.len()
    } else {
        let mut writer = WebVttWriter::new(out).escape_text(cli.plain);
        if !cli.no_header_note {
            writer.write_header(Some(decoder.header()))?;
        }
        let count = pump(&mut decoder, &mut writer)?;
        writer.into_inner()?;
        count
    };

    decoder.into_inner().print_stats();
    Ok(count)
}
