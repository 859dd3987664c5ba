use super::sink::CueSink;
use super::types::Cue;
use super::utils::{collapse_empty_lines, escape_cue_text, format_timestamp};
use crate::errors::StlParserResult;
use crate::stl::GsiHeader;
use log::debug;
use std::io::Write;

const BOM: &str = "\u{feff}";

/// Writes cues as a WebVTT document.
///
/// The file preamble is written lazily before the first cue unless
/// [`WebVttWriter::write_header`] was called explicitly.
pub struct WebVttWriter<W: Write> {
    out: W,
    escape_text: bool,
    header_written: bool,
    cues_written: usize,
}

impl<W: Write> WebVttWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            escape_text: false,
            header_written: false,
            cues_written: 0,
        }
    }

    /// Escape `&`, `<` and `>` in cue text. Use for plain text cues.
    pub fn escape_text(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }

    /// Write the `WEBVTT` line, followed by a `NOTE` block listing the
    /// non-empty header fields when `header` is given.
    pub fn write_header(&mut self, header: Option<&GsiHeader>) -> StlParserResult<()> {
        if self.header_written {
            return Ok(());
        }
        writeln!(self.out, "{}WEBVTT", BOM)?;
        if let Some(header) = header {
            writeln!(self.out, "\nNOTE")?;
            for (label, value) in header.summary() {
                let value = note_safe(&value);
                if !value.is_empty() {
                    writeln!(self.out, "{}: {}", label, value)?;
                }
            }
        }
        self.header_written = true;
        Ok(())
    }

    pub fn cues_written(&self) -> usize {
        self.cues_written
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> StlParserResult<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> CueSink for WebVttWriter<W> {
    fn write_cue(&mut self, cue: &Cue) -> StlParserResult<()> {
        self.write_header(None)?;

        let text = collapse_empty_lines(&cue.text);
        if text.is_empty() {
            debug!("Skipping empty cue {}", cue.sequence_number);
            return Ok(());
        }
        let text = if self.escape_text {
            escape_cue_text(&text)
        } else {
            text
        };

        write!(
            self.out,
            "\n{}\n{} --> {} {}\n{}\n",
            cue.sequence_number,
            format_timestamp(cue.start),
            format_timestamp(cue.end),
            cue.justification.cue_settings(),
            text
        )?;
        self.cues_written += 1;
        Ok(())
    }
}

/// Note text may not contain `-->` or line breaks.
fn note_safe(value: &str) -> String {
    value
        .replace("-->", "->")
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
