use super::rich_text::TagStackRenderer;
use super::types::RenderMode;
use super::utils::escape_cue_text;
use crate::charset::TextCodec;
use log::trace;

/// Teletext colour names, indexed by the alpha colour control code.
const COLOR_NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

const WHITE: u8 = 0x07;
const BLACK: u8 = 0x00;

// Control codes that can appear in a TTI text field
const BOX_END: u8 = 0x0a;
const BOX_START: u8 = 0x0b;
const BLACK_BACKGROUND: u8 = 0x1c;
const NEW_BACKGROUND: u8 = 0x1d;
const ITALICS_ON: u8 = 0x80;
const ITALICS_OFF: u8 = 0x81;
const UNDERLINE_ON: u8 = 0x82;
const UNDERLINE_OFF: u8 = 0x83;
const CR_LF: u8 = 0x8a;
const UNUSED_SPACE: u8 = 0x8f;

/// Colour and visibility state while walking one text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub foreground: u8,
    pub background: u8,
    pub output_enabled: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            foreground: WHITE,
            background: BLACK,
            output_enabled: false,
        }
    }
}

/// Result of interpreting one text field.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    /// Empty when nothing visible was produced.
    pub text: String,
    /// State left after the last byte. Diagnostic only: every record
    /// starts again from `RenderState::default()`.
    pub state: RenderState,
}

/// Turns the raw bytes of a TTI text field into caption text.
///
/// Control codes are acted on by byte value; runs of printable bytes are
/// decoded with the file's code page.
pub struct ControlCodeInterpreter<'a> {
    codec: &'a dyn TextCodec,
    mode: RenderMode,
}

impl<'a> ControlCodeInterpreter<'a> {
    pub fn new(codec: &'a dyn TextCodec, mode: RenderMode) -> Self {
        Self { codec, mode }
    }

    pub fn interpret(&self, payload: &[u8]) -> RenderedLine {
        let mut line = LineWriter {
            output: TagStackRenderer::new(self.mode),
            state: RenderState::default(),
            glyphs: Vec::new(),
            has_content: false,
            codec: self.codec,
        };

        line.output.write_markup("<c.box>");

        for &code in payload {
            match code {
                0x20..=0x7e | 0xa1..=0xff => {
                    if line.state.output_enabled {
                        line.glyphs.push(code);
                    }
                }
                0x00..=0x07 => {
                    line.space_if_enabled();
                    if line.state.foreground != code {
                        line.state.foreground = code;
                        line.reopen_color();
                    }
                }
                BOX_END => line.state.output_enabled = false,
                BOX_START => line.state.output_enabled = true,
                BLACK_BACKGROUND => {
                    line.state.background = BLACK;
                    line.reopen_color();
                    line.space_if_enabled();
                }
                NEW_BACKGROUND => {
                    line.state.background = line.state.foreground;
                    line.state.foreground = WHITE;
                    line.reopen_color();
                    line.space_if_enabled();
                }
                ITALICS_ON => {
                    line.space_if_enabled();
                    line.open("i");
                }
                ITALICS_OFF => {
                    line.close("i");
                    line.space_if_enabled();
                }
                UNDERLINE_ON => {
                    line.space_if_enabled();
                    line.open("u");
                }
                UNDERLINE_OFF => {
                    line.close("u");
                    line.space_if_enabled();
                }
                CR_LF => {
                    line.close("c");
                    line.write("\n");
                    line.state = RenderState::default();
                }
                UNUSED_SPACE => {
                    line.state.output_enabled = false;
                    break;
                }
                _ => {
                    trace!("unhandled control code {:#04x}", code);
                    line.space_if_enabled();
                }
            }
        }

        line.finish()
    }
}

struct LineWriter<'a> {
    output: TagStackRenderer,
    state: RenderState,
    glyphs: Vec<u8>,
    has_content: bool,
    codec: &'a dyn TextCodec,
}

impl LineWriter<'_> {
    /// Decode pending glyph bytes and append them.
    fn flush_glyphs(&mut self) {
        if self.glyphs.is_empty() {
            return;
        }
        let text = self.codec.decode(&self.glyphs);
        self.glyphs.clear();
        if text.is_empty() {
            return;
        }
        self.has_content = true;
        match self.output.mode() {
            RenderMode::Markup => self.output.write(&escape_cue_text(&text)),
            RenderMode::Plain => self.output.write(&text),
        }
    }

    fn write(&mut self, text: &str) {
        self.flush_glyphs();
        self.output.write(text);
    }

    fn space_if_enabled(&mut self) {
        if self.state.output_enabled {
            self.write(" ");
            self.has_content = true;
        }
    }

    fn open(&mut self, tag: &str) {
        self.flush_glyphs();
        self.output.open(tag, None);
    }

    fn close(&mut self, tag: &str) {
        self.flush_glyphs();
        self.output.close(tag);
    }

    fn reopen_color(&mut self) {
        self.close("c");
        let markup = format!(
            "<c.{}.bg_{}>",
            COLOR_NAMES[self.state.foreground as usize],
            COLOR_NAMES[self.state.background as usize]
        );
        self.output.open("c", Some(&markup));
    }

    fn finish(mut self) -> RenderedLine {
        self.flush_glyphs();
        self.output.close_all();
        self.output.write_markup("</c>");
        let text = if self.has_content {
            self.output.render()
        } else {
            String::new()
        };
        RenderedLine {
            text,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::{CodecRegistry, Iso6937};

    fn render(payload: &[u8], mode: RenderMode) -> String {
        ControlCodeInterpreter::new(&Iso6937, mode)
            .interpret(payload)
            .text
    }

    #[test]
    fn test_box_gates_output() {
        let payload = [0x0b, b'H', b'I', 0x0a, b'X', 0x8f, 0x8f];
        assert_eq!(render(&payload, RenderMode::Plain), "HI");
        assert_eq!(render(&payload, RenderMode::Markup), "<c.box>HI</c>");
    }

    #[test]
    fn test_never_enabled_line_is_empty() {
        assert_eq!(render(&[0x01, b'x', 0x80, 0x8f], RenderMode::Markup), "");
        assert_eq!(render(&[0x8f, 0x0b, b'x'], RenderMode::Plain), "");
        assert_eq!(render(&[], RenderMode::Markup), "");
    }

    #[test]
    fn test_foreground_color() {
        let payload = [0x0b, 0x01, b'R', 0x8f];
        assert_eq!(
            render(&payload, RenderMode::Markup),
            "<c.box> <c.red.bg_black>R</c></c>"
        );
        // repeating the current colour does not reopen the span
        let payload = [0x0b, 0x01, 0x01, b'R', 0x8f];
        assert_eq!(
            render(&payload, RenderMode::Markup),
            "<c.box> <c.red.bg_black> R</c></c>"
        );
        // white is the starting colour
        let payload = [0x0b, 0x07, b'W', 0x8f];
        assert_eq!(render(&payload, RenderMode::Markup), "<c.box> W</c>");
    }

    #[test]
    fn test_new_background() {
        let payload = [0x0b, 0x01, 0x1d, b'x', 0x8f];
        assert_eq!(
            render(&payload, RenderMode::Markup),
            "<c.box> <c.red.bg_black></c><c.white.bg_red> x</c></c>"
        );
        let line = ControlCodeInterpreter::new(&Iso6937, RenderMode::Markup).interpret(&payload);
        assert_eq!(line.state.background, 0x01);
        assert_eq!(line.state.foreground, 0x07);
        assert!(!line.state.output_enabled);
    }

    #[test]
    fn test_each_record_starts_fresh() {
        let interpreter = ControlCodeInterpreter::new(&Iso6937, RenderMode::Markup);
        let red = interpreter.interpret(&[0x0b, 0x01, b'R']);
        assert_eq!(red.state.foreground, 0x01);
        assert!(red.state.output_enabled);

        let next = interpreter.interpret(&[0x0b, b'N', 0x0a]);
        assert_eq!(next.text, "<c.box>N</c>");
        assert_eq!(next.state, RenderState { output_enabled: false, ..RenderState::default() });
    }

    #[test]
    fn test_black_background() {
        let payload = [0x0b, 0x1c, b'k'];
        assert_eq!(
            render(&payload, RenderMode::Markup),
            "<c.box><c.white.bg_black> k</c></c>"
        );
    }

    #[test]
    fn test_italics_and_underline() {
        let payload = [0x0b, 0x80, b'a', 0x81, 0x82, b'b', 0x83, 0x0a];
        assert_eq!(
            render(&payload, RenderMode::Markup),
            "<c.box> <i>a</i>  <u>b</u> </c>"
        );
        assert_eq!(render(&payload, RenderMode::Plain), "  a   b ");
    }

    #[test]
    fn test_out_of_order_close() {
        let payload = [0x0b, 0x80, 0x02, b'g', 0x81, b'h'];
        assert_eq!(
            render(&payload, RenderMode::Markup),
            "<c.box> <i> <c.green.bg_black>g</c></i><c.green.bg_black> h</c></c>"
        );
    }

    #[test]
    fn test_line_break_resets_state() {
        let payload = [0x0b, 0x01, b'A', 0x0a, 0x8a, 0x0b, b'B', 0x0a, 0x8f];
        assert_eq!(
            render(&payload, RenderMode::Markup),
            "<c.box> <c.red.bg_black>A</c>\nB</c>"
        );
        assert_eq!(render(&payload, RenderMode::Plain), "  A\nB");

        // the box must be reopened after a break
        let payload = [0x0b, b'A', 0x8a, b'B'];
        assert_eq!(render(&payload, RenderMode::Plain), "A\n");
    }

    #[test]
    fn test_unused_space_stops_processing() {
        let payload = [0x0b, 0x80, b'a', 0x8f, b'b', 0x81];
        assert_eq!(render(&payload, RenderMode::Markup), "<c.box> <i>a</i></c>");
    }

    #[test]
    fn test_other_codes_become_spaces() {
        let payload = [0x0b, b'a', 0x0d, b'b', 0x84, b'c', 0xa0, b'd', 0x7f];
        assert_eq!(render(&payload, RenderMode::Plain), "a b c d ");
        // but only while the box is open
        let payload = [0x0d, 0x0b, b'a'];
        assert_eq!(render(&payload, RenderMode::Plain), "a");
    }

    #[test]
    fn test_glyphs_are_charset_decoded() {
        let payload = [0x0b, b'c', b'a', b'f', 0xc2, b'e', b' ', 0xd5, 0x0a];
        assert_eq!(render(&payload, RenderMode::Plain), "café ♪");

        let registry = CodecRegistry::with_stl_defaults();
        let greek = registry.lookup("iso-8859-7").unwrap();
        let line = ControlCodeInterpreter::new(greek.as_ref(), RenderMode::Plain)
            .interpret(&[0x0b, 0xc1, 0xc2, 0x0a]);
        assert_eq!(line.text, "ΑΒ");
    }

    #[test]
    fn test_markup_mode_escapes_glyphs() {
        let payload = [0x0b, b'<', b'&', b'>', 0x8f];
        assert_eq!(
            render(&payload, RenderMode::Markup),
            "<c.box>&lt;&amp;&gt;</c>"
        );
        assert_eq!(render(&payload, RenderMode::Plain), "<&>");
    }
}
