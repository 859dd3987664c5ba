use serde::Serialize;

/// How formatting control codes are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RenderMode {
    /// WebVTT style tags (`<i>`, `<u>`, `<c.red.bg_black>`).
    Markup,
    /// No tags; control codes become spaces.
    #[default]
    Plain,
}

impl RenderMode {
    pub fn from_rich_formatting(rich: bool) -> Self {
        if rich {
            RenderMode::Markup
        } else {
            RenderMode::Plain
        }
    }
}

/// Horizontal layout of a cue, from the TTI justification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    #[default]
    Unchanged,
    Left,
    Center,
    Right,
}

impl Justification {
    /// Map a justification code; `None` for codes outside 0..=3.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Justification::Unchanged),
            1 => Some(Justification::Left),
            2 => Some(Justification::Center),
            3 => Some(Justification::Right),
            _ => None,
        }
    }

    /// Horizontal anchor as a percentage of the video width.
    pub fn position_percent(&self) -> Option<u8> {
        match self {
            Justification::Unchanged => None,
            Justification::Left => Some(10),
            Justification::Center => Some(50),
            Justification::Right => Some(90),
        }
    }

    /// Width of the text band as a percentage of the video width.
    pub fn size_percent(&self) -> u8 {
        80
    }

    /// WebVTT cue settings for this layout.
    pub fn cue_settings(&self) -> &'static str {
        match self {
            Justification::Unchanged => "size:80%",
            Justification::Left => "position:10% align:start size:80%",
            Justification::Center => "position:50% align:middle size:80%",
            Justification::Right => "position:90% align:end size:80%",
        }
    }
}

/// One decoded caption
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Cue {
    /// Seconds from the start of programme
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub sequence_number: u16,
    pub justification: Justification,
}
