use crate::stl::{DiskFormat, GsiHeader};
use serde::Serialize;

/// Container format detected from the file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ContainerFormat {
    Stl24,
    Stl25,
    Stl30,
    Unknown(String),
}

impl ContainerFormat {
    pub fn name(&self) -> &str {
        match self {
            ContainerFormat::Stl24 => "EBU STL (24 fps)",
            ContainerFormat::Stl25 => "EBU STL (25 fps)",
            ContainerFormat::Stl30 => "EBU STL (30 fps)",
            ContainerFormat::Unknown(s) => s,
        }
    }

    pub fn is_stl(&self) -> bool {
        !matches!(self, ContainerFormat::Unknown(_))
    }

    pub fn frame_rate(&self) -> Option<u32> {
        match self {
            ContainerFormat::Stl24 => Some(24),
            ContainerFormat::Stl25 => Some(25),
            ContainerFormat::Stl30 => Some(30),
            ContainerFormat::Unknown(_) => None,
        }
    }
}

impl From<DiskFormat> for ContainerFormat {
    fn from(format: DiskFormat) -> Self {
        match format {
            DiskFormat::Stl24 => ContainerFormat::Stl24,
            DiskFormat::Stl25 => ContainerFormat::Stl25,
            DiskFormat::Stl30 => ContainerFormat::Stl30,
        }
    }
}

/// Descriptive programme information from the GSI block
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ProgrammeMetadata {
    pub title: Option<String>,
    pub episode_title: Option<String>,
    pub translated_title: Option<String>,
    pub translated_episode_title: Option<String>,
    pub translator: Option<String>,
    pub publisher: Option<String>,
    pub editor: Option<String>,
    pub language_code: Option<String>,
    pub country_of_origin: Option<String>,
    pub creation_date: Option<String>,
    pub revision_date: Option<String>,
    pub subtitle_count: Option<u32>,
    pub start_of_programme: f64,
    pub code_page: String,
    pub size: u64,
    pub format: Option<ContainerFormat>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl ProgrammeMetadata {
    pub fn from_header(header: &GsiHeader, size: u64) -> Self {
        Self {
            title: non_empty(&header.original_programme_title),
            episode_title: non_empty(&header.original_episode_title),
            translated_title: non_empty(&header.translated_programme_title),
            translated_episode_title: non_empty(&header.translated_episode_title),
            translator: non_empty(&header.translator_name),
            publisher: non_empty(&header.publisher),
            editor: non_empty(&header.editor_name),
            language_code: non_empty(&header.language_code),
            country_of_origin: non_empty(&header.country_of_origin),
            creation_date: non_empty(&header.creation_date),
            revision_date: non_empty(&header.revision_date),
            subtitle_count: header.total_subtitles,
            start_of_programme: header.start_of_programme_seconds(),
            code_page: header.code_page_name().to_string(),
            size,
            format: Some(header.disk_format.into()),
        }
    }
}

/// Probe result containing basic file information
#[derive(Serialize, Debug)]
pub struct ProbeResult {
    pub format: ContainerFormat,
    pub size: u64,
    pub is_valid: bool,
    pub error: Option<String>,
}
