use crate::bits::reader::{ascii_field, digit_value, parse_decimal, read_block, read_field};
use crate::errors::{StlParserError, StlParserResult};
use log::{debug, warn};
use oem_cp::code_table::{
    DECODING_TABLE_CP437, DECODING_TABLE_CP850, DECODING_TABLE_CP860, DECODING_TABLE_CP863,
    DECODING_TABLE_CP865,
};
use oem_cp::decode_string_complete_table;
use serde::Serialize;
use std::io::Read;

/// Size of the General Subtitle Information block.
pub const GSI_BLOCK_SIZE: usize = 1024;

/// Frame rate family declared by the Disk Format Code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiskFormat {
    Stl24,
    Stl25,
    Stl30,
}

impl DiskFormat {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "STL24.01" => Some(DiskFormat::Stl24),
            "STL25.01" => Some(DiskFormat::Stl25),
            "STL30.01" => Some(DiskFormat::Stl30),
            _ => None,
        }
    }

    pub fn frame_rate(&self) -> u32 {
        match self {
            DiskFormat::Stl24 => 24,
            DiskFormat::Stl25 => 25,
            DiskFormat::Stl30 => 30,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DiskFormat::Stl24 => "STL24.01",
            DiskFormat::Stl25 => "STL25.01",
            DiskFormat::Stl30 => "STL30.01",
        }
    }
}

/// Character code table used by the TTI text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharacterCodeTable {
    Latin,
    LatinCyrillic,
    LatinArabic,
    LatinGreek,
    LatinHebrew,
}

impl CharacterCodeTable {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "00" => Some(CharacterCodeTable::Latin),
            "01" => Some(CharacterCodeTable::LatinCyrillic),
            "02" => Some(CharacterCodeTable::LatinArabic),
            "03" => Some(CharacterCodeTable::LatinGreek),
            "04" => Some(CharacterCodeTable::LatinHebrew),
            _ => None,
        }
    }

    /// Registry name of the codec for this table.
    pub fn codec_name(&self) -> &'static str {
        match self {
            CharacterCodeTable::Latin => crate::charset::ISO_6937_NAME,
            CharacterCodeTable::LatinCyrillic => "iso-8859-5",
            CharacterCodeTable::LatinArabic => "iso-8859-6",
            CharacterCodeTable::LatinGreek => "iso-8859-7",
            CharacterCodeTable::LatinHebrew => "iso-8859-8",
        }
    }
}

/// Parsed GSI block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GsiHeader {
    pub code_page_number: String,
    pub disk_format_code: String,
    pub display_standard_code: String,
    pub character_code_table: String,
    pub language_code: String,
    pub original_programme_title: String,
    pub original_episode_title: String,
    pub translated_programme_title: String,
    pub translated_episode_title: String,
    pub translator_name: String,
    pub translator_contact: String,
    pub subtitle_list_reference: String,
    pub creation_date: String,
    pub revision_date: String,
    pub revision_number: String,
    /// Informational only; files in the wild get this wrong.
    pub total_tti_blocks: Option<u32>,
    pub total_subtitles: Option<u32>,
    pub total_subtitle_groups: Option<u32>,
    pub max_characters_per_row: Option<u32>,
    pub max_rows: Option<u32>,
    pub timecode_status: String,
    pub timecode_start_of_programme: String,
    pub timecode_first_in_cue: String,
    pub total_disks: String,
    pub disk_sequence_number: String,
    pub country_of_origin: String,
    pub publisher: String,
    pub editor_name: String,
    pub editor_contact: String,
    #[serde(skip)]
    pub user_defined_area: Vec<u8>,
    pub disk_format: DiskFormat,
    pub code_table: CharacterCodeTable,
}

fn take<'a>(block: &'a [u8], pos: &mut usize, len: usize) -> StlParserResult<&'a [u8]> {
    read_field(block, pos, len).ok_or(StlParserError::TruncatedInput {
        context: "GSI block",
        expected: GSI_BLOCK_SIZE,
        actual: block.len(),
    })
}

/// ASCII field with trailing padding removed.
fn code_field(field: &[u8]) -> String {
    trim_padding(&ascii_field(field))
}

fn trim_padding(text: &str) -> String {
    text.trim_end_matches(|c: char| c == ' ' || c == '\0')
        .to_string()
}

/// Decode a free-text GSI field with the DOS code page named by CPN.
pub fn decode_gsi_text(field: &[u8], code_page_number: &str) -> String {
    let table = match code_page_number {
        "437" => Some(&DECODING_TABLE_CP437),
        "850" => Some(&DECODING_TABLE_CP850),
        "860" => Some(&DECODING_TABLE_CP860),
        "863" => Some(&DECODING_TABLE_CP863),
        "865" => Some(&DECODING_TABLE_CP865),
        _ => None,
    };
    let text = match table {
        Some(table) => decode_string_complete_table(field, table),
        None => ascii_field(field),
    };
    trim_padding(&text)
}

/// Decode an `HHMMSSFF` GSI time code to seconds.
///
/// The blank filler (`________` or spaces) decodes to zero.
pub fn decode_gsi_timecode(field: &[u8], frame_rate: u32) -> f64 {
    if field.len() != 8 || field.iter().all(|&b| b == b'_' || b == b' ' || b == 0) {
        return 0.0;
    }
    let pair = |i: usize| digit_value(field[i]) * 10 + digit_value(field[i + 1]);
    let (hours, minutes, seconds, frames) = (pair(0), pair(2), pair(4), pair(6));
    3600.0 * hours as f64
        + 60.0 * minutes as f64
        + seconds as f64
        + frames as f64 / frame_rate as f64
}

impl GsiHeader {
    /// Parse a complete GSI block.
    pub fn parse(block: &[u8]) -> StlParserResult<Self> {
        if block.len() < GSI_BLOCK_SIZE {
            return Err(StlParserError::TruncatedInput {
                context: "GSI block",
                expected: GSI_BLOCK_SIZE,
                actual: block.len(),
            });
        }

        let mut pos = 0usize;
        let code_page_number = code_field(take(block, &mut pos, 3)?);
        let disk_format_code = code_field(take(block, &mut pos, 8)?);
        let display_standard_code = code_field(take(block, &mut pos, 1)?);
        let character_code_table = code_field(take(block, &mut pos, 2)?);
        let language_code = code_field(take(block, &mut pos, 2)?);

        let cpn = code_page_number.as_str();
        let mut text = |len: usize| -> StlParserResult<String> {
            Ok(decode_gsi_text(take(block, &mut pos, len)?, cpn))
        };
        let original_programme_title = text(32)?;
        let original_episode_title = text(32)?;
        let translated_programme_title = text(32)?;
        let translated_episode_title = text(32)?;
        let translator_name = text(32)?;
        let translator_contact = text(32)?;

        let subtitle_list_reference = code_field(take(block, &mut pos, 16)?);
        let creation_date = code_field(take(block, &mut pos, 6)?);
        let revision_date = code_field(take(block, &mut pos, 6)?);
        let revision_number = code_field(take(block, &mut pos, 2)?);
        let total_tti_blocks = parse_decimal(take(block, &mut pos, 5)?);
        let total_subtitles = parse_decimal(take(block, &mut pos, 5)?);
        let total_subtitle_groups = parse_decimal(take(block, &mut pos, 3)?);
        let max_characters_per_row = parse_decimal(take(block, &mut pos, 2)?);
        let max_rows = parse_decimal(take(block, &mut pos, 2)?);
        let timecode_status = code_field(take(block, &mut pos, 1)?);
        // time codes keep their padding so the blank filler stays recognisable
        let timecode_start_of_programme = ascii_field(take(block, &mut pos, 8)?);
        let timecode_first_in_cue = ascii_field(take(block, &mut pos, 8)?);
        let total_disks = code_field(take(block, &mut pos, 1)?);
        let disk_sequence_number = code_field(take(block, &mut pos, 1)?);
        let country_of_origin = code_field(take(block, &mut pos, 3)?);

        let publisher = decode_gsi_text(take(block, &mut pos, 32)?, cpn);
        let editor_name = decode_gsi_text(take(block, &mut pos, 32)?, cpn);
        let editor_contact = decode_gsi_text(take(block, &mut pos, 32)?, cpn);
        let _spare = take(block, &mut pos, 75)?;
        let user_defined_area = take(block, &mut pos, 576)?.to_vec();

        let disk_format = DiskFormat::from_code(&disk_format_code)
            .ok_or_else(|| StlParserError::unsupported("DFC", disk_format_code.clone()))?;
        let code_table = CharacterCodeTable::from_code(&character_code_table)
            .ok_or_else(|| StlParserError::unsupported("CCT", character_code_table.clone()))?;

        if !matches!(cpn, "437" | "850" | "860" | "863" | "865") {
            warn!(
                "Unknown GSI code page number {:?}, header text decoded as ASCII",
                code_page_number
            );
        }

        Ok(GsiHeader {
            code_page_number,
            disk_format_code,
            display_standard_code,
            character_code_table,
            language_code,
            original_programme_title,
            original_episode_title,
            translated_programme_title,
            translated_episode_title,
            translator_name,
            translator_contact,
            subtitle_list_reference,
            creation_date,
            revision_date,
            revision_number,
            total_tti_blocks,
            total_subtitles,
            total_subtitle_groups,
            max_characters_per_row,
            max_rows,
            timecode_status,
            timecode_start_of_programme,
            timecode_first_in_cue,
            total_disks,
            disk_sequence_number,
            country_of_origin,
            publisher,
            editor_name,
            editor_contact,
            user_defined_area,
            disk_format,
            code_table,
        })
    }

    pub fn frame_rate(&self) -> u32 {
        self.disk_format.frame_rate()
    }

    /// Codec name for the TTI text fields.
    pub fn code_page_name(&self) -> &'static str {
        self.code_table.codec_name()
    }

    /// Start-of-programme time code (TCP) in seconds.
    pub fn start_of_programme_seconds(&self) -> f64 {
        decode_gsi_timecode(self.timecode_start_of_programme.as_bytes(), self.frame_rate())
    }

    /// First in-cue time code (TCF) in seconds.
    pub fn first_in_cue_seconds(&self) -> f64 {
        decode_gsi_timecode(self.timecode_first_in_cue.as_bytes(), self.frame_rate())
    }

    /// Labelled header fields, in block order, for display.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let count = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        vec![
            ("Code Page Number", self.code_page_number.clone()),
            ("Disk Format Code", self.disk_format_code.clone()),
            ("Display Standard Code", self.display_standard_code.clone()),
            ("Character Code Table number", self.character_code_table.clone()),
            ("Language Code", self.language_code.clone()),
            ("Original Programme Title", self.original_programme_title.clone()),
            ("Original Episode Title", self.original_episode_title.clone()),
            ("Translated Programme Title", self.translated_programme_title.clone()),
            ("Translated Episode Title", self.translated_episode_title.clone()),
            ("Translator's Name", self.translator_name.clone()),
            ("Translator's Contact Details", self.translator_contact.clone()),
            ("Subtitle List Reference Code", self.subtitle_list_reference.clone()),
            ("Creation Date", self.creation_date.clone()),
            ("Revision Date", self.revision_date.clone()),
            ("Revision number", self.revision_number.clone()),
            ("Total Number of TTI blocks", count(self.total_tti_blocks)),
            ("Total Number of Subtitles", count(self.total_subtitles)),
            ("Total Number of Subtitle Groups", count(self.total_subtitle_groups)),
            ("Maximum Number of Displayable Characters in any text row", count(self.max_characters_per_row)),
            ("Maximum Number of Displayable Rows", count(self.max_rows)),
            ("Time Code: Status", self.timecode_status.clone()),
            ("Time Code: Start-of-Programme", self.timecode_start_of_programme.clone()),
            ("Time Code: First In-Cue", self.timecode_first_in_cue.clone()),
            ("Total Number of Disks", self.total_disks.clone()),
            ("Disk Sequence Number", self.disk_sequence_number.clone()),
            ("Country of Origin", self.country_of_origin.clone()),
            ("Publisher", self.publisher.clone()),
            ("Editor's Name", self.editor_name.clone()),
            ("Editor's Contact Details", self.editor_contact.clone()),
        ]
    }
}

/// Read and parse the GSI block from the start of `r`.
pub fn read_gsi<R: Read>(r: &mut R) -> StlParserResult<GsiHeader> {
    let mut block = vec![0u8; GSI_BLOCK_SIZE];
    let read = read_block(r, &mut block)?;
    if read < GSI_BLOCK_SIZE {
        return Err(StlParserError::TruncatedInput {
            context: "GSI block",
            expected: GSI_BLOCK_SIZE,
            actual: read,
        });
    }
    let header = GsiHeader::parse(&block)?;
    debug!("{:?}", header);
    Ok(header)
}
