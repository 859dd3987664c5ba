use super::gsi::{decode_gsi_text, decode_gsi_timecode, read_gsi};
use super::test_fixtures::gsi_block;
use super::{CharacterCodeTable, DiskFormat, GsiHeader};
use crate::errors::StlParserError;
use proptest::prelude::*;
use std::io::Cursor;

#[test]
fn test_parse_header_fields() {
    let header = GsiHeader::parse(&gsi_block("STL25.01", "00")).unwrap();
    assert_eq!(header.code_page_number, "850");
    assert_eq!(header.disk_format, DiskFormat::Stl25);
    assert_eq!(header.frame_rate(), 25);
    assert_eq!(header.code_table, CharacterCodeTable::Latin);
    assert_eq!(header.code_page_name(), "iso_6937-2");
    assert_eq!(header.language_code, "09");
    assert_eq!(header.original_programme_title, "Test Programme");
    assert_eq!(header.original_episode_title, "");
    assert_eq!(header.creation_date, "260101");
    assert_eq!(header.total_tti_blocks, Some(3));
    assert_eq!(header.total_subtitles, Some(2));
    assert_eq!(header.max_rows, Some(23));
    assert_eq!(header.timecode_status, "1");
    assert_eq!(header.country_of_origin, "GBR");
    assert_eq!(header.user_defined_area.len(), 576);
}

#[test]
fn test_frame_rates() {
    for (dfc, fps) in [("STL24.01", 24), ("STL25.01", 25), ("STL30.01", 30)] {
        let header = GsiHeader::parse(&gsi_block(dfc, "00")).unwrap();
        assert_eq!(header.frame_rate(), fps);
    }
}

#[test]
fn test_code_tables() {
    for (cct, name) in [
        ("01", "iso-8859-5"),
        ("02", "iso-8859-6"),
        ("03", "iso-8859-7"),
        ("04", "iso-8859-8"),
    ] {
        let header = GsiHeader::parse(&gsi_block("STL25.01", cct)).unwrap();
        assert_eq!(header.code_page_name(), name);
    }
}

#[test]
fn test_unsupported_disk_format() {
    let err = GsiHeader::parse(&gsi_block("STL23.01", "00")).unwrap_err();
    match err {
        StlParserError::UnsupportedFormat { field, value } => {
            assert_eq!(field, "DFC");
            assert_eq!(value, "STL23.01");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_unsupported_code_table() {
    let err = GsiHeader::parse(&gsi_block("STL25.01", "09")).unwrap_err();
    assert!(matches!(
        err,
        StlParserError::UnsupportedFormat { field: "CCT", .. }
    ));
}

#[test]
fn test_short_header() {
    let block = gsi_block("STL25.01", "00");
    let err = read_gsi(&mut Cursor::new(&block[..1000])).unwrap_err();
    assert!(matches!(
        err,
        StlParserError::TruncatedInput {
            expected: 1024,
            actual: 1000,
            ..
        }
    ));
}

#[test]
fn test_start_of_programme() {
    let header = GsiHeader::parse(&gsi_block("STL25.01", "00")).unwrap();
    assert_eq!(header.start_of_programme_seconds(), 36000.0);
    assert!((header.first_in_cue_seconds() - 36005.0).abs() < 1e-9);
}

#[test]
fn test_gsi_timecode_filler() {
    assert_eq!(decode_gsi_timecode(b"________", 25), 0.0);
    assert_eq!(decode_gsi_timecode(b"        ", 25), 0.0);
    assert_eq!(decode_gsi_timecode(b"short", 25), 0.0);
    assert!((decode_gsi_timecode(b"00000112", 24) - 1.5).abs() < 1e-9);
}

#[test]
fn test_gsi_text_code_pages() {
    // 0x82 is e-acute in both 437 and 850
    assert_eq!(decode_gsi_text(b"caf\x82  ", "850"), "café");
    assert_eq!(decode_gsi_text(b"caf\x82", "437"), "café");
    assert_eq!(decode_gsi_text(b"plain\0\0", "999"), "plain");
    assert_eq!(decode_gsi_text(b"caf\x82", "999"), "caf?");
}

proptest! {
    #[test]
    fn gsi_timecode_is_monotonic(h in 0u8..24, m in 0u8..60, s in 0u8..59, f in 0u8..24) {
        let field = |h: u8, m: u8, s: u8, f: u8| format!("{:02}{:02}{:02}{:02}", h, m, s, f);
        let earlier = decode_gsi_timecode(field(h, m, s, f).as_bytes(), 25);
        let later = decode_gsi_timecode(field(h, m, s + 1, f).as_bytes(), 25);
        prop_assert!(later > earlier);
    }
}
