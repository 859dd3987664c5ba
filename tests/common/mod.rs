//! STL files assembled byte by byte for the integration tests.
#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const HI: [u8; 4] = [0x0b, b'H', b'I', 0x0a];

fn put(block: &mut [u8], offset: usize, value: &[u8]) {
    block[offset..offset + value.len()].copy_from_slice(value);
}

pub fn gsi(dfc: &str, cct: &str) -> Vec<u8> {
    let mut block = vec![b' '; 1024];
    put(&mut block, 0, b"850");
    put(&mut block, 3, dfc.as_bytes());
    put(&mut block, 12, cct.as_bytes());
    put(&mut block, 14, b"0F");
    put(&mut block, 16, b"Le Programme");
    put(&mut block, 48, b"Episode \x82t\x82");
    put(&mut block, 255, b"1");
    put(&mut block, 256, b"00001000");
    put(&mut block, 264, b"________");
    put(&mut block, 277, b"Publisher Ltd");
    block
}

/// Final TTI block; use `ebn`/`cf` to build extension and comment blocks.
pub fn tti(sn: u16, ebn: u8, cf: u8, tci: [u8; 4], tco: [u8; 4], text: &[u8]) -> Vec<u8> {
    let mut block = vec![0u8; 128];
    put(&mut block, 1, &sn.to_le_bytes());
    block[3] = ebn;
    put(&mut block, 5, &tci);
    put(&mut block, 9, &tco);
    block[15] = cf;
    let mut field = [0x8fu8; 112];
    field[..text.len()].copy_from_slice(text);
    put(&mut block, 16, &field);
    block
}

pub fn cue(sn: u16, start_s: u8, end_s: u8, text: &[u8]) -> Vec<u8> {
    tti(sn, 0xff, 0, [0, 0, start_s, 0], [0, 0, end_s, 0], text)
}

pub fn stl(header: Vec<u8>, records: &[Vec<u8>]) -> Vec<u8> {
    let mut file = header;
    for record in records {
        file.extend_from_slice(record);
    }
    file
}

pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".stl").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
