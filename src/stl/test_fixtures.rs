//! Byte-level builders for STL test inputs.

use super::gsi::GSI_BLOCK_SIZE;
use super::tti::{TEXT_FIELD_SIZE, TTI_BLOCK_SIZE};

pub const EBN_OFFSET: usize = 3;
pub const JC_OFFSET: usize = 14;
pub const CF_OFFSET: usize = 15;

fn put(block: &mut [u8], offset: usize, value: &[u8]) {
    block[offset..offset + value.len()].copy_from_slice(value);
}

/// A space padded GSI block with the given disk format and code table.
pub fn gsi_block(dfc: &str, cct: &str) -> Vec<u8> {
    let mut block = vec![b' '; GSI_BLOCK_SIZE];
    put(&mut block, 0, b"850");
    put(&mut block, 3, dfc.as_bytes());
    put(&mut block, 11, b"1");
    put(&mut block, 12, cct.as_bytes());
    put(&mut block, 14, b"09");
    put(&mut block, 16, b"Test Programme");
    put(&mut block, 224, b"260101");
    put(&mut block, 238, b"00003");
    put(&mut block, 243, b"00002");
    put(&mut block, 248, b"001");
    put(&mut block, 251, b"40");
    put(&mut block, 253, b"23");
    put(&mut block, 255, b"1");
    put(&mut block, 256, b"10000000");
    put(&mut block, 264, b"10000500");
    put(&mut block, 274, b"GBR");
    block
}

/// A final (EBN 0xFF) TTI block; `text` is padded with unused space.
pub fn tti_block(sn: u16, tci: [u8; 4], tco: [u8; 4], text: &[u8]) -> Vec<u8> {
    let mut block = vec![0u8; TTI_BLOCK_SIZE];
    put(&mut block, 1, &sn.to_le_bytes());
    block[EBN_OFFSET] = 0xff;
    put(&mut block, 5, &tci);
    put(&mut block, 9, &tco);
    block[13] = 0x14;
    let mut field = [0x8fu8; TEXT_FIELD_SIZE];
    field[..text.len()].copy_from_slice(text);
    put(&mut block, 16, &field);
    block
}

/// Header followed by the given records.
pub fn stl_file(header: Vec<u8>, records: &[Vec<u8>]) -> Vec<u8> {
    let mut file = header;
    for record in records {
        file.extend_from_slice(record);
    }
    file
}
