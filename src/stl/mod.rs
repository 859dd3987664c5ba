mod decoder;
pub mod gsi;
pub mod tti;

pub use decoder::{CueSource, DecoderOptions, StartOffset, StlDecoder};
pub use gsi::{read_gsi, CharacterCodeTable, DiskFormat, GsiHeader, GSI_BLOCK_SIZE};
pub use tti::{Timecode, TtiRecord, TTI_BLOCK_SIZE};

#[cfg(test)]
mod gsi_test;
#[cfg(test)]
pub(crate) mod test_fixtures;
