mod iso6937;
mod registry;

pub use iso6937::{Iso6937, ISO_6937_NAME};
pub use registry::{CodecRegistry, EncodingCodec};

/// A byte to text decoder that can be selected by name.
pub trait TextCodec: Send + Sync {
    /// Canonical name this codec registers under.
    fn name(&self) -> &str;

    /// Decode `bytes`. Decoding never fails; unmappable input is dropped or
    /// replaced, depending on the codec.
    fn decode(&self, bytes: &[u8]) -> String;
}
