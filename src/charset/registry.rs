use super::iso6937::{Iso6937, ISO_6937_NAME};
use super::TextCodec;
use encoding_rs::Encoding;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Adapter exposing an `encoding_rs` single-byte encoding as a `TextCodec`.
pub struct EncodingCodec {
    name: &'static str,
    encoding: &'static Encoding,
}

impl EncodingCodec {
    pub fn new(name: &'static str, encoding: &'static Encoding) -> Self {
        Self { name, encoding }
    }
}

impl TextCodec for EncodingCodec {
    fn name(&self) -> &str {
        self.name
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            debug!("{}: replaced unmappable bytes in {:02X?}", self.name, bytes);
        }
        text.into_owned()
    }
}

/// Name to codec lookup table handed to the decoder.
///
/// Names are matched case-insensitively. Several names may point at the same
/// codec (aliases).
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn TextCodec>>,
}

impl CodecRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every code page an STL header can select.
    pub fn with_stl_defaults() -> Self {
        let mut registry = Self::new();

        let iso6937: Arc<dyn TextCodec> = Arc::new(Iso6937);
        registry.register_shared(ISO_6937_NAME, iso6937.clone());
        registry.register_shared("iso6937", iso6937);

        registry.register(EncodingCodec::new("iso-8859-5", encoding_rs::ISO_8859_5));
        registry.register(EncodingCodec::new("iso-8859-6", encoding_rs::ISO_8859_6));
        registry.register(EncodingCodec::new("iso-8859-7", encoding_rs::ISO_8859_7));
        registry.register(EncodingCodec::new("iso-8859-8", encoding_rs::ISO_8859_8));
        registry
    }

    /// Register a codec under its own name, replacing any previous entry.
    pub fn register<C: TextCodec + 'static>(&mut self, codec: C) {
        let name = codec.name().to_string();
        self.register_shared(&name, Arc::new(codec));
    }

    /// Register an already shared codec under `name`.
    pub fn register_shared(&mut self, name: &str, codec: Arc<dyn TextCodec>) {
        self.codecs.insert(name.to_ascii_lowercase(), codec);
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn TextCodec>> {
        self.codecs.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codecs.contains_key(&name.to_ascii_lowercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.names())
            .finish()
    }
}
