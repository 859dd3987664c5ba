mod detector;
mod extractor;
mod probe;
mod types;

pub use detector::{detect_format, format_to_string};
pub use extractor::{read_local_header, read_local_metadata, read_remote_header, read_remote_metadata};
pub use probe::{probe_local_detailed, probe_local_stl, probe_remote_detailed, probe_remote_stl};

pub use types::*;
