use super::types::Cue;
use crate::errors::StlParserResult;
use crate::stl::CueSource;
use log::debug;

/// Destination for decoded cues.
#[cfg_attr(test, mockall::automock)]
pub trait CueSink {
    fn write_cue(&mut self, cue: &Cue) -> StlParserResult<()>;
}

/// Pull every cue from `source` into `sink`, returning how many were written.
///
/// Stops at the first error from either side.
pub fn pump<S, K>(source: &mut S, sink: &mut K) -> StlParserResult<usize>
where
    S: CueSource + ?Sized,
    K: CueSink + ?Sized,
{
    let mut count = 0usize;
    while let Some(cue) = source.next_cue()? {
        sink.write_cue(&cue)?;
        count += 1;
    }
    debug!("Pumped {} cues", count);
    Ok(count)
}
