//! Infrastructure: timing instrumentation and nested info values.

mod info;
mod profiler;

pub use info::{InfoDict, InfoValue};
pub use profiler::Profiler;
