//! Input datasets, file loading and sampling.

mod parser;
mod sampling;
mod source;

pub use parser::{Parser, ParserConfig};
pub use sampling::{SampleStrategy, SamplingPolicy};
pub use source::{Column, Dataset, SourceMetadata, Value};
