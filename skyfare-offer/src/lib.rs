pub mod resolver;
pub mod fields;
pub mod segments;
pub mod formatter;
pub mod extractor;
pub mod fallback;
pub mod orchestrator;

pub use formatter::{FormatterConfig, OfferFormatter};
pub use orchestrator::{SearchConfig, SearchOrchestrator};
pub use segments::NormalizedSegments;
