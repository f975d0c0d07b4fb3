pub mod items_extractor;
pub mod output_structurer;
pub mod summariser;

pub use items_extractor::ItemsExtractor;
pub use output_structurer::OutputStructurer;
pub use summariser::{AbstractSummariser, SummaryStrategy, TruncationStrategy};
