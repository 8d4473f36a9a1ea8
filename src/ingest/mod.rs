pub mod context;
pub mod outcome;
pub mod pipeline;
pub mod record;


pub use context::IngestContext;
pub use outcome::{ExtractionOutcome, FallbackReason, IngestStats, ItemOutcome, SkipReason};
pub use pipeline::{FeedReport, ingest_feed, ingest_items, process_item, run};
pub use record::build_record;
