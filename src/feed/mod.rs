pub mod errors;
pub mod item;
pub mod reader;

pub use errors::FeedError;
pub use item::FeedItem;
pub use reader::{fetch_feed, parse_feed, read_feed};
