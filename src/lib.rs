pub mod config;
pub mod entities;
pub mod extractor;
pub mod feed;
pub mod fetcher;
pub mod ingest;
pub mod repositories;
