use anyhow::{Result, bail};
use async_trait::async_trait;
use std::{collections::HashSet, sync::Mutex};

use gleaner::{entities::ArticleRecord, repositories::ArticleStore};

/// Store double keeping records in memory, with optional URLs whose insert
/// is refused.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<ArticleRecord>>,
    rejected_urls: HashSet<String>,
}

impl InMemoryStore {
    pub fn with_records(records: Vec<ArticleRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn rejecting(mut self, url: impl Into<String>) -> Self {
        self.rejected_urls.insert(url.into());
        self
    }

    pub fn records(&self) -> Vec<ArticleRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn find(&self, url: &str) -> Option<ArticleRecord> {
        self.records().into_iter().find(|record| record.url == url)
    }
}

#[async_trait]
impl ArticleStore for InMemoryStore {
    async fn exists(&self, url: &str, title: &str) -> Result<bool> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .any(|record| record.url == url || record.title == title))
    }

    async fn insert(&self, record: &ArticleRecord) -> Result<()> {
        if self.rejected_urls.contains(&record.url) {
            bail!("insert rejected for {}", record.url);
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
