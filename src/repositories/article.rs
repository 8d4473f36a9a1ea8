use crate::entities::ArticleRecord;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Persistence seam of the ingestion pipeline.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// True when an article with this url OR this title is already stored.
    async fn exists(&self, url: &str, title: &str) -> Result<bool>;

    /// Stores a new article. An `Err` means nothing was written.
    async fn insert(&self, record: &ArticleRecord) -> Result<()>;
}

#[derive(Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub async fn find_by_url(&self, url: &str) -> Result<Option<ArticleRecord>> {
        let record = sqlx::query_as::<_, ArticleRecord>(
            r#"
            SELECT title, url, content, published_at, source, created_at, content_length,
                   excerpt, original_rss_content, images, full_content_failed
            FROM articles
            WHERE url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl ArticleStore for ArticleRepository {
    async fn exists(&self, url: &str, title: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM articles WHERE url = $1 OR title = $2
            )
            "#,
        )
        .bind(url)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, record: &ArticleRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO articles
                  (id, title, url, content, published_at, source, created_at,
                   content_length, excerpt, original_rss_content, images, full_content_failed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.title)
        .bind(&record.url)
        .bind(&record.content)
        .bind(record.published_at)
        .bind(&record.source)
        .bind(record.created_at)
        .bind(record.content_length)
        .bind(&record.excerpt)
        .bind(&record.original_rss_content)
        .bind(&record.images)
        .bind(record.full_content_failed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
